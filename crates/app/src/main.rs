//! `pawpal` -- assign random dog photos to email addresses.
//!
//! Shows a random dog photo from Unsplash; typing `assign <email>` files it
//! under that address and fetches the next one. Assignments are saved to
//! disk and reloaded on start.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default                    | Description                          |
//! |------------------------|----------|----------------------------|--------------------------------------|
//! | `UNSPLASH_ACCESS_KEY`  | yes      | --                         | Unsplash API access key              |
//! | `UNSPLASH_API_URL`     | no       | `https://api.unsplash.com` | API base URL                         |
//! | `PAWPAL_DATA_DIR`      | no       | `./data`                   | Assignment storage; empty keeps them in memory |
//! | `PAWPAL_PHOTO_WIDTH`   | no       | `400`                      | Width of the current photo URL       |
//! | `PAWPAL_THUMB_WIDTH`   | no       | `120`                      | Width of assigned photo URLs         |
//! | `RUST_LOG`             | no       | `pawpal_app=info,...`      | Log filter, written to stderr        |

use pawpal_app::config::AppConfig;
use pawpal_app::terminal;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pawpal_app=info,pawpal_unsplash=info,pawpal_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    tracing::info!(
        api_url = %config.unsplash.api_url,
        data_dir = ?config.data_dir,
        "Starting pawpal",
    );

    if let Err(e) = terminal::run(config).await {
        tracing::error!(error = ?e, "pawpal exited with an error");
        std::process::exit(1);
    }
}
