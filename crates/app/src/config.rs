use std::path::PathBuf;

use pawpal_unsplash::UnsplashConfig;

/// Placeholder shipped in example env files.
const PLACEHOLDER_KEY: &str = "KEY-GOES-HERE";

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_PHOTO_WIDTH: u32 = 400;
const DEFAULT_THUMB_WIDTH: u32 = 120;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{0} still holds the placeholder value; set a real Unsplash access key")]
    Placeholder(&'static str),

    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub unsplash: UnsplashConfig,
    /// Where assignments are persisted; `None` keeps them in memory only.
    pub data_dir: Option<PathBuf>,
    /// Width the current photo is requested at, in pixels.
    pub photo_width: u32,
    /// Width of assigned photos in the list, in pixels.
    pub thumb_width: u32,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                    |
    /// |-----------------------|----------------------------|
    /// | `UNSPLASH_ACCESS_KEY` | required                   |
    /// | `UNSPLASH_API_URL`    | `https://api.unsplash.com` |
    /// | `PAWPAL_DATA_DIR`     | `./data` (empty disables persistence) |
    /// | `PAWPAL_PHOTO_WIDTH`  | `400`                      |
    /// | `PAWPAL_THUMB_WIDTH`  | `120`                      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_key = lookup("UNSPLASH_ACCESS_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::Missing("UNSPLASH_ACCESS_KEY"))?;
        if access_key == PLACEHOLDER_KEY {
            return Err(ConfigError::Placeholder("UNSPLASH_ACCESS_KEY"));
        }

        let mut unsplash = UnsplashConfig::new(access_key);
        if let Some(api_url) = lookup("UNSPLASH_API_URL").filter(|url| !url.trim().is_empty()) {
            unsplash = unsplash.with_api_url(api_url.trim());
        }

        let data_dir = match lookup("PAWPAL_DATA_DIR") {
            Some(dir) if dir.trim().is_empty() => None,
            Some(dir) => Some(PathBuf::from(dir)),
            None => Some(PathBuf::from(DEFAULT_DATA_DIR)),
        };

        let photo_width = parse_width(&lookup, "PAWPAL_PHOTO_WIDTH", DEFAULT_PHOTO_WIDTH)?;
        let thumb_width = parse_width(&lookup, "PAWPAL_THUMB_WIDTH", DEFAULT_THUMB_WIDTH)?;

        Ok(Self {
            unsplash,
            data_dir,
            photo_width,
            thumb_width,
        })
    }
}

fn parse_width<F>(lookup: &F, var: &'static str, default: u32) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => match value.trim().parse::<u32>() {
            Ok(width) if width > 0 => Ok(width),
            _ => Err(ConfigError::InvalidNumber { var, value }),
        },
    }
}
