//! Interactive terminal loop.
//!
//! One task owns the [`Session`]. Photo fetches run as spawned tasks and
//! report back over a channel, so input handling and fetch completion are
//! serialized through a single `select!` loop.

use std::io::Write as _;

use anyhow::Context as _;
use pawpal_core::{FileStore, KeyValueStore, MemoryStore, PhotoRecord};
use pawpal_unsplash::{PhotoSource, PhotoSourceError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::command::{self, Command, HELP};
use crate::config::AppConfig;
use crate::render;
use crate::session::Session;

type FetchResult = Result<PhotoRecord, PhotoSourceError>;

/// What the loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Print this text and wait for the next line.
    Reply(String),
    /// The current photo was assigned; fetch its replacement.
    Assigned,
    /// Fetch another photo.
    FetchNext,
    Quit,
}

/// Run the prompt until `quit` or end of input.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let store: Box<dyn KeyValueStore + Send> = match &config.data_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "Persisting assignments to disk");
            Box::new(FileStore::new(dir))
        }
        None => {
            tracing::warn!("PAWPAL_DATA_DIR is empty; assignments will not survive a restart");
            Box::new(MemoryStore::new())
        }
    };

    let mut session = Session::new(store).context("Failed to load saved assignments")?;
    let thumb_width = config.thumb_width;
    session.ledger_mut().add_observer(move |email, photos| {
        println!("{}", render::assignment_entry(email, photos, thumb_width));
    });

    let source =
        PhotoSource::new(config.unsplash.clone()).context("Failed to build Unsplash client")?;
    let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel::<FetchResult>();

    println!("{HELP}");
    if !session.ledger().is_empty() {
        println!("\n{}", render::assignment_list(session.ledger(), thumb_width));
    }
    println!("\nFetching a photo...");
    start_fetch(&mut session, &source, &fetch_tx);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        show_prompt(&session)?;

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    tracing::debug!("Input closed");
                    break;
                };
                let command = match command::parse(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(e) => {
                        println!("{e}. Type `help` for a list of commands.");
                        continue;
                    }
                };
                match apply(&mut session, command, thumb_width) {
                    Outcome::Reply(text) => println!("{text}"),
                    Outcome::Assigned | Outcome::FetchNext => {
                        println!("Fetching the next photo...");
                        start_fetch(&mut session, &source, &fetch_tx);
                    }
                    Outcome::Quit => break,
                }
            }
            Some(result) = fetch_rx.recv() => match result {
                Ok(photo) => {
                    let photo = session.photo_arrived(photo);
                    println!("\n{}", render::current_photo(photo, config.photo_width));
                }
                Err(e) => {
                    tracing::error!(error = %e, "Photo fetch failed");
                    session.fetch_failed();
                    println!("\nCould not fetch a photo: {e}\nType `next` to try again.");
                }
            },
        }
    }

    tracing::info!(emails = session.ledger().len(), "Shutting down");
    Ok(())
}

/// Apply one command to the session.
pub fn apply(session: &mut Session, command: Command, thumb_width: u32) -> Outcome {
    match command {
        Command::Assign(email) => match session.assign(&email) {
            Ok(()) => Outcome::Assigned,
            Err(refused) => Outcome::Reply(refused.to_string()),
        },
        Command::Check(email) => match session.check_email(&email) {
            Some(warning) => Outcome::Reply(warning),
            None if email.is_empty() => Outcome::Reply("No email entered".to_string()),
            None => Outcome::Reply(format!("{email} looks fine.")),
        },
        Command::List => Outcome::Reply(render::assignment_list(session.ledger(), thumb_width)),
        Command::Next if session.fetch_in_flight() => {
            Outcome::Reply("A photo is already on its way.".to_string())
        }
        Command::Next => Outcome::FetchNext,
        Command::Help => Outcome::Reply(HELP.to_string()),
        Command::Quit => Outcome::Quit,
    }
}

fn start_fetch(
    session: &mut Session,
    source: &PhotoSource,
    fetch_tx: &mpsc::UnboundedSender<FetchResult>,
) {
    if !session.begin_fetch() {
        return;
    }
    let source = source.clone();
    let fetch_tx = fetch_tx.clone();
    tokio::spawn(async move {
        // The receiver only closes on shutdown.
        let _ = fetch_tx.send(source.fetch_random().await);
    });
}

fn show_prompt(session: &Session) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", render::prompt(&session.blocked_by()))?;
    stdout.flush()?;
    Ok(())
}
