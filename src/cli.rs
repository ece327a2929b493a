//! Command-line surface
//!
//! Thin shell over the core: prediction lookup, cache import and an
//! interactive chat session on stdin/stdout.

use crate::config::AppConfig;
use crate::conversation::{SessionContext, SessionState};
use crate::dispatcher::RequestDispatcher;
use crate::prediction::{CategoryKey, ContentCache, PredictionMap, PREDICTION_KEY};
use crate::responder::{HttpResponder, LoggingResponder};
use crate::runtime::{ConversationController, SessionHandle};
use crate::store::{KeyValueStore, SqliteStore};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// `PanditAI` predictions and conversational readings.
#[derive(Parser, Debug)]
#[command(name = "panditai", version, about)]
pub struct CliArgs {
    /// Base URL of the responder (the exchange goes to `<url>/chat`).
    #[arg(long, global = true)]
    pub responder_url: Option<String>,

    /// Seconds to wait for a reply before giving up.
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Chart context sent with every question.
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// Path of the prediction store.
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the cached prediction for one category, or all of them.
    Predict { category: Option<CategoryKey> },
    /// Store a JSON prediction blob (`{"health": "..."}`) as the cache.
    Import { file: PathBuf },
    /// Start an interactive reading. `/cancel` withdraws a question, `/quit` exits.
    Chat,
}

impl CliArgs {
    /// Overlay command-line flags on `config`
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(url) = &self.responder_url {
            config.responder.base_url.clone_from(url);
        }
        if let Some(secs) = self.timeout_secs.filter(|s| *s > 0) {
            config.responder.timeout = Duration::from_secs(secs);
        }
        if let Some(context) = &self.context {
            config.responder.context.clone_from(context);
        }
        if let Some(store) = &self.store {
            config.store_path.clone_from(store);
        }
        config
    }
}

pub async fn run(command: Command, config: &AppConfig) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Predict { category } => {
            predict(config, category);
            Ok(())
        }
        Command::Import { file } => import(config, &file),
        Command::Chat => chat(config).await,
    }
}

// ============================================================
// Predictions
// ============================================================

fn load_cache(config: &AppConfig) -> ContentCache {
    match SqliteStore::open(&config.store_path) {
        Ok(store) => ContentCache::load(&store),
        Err(e) => {
            tracing::warn!(path = %config.store_path.display(), error = %e, "Opening prediction store failed");
            ContentCache::default()
        }
    }
}

fn predict(config: &AppConfig, category: Option<CategoryKey>) {
    let cache = load_cache(config);
    match category {
        Some(key) => println!("{}", cache.get(key)),
        None => {
            if !CategoryKey::ALL.iter().any(|key| cache.contains(*key)) {
                println!("No predictions stored yet; load some with `panditai import FILE`.\n");
            }
            for key in CategoryKey::ALL {
                println!("{}\n  {}\n", key.title(), cache.get(key));
            }
        }
    }
}

fn import(config: &AppConfig, file: &Path) -> Result<(), Box<dyn Error>> {
    let blob = std::fs::read_to_string(file)?;
    let predictions = PredictionMap::parse(&blob)?;

    let store = SqliteStore::open(&config.store_path)?;
    store.set(PREDICTION_KEY, &predictions.to_blob())?;

    tracing::info!(
        path = %config.store_path.display(),
        categories = predictions.len(),
        "Prediction cache imported"
    );
    println!(
        "Stored {} of {} categories.",
        predictions.len(),
        CategoryKey::ALL.len()
    );
    Ok(())
}

// ============================================================
// Chat
// ============================================================

/// Prints transcript turns as they are published
struct TranscriptPrinter {
    printed: usize,
    was_pending: bool,
}

impl TranscriptPrinter {
    fn new() -> Self {
        Self {
            printed: 0,
            was_pending: false,
        }
    }

    fn render(&mut self, state: &SessionState, out: &mut impl Write) -> io::Result<()> {
        for message in state.transcript.since(self.printed) {
            writeln!(out, "{message}\n")?;
        }
        self.printed = state.transcript.len();

        if let Some(indicator) = state.pending_indicator() {
            if !self.was_pending {
                writeln!(out, "{indicator}")?;
            }
        }
        self.was_pending = state.pending;
        out.flush()
    }
}

async fn chat(config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let responder = LoggingResponder::new(HttpResponder::new(&config.responder)?);
    let dispatcher = RequestDispatcher::new(responder, config.responder.timeout);
    let context = SessionContext::new(
        uuid::Uuid::new_v4().to_string(),
        config.responder.context.clone(),
    );
    let (controller, handle) = ConversationController::new(context, dispatcher);
    let session = tokio::spawn(controller.run());

    let input = BufReader::new(tokio::io::stdin());
    converse(handle, input, &mut io::stdout()).await?;

    session.await?;
    Ok(())
}

/// Feed input lines into the session and print turns as they land.
///
/// Each submission is awaited until the session has accepted it. At end of
/// input an outstanding question is still answered before returning.
async fn converse<I, W>(
    mut handle: SessionHandle,
    input: I,
    out: &mut W,
) -> Result<(), Box<dyn Error>>
where
    I: AsyncBufRead + Unpin,
    W: Write,
{
    let mut updates = handle.clone();
    let mut printer = TranscriptPrinter::new();
    printer.render(&handle.snapshot(), out)?;

    let mut lines = input.lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    if handle.snapshot().pending {
                        let state = handle.wait_for(|s| !s.pending).await?;
                        printer.render(&state, out)?;
                    }
                    break;
                };
                match line.trim() {
                    "" => {}
                    "/quit" => break,
                    "/cancel" => {
                        if handle.snapshot().pending {
                            handle.cancel().await?;
                            let state = handle.wait_for(|s| !s.pending).await?;
                            printer.render(&state, out)?;
                        }
                    }
                    _ if handle.snapshot().pending => {
                        writeln!(out, "(still consulting the stars; /cancel to withdraw the question)")?;
                    }
                    _ => {
                        let previous = handle.snapshot().ticket;
                        handle.submit(line).await?;
                        let state = handle.wait_for(|s| s.ticket > previous).await?;
                        printer.render(&state, out)?;
                    }
                }
            }
            state = updates.changed() => printer.render(&state?, out)?,
        }
    }
    Ok(())
}
