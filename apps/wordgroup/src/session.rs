//! # Interactive Session
//!
//! Line-oriented front end: each input line is one user action.
//!
//! ## Commands
//!
//! - `rhymes <word>` / `r <word>` - show rhymes grouped by syllable count
//! - `similar <word>` / `s <word>` - show words with a similar meaning
//! - `<word>` - same as `rhymes <word>`
//! - `save <word>` - add a word to the saved list
//! - `saved` - show the saved list
//! - `help` - list commands
//! - `quit` / `exit` - leave
//!
//! All mutable state lives in [`SessionState`], passed explicitly to
//! [`handle_line`].

use crate::AppError;
use crate::client::WordSource;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use wordgroup_core::{Body, Page, Relation, RenderSink, SavedWords};

/// State owned by one interactive session.
#[derive(Debug, Default)]
pub struct SessionState {
    pub saved: SavedWords,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Whether the session should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Lookup(Relation, String),
    Save(String),
    ShowSaved,
    Help,
    Quit,
    Empty,
    /// A known command missing its argument.
    Incomplete(&'static str),
    /// A command that takes no argument, given one.
    UnexpectedArgument(&'static str),
}

impl Command {
    /// Parse an input line.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }

        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        let with_word = |name: &'static str, build: fn(String) -> Self| {
            if rest.is_empty() {
                Self::Incomplete(name)
            } else {
                build(rest.to_string())
            }
        };

        let bare = |name: &'static str, command: Self| {
            if rest.is_empty() {
                command
            } else {
                Self::UnexpectedArgument(name)
            }
        };

        match head.to_ascii_lowercase().as_str() {
            "rhymes" | "r" => with_word("rhymes", |w| Self::Lookup(Relation::Rhymes, w)),
            "similar" | "s" => with_word("similar", |w| Self::Lookup(Relation::MeansLike, w)),
            "save" => with_word("save", Self::Save),
            "saved" => bare("saved", Self::ShowSaved),
            "help" | "?" => bare("help", Self::Help),
            "quit" | "exit" => bare("quit", Self::Quit),
            _ => Self::Lookup(Relation::Rhymes, line.to_string()),
        }
    }
}

/// Page listing the session commands.
fn help_page() -> Page {
    Page {
        description: "Commands:".to_string(),
        body: Body::List(
            [
                "rhymes <word> (or r <word>, or just <word>)",
                "similar <word> (or s <word>)",
                "save <word>",
                "saved",
                "help",
                "quit",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        ),
    }
}

/// Handle one input line.
///
/// Lookup failures are logged and leave the previous output in place; only
/// sink errors end the session.
pub async fn handle_line<S, R>(
    state: &mut SessionState,
    source: &S,
    sink: &mut R,
    line: &str,
) -> Result<Flow, AppError>
where
    S: WordSource,
    R: RenderSink,
    AppError: From<R::Error>,
{
    match Command::parse(line) {
        Command::Empty => {}
        Command::Quit => return Ok(Flow::Quit),
        Command::Help => sink.render(&help_page())?,
        Command::Incomplete(name) => {
            tracing::warn!("'{}' needs a word, e.g. '{} time'", name, name);
        }
        Command::UnexpectedArgument(name) => {
            tracing::warn!("'{}' takes no argument", name);
        }
        Command::ShowSaved => sink.render_saved(&state.saved)?,
        Command::Save(word) => match state.saved.add(&word) {
            Ok(()) => sink.render_saved(&state.saved)?,
            Err(e) => tracing::warn!("Cannot save word: {}", e),
        },
        Command::Lookup(relation, word) => {
            sink.render(&Page::loading())?;
            match source.lookup(relation, &word).await {
                Ok(entries) => match Page::for_relation(relation, &word, entries) {
                    Ok(page) => sink.render(&page)?,
                    Err(e) => {
                        tracing::error!("Cannot build {} page for '{}': {}", relation, word, e);
                    }
                },
                Err(e) => {
                    tracing::error!("Lookup of {} for '{}' failed: {}", relation, word, e);
                }
            }
        }
    }
    Ok(Flow::Continue)
}

/// Run a session over `input` until it ends or `quit` is entered.
///
/// Returns the final state so callers can inspect saved words.
pub async fn run<S, R, I>(source: &S, sink: &mut R, input: I) -> Result<SessionState, AppError>
where
    S: WordSource,
    R: RenderSink,
    AppError: From<R::Error>,
    I: AsyncBufRead + Unpin,
{
    let mut state = SessionState::new();
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        if handle_line(&mut state, source, sink, &line).await? == Flow::Quit {
            break;
        }
    }

    tracing::info!(saved = state.saved.len(), "Session ended");
    Ok(state)
}
