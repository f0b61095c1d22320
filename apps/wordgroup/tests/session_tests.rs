//! Integration tests for the interactive session.
//!
//! Runs the session against a canned word source and captures the text
//! output in memory.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use std::future::Future;
use wordgroup::session::{self, handle_line};
use wordgroup::{ClientError, Flow, SessionState, TextSink, WordSource};
use wordgroup_core::{Relation, WordEntry};

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Knows rhymes for "time" and similar words for "fast"; "offline" fails.
struct CannedSource;

impl WordSource for CannedSource {
    fn lookup(
        &self,
        relation: Relation,
        word: &str,
    ) -> impl Future<Output = Result<Vec<WordEntry>, ClientError>> + Send {
        let result = match (relation, word) {
            (_, "offline") => Err(ClientError::ConnectionFailed("canned".to_string())),
            (Relation::Rhymes, "time") => Ok(vec![
                WordEntry::new("rhyme").with_syllables(1),
                WordEntry::new("sublime").with_syllables(2),
                WordEntry::new("climb").with_syllables(1),
            ]),
            (Relation::MeansLike, "fast") => {
                Ok(vec![WordEntry::new("quick"), WordEntry::new("rapid")])
            }
            _ => Ok(Vec::new()),
        };
        std::future::ready(result)
    }
}

async fn run_script(script: &str) -> (SessionState, String) {
    let mut sink = TextSink::new(Vec::new());
    let state = session::run(&CannedSource, &mut sink, script.as_bytes())
        .await
        .unwrap();
    (state, String::from_utf8(sink.into_inner()).unwrap())
}

// =============================================================================
// LOOKUP TESTS
// =============================================================================

#[tokio::test]
async fn test_bare_word_shows_rhymes() {
    let (_, output) = run_script("time\n").await;

    assert_eq!(
        output,
        "...loading\n\
         Words that rhyme with time:\n\
         \n\
         Syllables: 1\n\
         ------------\n\
         \x20 - rhyme\n\
         \x20 - climb\n\
         \n\
         Syllables: 2\n\
         ------------\n\
         \x20 - sublime\n"
    );
}

#[tokio::test]
async fn test_similar_command() {
    let (_, output) = run_script("s fast\n").await;

    assert!(output.starts_with("...loading\n"));
    assert!(output.contains("Words with a similar meaning to fast:\n  - quick\n  - rapid\n"));
}

#[tokio::test]
async fn test_no_results() {
    let (_, output) = run_script("rhymes orange\n").await;

    assert!(output.ends_with("Words that rhyme with orange:\n(no results)\n"));
}

#[tokio::test]
async fn test_failed_lookup_keeps_session_going() {
    let (_, output) = run_script("offline\ns fast\n").await;

    assert!(!output.contains("offline:"));
    assert!(output.contains("  - quick"));
}

// =============================================================================
// SAVED WORDS TESTS
// =============================================================================

#[tokio::test]
async fn test_save_and_show_saved() {
    let (state, output) = run_script("saved\nsave rhyme\nsave climb\nsaved\n").await;

    assert_eq!(state.saved.words(), ["rhyme", "climb"]);
    assert_eq!(
        output,
        "Saved words: (none)\n\
         Saved words: rhyme\n\
         Saved words: rhyme, climb\n\
         Saved words: rhyme, climb\n"
    );
}

#[tokio::test]
async fn test_incomplete_command_renders_nothing() {
    let (state, output) = run_script("save\nrhymes\n\n").await;

    assert!(state.saved.is_empty());
    assert!(output.is_empty());
}

#[tokio::test]
async fn test_bare_command_with_argument_is_not_a_lookup() {
    let (state, output) = run_script("help me
saved foo
quit now
save one
").await;

    // Nothing rendered and the session kept reading past "quit now".
    assert_eq!(state.saved.words(), ["one"]);
    assert_eq!(output, "Saved words: one\n");
}

// =============================================================================
// CONTROL FLOW TESTS
// =============================================================================

#[tokio::test]
async fn test_quit_stops_reading() {
    let (state, output) = run_script("save one\nquit\nsave two\n").await;

    assert_eq!(state.saved.words(), ["one"]);
    assert!(!output.contains("two"));
}

#[tokio::test]
async fn test_handle_line_flow() {
    let mut state = SessionState::new();
    let mut sink = TextSink::new(Vec::new());

    let flow = handle_line(&mut state, &CannedSource, &mut sink, "help")
        .await
        .unwrap();
    assert_eq!(flow, Flow::Continue);

    let flow = handle_line(&mut state, &CannedSource, &mut sink, "exit")
        .await
        .unwrap();
    assert_eq!(flow, Flow::Quit);

    let output = String::from_utf8(sink.into_inner()).unwrap();
    assert!(output.starts_with("Commands:\n"));
    assert!(output.contains("  - quit\n"));
}
