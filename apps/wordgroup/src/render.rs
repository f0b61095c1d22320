//! # Terminal Rendering
//!
//! Plain-text [`RenderSink`] over any `io::Write`.

use std::io::{self, Write};
use wordgroup_core::{Body, Page, RenderSink, SavedWords};

/// Writes pages as indented text.
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn word_lines(&mut self, words: &[String]) -> io::Result<()> {
        for word in words {
            writeln!(self.out, "  - {word}")?;
        }
        Ok(())
    }
}

impl TextSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> RenderSink for TextSink<W> {
    type Error = io::Error;

    fn render(&mut self, page: &Page) -> io::Result<()> {
        writeln!(self.out, "{}", page.description)?;

        match &page.body {
            Body::Loading => {}
            Body::NoResults => writeln!(self.out, "(no results)")?,
            Body::Sections(sections) => {
                for section in sections {
                    writeln!(self.out)?;
                    writeln!(self.out, "{}", section.heading)?;
                    writeln!(self.out, "{}", "-".repeat(section.heading.chars().count()))?;
                    self.word_lines(&section.words)?;
                }
            }
            Body::List(words) => self.word_lines(words)?,
        }

        self.out.flush()
    }

    fn render_saved(&mut self, saved: &SavedWords) -> io::Result<()> {
        writeln!(self.out, "Saved words: {}", saved.summary())?;
        self.out.flush()
    }
}
