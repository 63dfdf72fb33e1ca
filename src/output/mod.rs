//! Structured report lines and the sinks that present them.
//!
//! The report core only ever produces [`Line`]s made of toned [`Span`]s.
//! Turning a tone into an escape sequence, a ratatui style, or nothing at all
//! is the sink's business.

pub mod pager;
pub mod table;
pub mod terminal;

use serde::{Deserialize, Serialize};
use std::io;

/// Presentation role of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Plain,
    Bold,
    /// Pool / erasure-set indices and section titles.
    Accent,
    Ok,
    Warn,
    Critical,
    Dim,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: Tone::Plain }
    }

    pub fn styled(text: impl Into<String>, tone: Tone) -> Self {
        Self { text: text.into(), tone }
    }

    /// Visible width in characters.
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self { spans: vec![Span::plain(text)] }
    }

    pub fn styled(text: impl Into<String>, tone: Tone) -> Self {
        Self { spans: vec![Span::styled(text, tone)] }
    }

    pub fn from_spans(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub fn push(&mut self, span: Span) -> &mut Self {
        self.spans.push(span);
        self
    }

    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    /// The line with all tones dropped.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Line::plain(text)
    }
}

impl From<String> for Line {
    fn from(text: String) -> Self {
        Line::plain(text)
    }
}

/// Destination for report lines, in order.
pub trait LineSink {
    fn emit(&mut self, line: Line) -> io::Result<()>;

    /// Called once after the last line.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Collects lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub lines: Vec<Line>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain text of everything emitted, one `\n`-terminated row per line.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.text());
            out.push('\n');
        }
        out
    }
}

impl LineSink for MemorySink {
    fn emit(&mut self, line: Line) -> io::Result<()> {
        self.lines.push(line);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// `Auto` colors only an interactive stdout with `NO_COLOR` unset.
    pub fn enabled(self, stdout_is_tty: bool) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never  => false,
            ColorChoice::Auto   => stdout_is_tty && std::env::var_os("NO_COLOR").is_none(),
        }
    }
}

/// How output reaches the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paging {
    Stream,
    Pager,
}

/// Build the sink for stdout.
pub fn stdout_sink(paging: Paging, color: ColorChoice) -> Box<dyn LineSink> {
    use crossterm::tty::IsTty;

    let is_tty = io::stdout().is_tty();
    let colored = color.enabled(is_tty);
    match paging {
        Paging::Pager if is_tty => Box::new(pager::PagerSink::new(colored)),
        Paging::Pager => {
            tracing::info!("stdout is not a terminal; streaming instead of paging");
            Box::new(terminal::TerminalSink::stdout(colored))
        }
        Paging::Stream => Box::new(terminal::TerminalSink::stdout(colored)),
    }
}
