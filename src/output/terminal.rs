use super::{Line, LineSink, Tone};
use crossterm::style::{Color, Stylize};
use std::io::{self, Write};

/// Streams lines to a writer, styling tones with ANSI colors when enabled.
pub struct TerminalSink<W: Write> {
    out:     W,
    colored: bool,
}

impl TerminalSink<io::Stdout> {
    pub fn stdout(colored: bool) -> Self {
        Self::new(io::stdout(), colored)
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, colored: bool) -> Self {
        Self { out, colored }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Foreground color and boldness for a tone.
fn ansi_style(tone: Tone) -> (Option<Color>, bool) {
    match tone {
        Tone::Plain    => (None, false),
        Tone::Bold     => (None, true),
        Tone::Accent   => (Some(Color::Blue), false),
        Tone::Ok       => (Some(Color::Green), false),
        Tone::Warn     => (Some(Color::Yellow), false),
        Tone::Critical => (Some(Color::Red), false),
        Tone::Dim      => (Some(Color::DarkGrey), false),
    }
}

impl<W: Write> LineSink for TerminalSink<W> {
    fn emit(&mut self, line: Line) -> io::Result<()> {
        for span in &line.spans {
            let (fg, bold) = ansi_style(span.tone);
            if !self.colored || (fg.is_none() && !bold) {
                self.out.write_all(span.text.as_bytes())?;
                continue;
            }
            let mut styled = span.text.as_str().stylize();
            if let Some(c) = fg { styled = styled.with(c); }
            if bold { styled = styled.bold(); }
            write!(self.out, "{}", styled)?;
        }
        self.out.write_all(b"\n")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
