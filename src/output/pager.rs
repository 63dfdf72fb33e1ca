use super::terminal::TerminalSink;
use super::{Line, LineSink};
use crate::ui::{pager, theme::Theme};
use std::io;

/// Buffers the whole report, then hands it to the full-screen viewport.
pub struct PagerSink {
    lines:   Vec<Line>,
    colored: bool,
}

impl PagerSink {
    pub fn new(colored: bool) -> Self {
        Self { lines: Vec::new(), colored }
    }
}

impl LineSink for PagerSink {
    fn emit(&mut self, line: Line) -> io::Result<()> {
        self.lines.push(line);
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        if self.lines.is_empty() {
            return Ok(());
        }
        let theme = if self.colored { Theme::default() } else { Theme::mono() };
        let lines = std::mem::take(&mut self.lines);
        if let Err(err) = pager::run(&lines, &theme) {
            tracing::warn!(error = %err, "pager failed; printing report directly");
            let mut out = TerminalSink::stdout(self.colored);
            for line in lines {
                out.emit(line)?;
            }
            out.finish()?;
        }
        Ok(())
    }
}
