use crate::input::{handle_key, Action};
use crate::output::Line;
use crate::ui::theme::Theme;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::{Line as TuiLine, Span as TuiSpan},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io;
use std::panic;
use std::sync::Once;

/// Scroll position over a fixed number of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub offset: usize,
    pub height: usize,
    pub total:  usize,
}

impl Viewport {
    pub fn new(total: usize) -> Self {
        Self { offset: 0, height: 0, total }
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.height)
    }

    pub fn resize(&mut self, height: usize) {
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn apply(&mut self, action: Action) {
        let half = (self.height / 2).max(1);
        self.offset = match action {
            Action::LineUp       => self.offset.saturating_sub(1),
            Action::LineDown     => self.offset + 1,
            Action::HalfPageUp   => self.offset.saturating_sub(half),
            Action::HalfPageDown => self.offset + half,
            Action::JumpTop      => 0,
            Action::JumpBottom   => self.max_offset(),
            Action::Quit | Action::None => self.offset,
        }
        .min(self.max_offset());
    }

    /// Percentage of the document above the bottom edge of the view.
    pub fn position_pct(&self) -> usize {
        if self.total == 0 { return 100; }
        ((self.offset + self.height).min(self.total) * 100) / self.total
    }
}

/// Show `lines` in a full-screen scrollable view until the user quits.
///
/// The terminal is restored on every exit path, including a panic.
pub fn run(lines: &[Line], theme: &Theme) -> Result<()> {
    install_panic_hook();
    guarded(enter_terminal, || view(lines, theme), restore_terminal)
}

/// Run `body` after `enter`; `leave` runs whether either of them failed.
fn guarded<T>(
    enter: impl FnOnce() -> Result<()>,
    body:  impl FnOnce() -> Result<T>,
    leave: impl FnOnce() -> Result<()>,
) -> Result<T> {
    let result = enter().and_then(|_| body());
    let left = leave();
    let value = result?;
    left?;
    Ok(value)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal();
            original_hook(info);
        }));
    });
}

fn enter_terminal() -> Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    Ok(())
}

fn view(lines: &[Line], theme: &Theme) -> Result<()> {
    let mut term = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let text: Vec<TuiLine> = lines.iter().map(|l| to_tui_line(l, theme)).collect();
    let result = event_loop(&mut term, &text, theme);
    term.show_cursor()?;
    result
}

fn event_loop<B: ratatui::backend::Backend>(
    term:  &mut Terminal<B>,
    text:  &[TuiLine<'static>],
    theme: &Theme,
) -> Result<()> {
    let mut view = Viewport::new(text.len());
    loop {
        term.draw(|f| render(f, text, &mut view, theme))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press { continue; }
            match handle_key(key) {
                Action::Quit => return Ok(()),
                action       => view.apply(action),
            }
        }
    }
}

fn render(f: &mut Frame, text: &[TuiLine<'static>], view: &mut Viewport, theme: &Theme) {
    let [body, footer] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)])
        .areas(f.area());
    view.resize(body.height as usize);

    let visible: Vec<TuiLine> = text
        .iter()
        .skip(view.offset)
        .take(view.height)
        .cloned()
        .collect();
    f.render_widget(Paragraph::new(visible), body);
    render_footer(f, footer, view, theme);
}

fn render_footer(f: &mut Frame, area: Rect, view: &Viewport, theme: &Theme) {
    let keys: &[(&str, &str)] = &[
        ("↑↓/jk", "Scroll"), ("Space", "Page down"), ("g/G", "Top/Bot"), ("q", "Quit"),
    ];
    let mut spans: Vec<TuiSpan> = vec![TuiSpan::styled(" ", theme.footer_bg)];
    for (key, desc) in keys {
        spans.push(TuiSpan::styled(format!(" {} ", key), theme.footer_key));
        spans.push(TuiSpan::styled(format!("{}  ", desc), theme.footer_text));
    }
    spans.push(TuiSpan::styled(format!(" {}% ", view.position_pct()), theme.footer_text));
    f.render_widget(Paragraph::new(TuiLine::from(spans)).style(theme.footer_bg), area);
}

fn to_tui_line(line: &Line, theme: &Theme) -> TuiLine<'static> {
    TuiLine::from(
        line.spans
            .iter()
            .map(|s| TuiSpan::styled(s.text.clone(), theme.style(s.tone)))
            .collect::<Vec<_>>(),
    )
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
