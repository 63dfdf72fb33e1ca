use crate::output::Tone;
use ratatui::style::{Color, Modifier, Style};

// ── Theme struct ────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Theme {
    pub text:        Style,
    pub bold:        Style,
    pub accent:      Style,
    pub ok:          Style,
    pub warn:        Style,
    pub crit:        Style,
    pub dim:         Style,
    pub footer_bg:   Style,
    pub footer_key:  Style,
    pub footer_text: Style,
}

impl Theme {
    /// Colorless variant for `--color never` / `NO_COLOR`.
    pub fn mono() -> Self {
        let base = Style::default();
        Self {
            text:        base,
            bold:        base.add_modifier(Modifier::BOLD),
            accent:      base,
            ok:          base,
            warn:        base,
            crit:        base.add_modifier(Modifier::BOLD),
            dim:         base,
            footer_bg:   base.add_modifier(Modifier::REVERSED),
            footer_key:  base.add_modifier(Modifier::REVERSED | Modifier::BOLD),
            footer_text: base.add_modifier(Modifier::REVERSED),
        }
    }

    pub fn style(&self, tone: Tone) -> Style {
        match tone {
            Tone::Plain    => self.text,
            Tone::Bold     => self.bold,
            Tone::Accent   => self.accent,
            Tone::Ok       => self.ok,
            Tone::Warn     => self.warn,
            Tone::Critical => self.crit,
            Tone::Dim      => self.dim,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text:        Style::default().fg(Color::White),
            bold:        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            accent:      Style::default().fg(Color::LightBlue),
            ok:          Style::default().fg(Color::Green),
            warn:        Style::default().fg(Color::Yellow),
            crit:        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            dim:         Style::default().fg(Color::DarkGray),
            footer_bg:   Style::default().bg(Color::DarkGray).fg(Color::White),
            footer_key:  Style::default().bg(Color::DarkGray).fg(Color::Cyan).add_modifier(Modifier::BOLD),
            footer_text: Style::default().bg(Color::DarkGray).fg(Color::Gray),
        }
    }
}
