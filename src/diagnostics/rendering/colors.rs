//! ANSI styling for rendered diagnostics. `NO_COLOR` turns it off.

use std::env;

use crate::diagnostics::types::HintKind;

/// What a piece of rendered text is, independent of how it is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Header,
    Caret,
    Hint(HintKind),
}

impl Style {
    fn code(self) -> &'static str {
        match self {
            Style::Header => "\u{1b}[33m",
            Style::Caret => "\u{1b}[31m",
            Style::Hint(HintKind::Hint) => "\u{1b}[34m",
            Style::Hint(HintKind::Note) => "\u{1b}[36m",
            Style::Hint(HintKind::Help) => "\u{1b}[32m",
        }
    }
}

const RESET: &str = "\u{1b}[0m";

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn paint(&self, out: &mut String, style: Style, text: &str) {
        if self.enabled {
            out.push_str(style.code());
            out.push_str(text);
            out.push_str(RESET);
        } else {
            out.push_str(text);
        }
    }
}

pub fn colors_disabled() -> bool {
    env::var_os("NO_COLOR").is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_palette_writes_plain_text() {
        let mut out = String::new();
        Palette::new(false).paint(&mut out, Style::Caret, "^^");
        assert_eq!(out, "^^");
    }

    #[test]
    fn enabled_palette_wraps_in_escape_codes() {
        let mut out = String::new();
        Palette::new(true).paint(&mut out, Style::Hint(HintKind::Help), "Help:");
        assert_eq!(out, "\u{1b}[32mHelp:\u{1b}[0m");
    }
}
