//! Board themes

use tracing::debug;

const RESET: &str = "\x1b[0m";

/// Colour scheme applied to the terminal board
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Plain,
    Dark,
    Light,
    Neon,
    Retro,
}

impl Theme {
    /// Look up a theme by name. Unknown names render plain.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "dark" => Theme::Dark,
            "light" => Theme::Light,
            "neon" => Theme::Neon,
            "retro" => Theme::Retro,
            other => {
                debug!("Unknown theme '{}', rendering plain", other);
                Theme::Plain
            }
        }
    }

    /// ANSI prefix for board text
    pub fn style(&self) -> &'static str {
        match self {
            Theme::Plain => "",
            Theme::Dark => "\x1b[97;40m",
            Theme::Light => "\x1b[30;107m",
            Theme::Neon => "\x1b[1;95m",
            Theme::Retro => "\x1b[33m",
        }
    }

    /// ANSI suffix restoring the terminal
    pub fn reset(&self) -> &'static str {
        match self {
            Theme::Plain => "",
            _ => RESET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(Theme::from_name("NEON"), Theme::Neon);
        assert_eq!(Theme::from_name("retro"), Theme::Retro);
    }

    #[test]
    fn unknown_theme_is_plain() {
        let theme = Theme::from_name("sparkly");
        assert_eq!(theme, Theme::Plain);
        assert_eq!(theme.style(), "");
        assert_eq!(theme.reset(), "");
    }
}
