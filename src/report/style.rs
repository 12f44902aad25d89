//! Console colors for the run report
//!
//! Every piece of user-facing text is painted by [`Role`]. A monochrome
//! [`Palette`] returns text unchanged, which is what tests and pipes see.

use crossterm::style::{Attribute, Attributes, Color, ContentStyle};
use std::fmt::Display;

/// What a piece of report text is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Plain,
    Error,
    Warning,
    Success,
    /// File names and other secondary text
    Muted,
    /// Source characters covered by a diagnostic
    Highlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(color: bool) -> Self {
        Self { enabled: color }
    }

    /// Monochrome palette
    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn style(role: Role) -> ContentStyle {
        let bold = Attributes::from(Attribute::Bold);
        match role {
            Role::Plain => ContentStyle::new(),
            Role::Error => ContentStyle {
                foreground_color: Some(Color::DarkRed),
                attributes: bold,
                ..ContentStyle::new()
            },
            Role::Warning => ContentStyle {
                foreground_color: Some(Color::DarkYellow),
                attributes: bold,
                ..ContentStyle::new()
            },
            Role::Success => ContentStyle {
                foreground_color: Some(Color::DarkGreen),
                attributes: bold,
                ..ContentStyle::new()
            },
            Role::Muted => ContentStyle {
                foreground_color: Some(Color::DarkGrey),
                ..ContentStyle::new()
            },
            Role::Highlight => ContentStyle {
                background_color: Some(Color::DarkRed),
                ..ContentStyle::new()
            },
        }
    }

    /// `text` wrapped in the escape sequences for `role`.
    pub fn paint(&self, role: Role, text: impl Display) -> String {
        if self.enabled && role != Role::Plain {
            Self::style(role).apply(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_palette_leaves_text_alone() {
        let palette = Palette::plain();
        assert_eq!(palette.paint(Role::Error, "oops [1:2-3]"), "oops [1:2-3]");
        assert_eq!(palette.paint(Role::Highlight, " "), " ");
    }

    #[test]
    fn test_colored_palette_wraps_text() {
        let painted = Palette::new(true).paint(Role::Error, "x");
        assert!(painted.contains('x'));
        assert!(painted.starts_with('\u{1b}'));
        assert_ne!(painted, "x");
    }

    #[test]
    fn test_plain_role_is_never_painted() {
        assert_eq!(Palette::new(true).paint(Role::Plain, "text"), "text");
    }
}
