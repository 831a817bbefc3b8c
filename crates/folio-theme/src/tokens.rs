#![forbid(unsafe_code)]

//! Named styles derived from a theme.

use ratatui::style::{Color, Modifier, Style};

use crate::palette::{Palette, Role};
use crate::Theme;

/// Style view over one theme's palette.
///
/// Cheap to build; the app creates one per frame and hands it to every
/// section's render call.
#[derive(Debug, Clone, Copy)]
pub struct StyleTokens {
    theme: Theme,
    palette: &'static Palette,
}

impl StyleTokens {
    pub fn for_theme(theme: Theme) -> Self {
        Self {
            theme,
            palette: theme.palette(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn color(&self, role: Role) -> Color {
        self.palette.get(role)
    }

    pub fn page(&self) -> Style {
        Style::new().bg(self.palette.page_bg).fg(self.palette.body_text)
    }

    pub fn nav(&self) -> Style {
        Style::new().bg(self.palette.nav_bg).fg(self.palette.nav_text)
    }

    pub fn nav_active(&self) -> Style {
        self.nav()
            .fg(self.palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header(&self) -> Style {
        Style::new()
            .bg(self.palette.header_bg)
            .fg(self.palette.header_text)
    }

    pub fn card(&self) -> Style {
        Style::new().bg(self.palette.card_bg).fg(self.palette.body_text)
    }

    pub fn card_border(&self, focused: bool) -> Style {
        let color = if focused {
            self.palette.accent
        } else {
            self.palette.card_border
        };
        Style::new().bg(self.palette.card_bg).fg(color)
    }

    pub fn title(&self) -> Style {
        Style::new()
            .fg(self.palette.title)
            .add_modifier(Modifier::BOLD)
    }

    pub fn body(&self) -> Style {
        Style::new().fg(self.palette.body_text)
    }

    pub fn muted(&self) -> Style {
        Style::new().fg(self.palette.muted_text)
    }

    pub fn accent(&self) -> Style {
        Style::new().fg(self.palette.accent)
    }

    pub fn link(&self) -> Style {
        Style::new()
            .fg(self.palette.link)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn input(&self, focused: bool) -> Style {
        Style::new()
            .bg(self.palette.input_bg)
            .fg(self.palette.input_text)
            .add_modifier(if focused {
                Modifier::BOLD
            } else {
                Modifier::empty()
            })
    }

    pub fn input_border(&self, focused: bool) -> Style {
        let color = if focused {
            self.palette.input_focus_border
        } else {
            self.palette.input_border
        };
        Style::new().fg(color)
    }

    pub fn error(&self) -> Style {
        Style::new().fg(self.palette.error_text)
    }

    pub fn success(&self) -> Style {
        Style::new()
            .fg(self.palette.success_text)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tag(&self) -> Style {
        Style::new().bg(self.palette.tag_bg).fg(self.palette.tag_text)
    }

    pub fn featured(&self) -> Style {
        Style::new()
            .fg(self.palette.featured_badge)
            .add_modifier(Modifier::BOLD)
    }

    pub fn progress_fill(&self) -> Style {
        Style::new().fg(self.palette.progress_fill)
    }

    pub fn progress_track(&self) -> Style {
        Style::new().fg(self.palette.progress_track)
    }

    /// Button label; inverted when focused.
    pub fn button(&self, focused: bool) -> Style {
        let base = Style::new()
            .bg(self.palette.accent)
            .fg(self.palette.card_bg)
            .add_modifier(Modifier::BOLD);
        if focused {
            base.add_modifier(Modifier::REVERSED)
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_follow_theme() {
        for theme in Theme::ALL {
            let tokens = StyleTokens::for_theme(theme);
            assert_eq!(tokens.theme(), theme);
            for role in Role::ALL {
                assert_eq!(tokens.color(role), crate::resolve(theme, role));
            }
            assert_eq!(tokens.nav().bg, Some(tokens.color(Role::NavBg)));
            assert_eq!(tokens.error().fg, Some(tokens.color(Role::ErrorText)));
        }
    }

    #[test]
    fn focused_input_uses_focus_border() {
        let tokens = StyleTokens::for_theme(Theme::Dark);
        assert_eq!(
            tokens.input_border(true).fg,
            Some(tokens.color(Role::InputFocusBorder))
        );
        assert_eq!(
            tokens.input_border(false).fg,
            Some(tokens.color(Role::InputBorder))
        );
    }

    #[test]
    fn switching_theme_changes_styles() {
        let light = StyleTokens::for_theme(Theme::Light);
        let ocean = StyleTokens::for_theme(Theme::Ocean);
        assert_ne!(light.card(), ocean.card());
        assert_ne!(light.title(), ocean.title());
    }
}
