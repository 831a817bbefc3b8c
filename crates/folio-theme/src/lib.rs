#![forbid(unsafe_code)]

//! Themes and semantic color roles for Folio.
//!
//! The active [`Theme`] is plain data. Views never look it up from ambient
//! state; they receive a [`StyleTokens`] value built from it and ask for
//! styles by role. Every `(theme, role)` pair resolves through the
//! [`PALETTES`] table, so the resolver is total by construction.

pub mod palette;
pub mod tokens;

use std::fmt;

pub use palette::{PALETTES, Palette, Role, resolve};
pub use tokens::StyleTokens;

/// Built-in themes, in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Ocean,
}

impl Theme {
    pub const COUNT: usize = 3;

    pub const ALL: [Theme; Self::COUNT] = [Theme::Light, Theme::Dark, Theme::Ocean];

    pub const fn index(self) -> usize {
        match self {
            Theme::Light => 0,
            Theme::Dark => 1,
            Theme::Ocean => 2,
        }
    }

    pub const fn from_index(idx: usize) -> Self {
        Self::ALL[idx % Self::COUNT]
    }

    /// Successor in the fixed cycle Light, Dark, Ocean, Light.
    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Persisted identifier.
    pub const fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Ocean => "ocean",
        }
    }

    /// Display name for the navbar.
    pub const fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::Ocean => "Ocean",
        }
    }

    /// Parse a persisted identifier. Only the exact lowercase names match.
    pub fn from_persisted(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|theme| theme.as_str() == raw)
    }

    pub fn palette(self) -> &'static Palette {
        &PALETTES[self.index()]
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn cycle_order_is_fixed() {
        assert_eq!(Theme::Light.next(), Theme::Dark);
        assert_eq!(Theme::Dark.next(), Theme::Ocean);
        assert_eq!(Theme::Ocean.next(), Theme::Light);
    }

    #[test]
    fn index_matches_all() {
        for (idx, theme) in Theme::ALL.into_iter().enumerate() {
            assert_eq!(theme.index(), idx);
            assert_eq!(Theme::from_index(idx), theme);
        }
    }

    #[test]
    fn persisted_names_roundtrip() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_persisted(theme.as_str()), Some(theme));
            assert_eq!(theme.to_string(), theme.as_str());
        }
    }

    #[test]
    fn unknown_persisted_names_are_rejected() {
        for raw in ["", "Light", "DARK", " ocean", "solarized", "\"dark\""] {
            assert_eq!(Theme::from_persisted(raw), None, "{raw:?}");
        }
    }

    #[test]
    fn default_theme_is_light() {
        assert_eq!(Theme::default(), Theme::Light);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Theme::Ocean).unwrap();
        assert_eq!(json, "\"ocean\"");
        let back: Theme = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(back, Theme::Dark);
    }

    proptest! {
        #[test]
        fn n_cycles_land_on_n_mod_3(start in 0usize..3, cycles in 0usize..200) {
            let mut theme = Theme::from_index(start);
            for _ in 0..cycles {
                theme = theme.next();
            }
            prop_assert_eq!(theme, Theme::ALL[(start + cycles) % 3]);
        }
    }
}
