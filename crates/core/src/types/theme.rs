//! Shop colour themes and share-poster styles.

use serde::{Deserialize, Serialize};

/// Colour theme a seller picks for their shop header and buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeColor {
    #[default]
    Emerald,
    Midnight,
    Terracotta,
    Ocean,
    Rose,
}

impl ThemeColor {
    pub const ALL: [Self; 5] = [
        Self::Emerald,
        Self::Midnight,
        Self::Terracotta,
        Self::Ocean,
        Self::Rose,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Emerald => "emerald",
            Self::Midnight => "midnight",
            Self::Terracotta => "terracotta",
            Self::Ocean => "ocean",
            Self::Rose => "rose",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Emerald => "Emerald",
            Self::Midnight => "Midnight",
            Self::Terracotta => "Terracotta",
            Self::Ocean => "Ocean",
            Self::Rose => "Rose",
        }
    }

    /// Header background colour.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Emerald => "#059669",
            Self::Midnight => "#0f172a",
            Self::Terracotta => "#c2410c",
            Self::Ocean => "#2563eb",
            Self::Rose => "#f43f5e",
        }
    }

    /// CSS class applied to buttons and highlights.
    #[must_use]
    pub const fn accent_class(self) -> &'static str {
        match self {
            Self::Emerald => "accent-emerald",
            Self::Midnight => "accent-midnight",
            Self::Terracotta => "accent-terracotta",
            Self::Ocean => "accent-ocean",
            Self::Rose => "accent-rose",
        }
    }

    /// Read a stored theme; missing or unknown values fall back to emerald.
    #[must_use]
    pub fn from_db(s: Option<&str>) -> Self {
        s.map(str::trim)
            .and_then(|s| Self::ALL.into_iter().find(|t| t.as_str().eq_ignore_ascii_case(s)))
            .unwrap_or_default()
    }
}

/// Visual style of a printable product poster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PosterTheme {
    #[default]
    Minimal,
    Organic,
    Hype,
    Glass,
}

impl PosterTheme {
    pub const ALL: [Self; 4] = [Self::Minimal, Self::Organic, Self::Hype, Self::Glass];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Organic => "organic",
            Self::Hype => "hype",
            Self::Glass => "glass",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Minimal => "Studio White",
            Self::Organic => "Earth & Sage",
            Self::Hype => "Street Bold",
            Self::Glass => "Frosty Glass",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Minimal => "Clean, Apple-style minimalism.",
            Self::Organic => "Soft, natural, trustworthy.",
            Self::Hype => "High energy, high contrast.",
            Self::Glass => "Modern, blurred, gradients.",
        }
    }

    /// CSS class on the poster wrapper.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Minimal => "poster-minimal",
            Self::Organic => "poster-organic",
            Self::Hype => "poster-hype",
            Self::Glass => "poster-glass",
        }
    }

    /// Parse a query value; unknown values fall back to minimal.
    #[must_use]
    pub fn from_query(s: Option<&str>) -> Self {
        s.and_then(|s| Self::ALL.into_iter().find(|t| t.as_str() == s))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_color_fallback() {
        assert_eq!(ThemeColor::from_db(Some("ocean")), ThemeColor::Ocean);
        assert_eq!(ThemeColor::from_db(Some("Rose ")), ThemeColor::Rose);
        assert_eq!(ThemeColor::from_db(Some("#ff0000")), ThemeColor::Emerald);
        assert_eq!(ThemeColor::from_db(None), ThemeColor::Emerald);
    }

    #[test]
    fn test_theme_color_hex_is_css_colour() {
        for t in ThemeColor::ALL {
            assert!(t.hex().starts_with('#'));
            assert_eq!(t.hex().len(), 7);
        }
    }

    #[test]
    fn test_poster_theme_names() {
        assert_eq!(PosterTheme::from_query(Some("hype")).name(), "Street Bold");
        assert_eq!(PosterTheme::from_query(Some("nope")), PosterTheme::Minimal);
        assert_eq!(PosterTheme::Organic.name(), "Earth & Sage");
        assert_eq!(PosterTheme::Glass.description(), "Modern, blurred, gradients.");
    }
}
