//! Public shop slugs (`/shop/{slug}`).

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ShopSlug`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// Empty slug.
    #[error("slug cannot be empty")]
    Empty,
    /// Longer than [`ShopSlug::MAX_LENGTH`].
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// Contains something other than `a-z`, `0-9` or `-`.
    #[error("slug may only contain lowercase letters, digits and dashes")]
    InvalidCharacter,
}

/// URL path segment identifying a shop.
///
/// Assigned once at registration and never changed afterwards, so shared
/// links keep working when the shop is renamed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopSlug(String);

impl ShopSlug {
    /// Maximum slug length.
    pub const MAX_LENGTH: usize = 80;

    /// Build a slug from a shop name and a numeric suffix.
    ///
    /// ```
    /// use sanndikaa_core::ShopSlug;
    ///
    /// let slug = ShopSlug::from_name("Fatou's Kitchen", 42);
    /// assert_eq!(slug.as_str(), "fatou-s-kitchen-42");
    /// ```
    #[must_use]
    pub fn from_name(name: &str, suffix: u16) -> Self {
        let mut base = String::with_capacity(name.len());
        for c in name.chars().flat_map(char::to_lowercase) {
            if c.is_ascii_alphanumeric() {
                base.push(c);
            } else if !base.is_empty() && !base.ends_with('-') {
                base.push('-');
            }
        }
        let base = base.trim_end_matches('-');

        let suffix = suffix.to_string();
        // room for the dash and suffix
        let max_base = Self::MAX_LENGTH - suffix.len() - 1;
        let base = if base.len() > max_base {
            base.get(..max_base).unwrap_or(base).trim_end_matches('-')
        } else {
            base
        };

        if base.is_empty() {
            Self(format!("shop-{suffix}"))
        } else {
            Self(format!("{base}-{suffix}"))
        }
    }

    /// Validate a slug taken from a URL.
    ///
    /// # Errors
    ///
    /// Returns [`SlugError`] for empty, overlong or non-slug input.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        if !s
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        {
            return Err(SlugError::InvalidCharacter);
        }
        Ok(Self(s.to_owned()))
    }

    /// The slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShopSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShopSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_lowercases_and_dashes() {
        assert_eq!(ShopSlug::from_name("Awa Beauty", 7).as_str(), "awa-beauty-7");
        assert_eq!(
            ShopSlug::from_name("  Serrekunda   Market!! ", 999).as_str(),
            "serrekunda-market-999"
        );
        assert_eq!(ShopSlug::from_name("Café Touba", 0).as_str(), "caf-touba-0");
    }

    #[test]
    fn test_from_name_without_usable_characters() {
        assert_eq!(ShopSlug::from_name("!!!", 12).as_str(), "shop-12");
        assert_eq!(ShopSlug::from_name("", 3).as_str(), "shop-3");
    }

    #[test]
    fn test_from_name_is_always_parseable() {
        let long = "Very Long Shop Name ".repeat(10);
        let slug = ShopSlug::from_name(&long, 123);
        assert!(slug.as_str().len() <= ShopSlug::MAX_LENGTH);
        assert!(slug.as_str().ends_with("-123"));
        assert_eq!(ShopSlug::parse(slug.as_str()).unwrap(), slug);
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert_eq!(ShopSlug::parse(""), Err(SlugError::Empty));
        assert_eq!(ShopSlug::parse("Awa"), Err(SlugError::InvalidCharacter));
        assert_eq!(ShopSlug::parse("a b"), Err(SlugError::InvalidCharacter));
        assert_eq!(
            ShopSlug::parse(&"a".repeat(81)),
            Err(SlugError::TooLong { max: 80 })
        );
    }
}
