//! Product categories.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of categories a seller can file a product under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Food,
    Fashion,
    Beauty,
    Home,
    Electronics,
    Other,
}

impl Category {
    /// Every category, in form order.
    pub const ALL: [Self; 6] = [
        Self::Food,
        Self::Fashion,
        Self::Beauty,
        Self::Home,
        Self::Electronics,
        Self::Other,
    ];

    /// Stored and displayed name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Fashion => "Fashion",
            Self::Beauty => "Beauty",
            Self::Home => "Home",
            Self::Electronics => "Electronics",
            Self::Other => "Other",
        }
    }

    /// Read a category from a form or the database.
    ///
    /// Matching ignores case; anything unrecognised is [`Category::Other`].
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .unwrap_or(Self::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Self::from_str_lossy(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_food() {
        assert_eq!(Category::default(), Category::Food);
    }

    #[test]
    fn test_lossy_parse() {
        assert_eq!(Category::from_str_lossy("fashion"), Category::Fashion);
        assert_eq!(Category::from_str_lossy(" Electronics "), Category::Electronics);
        assert_eq!(Category::from_str_lossy("Toys"), Category::Other);
        assert_eq!(Category::from_str_lossy(""), Category::Other);
    }

    #[test]
    fn test_names_match_variants() {
        for c in Category::ALL {
            assert_eq!(Category::from_str_lossy(c.as_str()), c);
        }
    }
}
