//! Rule-based description writer.
//!
//! Picks a paragraph by category and a few name keywords. Always available
//! and used whenever the language model is not configured or fails.

use sanndikaa_core::Category;

const RAW_FOOD_WORDS: &[&str] = &["honey", "oil", "pure", "raw"];
const FORMAL_WEAR_WORDS: &[&str] = &["dress", "gown", "kaftan"];
const SKIN_CARE_WORDS: &[&str] = &["cream", "lotion", "soap"];

/// Fills category templates with the product name.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateWriter;

impl TemplateWriter {
    /// Write a description for `name` in `category`.
    #[must_use]
    pub fn write(self, name: &str, category: Category) -> String {
        let lower = name.to_lowercase();
        let mentions = |words: &[&str]| words.iter().any(|w| lower.contains(w));

        match category {
            Category::Food if mentions(RAW_FOOD_WORDS) => format!(
                "Experience the untouched purity of {name}. 100% natural and locally sourced \
                 from The Gambia's finest producers. No additives or preservatives, just \
                 authentic, healthy quality for your home."
            ),
            Category::Food => format!(
                "Experience the authentic taste of {name}. Freshly prepared with care using the \
                 finest local ingredients. Perfect for family meals or a healthy treat. Taste \
                 the difference of premium quality."
            ),
            Category::Fashion if mentions(FORMAL_WEAR_WORDS) => format!(
                "Step out in elegance with this stunning {name}. Expertly tailored for a \
                 flattering fit, this piece combines traditional Gambian style with modern \
                 luxury. Perfect for special occasions."
            ),
            Category::Fashion => format!(
                "Upgrade your wardrobe with this stylish {name}. Designed for comfort and \
                 durability, making it the perfect choice for everyday wear or social gatherings."
            ),
            Category::Beauty if mentions(SKIN_CARE_WORDS) => format!(
                "Nourish your skin with our premium {name}. Enriched with natural vitamins to \
                 leave your skin feeling soft, hydrated, and glowing. Gentle enough for daily use."
            ),
            Category::Beauty => format!(
                "Enhance your natural beauty with {name}. Dermatologically tested and safe for \
                 all skin types. A must-have addition to your self-care routine."
            ),
            Category::Electronics => format!(
                "Upgrade your tech game with the {name}. Features state-of-the-art performance, \
                 long-lasting durability, and a sleek design. Tested for quality and reliability."
            ),
            Category::Home | Category::Other => format!(
                "Discover the excellence of {name}. High-quality, authentic, and designed to \
                 meet your needs. One of our top-rated items in the store."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_food_keywords_case_insensitive() {
        let text = TemplateWriter.write("Pure BAOBAB Honey", Category::Food);
        assert!(text.starts_with("Experience the untouched purity of Pure BAOBAB Honey."));
    }

    #[test]
    fn test_prepared_food() {
        let text = TemplateWriter.write("Chicken Yassa", Category::Food);
        assert!(text.starts_with("Experience the authentic taste of Chicken Yassa."));
    }

    #[test]
    fn test_fashion_branches() {
        assert!(
            TemplateWriter
                .write("Bazin Kaftan", Category::Fashion)
                .starts_with("Step out in elegance")
        );
        assert!(
            TemplateWriter
                .write("Denim Jacket", Category::Fashion)
                .starts_with("Upgrade your wardrobe")
        );
    }

    #[test]
    fn test_beauty_branches() {
        assert!(
            TemplateWriter
                .write("Shea Butter Soap", Category::Beauty)
                .starts_with("Nourish your skin")
        );
        assert!(
            TemplateWriter
                .write("Lip Gloss", Category::Beauty)
                .starts_with("Enhance your natural beauty")
        );
    }

    #[test]
    fn test_electronics_and_default() {
        assert!(
            TemplateWriter
                .write("Solar Lamp", Category::Electronics)
                .contains("the Solar Lamp")
        );
        let home = TemplateWriter.write("Woven Basket", Category::Home);
        assert!(home.starts_with("Discover the excellence of Woven Basket."));
        assert_eq!(home, TemplateWriter.write("Woven Basket", Category::Other));
    }
}
