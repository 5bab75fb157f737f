//! Products and inventory figures.

use chrono::{DateTime, Utc};

use sanndikaa_core::{Category, Dalasi, PriceError, ProductId, ShopId};

use super::shop::ShopSummary;

/// A product listed by a shop.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub shop_id: ShopId,
    pub name: String,
    pub price: Dalasi,
    pub category: Category,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Public path of the product page.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/product/{}", self.id)
    }

    /// Description to show buyers.
    #[must_use]
    pub fn display_description(&self) -> &str {
        match self.description.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => d,
            _ => "Authentic quality from trusted sellers.",
        }
    }
}

/// A product together with the shop selling it.
#[derive(Debug, Clone)]
pub struct ProductWithShop {
    pub product: Product,
    pub shop: ShopSummary,
}

impl ProductWithShop {
    /// `<title>` for the product page.
    #[must_use]
    pub fn meta_title(&self) -> String {
        format!("{} | {}", self.product.name, self.shop.name)
    }

    /// Meta description for link previews.
    #[must_use]
    pub fn meta_description(&self) -> String {
        format!("Order for {} on Sanndikaa", self.product.price)
    }
}

/// Errors in product form input.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ProductInputError {
    #[error("product name is required")]
    MissingName,
    #[error("invalid price: {0}")]
    Price(#[from] PriceError),
}

/// Validated product fields for create and update.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Dalasi,
    pub category: Category,
    pub description: Option<String>,
    /// Freshly uploaded image. On update, `None` keeps the existing one.
    pub image_url: Option<String>,
}

impl NewProduct {
    /// Validate raw form values.
    ///
    /// # Errors
    ///
    /// Returns [`ProductInputError`] if the name is blank or the price does
    /// not parse.
    pub fn from_input(
        name: &str,
        price: &str,
        category: &str,
        description: Option<&str>,
    ) -> Result<Self, ProductInputError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProductInputError::MissingName);
        }
        let price = Dalasi::parse(price)?;
        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from);

        Ok(Self {
            name: name.to_string(),
            price,
            category: Category::from_str_lossy(category),
            description,
            image_url: None,
        })
    }
}

/// Dashboard overview figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryStats {
    pub count: i64,
    pub total_value: Dalasi,
    pub average_price: Dalasi,
}

impl InventoryStats {
    #[must_use]
    pub fn new(count: i64, total_value: Dalasi) -> Self {
        Self {
            count,
            total_value,
            average_price: Dalasi::rounded_average(total_value, count),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input_trims_and_parses() {
        let p = NewProduct::from_input("  Wonjo Juice ", "75", "food", Some("  ")).unwrap();
        assert_eq!(p.name, "Wonjo Juice");
        assert_eq!(p.price.to_string(), "D75");
        assert_eq!(p.category, Category::Food);
        assert_eq!(p.description, None);
        assert!(p.image_url.is_none());
    }

    #[test]
    fn test_from_input_rejects_blank_name_and_bad_price() {
        assert_eq!(
            NewProduct::from_input(" ", "10", "Food", None).unwrap_err(),
            ProductInputError::MissingName
        );
        assert_eq!(
            NewProduct::from_input("Soap", "ten", "Beauty", None).unwrap_err(),
            ProductInputError::Price(PriceError::NotANumber)
        );
        assert_eq!(
            NewProduct::from_input("Gold", "100000000000", "Jewelry", None).unwrap_err(),
            ProductInputError::Price(PriceError::TooLarge)
        );
        assert_eq!(
            NewProduct::from_input("Gold", "12.345", "Jewelry", None).unwrap_err(),
            ProductInputError::Price(PriceError::TooPrecise)
        );
    }

    #[test]
    fn test_inventory_stats_average() {
        let stats = InventoryStats::new(3, Dalasi::parse("400").unwrap());
        assert_eq!(stats.average_price.to_string(), "D133");
        let empty = InventoryStats::new(0, Dalasi::ZERO);
        assert_eq!(empty.average_price, Dalasi::ZERO);
    }
}
