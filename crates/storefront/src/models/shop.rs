//! Shops and their public presentation.

use chrono::{DateTime, Utc};

use sanndikaa_core::{SellerId, ShopId, ShopSlug, ThemeColor, WhatsAppNumber};

/// A seller's shop.
#[derive(Debug, Clone)]
pub struct Shop {
    pub id: ShopId,
    pub seller_id: SellerId,
    pub name: String,
    /// Fixed at registration.
    pub slug: ShopSlug,
    pub whatsapp_number: WhatsAppNumber,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub bio: Option<String>,
    pub theme: ThemeColor,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shop {
    /// First letter of the name, shown when there is no logo.
    #[must_use]
    pub fn initial(&self) -> String {
        initial_of(&self.name)
    }

    /// `<title>` for the public shop page.
    #[must_use]
    pub fn meta_title(&self) -> String {
        format!("{} on Sanndikaa", self.name)
    }

    /// Meta description: the bio, or a generic welcome line.
    #[must_use]
    pub fn meta_description(&self) -> String {
        match self.bio.as_deref().map(str::trim) {
            Some(bio) if !bio.is_empty() => bio.to_string(),
            _ => format!("Welcome to {} on Sanndikaa", self.name),
        }
    }

    /// Open Graph image: the banner, else the logo.
    #[must_use]
    pub fn og_image(&self) -> Option<&str> {
        self.banner_url.as_deref().or(self.logo_url.as_deref())
    }

    /// Public path of the shop page.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/shop/{}", self.slug)
    }

    #[must_use]
    pub fn summary(&self) -> ShopSummary {
        ShopSummary {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone(),
            whatsapp_number: self.whatsapp_number.clone(),
            logo_url: self.logo_url.clone(),
            theme: self.theme,
        }
    }
}

/// The slice of a shop shown next to one of its products.
#[derive(Debug, Clone)]
pub struct ShopSummary {
    pub id: ShopId,
    pub name: String,
    pub slug: ShopSlug,
    pub whatsapp_number: WhatsAppNumber,
    pub logo_url: Option<String>,
    pub theme: ThemeColor,
}

impl ShopSummary {
    #[must_use]
    pub fn initial(&self) -> String {
        initial_of(&self.name)
    }
}

/// Fields needed to open a shop at registration.
#[derive(Debug, Clone)]
pub struct NewShop {
    pub name: String,
    pub slug: ShopSlug,
    pub whatsapp_number: WhatsAppNumber,
}

/// Editable shop settings. The slug is deliberately absent.
#[derive(Debug, Clone)]
pub struct ShopSettings {
    pub name: String,
    pub whatsapp_number: WhatsAppNumber,
    pub bio: Option<String>,
    pub theme: ThemeColor,
    /// New logo, or `None` to keep the current one.
    pub logo_url: Option<String>,
    /// New banner, or `None` to keep the current one.
    pub banner_url: Option<String>,
}

fn initial_of(name: &str) -> String {
    name.trim()
        .chars()
        .next()
        .map_or_else(|| "S".to_string(), |c| c.to_uppercase().collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_shop() -> Shop {
        Shop {
            id: ShopId::new(1),
            seller_id: SellerId::new(1),
            name: "Awa's Kitchen".to_string(),
            slug: ShopSlug::parse("awa-s-kitchen-42").unwrap(),
            whatsapp_number: WhatsAppNumber::parse("7001122").unwrap(),
            logo_url: None,
            banner_url: None,
            bio: None,
            theme: ThemeColor::Emerald,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_meta_falls_back_to_welcome_line() {
        let mut shop = sample_shop();
        assert_eq!(shop.meta_title(), "Awa's Kitchen on Sanndikaa");
        assert_eq!(
            shop.meta_description(),
            "Welcome to Awa's Kitchen on Sanndikaa"
        );

        shop.bio = Some("Fresh wonjo and baobab juice daily".to_string());
        assert_eq!(shop.meta_description(), "Fresh wonjo and baobab juice daily");
    }

    #[test]
    fn test_og_image_prefers_banner() {
        let mut shop = sample_shop();
        assert_eq!(shop.og_image(), None);
        shop.logo_url = Some("/media/logo.png".to_string());
        assert_eq!(shop.og_image(), Some("/media/logo.png"));
        shop.banner_url = Some("/media/banner.png".to_string());
        assert_eq!(shop.og_image(), Some("/media/banner.png"));
    }

    #[test]
    fn test_initial() {
        let mut shop = sample_shop();
        assert_eq!(shop.initial(), "A");
        shop.name = "   ".to_string();
        assert_eq!(shop.initial(), "S");
        assert_eq!(shop.path(), "/shop/awa-s-kitchen-42");
    }
}
