//! Seller help bot.
//!
//! A fixed menu of topics with canned answers, shown as a chat on the
//! dashboard.

use sanndikaa_core::WhatsAppNumber;

use super::whatsapp;

/// Opening line of the chat.
pub const GREETING: &str = "Hello! 👋 I am your Sanndikaa Co-Pilot. I can help you increase \
                            sales, improve your photos, or manage your shop. What's on your mind?";

/// A help topic sellers can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Sales,
    Share,
    Photos,
    Support,
}

impl HelpTopic {
    pub const ALL: [Self; 4] = [Self::Sales, Self::Share, Self::Photos, Self::Support];

    /// Path segment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Share => "share",
            Self::Photos => "photos",
            Self::Support => "support",
        }
    }

    #[must_use]
    pub fn from_slug(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// What the seller "says" when picking the topic.
    #[must_use]
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::Sales => "How do I get more sales?",
            Self::Share => "How do I share my shop?",
            Self::Photos => "Tips for better photos?",
            Self::Support => "Contact Support",
        }
    }

    /// The bot's answer.
    #[must_use]
    pub fn answer(self, support: &WhatsAppNumber) -> HelpAnswer {
        match self {
            Self::Sales => HelpAnswer {
                intro: "To get more sales quickly, try these 3 steps:",
                tips: vec![
                    "Share Links, Not Photos: Post your specific Product Link on WhatsApp \
                     Status. It creates a professional preview card.",
                    "Use AI Descriptions: Go to 'Add Product' and use the Magic Write button. \
                     Better descriptions = More trust.",
                ],
                action: Some(HelpAction {
                    label: "Try Adding a Product",
                    href: "/dashboard/add-product".to_string(),
                }),
            },
            Self::Share => HelpAnswer {
                intro: "Sharing is easy! Just click the white \"View Shop\" button at the top \
                        of your dashboard. Copy that link and send it to your customers.",
                tips: vec!["Pro Tip: Add the link to your Instagram Bio too!"],
                action: None,
            },
            Self::Photos => HelpAnswer {
                intro: "Great photos build trust. Here is the formula:",
                tips: vec![
                    "Natural Light: Always take photos near a window.",
                    "Clean Background: Use a white sheet or plain table.",
                    "Square Mode: Use your phone's \"1:1\" camera setting.",
                ],
                action: None,
            },
            Self::Support => HelpAnswer {
                intro: "I am connecting you to a human agent. Click below to open WhatsApp \
                        with Admin Support.",
                tips: Vec::new(),
                action: Some(HelpAction {
                    label: "Chat with Admin",
                    href: whatsapp::support_link(support),
                }),
            },
        }
    }
}

/// A canned answer.
#[derive(Debug, Clone)]
pub struct HelpAnswer {
    pub intro: &'static str,
    pub tips: Vec<&'static str>,
    pub action: Option<HelpAction>,
}

/// Call-to-action under an answer.
#[derive(Debug, Clone)]
pub struct HelpAction {
    pub label: &'static str,
    pub href: String,
}

impl HelpAction {
    /// Whether the link leaves the site.
    #[must_use]
    pub fn is_external(&self) -> bool {
        self.href.starts_with("https://")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_topics_round_trip_through_slug() {
        for topic in HelpTopic::ALL {
            assert_eq!(HelpTopic::from_slug(topic.as_str()), Some(topic));
        }
        assert_eq!(HelpTopic::from_slug("refunds"), None);
    }

    #[test]
    fn test_support_links_to_admin_whatsapp() {
        let support = WhatsAppNumber::parse("2207470187").unwrap();
        let answer = HelpTopic::Support.answer(&support);
        let action = answer.action.unwrap();
        assert_eq!(action.label, "Chat with Admin");
        assert_eq!(action.href, "https://wa.me/2207470187");
        assert!(action.is_external());
    }

    #[test]
    fn test_photos_has_three_tips() {
        let support = WhatsAppNumber::parse("2207470187").unwrap();
        let answer = HelpTopic::Photos.answer(&support);
        assert_eq!(answer.tips.len(), 3);
        assert!(answer.action.is_none());
        assert!(!HelpTopic::Sales.answer(&support).action.unwrap().is_external());
    }
}
