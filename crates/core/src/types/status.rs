//! Order status and payment method.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Where an order is in the seller's workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    New,
    Completed,
}

impl OrderStatus {
    /// Database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Completed => "completed",
        }
    }

    /// Parse the database representation. Unknown values read as `New`.
    #[must_use]
    pub fn from_db(s: &str) -> Self {
        if s.eq_ignore_ascii_case("completed") {
            Self::Completed
        } else {
            Self::New
        }
    }

    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the buyer says they will pay. Only ever a label in the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    #[serde(alias = "cash")]
    CashOnDelivery,
    Wave,
}

impl PaymentMethod {
    /// Short form-value used in links and forms.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "cash",
            Self::Wave => "wave",
        }
    }

    /// Human readable label shown to buyers and sellers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "Cash on Delivery",
            Self::Wave => "Wave / Sadam",
        }
    }

    /// Parse a form value or a stored label.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        [Self::CashOnDelivery, Self::Wave]
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s) || m.label().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_db_strings() {
        assert_eq!(OrderStatus::New.as_str(), "new");
        assert_eq!(OrderStatus::from_db("completed"), OrderStatus::Completed);
        assert_eq!(OrderStatus::from_db("new"), OrderStatus::New);
        assert_eq!(OrderStatus::from_db("archived"), OrderStatus::New);
        assert!(OrderStatus::Completed.is_completed());
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!(PaymentMethod::parse("cash"), Some(PaymentMethod::CashOnDelivery));
        assert_eq!(PaymentMethod::parse("WAVE"), Some(PaymentMethod::Wave));
        assert_eq!(
            PaymentMethod::parse("Cash on Delivery"),
            Some(PaymentMethod::CashOnDelivery)
        );
        assert_eq!(PaymentMethod::parse("Wave / Sadam"), Some(PaymentMethod::Wave));
        assert_eq!(PaymentMethod::parse("card"), None);
    }

    #[test]
    fn test_payment_method_labels() {
        assert_eq!(PaymentMethod::Wave.to_string(), "Wave / Sadam");
        assert_eq!(PaymentMethod::CashOnDelivery.label(), "Cash on Delivery");
    }
}
