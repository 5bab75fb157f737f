//! `wa.me` deep links.
//!
//! Every order on Sanndikaa ends in WhatsApp: these helpers build the links
//! and the pre-filled messages buyers send to sellers.

use sanndikaa_core::{Dalasi, PaymentMethod, WhatsAppNumber};

const WA_ME: &str = "https://wa.me";

/// Plain chat with a number.
#[must_use]
pub fn chat_link(number: &WhatsAppNumber) -> String {
    format!("{WA_ME}/{number}")
}

/// Support chat used by the help bot.
#[must_use]
pub fn support_link(number: &WhatsAppNumber) -> String {
    chat_link(number)
}

/// Order message sent from a product page.
#[must_use]
pub fn order_message(
    seller: &WhatsAppNumber,
    shop_name: &str,
    product_name: &str,
    price: Dalasi,
    method: PaymentMethod,
) -> String {
    let mut message =
        format!("👋 Hello {shop_name}! \n\nI want to buy: *{product_name}* \n💰 Price: {price}");
    match method {
        PaymentMethod::Wave => message.push_str(&format!(
            "\n\n💳 Payment Method: *Wave / Sadam* \n✅ I have copied your number ({seller}) \
             and I am sending the money now. \n\nPlease confirm receipt."
        )),
        PaymentMethod::CashOnDelivery => message.push_str(
            "\n\n💵 Payment Method: *Cash on Delivery* \n📍 I will pay when you deliver.",
        ),
    }
    message
}

/// Link opening a chat with the seller, pre-filled with [`order_message`].
#[must_use]
pub fn order_link(
    seller: &WhatsAppNumber,
    shop_name: &str,
    product_name: &str,
    price: Dalasi,
    method: PaymentMethod,
) -> String {
    with_text(
        &chat_link(seller),
        &order_message(seller, shop_name, product_name, price, method),
    )
}

/// One-tap order from the compact shop listing.
#[must_use]
pub fn quick_order_link(seller: &WhatsAppNumber, product_name: &str, price: Dalasi) -> String {
    with_text(
        &chat_link(seller),
        &format!("Hello! I want to order {product_name} for {price}"),
    )
}

/// Link letting a seller (or buyer) forward a product to any contact.
#[must_use]
pub fn share_link(product_name: &str, price: Dalasi, product_url: &str) -> String {
    let message = format!(
        "🔥 Check out this product on Sanndikaa:\n\n*{product_name}* for {price}\n\n\
         Tap the link to buy now:\n{product_url}"
    );
    with_text(&format!("{WA_ME}/"), &message)
}

fn with_text(base: &str, text: &str) -> String {
    format!("{base}?text={}", urlencoding::encode(text))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn seller() -> WhatsAppNumber {
        WhatsAppNumber::parse("7001122").unwrap()
    }

    fn decode_text(link: &str) -> String {
        let (_, text) = link.split_once("?text=").unwrap();
        urlencoding::decode(text).unwrap().into_owned()
    }

    #[test]
    fn test_chat_link() {
        assert_eq!(chat_link(&seller()), "https://wa.me/2207001122");
    }

    #[test]
    fn test_cash_order_message() {
        let price = Dalasi::parse("150").unwrap();
        let link = order_link(
            &seller(),
            "Awa's Kitchen",
            "Baobab Juice",
            price,
            PaymentMethod::CashOnDelivery,
        );
        assert!(link.starts_with("https://wa.me/2207001122?text="));
        assert_eq!(
            decode_text(&link),
            "👋 Hello Awa's Kitchen! \n\nI want to buy: *Baobab Juice* \n💰 Price: D150\
             \n\n💵 Payment Method: *Cash on Delivery* \n📍 I will pay when you deliver."
        );
    }

    #[test]
    fn test_wave_order_message_mentions_number() {
        let price = Dalasi::parse("99.50").unwrap();
        let text = order_message(&seller(), "Shop", "Soap", price, PaymentMethod::Wave);
        assert!(text.contains("💰 Price: D99.5"));
        assert!(text.contains("*Wave / Sadam*"));
        assert!(text.contains("I have copied your number (2207001122)"));
        assert!(text.ends_with("Please confirm receipt."));
    }

    #[test]
    fn test_quick_order_link() {
        let link = quick_order_link(&seller(), "Wonjo", Dalasi::parse("25").unwrap());
        assert_eq!(
            link,
            "https://wa.me/2207001122?text=Hello%21%20I%20want%20to%20order%20Wonjo%20for%20D25"
        );
    }

    #[test]
    fn test_share_link_has_no_recipient() {
        let link = share_link(
            "Kaftan",
            Dalasi::parse("1200").unwrap(),
            "https://sanndikaa.gm/product/7",
        );
        assert!(link.starts_with("https://wa.me/?text="));
        let text = decode_text(&link);
        assert!(text.contains("*Kaftan* for D1200"));
        assert!(text.ends_with("https://sanndikaa.gm/product/7"));
    }
}
