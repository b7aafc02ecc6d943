use std::sync::Arc;

use serde::Deserialize;

use crate::objects::user::User;

/// An incoming [shipping query][1].
///
/// [1]: https://core.telegram.org/bots/api#shippingquery
#[derive(Debug, Deserialize)]
#[must_use]
pub struct ShippingQuery {
    pub id: String,

    pub from: Arc<User>,

    pub invoice_payload: String,

    pub shipping_address: ShippingAddress,
}

/// <https://core.telegram.org/bots/api#shippingaddress>
#[derive(Debug, Deserialize)]
#[must_use]
pub struct ShippingAddress {
    pub country_code: String,

    pub city: String,

    pub street_line1: String,

    pub street_line2: String,

    pub post_code: String,
}

/// An incoming [pre-checkout query][1], the final confirmation step of a payment.
///
/// [1]: https://core.telegram.org/bots/api#precheckoutquery
#[derive(Debug, Deserialize)]
#[must_use]
pub struct PreCheckoutQuery {
    pub id: String,

    pub from: Arc<User>,

    pub currency: String,

    pub total_amount: u64,

    pub invoice_payload: String,
}

/// A [purchase of paid media][1] by a user.
///
/// [1]: https://core.telegram.org/bots/api#paidmediapurchased
#[derive(Debug, Deserialize)]
#[must_use]
pub struct PaidMediaPurchased {
    pub from: Arc<User>,

    pub paid_media_payload: String,
}
