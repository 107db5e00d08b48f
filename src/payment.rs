// 💳 Payment Formatter

use crate::models::PaymentMethod;

/// Shown when a transaction carries no payment methods
pub const UNKNOWN_PAYMENT_METHOD: &str = "Unknown payment method";

/// Describe how a transaction was paid
///
/// Only the first method counts: `"{brand} ending in {last_four}"`.
pub fn format_payment(methods: &[PaymentMethod]) -> String {
    match methods.first() {
        Some(method) => format!("{} ending in {}", method.brand, method.last_four),
        None => UNKNOWN_PAYMENT_METHOD.to_string(),
    }
}
