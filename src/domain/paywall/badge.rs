//! Placeholder substitution for badge texts.

use super::FreeTrial;

/// Replaced by the computed discount percentage.
pub const DISCOUNT_PLACEHOLDER: &str = "#DISCOUNT";
/// Replaced by the number of free trial units.
pub const QUANTITY_PLACEHOLDER: &str = "#quantity";
/// Replaced by the (pluralised) free trial unit.
pub const PERIOD_PLACEHOLDER: &str = "#period";
/// Trial offer text: the (pluralised) free trial unit.
pub const TRIAL_PERIOD_PLACEHOLDER: &str = "#periodTrial";
/// Trial offer text: the billing period of the subscription.
pub const SUBSCRIPTION_PERIOD_PLACEHOLDER: &str = "#periodSubscription";
/// Trial offer text: the localized price.
pub const PRICE_PLACEHOLDER: &str = "#price";

/// Renders a discount badge, e.g. `"Save #DISCOUNT%"` -> `"Save 33%"`.
pub fn render_discount(format: &str, discount_percent: i64) -> String {
    format.replace(DISCOUNT_PLACEHOLDER, &discount_percent.to_string())
}

/// Renders a free trial badge, e.g. `"Try #quantity #period free"` -> `"Try 7 days free"`.
pub fn render_free_trial(format: &str, free_trial: FreeTrial) -> String {
    let (quantity, unit) = free_trial.display_quantity();
    format
        .replace(PERIOD_PLACEHOLDER, &pluralize(unit, quantity))
        .replace(QUANTITY_PLACEHOLDER, &quantity.to_string())
}

/// Renders the offer text of a single-option paywall, e.g.
/// `"#quantity #periodTrial free, then #price per #periodSubscription"`
/// -> `"7 days free, then $19.99 per year"`.
pub fn render_trial_offer(
    format: &str,
    free_trial: FreeTrial,
    subscription_period: &str,
    localized_price: &str,
) -> String {
    let (quantity, unit) = free_trial.display_quantity();
    // Longer placeholders first; both start with `#period`.
    format
        .replace(TRIAL_PERIOD_PLACEHOLDER, &pluralize(unit, quantity))
        .replace(SUBSCRIPTION_PERIOD_PLACEHOLDER, subscription_period)
        .replace(QUANTITY_PLACEHOLDER, &quantity.to_string())
        .replace(PRICE_PLACEHOLDER, localized_price)
}

fn pluralize(word: &str, quantity: u32) -> String {
    if quantity == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
