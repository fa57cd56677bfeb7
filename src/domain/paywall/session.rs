//! Paywall session aggregate.
//!
//! A session is one presentation of a paywall. It owns the option
//! sequence, the derived comparisons and the current selection, and is the
//! only writer of option price slots.
//!
//! # Invariants
//!
//! - The configuration passed validation and every declared comparison is legal
//! - Each option's price is stored at most once
//! - Each comparison's discount is computed at most once
//! - `selected`, when set, indexes an existing option

use std::time::Duration;

use crate::domain::foundation::{PaywallSessionId, ProductId, Timestamp};

use super::badge::{render_discount, render_free_trial, render_trial_offer};
use super::engine::{derive_comparisons, on_price_resolved, ComparisonsUpdated};
use super::{
    ConfigurationError, FreeTrial, OptionDetail, OptionFooter, PaywallAction, PaywallConfiguration,
    PaywallError, PriceComparison, PriceInfo, PriceLookupFailure, PurchaseOption,
};

/// Result of applying one price lookup outcome to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceUpdate {
    /// The price was stored; some comparisons may have completed.
    Resolved {
        index: usize,
        comparisons: ComparisonsUpdated,
    },
    /// The lookup failed; the option stays unpriced.
    Failed {
        index: usize,
        failure: PriceLookupFailure,
    },
}

impl PriceUpdate {
    pub fn index(&self) -> usize {
        match self {
            PriceUpdate::Resolved { index, .. } | PriceUpdate::Failed { index, .. } => *index,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, PriceUpdate::Resolved { .. })
    }
}

/// One presentation of a configured paywall.
#[derive(Debug, Clone)]
pub struct PaywallSession {
    id: PaywallSessionId,
    configuration: PaywallConfiguration,
    comparisons: Vec<PriceComparison>,
    selected: Option<usize>,
    actions: Vec<PaywallAction>,
    opened_at: Timestamp,
}

impl PaywallSession {
    /// Builds a session, validating the configuration and deriving comparisons.
    ///
    /// The default-selected option, if any, starts selected.
    ///
    /// # Errors
    ///
    /// Any `ConfigurationError`; no session is created.
    pub fn new(configuration: PaywallConfiguration) -> Result<Self, ConfigurationError> {
        configuration.validate()?;
        let comparisons = derive_comparisons(&configuration.options)?;
        let selected = configuration.default_selection();

        let session = Self {
            id: PaywallSessionId::new(),
            configuration,
            comparisons,
            selected,
            actions: Vec::new(),
            opened_at: Timestamp::now(),
        };

        tracing::debug!(
            session_id = %session.id,
            options = session.configuration.options.len(),
            comparisons = session.comparisons.len(),
            "Paywall session created"
        );

        Ok(session)
    }

    // === Accessors ===

    pub fn id(&self) -> PaywallSessionId {
        self.id
    }

    pub fn opened_at(&self) -> Timestamp {
        self.opened_at
    }

    pub fn configuration(&self) -> &PaywallConfiguration {
        &self.configuration
    }

    pub fn options(&self) -> &[PurchaseOption] {
        &self.configuration.options
    }

    /// Returns the option at `index`.
    ///
    /// # Errors
    ///
    /// `OptionOutOfRange` if no option has that index.
    pub fn option(&self, index: usize) -> Result<&PurchaseOption, PaywallError> {
        self.configuration
            .options
            .get(index)
            .ok_or_else(|| PaywallError::option_out_of_range(index, self.configuration.options.len()))
    }

    pub fn comparisons(&self) -> &[PriceComparison] {
        &self.comparisons
    }

    /// Returns the index of the option selling `product_id`.
    pub fn index_of(&self, product_id: &ProductId) -> Option<usize> {
        self.configuration
            .options
            .iter()
            .position(|option| &option.product_id == product_id)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_option(&self) -> Option<&PurchaseOption> {
        self.selected.and_then(|index| self.configuration.options.get(index))
    }

    /// All actions reported so far, oldest first.
    pub fn actions(&self) -> &[PaywallAction] {
        &self.actions
    }

    /// Returns true once every option has a price.
    pub fn all_prices_resolved(&self) -> bool {
        self.configuration.options.iter().all(PurchaseOption::is_priced)
    }

    /// How long the dismiss button stays hidden after the screen appears.
    pub fn dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.configuration.dismiss_delay_ms.unwrap_or(0))
    }

    /// Returns true once the dismiss delay has elapsed at `at`.
    pub fn can_dismiss_at(&self, at: Timestamp) -> bool {
        match chrono::Duration::from_std(self.dismiss_delay()) {
            Ok(delay) => at.duration_since(&self.opened_at) >= delay,
            Err(_) => false,
        }
    }

    // === Price resolution ===

    /// Stores the price for the option at `index` and completes any
    /// comparisons that now have both prices.
    ///
    /// # Errors
    ///
    /// - `OptionOutOfRange` if `index` is not an option
    /// - `PriceAlreadyResolved` if the option already has a price
    pub fn record_price(
        &mut self,
        index: usize,
        price: PriceInfo,
    ) -> Result<ComparisonsUpdated, PaywallError> {
        let option_count = self.configuration.options.len();
        let option = self
            .configuration
            .options
            .get_mut(index)
            .ok_or_else(|| PaywallError::option_out_of_range(index, option_count))?;

        option.resolve_price(price)?;

        Ok(on_price_resolved(
            &self.configuration.options,
            &mut self.comparisons,
            index,
        ))
    }

    /// Applies the outcome of a price lookup for `product_id`.
    ///
    /// Failures are logged and leave dependent comparisons uncomputed.
    ///
    /// # Errors
    ///
    /// - `UnknownProduct` if no option sells `product_id`
    /// - `PriceAlreadyResolved` for a second successful lookup
    pub fn apply_lookup(
        &mut self,
        product_id: &ProductId,
        result: Result<PriceInfo, PriceLookupFailure>,
    ) -> Result<PriceUpdate, PaywallError> {
        let index = self
            .index_of(product_id)
            .ok_or_else(|| PaywallError::unknown_product(product_id.clone()))?;

        match result {
            Ok(price) => {
                let comparisons = self.record_price(index, price)?;
                Ok(PriceUpdate::Resolved { index, comparisons })
            }
            Err(failure) => {
                tracing::warn!(
                    session_id = %self.id,
                    product_id = %product_id,
                    error = %failure,
                    code = %failure.code(),
                    retryable = failure.is_retryable(),
                    "Price lookup failed"
                );
                Ok(PriceUpdate::Failed { index, failure })
            }
        }
    }

    // === Display helpers ===

    /// Comparison declared by the option at `index`, if any.
    pub fn comparison_for(&self, index: usize) -> Option<&PriceComparison> {
        self.comparisons
            .iter()
            .find(|comparison| comparison.discounted_index == index)
    }

    /// Computed discount for the option at `index`, if available.
    pub fn discount_for(&self, index: usize) -> Option<i64> {
        self.comparison_for(index)
            .and_then(PriceComparison::discount_percent)
    }

    /// Rendered discount badge, or `None` while the discount is unknown.
    pub fn discount_badge(&self, index: usize) -> Option<String> {
        let comparison = self.comparison_for(index)?;
        let percent = comparison.discount_percent()?;
        Some(render_discount(&comparison.display_format, percent))
    }

    /// Text shown beside the option's price.
    pub fn detail_text(&self, index: usize) -> Option<String> {
        let option = self.configuration.options.get(index)?;
        match &option.detail {
            OptionDetail::Text { text } => Some(text.clone()),
            OptionDetail::Discount(_) => self.discount_badge(index),
            OptionDetail::None => None,
        }
    }

    /// Text shown under the option list while the option is selected.
    pub fn footer_text(&self, index: usize) -> Option<String> {
        let option = self.configuration.options.get(index)?;
        match &option.footer {
            OptionFooter::Text { text } | OptionFooter::Badge { text } => Some(text.clone()),
            OptionFooter::FreeTrialBadge { format } => {
                let (free_trial, _) = Self::trial_of(option)?;
                Some(render_free_trial(format, free_trial))
            }
            OptionFooter::TrialOffer { format } => {
                let (free_trial, price) = Self::trial_of(option)?;
                let subscription_period = option.period.period_name()?;
                Some(render_trial_offer(
                    format,
                    free_trial,
                    subscription_period,
                    price.localized_string(),
                ))
            }
            OptionFooter::None => None,
        }
    }

    /// Free trial and price backing a trial footer, once the price is loaded.
    fn trial_of(option: &PurchaseOption) -> Option<(FreeTrial, &PriceInfo)> {
        if !option.period.is_subscription() {
            tracing::warn!(
                product_id = %option.product_id,
                "Free trial text configured on a lifetime option"
            );
            return None;
        }
        let price = option.price()?;
        match price.free_trial() {
            Some(free_trial) => Some((free_trial, price)),
            None => {
                tracing::warn!(
                    product_id = %option.product_id,
                    "Free trial text configured but product has no free trial"
                );
                None
            }
        }
    }

    // === User actions ===

    /// Reports that the paywall became visible.
    pub fn appear(&mut self) -> PaywallAction {
        let action = PaywallAction::ScreenAppeared {
            session_id: self.id,
            occurred_at: Timestamp::now(),
        };
        self.push(action)
    }

    /// Selects the option at `index`.
    ///
    /// # Errors
    ///
    /// `OptionOutOfRange` if `index` is not an option.
    pub fn select(&mut self, index: usize) -> Result<PaywallAction, PaywallError> {
        let product_id = self.option(index)?.product_id.clone();
        self.selected = Some(index);
        let action = PaywallAction::OptionSelected {
            session_id: self.id,
            product_id,
            occurred_at: Timestamp::now(),
        };
        Ok(self.push(action))
    }

    /// Requests a purchase of the selected option.
    ///
    /// # Errors
    ///
    /// - `NothingSelected` if no option is selected
    /// - `PriceNotLoaded` if the selected option has no price yet
    pub fn purchase(&mut self) -> Result<PaywallAction, PaywallError> {
        let option = self.selected_option().ok_or(PaywallError::NothingSelected)?;
        if !option.is_priced() {
            return Err(PaywallError::price_not_loaded(option.product_id.clone()));
        }
        let action = PaywallAction::PurchaseTapped {
            session_id: self.id,
            product_id: option.product_id.clone(),
            occurred_at: Timestamp::now(),
        };
        Ok(self.push(action))
    }

    pub fn restore(&mut self) -> PaywallAction {
        let action = PaywallAction::RestoreTapped {
            session_id: self.id,
            occurred_at: Timestamp::now(),
        };
        self.push(action)
    }

    pub fn privacy(&mut self) -> PaywallAction {
        let action = PaywallAction::PrivacyTapped {
            session_id: self.id,
            occurred_at: Timestamp::now(),
        };
        self.push(action)
    }

    pub fn dismiss(&mut self) -> PaywallAction {
        let action = PaywallAction::Dismissed {
            session_id: self.id,
            occurred_at: Timestamp::now(),
        };
        self.push(action)
    }

    fn push(&mut self, action: PaywallAction) -> PaywallAction {
        tracing::info!(
            session_id = %self.id,
            action = action.action_type(),
            product_id = action.product_id().map(ProductId::as_str),
            "Paywall action"
        );
        self.actions.push(action.clone());
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::paywall::{FreeTrial, PurchasePeriod};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn product(id: &str) -> ProductId {
        ProductId::new(id).unwrap()
    }

    fn price(amount: &str) -> PriceInfo {
        PriceInfo::new(Decimal::from_str(amount).unwrap(), "en_US", format!("${}", amount))
    }

    /// weekly, monthly (vs weekly), yearly (vs monthly, default), lifetime
    fn configuration() -> PaywallConfiguration {
        PaywallConfiguration::new(vec![
            PurchaseOption::new(product("pro.weekly"), PurchasePeriod::Weekly)
                .with_detail_text("Flexible"),
            PurchaseOption::new(product("pro.monthly"), PurchasePeriod::Monthly)
                .discounted_against(0, "Save #DISCOUNT%"),
            PurchaseOption::new(product("pro.yearly"), PurchasePeriod::Yearly)
                .discounted_against(1, "#DISCOUNT% off")
                .with_footer(OptionFooter::FreeTrialBadge {
                    format: "Try free for #quantity #period".to_string(),
                })
                .selected_by_default(),
            PurchaseOption::new(product("pro.lifetime"), PurchasePeriod::Lifetime)
                .with_footer(OptionFooter::Badge {
                    text: "One-time payment".to_string(),
                }),
        ])
        .with_dismiss_delay_ms(2000)
    }

    fn session() -> PaywallSession {
        PaywallSession::new(configuration()).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Construction
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn new_session_derives_comparisons_and_default_selection() {
        let session = session();
        assert_eq!(session.comparisons().len(), 2);
        assert_eq!(session.selected_index(), Some(2));
        assert!(session.actions().is_empty());
        assert!(!session.all_prices_resolved());
        assert_eq!(session.dismiss_delay(), Duration::from_millis(2000));
        assert!(!session.can_dismiss_at(session.opened_at()));
    }

    #[test]
    fn illegal_comparison_aborts_construction() {
        let config = PaywallConfiguration::new(vec![
            PurchaseOption::new(product("pro.lifetime"), PurchasePeriod::Lifetime),
            PurchaseOption::new(product("pro.yearly"), PurchasePeriod::Yearly)
                .discounted_against(0, "x"),
        ]);
        let result = PaywallSession::new(config);
        assert!(matches!(
            result,
            Err(ConfigurationError::IllegalComparison {
                discounted_index: 1,
                reference_index: 0,
                ..
            })
        ));
    }

    #[test]
    fn invalid_options_abort_construction() {
        let result = PaywallSession::new(PaywallConfiguration::new(vec![]));
        assert_eq!(result.unwrap_err(), ConfigurationError::NoOptions);
    }

    #[test]
    fn index_of_finds_products() {
        let session = session();
        assert_eq!(session.index_of(&product("pro.yearly")), Some(2));
        assert_eq!(session.index_of(&product("pro.unknown")), None);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Price resolution
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn record_price_completes_comparisons_in_any_order() {
        let mut session = session();

        let update = session.record_price(2, price("19.99")).unwrap();
        assert!(update.is_empty());
        assert_eq!(session.discount_for(2), None);

        let update = session.record_price(1, price("4.99")).unwrap();
        assert_eq!(update.newly_computed, vec![1]);
        assert_eq!(session.discount_for(2), Some(33));
        assert_eq!(session.discount_for(1), None);

        let update = session.record_price(0, price("1.99")).unwrap();
        assert_eq!(update.newly_computed, vec![0]);
        // 100 * 4.99 * 12 / (52 * 1.99) = 57.86
        assert_eq!(session.discount_for(1), Some(57));
    }

    #[test]
    fn record_price_rejects_second_resolution() {
        let mut session = session();
        session.record_price(1, price("4.99")).unwrap();

        let result = session.record_price(1, price("5.99"));
        assert!(matches!(result, Err(PaywallError::PriceAlreadyResolved { .. })));
        assert_eq!(
            session.options()[1].price().map(PriceInfo::amount),
            Some(Decimal::from_str("4.99").unwrap())
        );
    }

    #[test]
    fn record_price_rejects_unknown_index() {
        let mut session = session();
        let result = session.record_price(9, price("1"));
        assert_eq!(result.unwrap_err(), PaywallError::option_out_of_range(9, 4));
    }

    #[test]
    fn apply_lookup_routes_success_by_product() {
        let mut session = session();
        let update = session
            .apply_lookup(&product("pro.monthly"), Ok(price("4.99")))
            .unwrap();
        assert!(update.is_resolved());
        assert_eq!(update.index(), 1);
        assert!(session.options()[1].is_priced());
    }

    #[test]
    fn apply_lookup_failure_leaves_comparisons_uncomputed() {
        let mut session = session();
        session.record_price(2, price("19.99")).unwrap();

        let update = session
            .apply_lookup(
                &product("pro.monthly"),
                Err(PriceLookupFailure::unavailable("store offline")),
            )
            .unwrap();

        assert_eq!(
            update,
            PriceUpdate::Failed {
                index: 1,
                failure: PriceLookupFailure::unavailable("store offline"),
            }
        );
        assert!(!session.options()[1].is_priced());
        assert_eq!(session.discount_badge(2), None);
    }

    #[test]
    fn apply_lookup_rejects_unknown_product() {
        let mut session = session();
        let result = session.apply_lookup(&product("pro.other"), Ok(price("1")));
        assert_eq!(
            result.unwrap_err(),
            PaywallError::unknown_product(product("pro.other"))
        );
    }

    #[test]
    fn all_prices_resolved_after_every_option_priced() {
        let mut session = session();
        for (index, amount) in ["1.99", "4.99", "19.99", "49.99"].iter().enumerate() {
            session.record_price(index, price(amount)).unwrap();
        }
        assert!(session.all_prices_resolved());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Display helpers
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn detail_text_resolves_each_kind() {
        let mut session = session();
        assert_eq!(session.detail_text(0), Some("Flexible".to_string()));
        assert_eq!(session.detail_text(2), None);
        assert_eq!(session.detail_text(3), None);

        session.record_price(1, price("4.99")).unwrap();
        session.record_price(2, price("19.99")).unwrap();
        assert_eq!(session.detail_text(2), Some("33% off".to_string()));
    }

    #[test]
    fn footer_text_renders_free_trial_once_priced() {
        let mut session = session();
        assert_eq!(session.footer_text(2), None);

        session
            .record_price(2, price("19.99").with_free_trial(FreeTrial::Week(1)))
            .unwrap();
        assert_eq!(
            session.footer_text(2),
            Some("Try free for 7 days".to_string())
        );
    }

    #[test]
    fn footer_text_without_free_trial_is_omitted() {
        let mut session = session();
        session.record_price(2, price("19.99")).unwrap();
        assert_eq!(session.footer_text(2), None);
    }

    #[test]
    fn free_trial_badge_on_lifetime_is_omitted() {
        let config = PaywallConfiguration::new(vec![PurchaseOption::new(
            product("pro.lifetime"),
            PurchasePeriod::Lifetime,
        )
        .with_footer(OptionFooter::FreeTrialBadge {
            format: "#quantity #period".to_string(),
        })]);
        let mut session = PaywallSession::new(config).unwrap();
        session
            .record_price(0, price("49.99").with_free_trial(FreeTrial::Day(3)))
            .unwrap();
        assert_eq!(session.footer_text(0), None);
    }

    fn single_option_session(period: PurchasePeriod) -> PaywallSession {
        let config = PaywallConfiguration::single_option(
            PurchaseOption::new(product("pro.single"), period).with_footer(
                OptionFooter::TrialOffer {
                    format: "Start your #quantity-#periodTrial free trial, then #price per #periodSubscription"
                        .to_string(),
                },
            ),
        );
        PaywallSession::new(config).unwrap()
    }

    #[test]
    fn trial_offer_renders_once_priced() {
        let mut session = single_option_session(PurchasePeriod::Yearly);
        assert_eq!(session.selected_index(), Some(0));
        assert_eq!(session.footer_text(0), None);

        session
            .record_price(0, price("19.99").with_free_trial(FreeTrial::Day(3)))
            .unwrap();
        assert_eq!(
            session.footer_text(0),
            Some("Start your 3-days free trial, then $19.99 per year".to_string())
        );
    }

    #[test]
    fn trial_offer_shows_weeks_as_days() {
        let mut session = single_option_session(PurchasePeriod::Monthly);
        session
            .record_price(0, price("4.99").with_free_trial(FreeTrial::Week(1)))
            .unwrap();
        assert_eq!(
            session.footer_text(0),
            Some("Start your 7-days free trial, then $4.99 per month".to_string())
        );
    }

    #[test]
    fn trial_offer_without_free_trial_or_on_lifetime_is_omitted() {
        let mut session = single_option_session(PurchasePeriod::Weekly);
        session.record_price(0, price("2.99")).unwrap();
        assert_eq!(session.footer_text(0), None);

        let mut lifetime = single_option_session(PurchasePeriod::Lifetime);
        lifetime
            .record_price(0, price("49.99").with_free_trial(FreeTrial::Day(3)))
            .unwrap();
        assert_eq!(lifetime.footer_text(0), None);
    }

    #[test]
    fn dismiss_becomes_available_after_delay() {
        let session = session();
        let opened = session.opened_at().duration_since(&Timestamp::from_datetime(
            chrono::DateTime::<chrono::Utc>::UNIX_EPOCH,
        ));
        let at = |millis: i64| {
            Timestamp::from_datetime(
                chrono::DateTime::<chrono::Utc>::UNIX_EPOCH
                    + opened
                    + chrono::Duration::milliseconds(millis),
            )
        };
        assert!(!session.can_dismiss_at(at(1999)));
        assert!(session.can_dismiss_at(at(2000)));

        let immediate = PaywallSession::new(PaywallConfiguration::single_option(
            PurchaseOption::new(product("pro.single"), PurchasePeriod::Weekly),
        ))
        .unwrap();
        assert!(immediate.can_dismiss_at(immediate.opened_at()));
    }

    #[test]
    fn plain_footers_are_returned() {
        let session = session();
        assert_eq!(session.footer_text(3), Some("One-time payment".to_string()));
        assert_eq!(session.footer_text(0), None);
        assert_eq!(session.footer_text(42), None);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // User actions
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn actions_are_returned_and_logged() {
        let mut session = session();
        let appeared = session.appear();
        let selected = session.select(1).unwrap();
        session.restore();
        session.privacy();
        session.dismiss();

        assert_eq!(appeared.action_type(), "paywall.screen_appeared");
        assert_eq!(selected.product_id(), Some(&product("pro.monthly")));
        assert_eq!(session.selected_index(), Some(1));

        let types: Vec<&str> = session.actions().iter().map(PaywallAction::action_type).collect();
        assert_eq!(
            types,
            vec![
                "paywall.screen_appeared",
                "paywall.option_selected",
                "paywall.restore_tapped",
                "paywall.privacy_tapped",
                "paywall.dismissed",
            ]
        );
        assert!(session.actions().iter().all(|a| a.session_id() == session.id()));
    }

    #[test]
    fn select_rejects_unknown_index() {
        let mut session = session();
        assert!(matches!(
            session.select(4),
            Err(PaywallError::OptionOutOfRange { index: 4, option_count: 4 })
        ));
        assert_eq!(session.selected_index(), Some(2));
        assert!(session.actions().is_empty());
    }

    #[test]
    fn purchase_requires_priced_selection() {
        let mut session = session();
        assert_eq!(
            session.purchase().unwrap_err(),
            PaywallError::price_not_loaded(product("pro.yearly"))
        );

        session.record_price(2, price("19.99")).unwrap();
        let action = session.purchase().unwrap();
        assert_eq!(action.action_type(), "paywall.purchase_tapped");
        assert_eq!(action.product_id(), Some(&product("pro.yearly")));
    }

    #[test]
    fn purchase_without_selection_fails() {
        let config = PaywallConfiguration::new(vec![PurchaseOption::new(
            product("pro.monthly"),
            PurchasePeriod::Monthly,
        )]);
        let mut session = PaywallSession::new(config).unwrap();
        assert_eq!(session.purchase().unwrap_err(), PaywallError::NothingSelected);
    }
}
