//! Discount engine.
//!
//! Pure functions over the option sequence and its comparison list:
//!
//! - `derive_comparisons` runs once at configuration time and fails fast
//!   on any comparison the legality table does not allow.
//! - `on_price_resolved` runs after every price arrival, in any order, and
//!   completes each comparison at most once.

use serde::Serialize;

use super::{ComparisonKind, ConfigurationError, PriceComparison, PurchaseOption};

/// Outcome of one `on_price_resolved` pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonsUpdated {
    /// The option whose price triggered this pass.
    pub resolved_index: usize,
    /// Positions in the comparison list that became computed during this pass.
    pub newly_computed: Vec<usize>,
    /// Positions whose last price arrived in this pass but whose amounts
    /// give no discount (non-positive reference price or overflow).
    pub uncomputable: Vec<usize>,
}

impl ComparisonsUpdated {
    pub fn none(resolved_index: usize) -> Self {
        Self {
            resolved_index,
            newly_computed: Vec::new(),
            uncomputable: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.newly_computed.is_empty()
    }
}

/// Builds the comparison list declared by `options`.
///
/// Comparisons keep declaration order and start uncomputed.
///
/// # Errors
///
/// - `ReferenceOutOfRange` if a comparison points past the end of `options`
/// - `IllegalComparison` if the period pair is not in `LEGAL_COMPARISONS`
pub fn derive_comparisons(
    options: &[PurchaseOption],
) -> Result<Vec<PriceComparison>, ConfigurationError> {
    let mut comparisons = Vec::new();

    for (discounted_index, option) in options.iter().enumerate() {
        let Some(spec) = option.comparison() else {
            continue;
        };

        let reference_index = spec.reference_option_index;
        let reference = options.get(reference_index).ok_or_else(|| {
            ConfigurationError::reference_out_of_range(
                discounted_index,
                reference_index,
                options.len(),
            )
        })?;

        let kind = ComparisonKind::for_periods(option.period, reference.period).ok_or_else(|| {
            ConfigurationError::illegal_comparison(
                discounted_index,
                reference_index,
                option.period,
                reference.period,
            )
        })?;

        comparisons.push(PriceComparison::new(
            discounted_index,
            reference_index,
            kind,
            spec.display_format.clone(),
        ));
    }

    Ok(comparisons)
}

/// Completes every pending comparison whose two prices are now known.
///
/// Safe to call any number of times; computed comparisons are left alone
/// and comparisons still missing a price are skipped.
pub fn on_price_resolved(
    options: &[PurchaseOption],
    comparisons: &mut [PriceComparison],
    resolved_index: usize,
) -> ComparisonsUpdated {
    let mut update = ComparisonsUpdated::none(resolved_index);

    for (position, comparison) in comparisons.iter_mut().enumerate() {
        if comparison.is_computed() {
            continue;
        }

        let discounted = options
            .get(comparison.discounted_index)
            .and_then(PurchaseOption::price);
        let reference = options
            .get(comparison.reference_index)
            .and_then(PurchaseOption::price);

        let (Some(discounted), Some(reference)) = (discounted, reference) else {
            continue;
        };

        if comparison.complete(discounted.amount(), reference.amount()) {
            tracing::debug!(
                discounted_index = comparison.discounted_index,
                reference_index = comparison.reference_index,
                discount_percent = ?comparison.discount_percent(),
                "Computed price comparison"
            );
            update.newly_computed.push(position);
        } else if resolved_index == comparison.discounted_index
            || resolved_index == comparison.reference_index
        {
            tracing::warn!(
                discounted_index = comparison.discounted_index,
                reference_index = comparison.reference_index,
                reference_amount = %reference.amount(),
                "Price comparison cannot be computed from resolved amounts"
            );
            update.uncomputable.push(position);
        }
    }

    update
}
