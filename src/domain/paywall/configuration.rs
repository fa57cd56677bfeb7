//! Declarative paywall configuration.
//!
//! Supplied in-process or parsed from YAML/JSON. Validation happens when a
//! `PaywallSession` is built from it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{ConfigurationError, PurchaseOption};

/// Screen texts. Every button label has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaywallTexts {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default = "default_dismiss_button")]
    pub dismiss_button: String,
    #[serde(default = "default_purchase_button")]
    pub purchase_button: String,
    #[serde(default = "default_privacy_button")]
    pub privacy_button: String,
    #[serde(default = "default_restore_button")]
    pub restore_button: String,
}

fn default_dismiss_button() -> String {
    "Not now".to_string()
}

fn default_purchase_button() -> String {
    "Continue".to_string()
}

fn default_privacy_button() -> String {
    "Privacy Policy".to_string()
}

fn default_restore_button() -> String {
    "Restore purchases".to_string()
}

impl Default for PaywallTexts {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            dismiss_button: default_dismiss_button(),
            purchase_button: default_purchase_button(),
            privacy_button: default_privacy_button(),
            restore_button: default_restore_button(),
        }
    }
}

/// Full configuration of one paywall screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaywallConfiguration {
    /// Purchase options in display order; indices are stable.
    pub options: Vec<PurchaseOption>,

    #[serde(default)]
    pub texts: PaywallTexts,

    /// Delay before the dismiss button becomes visible, in milliseconds.
    #[serde(default)]
    pub dismiss_delay_ms: Option<u64>,
}

impl PaywallConfiguration {
    pub fn new(options: Vec<PurchaseOption>) -> Self {
        Self {
            options,
            texts: PaywallTexts::default(),
            dismiss_delay_ms: None,
        }
    }

    /// Single-option paywall; the option is selected when the paywall opens.
    pub fn single_option(option: PurchaseOption) -> Self {
        Self::new(vec![option.selected_by_default()])
    }

    /// Returns true if the paywall offers exactly one option.
    pub fn is_single_option(&self) -> bool {
        self.options.len() == 1
    }

    pub fn with_texts(mut self, texts: PaywallTexts) -> Self {
        self.texts = texts;
        self
    }

    pub fn with_dismiss_delay_ms(mut self, delay_ms: u64) -> Self {
        self.dismiss_delay_ms = Some(delay_ms);
        self
    }

    /// Parses a configuration from YAML.
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }

    /// Parses a configuration from JSON.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    /// Checks option-level invariants that do not involve comparisons.
    ///
    /// # Errors
    ///
    /// - `NoOptions` if the option list is empty
    /// - `DuplicateProduct` if two options sell the same product
    /// - `MultipleDefaultSelections` if more than one option is pre-selected
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.options.is_empty() {
            return Err(ConfigurationError::NoOptions);
        }

        let mut seen = HashMap::new();
        for (index, option) in self.options.iter().enumerate() {
            if let Some(&first_index) = seen.get(&option.product_id) {
                return Err(ConfigurationError::DuplicateProduct {
                    product_id: option.product_id.clone(),
                    first_index,
                    second_index: index,
                });
            }
            seen.insert(option.product_id.clone(), index);
        }

        let mut defaults = self
            .options
            .iter()
            .enumerate()
            .filter(|(_, option)| option.selected_by_default)
            .map(|(index, _)| index);
        if let (Some(first_index), Some(second_index)) = (defaults.next(), defaults.next()) {
            return Err(ConfigurationError::MultipleDefaultSelections {
                first_index,
                second_index,
            });
        }

        Ok(())
    }

    /// Index of the option selected when the paywall opens, if any.
    pub fn default_selection(&self) -> Option<usize> {
        self.options
            .iter()
            .position(|option| option.selected_by_default)
    }
}
