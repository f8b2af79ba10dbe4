use crate::format::NumberLocale;

/// Engine constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Decimal places used when presenting monetary values.
    pub currency_decimals: usize,

    /// Digit grouping and decimal separator for presentation.
    pub locale: NumberLocale,

    /// Refuse to evaluate sequences that fail static validation.
    /// When unset, malformed steps are isolated at run time instead.
    pub fail_on_validation: bool,
}

impl EngineConfig {
    // ===== fixed limits of the configuration language =====
    /// Operations per step. Longer chains must be split into further steps.
    pub const MAX_OPERATIONS: usize = 5;
    /// Index that selects the item's base amount instead of a step result.
    pub const BASE_AMOUNT_INDEX: i32 = -1;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CURRENCY_DECIMALS: usize = 2;

    pub fn new() -> Self {
        Self {
            currency_decimals: Self::DEFAULT_CURRENCY_DECIMALS,
            locale: NumberLocale::default(),
            fail_on_validation: false,
        }
    }

    pub fn with_currency_decimals(mut self, decimals: usize) -> Self {
        self.currency_decimals = decimals;
        self
    }

    pub fn with_locale(mut self, locale: NumberLocale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_fail_on_validation(mut self, fail: bool) -> Self {
        self.fail_on_validation = fail;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
