//! Annual loss budget and quarterly red line
//!
//! Consumed only by the dashboard summary; the pricing engine never sees it.

use serde::{Deserialize, Serialize};

/// Budget limits for incident losses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    /// Total loss budget for the fiscal year
    pub annual_total: i64,
    /// Quarterly loss that triggers a mandatory stability review
    pub quarterly_warning: i64,
    /// ISO currency code used for display
    pub currency: String,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            annual_total: 1_500_000,
            quarterly_warning: 375_000,
            currency: "CNY".to_string(),
        }
    }
}

impl BudgetConfig {
    /// Currency symbol for display, falling back to the code itself
    pub fn symbol(&self) -> &str {
        match self.currency.as_str() {
            "CNY" | "JPY" => "¥",
            "USD" => "$",
            "EUR" => "€",
            "GBP" => "£",
            other => other,
        }
    }

    /// Validate budget limits
    pub fn validate(&self) -> Result<(), String> {
        if self.annual_total <= 0 {
            return Err(format!(
                "annual_total must be positive, got {}",
                self.annual_total
            ));
        }

        if self.quarterly_warning < 0 {
            return Err(format!(
                "quarterly_warning must be non-negative, got {}",
                self.quarterly_warning
            ));
        }

        if self.currency.trim().is_empty() {
            return Err("currency must not be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget() {
        let budget = BudgetConfig::default();
        assert_eq!(budget.annual_total, 1_500_000);
        assert_eq!(budget.quarterly_warning, 375_000);
        assert_eq!(budget.symbol(), "¥");
        assert!(budget.validate().is_ok());
    }

    #[test]
    fn test_unknown_currency_symbol() {
        let budget = BudgetConfig {
            currency: "CHF".to_string(),
            ..BudgetConfig::default()
        };
        assert_eq!(budget.symbol(), "CHF");
    }

    #[test]
    fn test_invalid_annual_total() {
        let budget = BudgetConfig {
            annual_total: 0,
            ..BudgetConfig::default()
        };
        assert!(budget.validate().is_err());
    }

    #[test]
    fn test_invalid_quarterly_warning() {
        let budget = BudgetConfig {
            quarterly_warning: -5,
            ..BudgetConfig::default()
        };
        assert!(budget.validate().is_err());
    }
}
