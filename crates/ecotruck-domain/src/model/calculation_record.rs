//! Persisted calculation submission

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::additional_gain::{total_additional_gains, AdditionalGain};
use super::calculation_input::{CalculatorForm, Percentages};
use super::savings_result::SavingsResult;

/// A submitted form together with the result computed for it
///
/// Stored and returned verbatim; renderers read `result` instead of
/// recomputing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRecord {
    pub id: Uuid,

    /// Browser/session identifier grouping submissions of one visitor
    #[serde(default)]
    pub session_id: Option<String>,

    /// Name of the user who submitted, kept even if the account goes away
    #[serde(default)]
    pub user_name: Option<String>,

    pub submitted_at: DateTime<Utc>,

    pub form: CalculatorForm,

    /// Percentages applied when the result was computed
    pub percentages: Percentages,

    pub result: SavingsResult,

    #[serde(default)]
    pub additional_gains: Vec<AdditionalGain>,
}

impl CalculationRecord {
    /// New record with a fresh id stamped at `submitted_at`
    pub fn new(
        form: CalculatorForm,
        percentages: Percentages,
        result: SavingsResult,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id: None,
            user_name: None,
            submitted_at,
            form,
            percentages,
            result,
            additional_gains: Vec::new(),
        }
    }

    pub fn company_name(&self) -> &str {
        &self.form.company_name
    }

    pub fn total_savings(&self) -> f64 {
        self.result.itemized_savings.total
    }

    pub fn additional_gains_total(&self) -> f64 {
        total_additional_gains(&self.additional_gains)
    }

    /// Monthly savings including the additional gains
    pub fn monthly_total_with_gains(&self) -> f64 {
        self.total_savings() + self.additional_gains_total()
    }

    pub fn annual_total_with_gains(&self) -> f64 {
        self.monthly_total_with_gains() * 12.0
    }

    /// Short id used in listings
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }
}
