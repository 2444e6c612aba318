//! Calculation Service - submit and preview savings calculations
//!
//! Submission workflow:
//! 1. Validate the form
//! 2. Resolve percentages against the configured defaults
//! 3. Compute the savings
//! 4. Persist the record with session, user and additional gains

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info};

use ecotruck_domain::model::{AdditionalGain, CalculationRecord, CalculatorForm, SavingsResult};
use ecotruck_domain::repository::CalculationRepository;
use ecotruck_domain::{compute, validate, PercentageDefaults};
use ecotruck_types::{Error, ValidationErrors};

/// Errors specific to the calculation service
///
/// Non-validation failures keep the underlying `Error`, so converting back
/// yields the original variant (e.g. `Error::Io`).
#[derive(Debug, Error)]
pub enum CalculationServiceError {
    #[error("Invalid submission: {0}")]
    Invalid(ValidationErrors),

    #[error("Store error: {0}")]
    StoreError(#[source] Error),

    #[error("Configuration error: {0}")]
    ConfigError(#[source] Error),
}

impl From<Error> for CalculationServiceError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(errors) => CalculationServiceError::Invalid(errors),
            Error::Config(_) => CalculationServiceError::ConfigError(err),
            _ => CalculationServiceError::StoreError(err),
        }
    }
}

impl From<CalculationServiceError> for Error {
    fn from(err: CalculationServiceError) -> Self {
        match err {
            CalculationServiceError::Invalid(errors) => Error::Validation(errors),
            CalculationServiceError::StoreError(inner)
            | CalculationServiceError::ConfigError(inner) => inner,
        }
    }
}

impl From<ValidationErrors> for CalculationServiceError {
    fn from(errors: ValidationErrors) -> Self {
        CalculationServiceError::Invalid(errors)
    }
}

/// Attributes attached to a submission besides the form itself
#[derive(Debug, Clone, Default)]
pub struct SubmitOptions {
    pub session_id: Option<String>,
    pub user_name: Option<String>,
    pub additional_gains: Vec<AdditionalGain>,
}

impl SubmitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(mut self, session_id: String) -> Self {
        self.session_id = Some(session_id);
        self
    }

    pub fn with_user(mut self, user_name: String) -> Self {
        self.user_name = Some(user_name);
        self
    }

    pub fn with_additional_gains(mut self, gains: Vec<AdditionalGain>) -> Self {
        self.additional_gains = gains;
        self
    }
}

/// Validates, computes and stores calculator submissions
pub struct CalculationService<'a, R: CalculationRepository> {
    repo: &'a R,
    defaults: PercentageDefaults,
}

impl<'a, R: CalculationRepository> CalculationService<'a, R> {
    pub fn new(repo: &'a R, defaults: PercentageDefaults) -> Self {
        Self { repo, defaults }
    }

    /// Compute without storing anything
    pub fn preview(
        &self,
        form: &CalculatorForm,
    ) -> std::result::Result<SavingsResult, CalculationServiceError> {
        validate(form)?;
        Ok(compute(&form.input, &self.defaults))
    }

    /// Validate, compute and persist a submission stamped with the current time
    pub fn submit(
        &self,
        form: CalculatorForm,
        options: SubmitOptions,
    ) -> std::result::Result<CalculationRecord, CalculationServiceError> {
        self.submit_at(form, options, Utc::now())
    }

    pub fn submit_at(
        &self,
        form: CalculatorForm,
        options: SubmitOptions,
        submitted_at: DateTime<Utc>,
    ) -> std::result::Result<CalculationRecord, CalculationServiceError> {
        validate(&form)?;

        let percentages = form.input.percentages(&self.defaults);
        let result = compute(&form.input, &self.defaults);
        debug!(
            company = %form.company_name,
            total = result.itemized_savings.total,
            "computed savings"
        );

        let mut record = CalculationRecord::new(form, percentages, result, submitted_at);
        record.session_id = options.session_id;
        record.user_name = options.user_name;
        record.additional_gains = options.additional_gains;

        self.repo.save(&record)?;
        info!(id = %record.id, "submission stored");
        Ok(record)
    }
}
