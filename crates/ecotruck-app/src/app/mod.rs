//! Application use cases

pub mod calculation_service;
pub mod query_service;

pub use calculation_service::{CalculationService, CalculationServiceError, SubmitOptions};
pub use query_service::{
    CalculationFilter, CalculationPage, CompanyCount, DashboardStats, Period, QueryService,
    QueryServiceError,
};
