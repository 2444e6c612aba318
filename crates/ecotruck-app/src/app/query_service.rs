//! Query Service - read access to stored calculations
//!
//! - Filtered, paginated listings
//! - Dashboard statistics
//! - Side-by-side comparison
//! - Last submission of a session

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use ecotruck_domain::model::CalculationRecord;
use ecotruck_domain::repository::CalculationRepository;
use ecotruck_domain::service::{compare_calculations, Comparison};
use ecotruck_types::Error;

pub const DEFAULT_PER_PAGE: usize = 10;

/// Errors specific to the query service
#[derive(Debug, Error)]
pub enum QueryServiceError {
    #[error("Store not accessible: {0}")]
    StoreError(String),

    #[error("Calculation not found: {0}")]
    NotFound(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl From<Error> for QueryServiceError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound(msg) => QueryServiceError::NotFound(msg),
            Error::InvalidArgument(msg) => QueryServiceError::InvalidQuery(msg),
            _ => QueryServiceError::StoreError(err.to_string()),
        }
    }
}

impl From<QueryServiceError> for Error {
    fn from(err: QueryServiceError) -> Self {
        match err {
            QueryServiceError::StoreError(msg) => {
                Error::Store(ecotruck_types::StoreError::IoError(msg))
            }
            QueryServiceError::NotFound(msg) => Error::NotFound(msg),
            QueryServiceError::InvalidQuery(msg) => Error::InvalidArgument(msg),
        }
    }
}

/// Submission date window, relative to a reference "now"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    All,
    /// Since midnight (UTC) of the reference day
    Today,
    Week,
    Month,
    Year,
}

impl Period {
    /// Earliest submission time included, `None` for no bound
    pub fn start(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Period::All => None,
            Period::Today => Some(start_of_day(now)),
            Period::Week => Some(now - Duration::days(7)),
            Period::Month => Some(now - Duration::days(30)),
            Period::Year => Some(now - Duration::days(365)),
        }
    }

    pub fn contains(&self, submitted_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.start(now).map_or(true, |start| submitted_at >= start)
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Period::All),
            "today" => Ok(Period::Today),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            other => Err(format!("unknown period: {}", other)),
        }
    }
}

fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc())
        .unwrap_or(now)
}

/// Listing filter
#[derive(Debug, Clone)]
pub struct CalculationFilter {
    /// Case-insensitive substring of the company name
    pub search: Option<String>,
    pub period: Period,
    /// 1-based
    pub page: usize,
    pub per_page: usize,
}

impl Default for CalculationFilter {
    fn default() -> Self {
        Self {
            search: None,
            period: Period::All,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl CalculationFilter {
    fn matches(&self, record: &CalculationRecord, now: DateTime<Utc>) -> bool {
        if !self.period.contains(record.submitted_at, now) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => record
                .company_name()
                .to_lowercase()
                .contains(&term.to_lowercase()),
            _ => true,
        }
    }
}

/// One page of a filtered listing, newest first
#[derive(Debug, Clone, Serialize)]
pub struct CalculationPage {
    pub items: Vec<CalculationRecord>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyCount {
    pub company_name: String,
    pub count: usize,
}

/// Dashboard summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_calculations: usize,
    pub calculations_today: usize,
    pub unique_companies: usize,
    /// Sorted by count (descending), then name
    pub companies: Vec<CompanyCount>,
}

/// Read-only queries over a calculation repository
pub struct QueryService<'a, R: CalculationRepository> {
    repo: &'a R,
}

impl<'a, R: CalculationRepository> QueryService<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub fn get(&self, id: &Uuid) -> std::result::Result<CalculationRecord, QueryServiceError> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| QueryServiceError::NotFound(id.to_string()))
    }

    /// Filtered page of calculations relative to `now`
    pub fn list(
        &self,
        filter: &CalculationFilter,
        now: DateTime<Utc>,
    ) -> std::result::Result<CalculationPage, QueryServiceError> {
        let per_page = filter.per_page.max(1);
        let page = filter.page.max(1);

        let matching: Vec<CalculationRecord> = self
            .repo
            .find_all()?
            .into_iter()
            .filter(|r| filter.matches(r, now))
            .collect();

        let total = matching.len();
        let total_pages = total.div_ceil(per_page);
        let items = matching
            .into_iter()
            .skip((page - 1).saturating_mul(per_page))
            .take(per_page)
            .collect();

        Ok(CalculationPage {
            items,
            total,
            page,
            per_page,
            total_pages,
        })
    }

    pub fn stats(&self, now: DateTime<Utc>) -> std::result::Result<DashboardStats, QueryServiceError> {
        let records = self.repo.find_all()?;
        let today = start_of_day(now);

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in &records {
            *counts.entry(record.company_name()).or_insert(0) += 1;
        }

        let mut companies: Vec<CompanyCount> = counts
            .into_iter()
            .map(|(name, count)| CompanyCount {
                company_name: name.to_string(),
                count,
            })
            .collect();
        companies.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.company_name.cmp(&b.company_name))
        });

        Ok(DashboardStats {
            total_calculations: records.len(),
            calculations_today: records.iter().filter(|r| r.submitted_at >= today).count(),
            unique_companies: companies.len(),
            companies,
        })
    }

    /// Compare calculations ordered by submission time
    pub fn compare(&self, ids: &[Uuid]) -> std::result::Result<Comparison, QueryServiceError> {
        if ids.is_empty() {
            return Err(QueryServiceError::InvalidQuery(
                "at least one calculation id is required".to_string(),
            ));
        }

        let records = self.repo.find_by_ids(ids)?;
        if let Some(missing) = ids.iter().find(|id| !records.iter().any(|r| r.id == **id)) {
            return Err(QueryServiceError::NotFound(missing.to_string()));
        }
        Ok(compare_calculations(&records))
    }

    pub fn last_for_session(
        &self,
        session_id: &str,
    ) -> std::result::Result<Option<CalculationRecord>, QueryServiceError> {
        Ok(self.repo.find_last_by_session(session_id)?)
    }

    /// Resolve a full id or a unique prefix of its simple form
    pub fn resolve_id(&self, prefix: &str) -> std::result::Result<Uuid, QueryServiceError> {
        if let Ok(id) = Uuid::parse_str(prefix) {
            return Ok(id);
        }
        let needle = prefix.trim().to_lowercase().replace('-', "");
        if needle.is_empty() {
            return Err(QueryServiceError::InvalidQuery("empty id".to_string()));
        }

        let matches: Vec<Uuid> = self
            .repo
            .find_all()?
            .iter()
            .map(|r| r.id)
            .filter(|id| id.simple().to_string().starts_with(&needle))
            .collect();

        match matches.as_slice() {
            [id] => Ok(*id),
            [] => Err(QueryServiceError::NotFound(prefix.to_string())),
            _ => Err(QueryServiceError::InvalidQuery(format!(
                "id prefix {} is ambiguous",
                prefix
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ecotruck_domain::model::{
        CalculationInput, CalculatorForm, PercentageDefaults, RetreadingCycles, TirePressureCheck,
    };
    use ecotruck_domain::compute;
    use ecotruck_infra::persistence::FileCalculationRepository;
    use tempfile::{tempdir, TempDir};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 20, 15, 30, 0).unwrap()
    }

    fn record(company: &str, age: Duration) -> CalculationRecord {
        let input = CalculationInput {
            fleet_size: 10,
            total_tires: 60,
            fuel_consumption: 3.0,
            fuel_price: 6.0,
            monthly_mileage: 8000,
            tire_lifespan: 70000,
            tire_price: 2500.0,
            retread_price: 550.0,
            retreading_cycles: RetreadingCycles::Zero,
            r1_tire_lifespan: None,
            r2_tire_lifespan: None,
            vehicles_with_tracking: None,
            tracking_cost_per_vehicle: None,
            fuel_savings_percentage: None,
            cpk_improvement_percentage: None,
            carcass_savings_percentage: None,
        };
        let defaults = PercentageDefaults::default();
        let form = CalculatorForm {
            company_name: company.to_string(),
            tire_pressure_check: TirePressureCheck::Weekly,
            fuel_savings_source: None,
            cpk_improvement_source: None,
            carcass_savings_source: None,
            input: input.clone(),
        };
        CalculationRecord::new(
            form,
            input.percentages(&defaults),
            compute(&input, &defaults),
            now() - age,
        )
    }

    fn seeded() -> (TempDir, FileCalculationRepository, Vec<CalculationRecord>) {
        let dir = tempdir().unwrap();
        let repo = FileCalculationRepository::open(dir.path().to_path_buf()).unwrap();
        let records = vec![
            record("Translog", Duration::hours(1)),
            record("TransLog Cargas", Duration::hours(20)),
            record("Rodonorte", Duration::days(3)),
            record("Translog", Duration::days(12)),
            record("Rodonorte", Duration::days(100)),
            record("Viação Sol", Duration::days(400)),
        ];
        for r in &records {
            repo.save(r).unwrap();
        }
        (dir, repo, records)
    }

    #[test]
    fn test_list_newest_first_paginated() {
        let (_dir, repo, records) = seeded();
        let service = QueryService::new(&repo);
        let filter = CalculationFilter {
            per_page: 4,
            page: 2,
            ..CalculationFilter::default()
        };
        let page = service.list(&filter, now()).unwrap();

        assert_eq!(page.total, 6);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].id, records[4].id);
        assert_eq!(page.items[1].id, records[5].id);
    }

    #[test]
    fn test_list_search_case_insensitive() {
        let (_dir, repo, _) = seeded();
        let service = QueryService::new(&repo);
        let filter = CalculationFilter {
            search: Some("translog".to_string()),
            ..CalculationFilter::default()
        };
        let page = service.list(&filter, now()).unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_list_periods() {
        let (_dir, repo, _) = seeded();
        let service = QueryService::new(&repo);
        let count = |period| {
            let filter = CalculationFilter {
                period,
                ..CalculationFilter::default()
            };
            service.list(&filter, now()).unwrap().total
        };
        assert_eq!(count(Period::Today), 1);
        assert_eq!(count(Period::Week), 3);
        assert_eq!(count(Period::Month), 4);
        assert_eq!(count(Period::Year), 5);
        assert_eq!(count(Period::All), 6);
    }

    #[test]
    fn test_page_far_beyond_last_is_empty() {
        let (_dir, repo, _) = seeded();
        let service = QueryService::new(&repo);
        for page in [3, usize::MAX] {
            let filter = CalculationFilter {
                page,
                per_page: 10,
                ..CalculationFilter::default()
            };
            let result = service.list(&filter, now()).unwrap();
            assert!(result.items.is_empty());
            assert_eq!(result.total, 6);
            assert_eq!(result.total_pages, 1);
        }
    }

    #[test]
    fn test_empty_listing() {
        let dir = tempdir().unwrap();
        let repo = FileCalculationRepository::open(dir.path().to_path_buf()).unwrap();
        let page = QueryService::new(&repo)
            .list(&CalculationFilter::default(), now())
            .unwrap();
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_stats() {
        let (_dir, repo, _) = seeded();
        let stats = QueryService::new(&repo).stats(now()).unwrap();

        assert_eq!(stats.total_calculations, 6);
        assert_eq!(stats.calculations_today, 1);
        assert_eq!(stats.unique_companies, 4);
        assert_eq!(stats.companies[0].count, 2);
        assert_eq!(stats.companies[0].company_name, "Rodonorte");
        assert_eq!(stats.companies[1].company_name, "Translog");
        assert_eq!(stats.companies[3].count, 1);
    }

    #[test]
    fn test_compare_orders_by_submission() {
        let (_dir, repo, records) = seeded();
        let service = QueryService::new(&repo);
        let comparison = service.compare(&[records[0].id, records[3].id]).unwrap();
        assert_eq!(comparison.calculations[0].id, records[3].id);
        assert_eq!(comparison.calculations[1].id, records[0].id);
    }

    #[test]
    fn test_compare_errors() {
        let (_dir, repo, records) = seeded();
        let service = QueryService::new(&repo);
        assert!(matches!(
            service.compare(&[]),
            Err(QueryServiceError::InvalidQuery(_))
        ));
        assert!(matches!(
            service.compare(&[records[0].id, Uuid::new_v4()]),
            Err(QueryServiceError::NotFound(_))
        ));
    }

    #[test]
    fn test_resolve_id_prefix() {
        let (_dir, repo, records) = seeded();
        let service = QueryService::new(&repo);
        let short = records[2].short_id();
        assert_eq!(service.resolve_id(&short).unwrap(), records[2].id);
        assert_eq!(
            service.resolve_id(&records[1].id.to_string()).unwrap(),
            records[1].id
        );
        assert!(service.resolve_id("zzzz").is_err());
    }

    #[test]
    fn test_period_from_str() {
        assert_eq!("Week".parse::<Period>().unwrap(), Period::Week);
        assert!("decade".parse::<Period>().is_err());
    }
}
