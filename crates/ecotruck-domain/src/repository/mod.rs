//! Repository trait definitions for data persistence

use uuid::Uuid;

use crate::model::CalculationRecord;
use ecotruck_types::Error;

/// Repository for submitted calculations
pub trait CalculationRepository {
    /// Insert or replace a calculation
    fn save(&self, record: &CalculationRecord) -> Result<(), Error>;

    /// Find a calculation by id
    fn find_by_id(&self, id: &Uuid) -> Result<Option<CalculationRecord>, Error>;

    /// All calculations, newest first
    fn find_all(&self) -> Result<Vec<CalculationRecord>, Error>;

    /// Calculations with the given ids, oldest first; unknown ids are skipped
    fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<CalculationRecord>, Error>;

    /// Remove a calculation, returning whether it existed
    fn delete(&self, id: &Uuid) -> Result<bool, Error>;

    /// Most recent calculation submitted in a session
    fn find_last_by_session(&self, session_id: &str) -> Result<Option<CalculationRecord>, Error>;
}
