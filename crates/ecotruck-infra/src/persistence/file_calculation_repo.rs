//! File-based calculation repository implementation

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use uuid::Uuid;

use ecotruck_domain::model::CalculationRecord;
use ecotruck_domain::repository::CalculationRepository;
use ecotruck_types::{Error, Result, StoreError};

const STORE_FILE: &str = "calculations.json";

/// File-based implementation of CalculationRepository
///
/// Keeps every record in memory and rewrites `calculations.json` after each
/// mutation. The in-memory map only changes once the write succeeded.
pub struct FileCalculationRepository {
    store_path: PathBuf,
    records: RefCell<BTreeMap<Uuid, CalculationRecord>>,
}

impl FileCalculationRepository {
    /// Create or load a repository in `store_dir`
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join(STORE_FILE);

        let records = if store_path.exists() {
            let file = File::open(&store_path)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).map_err(|e| {
                warn!(path = %store_path.display(), error = %e, "calculation store unreadable");
                StoreError::Corrupted(format!("{}: {}", store_path.display(), e))
            })?
        } else {
            BTreeMap::new()
        };

        debug!(
            path = %store_path.display(),
            count = records.len(),
            "opened calculation store"
        );

        Ok(Self {
            store_path,
            records: RefCell::new(records),
        })
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Write `records` to disk
    fn persist(&self, records: &BTreeMap<Uuid, CalculationRecord>) -> Result<()> {
        let file = File::create(&self.store_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.flush()?;
        Ok(())
    }

    /// Apply `change` to a copy, persist it, then swap it in
    fn commit<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<Uuid, CalculationRecord>),
    {
        let mut next = self.records.borrow().clone();
        change(&mut next);
        self.persist(&next)?;
        *self.records.borrow_mut() = next;
        Ok(())
    }

    /// Number of stored calculations
    pub fn count(&self) -> usize {
        self.records.borrow().len()
    }

    fn sorted_newest_first(&self) -> Vec<CalculationRecord> {
        let mut records: Vec<_> = self.records.borrow().values().cloned().collect();
        records.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        records
    }
}

impl CalculationRepository for FileCalculationRepository {
    fn save(&self, record: &CalculationRecord) -> std::result::Result<(), Error> {
        self.commit(|records| {
            records.insert(record.id, record.clone());
        })?;
        info!(id = %record.id, company = %record.form.company_name, "calculation saved");
        Ok(())
    }

    fn find_by_id(&self, id: &Uuid) -> std::result::Result<Option<CalculationRecord>, Error> {
        Ok(self.records.borrow().get(id).cloned())
    }

    fn find_all(&self) -> std::result::Result<Vec<CalculationRecord>, Error> {
        Ok(self.sorted_newest_first())
    }

    fn find_by_ids(&self, ids: &[Uuid]) -> std::result::Result<Vec<CalculationRecord>, Error> {
        let records = self.records.borrow();
        let mut found: Vec<CalculationRecord> = Vec::new();
        for id in ids {
            if found.iter().any(|r| r.id == *id) {
                continue;
            }
            if let Some(record) = records.get(id) {
                found.push(record.clone());
            }
        }
        found.sort_by(|a, b| a.submitted_at.cmp(&b.submitted_at));
        Ok(found)
    }

    fn delete(&self, id: &Uuid) -> std::result::Result<bool, Error> {
        if !self.records.borrow().contains_key(id) {
            return Ok(false);
        }
        self.commit(|records| {
            records.remove(id);
        })?;
        info!(id = %id, "calculation deleted");
        Ok(true)
    }

    fn find_last_by_session(
        &self,
        session_id: &str,
    ) -> std::result::Result<Option<CalculationRecord>, Error> {
        Ok(self
            .records
            .borrow()
            .values()
            .filter(|r| r.session_id.as_deref() == Some(session_id))
            .max_by(|a, b| a.submitted_at.cmp(&b.submitted_at))
            .cloned())
    }
}
