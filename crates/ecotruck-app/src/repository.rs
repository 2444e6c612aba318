//! Repository adapters for persistence layer

use std::path::PathBuf;

use ecotruck_infra::persistence::FileCalculationRepository;
use ecotruck_types::Result;

use crate::config::Config;

/// Open file-based calculation repository
pub fn open_calculation_repo(config: &Config) -> Result<FileCalculationRepository> {
    let store_dir = config.store_dir()?;
    FileCalculationRepository::open(store_dir)
}

/// Open calculation repository at a custom directory
pub fn open_calculation_repo_at(store_dir: PathBuf) -> Result<FileCalculationRepository> {
    FileCalculationRepository::open(store_dir)
}
