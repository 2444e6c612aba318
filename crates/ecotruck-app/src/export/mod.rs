//! Export of stored calculations

mod csv;
mod excel;
mod report;

use std::path::Path;

use ecotruck_domain::model::CalculationRecord;
use ecotruck_types::{ExportFormat, Result};

pub use self::csv::{export_to_csv, write_csv};
pub use self::excel::export_to_excel;
pub use self::report::generate_calculation_report;

pub(crate) const HEADERS: [&str; 10] = [
    "ID",
    "Empresa",
    "Frota",
    "Pneus",
    "Data Submissão",
    "Economia por Pneu",
    "Economia Total",
    "Veículos com Rastreamento",
    "Custo de Rastreamento por Veículo",
    "Usuário",
];

pub(crate) const UNKNOWN_USER: &str = "Usuário não identificado";

pub(crate) fn user_label(record: &CalculationRecord) -> &str {
    match record.user_name.as_deref() {
        Some(name) if !name.trim().is_empty() => name,
        _ => UNKNOWN_USER,
    }
}

/// Write `records` to `output_path` in the requested format
pub fn export_calculations(
    records: &[CalculationRecord],
    format: ExportFormat,
    output_path: &Path,
) -> Result<()> {
    tracing::info!(
        count = records.len(),
        %format,
        path = %output_path.display(),
        "exporting calculations"
    );
    match format {
        ExportFormat::Csv => export_to_csv(records, output_path),
        ExportFormat::Xlsx => export_to_excel(records, output_path),
    }
}
