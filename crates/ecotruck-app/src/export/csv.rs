//! CSV export

use std::fs::File;
use std::io::Write;
use std::path::Path;

use ecotruck_domain::format::format_brl;
use ecotruck_domain::model::CalculationRecord;
use ecotruck_types::Result;

use super::{user_label, HEADERS};

pub(crate) const DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Write one header row and one row per record
pub fn write_csv<W: Write>(records: &[CalculationRecord], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADERS)?;

    for record in records {
        let input = &record.form.input;
        let tracking = &record.result.tracking;
        wtr.write_record([
            record.id.to_string(),
            record.company_name().to_string(),
            input.fleet_size.to_string(),
            input.total_tires.to_string(),
            record.submitted_at.format(DATE_FORMAT).to_string(),
            format_brl(record.result.savings_per_tire_per_month),
            format_brl(record.total_savings()),
            tracking.vehicles_with_tracking.to_string(),
            format_brl(tracking.tracking_cost_per_vehicle),
            user_label(record).to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Export records to a CSV file
pub fn export_to_csv(records: &[CalculationRecord], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    write_csv(records, file)
}
