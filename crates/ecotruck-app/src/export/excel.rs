//! Excel export functionality

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use ecotruck_domain::model::CalculationRecord;
use ecotruck_types::{Error, Result};

use super::{user_label, HEADERS};

const SHEET_NAME: &str = "Simulações";
const COLUMN_WIDTHS: [f64; 10] = [10.0, 30.0, 15.0, 15.0, 20.0, 20.0, 20.0, 25.0, 30.0, 25.0];
const DATE_NUM_FORMAT: &str = "dd/mm/yyyy hh:mm:ss";
const CURRENCY_NUM_FORMAT: &str = "R$ #,##0.00";

/// Export records to an Excel workbook with a single sheet
pub fn export_to_excel(records: &[CalculationRecord], output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    write_calculations_sheet(sheet, records)?;

    workbook
        .save(output_path)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

fn write_calculations_sheet(sheet: &mut Worksheet, records: &[CalculationRecord]) -> Result<()> {
    sheet
        .set_name(SHEET_NAME)
        .map_err(|e| Error::Excel(e.to_string()))?;

    let header_format = Format::new().set_bold();
    let date_format = Format::new().set_num_format(DATE_NUM_FORMAT);
    let currency_format = Format::new().set_num_format(CURRENCY_NUM_FORMAT);

    for (col, header) in HEADERS.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }
    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        sheet
            .set_column_width(col as u16, *width)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    for (row_idx, record) in records.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        let input = &record.form.input;
        let tracking = &record.result.tracking;

        sheet
            .write_string(row, 0, record.id.to_string())
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 1, record.company_name())
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 2, f64::from(input.fleet_size))
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 3, f64::from(input.total_tires))
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number_with_format(row, 4, excel_serial(record.submitted_at), &date_format)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number_with_format(
                row,
                5,
                record.result.savings_per_tire_per_month,
                &currency_format,
            )
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number_with_format(row, 6, record.total_savings(), &currency_format)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number(row, 7, f64::from(tracking.vehicles_with_tracking))
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_number_with_format(row, 8, tracking.tracking_cost_per_vehicle, &currency_format)
            .map_err(|e| Error::Excel(e.to_string()))?;
        sheet
            .write_string(row, 9, user_label(record))
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    Ok(())
}

/// Excel serial date: days since 1899-12-30 with the time as fraction
fn excel_serial(at: DateTime<Utc>) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    let elapsed = at.naive_utc() - epoch;
    elapsed.num_milliseconds() as f64 / 86_400_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::sample_record;
    use chrono::TimeZone;
    use tempfile::tempdir;

    #[test]
    fn test_excel_serial() {
        let noon = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        assert!((excel_serial(noon) - 45658.5).abs() < 1e-9);
    }

    #[test]
    fn test_export_writes_workbook() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("simulacoes.xlsx");
        let records = vec![sample_record("Rota Sul", 0), sample_record("Rota Norte", 5)];

        export_to_excel(&records, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.len() > 100);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_export_empty_list() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        export_to_excel(&[], &path).unwrap();
        assert!(path.exists());
    }
}
