use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use crate::model::PlacementRecord;

const HEADER: [&str; 10] = [
    "Day",
    "Date",
    "Time",
    "Company",
    "Student Name",
    "Roll No",
    "Department",
    "Campus",
    "Designation",
    "CTC",
];

/// Writes placements as CSV: one header row, then one row per record.
pub fn write_placements_csv<W: Write>(placements: &[PlacementRecord], writer: W) -> Result<(), csv::Error> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(HEADER)?;

    for p in placements {
        let day = p.day.map(|d| d.to_string()).unwrap_or_default();
        wtr.write_record([
            day.as_str(),
            p.date.as_str(),
            p.time.as_str(),
            p.company_name.as_str(),
            p.student_name.as_str(),
            p.roll_no.as_str(),
            p.department.as_str(),
            p.campus.as_str(),
            p.designation.as_str(),
            p.ctc.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports placements to a CSV file, replacing it if present.
pub fn export_placements_to_csv(placements: &[PlacementRecord], csv_path: &Path) -> Result<(), csv::Error> {
    let file = std::fs::File::create(csv_path)?;
    write_placements_csv(placements, file)
}
