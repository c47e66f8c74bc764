use super::combine::TaskAnalysisRow;
use std::io::{Read, Write};

/// Write the combined table as CSV. The header row is the dataset column
/// vocabulary from the row struct; absent optional fields become empty
/// fields.
pub fn write_csv<W: Write>(rows: &[TaskAnalysisRow], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Parse a table previously produced by [`write_csv`]. Together they form a
/// lossless round trip modulo float formatting.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<TaskAnalysisRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.deserialize::<TaskAnalysisRow>() {
        rows.push(record?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::prepare_analysis;
    use crate::dataset::fallback_tables;

    #[test]
    fn round_trip_preserves_rows_and_values() {
        let combined = prepare_analysis(&fallback_tables());

        let mut buffer = Vec::new();
        write_csv(&combined, &mut buffer).expect("table serializes");
        let parsed = read_csv(buffer.as_slice()).expect("export parses back");

        assert_eq!(parsed, combined);
    }

    #[test]
    fn header_uses_the_dataset_column_names() {
        let combined = prepare_analysis(&fallback_tables());

        let mut buffer = Vec::new();
        write_csv(&combined, &mut buffer).expect("table serializes");
        let text = String::from_utf8(buffer).expect("csv is utf-8");
        let header = text.lines().next().expect("header row present");

        assert!(header.starts_with("Task ID,Task,Occupation,Domain"));
        assert!(header.contains("Automation Desire Rating"));
        assert!(header.contains("O*NET-SOC Code"));
        assert!(header.contains("Desire Capability Gap"));
    }

    #[test]
    fn absent_fields_round_trip_as_absent() {
        let mut combined = prepare_analysis(&fallback_tables());
        combined[0].expert_capability = None;
        combined[0].expert_confidence = None;
        combined[0].automation_readiness = None;
        combined[0].desire_capability_gap = None;
        combined[0].soc_code = None;
        combined[0].task_category = None;

        let mut buffer = Vec::new();
        write_csv(&combined, &mut buffer).expect("table serializes");
        let parsed = read_csv(buffer.as_slice()).expect("export parses back");

        assert!(parsed[0].expert_capability.is_none());
        assert!(parsed[0].soc_code.is_none());
        assert_eq!(parsed, combined);
    }

    #[test]
    fn empty_table_writes_nothing_but_parses_back_empty() {
        let mut buffer = Vec::new();
        write_csv(&[], &mut buffer).expect("empty table serializes");
        let parsed = read_csv(buffer.as_slice()).expect("empty export parses");
        assert!(parsed.is_empty());
    }
}
