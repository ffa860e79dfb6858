//! CSV and JSON export of a [`ResultTable`].
//!
//! CSV: one header row of column names, `Absent` as an empty field.
//! JSON: an array of records keyed by column name, `Absent` as `null`,
//! keys in column order.

use std::io::Write;

use serde_json::{Map, Value};

use crate::error::Result;
use crate::table::ResultTable;

/// Write `table` as CSV.
pub fn write_csv<W: Write>(table: &ResultTable, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(table.column_names())?;
    for row in table.rows() {
        wtr.write_record(row.iter().map(ToString::to_string))?;
    }
    wtr.flush()?;
    Ok(())
}

/// CSV export as a string.
pub fn to_csv_string(table: &ResultTable) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// JSON array of records.
pub fn to_json_value(table: &ResultTable) -> Result<Value> {
    let mut records = Vec::with_capacity(table.len());
    for row in table.rows() {
        let mut record = Map::new();
        for (name, value) in table.column_names().iter().zip(row) {
            record.insert(name.clone(), serde_json::to_value(value)?);
        }
        records.push(Value::Object(record));
    }
    Ok(Value::Array(records))
}

/// Pretty-printed JSON export.
pub fn to_json_string(table: &ResultTable) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_json_value(table)?)?)
}

/// Write pretty-printed JSON followed by a newline.
pub fn write_json<W: Write>(table: &ResultTable, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, &to_json_value(table)?)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{Column, ExtractedValue, Number};
    use crate::table::assemble;
    use serde_json::json;

    fn sample() -> ResultTable {
        assemble(vec![
            Column::new(
                "Title",
                vec![
                    ExtractedValue::Text("Heart, failure".to_string()),
                    ExtractedValue::Text("Stroke".to_string()),
                ],
            ),
            Column::new("Score", vec![ExtractedValue::Number(Number::Float(3.5))]),
            Column::new(
                "Link",
                vec![
                    ExtractedValue::Link("https://example.org/a".to_string()),
                    ExtractedValue::Absent,
                ],
            ),
        ])
        .expect("table")
    }

    #[test]
    fn test_csv_quotes_and_blanks() {
        let csv = to_csv_string(&sample()).expect("csv");
        assert_eq!(
            csv,
            "Title,Score,Link\n\"Heart, failure\",3.5,https://example.org/a\nStroke,,\n"
        );
    }

    #[test]
    fn test_json_records_with_nulls() {
        let value = to_json_value(&sample()).expect("json");
        assert_eq!(
            value,
            json!([
                {"Title": "Heart, failure", "Score": 3.5, "Link": "https://example.org/a"},
                {"Title": "Stroke", "Score": null, "Link": null}
            ])
        );
    }

    #[test]
    fn test_json_keeps_column_order() {
        let text = to_json_string(&sample()).expect("json");
        let title = text.find("\"Title\"").expect("Title key");
        let score = text.find("\"Score\"").expect("Score key");
        let link = text.find("\"Link\"").expect("Link key");
        assert!(title < score && score < link);
    }

    #[test]
    fn test_int_serialises_without_fraction() {
        let table = assemble(vec![Column::new("n", vec![ExtractedValue::Number(Number::Int(42))])])
            .expect("table");
        assert_eq!(to_json_value(&table).expect("json"), json!([{"n": 42}]));
    }
}
