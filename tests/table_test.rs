use rs_colscrape::export::{to_csv_string, to_json_value, write_csv};
use rs_colscrape::table::assemble;
use rs_colscrape::{Column, Error, ExtractedValue, Number, ResultTable};

fn column(name: &str, len: usize) -> Column {
    Column::new(
        name,
        (0..len)
            .map(|i| ExtractedValue::Text(format!("{name}-{i}")))
            .collect(),
    )
}

#[test]
fn ragged_columns_are_padded_not_truncated() {
    let table = assemble(vec![column("a", 5), column("b", 3), column("c", 5)]).expect("table");

    assert_eq!(table.len(), 5);
    for name in ["a", "b", "c"] {
        assert_eq!(table.column(name).expect("column").len(), 5);
    }

    let b = table.column("b").expect("b");
    assert_eq!(b.iter().filter(|v| v.is_absent()).count(), 2);
    assert!(b[3].is_absent() && b[4].is_absent());
    assert_eq!(b[0], ExtractedValue::Text("b-0".to_string()));
}

#[test]
fn all_empty_columns_produce_no_table() {
    let result = assemble(vec![column("a", 0), column("b", 0), column("c", 0)]);
    match result {
        Err(e) => {
            assert!(matches!(e, Error::NoDataExtracted));
            assert!(e.is_no_data());
            assert_eq!(e.to_string(), "No data extracted");
        }
        Ok(table) => panic!("expected failure, got {} rows", table.len()),
    }
}

#[test]
fn csv_round_trip_preserves_printed_values() {
    let original = assemble(vec![
        Column::new(
            "Title",
            vec![
                ExtractedValue::Text("Quoted \"title\", with comma".to_string()),
                ExtractedValue::Text("Line\nbreak".to_string()),
                ExtractedValue::Text("Plain".to_string()),
            ],
        ),
        Column::new(
            "Score",
            vec![
                ExtractedValue::Number(Number::Int(42)),
                ExtractedValue::Number(Number::Float(3.5)),
            ],
        ),
        Column::new(
            "Link",
            vec![ExtractedValue::Link("https://example.org/a?b=1&c=2".to_string())],
        ),
    ])
    .expect("table");

    let mut buf = Vec::new();
    write_csv(&original, &mut buf).expect("csv");
    let reparsed = ResultTable::from_csv(buf.as_slice()).expect("reparse");

    assert_eq!(reparsed.column_names(), original.column_names());
    assert_eq!(reparsed.len(), original.len());
    for (a, b) in original.rows().zip(reparsed.rows()) {
        let a: Vec<String> = a.iter().map(ToString::to_string).collect();
        let b: Vec<String> = b.iter().map(ToString::to_string).collect();
        assert_eq!(a, b);
    }
    assert!(reparsed.column("Link").expect("Link")[2].is_absent());
}

#[test]
fn csv_and_json_agree_on_absent() {
    let table = assemble(vec![column("x", 2), column("y", 1)]).expect("table");

    let csv = to_csv_string(&table).expect("csv");
    assert_eq!(csv.lines().nth(2), Some("x-1,"));

    let json = to_json_value(&table).expect("json");
    assert!(json[1]["y"].is_null());
    assert_eq!(json[1]["x"], "x-1");
}
