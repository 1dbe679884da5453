use weather_summary::{
    generate_daily_summary, generate_summary, load_dataset, ColumnTyping, LoadOptions,
    ParseError, SummaryError,
};

const WEEK: &str = "\
date,min,max
2021-07-02,49,67
2021-07-03,57,68
2021-07-04,56,62
2021-07-05,55,61
2021-07-06,53,62
";

#[test]
fn overview_of_a_week() {
    let dataset = load_dataset(WEEK).unwrap();
    assert_eq!(
        generate_summary(&dataset).unwrap(),
        "5 Day Overview\n  \
         The lowest temperature will be 9.4°C, and will occur on Friday 02 July 2021.\n  \
         The highest temperature will be 20.0°C, and will occur on Saturday 03 July 2021.\n  \
         The average low this week is 12.2°C.\n  \
         The average high this week is 17.8°C.\n"
    );
}

#[test]
fn daily_summary_has_one_block_per_day_in_order() {
    let dataset = load_dataset(WEEK).unwrap();
    let daily = generate_daily_summary(&dataset).unwrap();

    let headers: Vec<&str> = daily.lines().filter(|line| line.starts_with("----")).collect();
    assert_eq!(
        headers,
        vec![
            "---- Friday 02 July 2021 ----",
            "---- Saturday 03 July 2021 ----",
            "---- Sunday 04 July 2021 ----",
            "---- Monday 05 July 2021 ----",
            "---- Tuesday 06 July 2021 ----",
        ]
    );
    assert_eq!(daily.matches("\n\n").count(), dataset.len());
    assert!(daily.ends_with("  Maximum Temperature: 16.7°C\n\n"));
}

#[test]
fn header_only_file() {
    let dataset = load_dataset("date,min,max\n").unwrap();
    assert!(matches!(
        generate_summary(&dataset),
        Err(SummaryError::EmptyDataset)
    ));
    assert_eq!(generate_daily_summary(&dataset).unwrap(), "");
}

#[test]
fn malformed_row_aborts_loading() {
    let source = format!("{WEEK}2021-07-07,55\n");
    assert!(matches!(
        load_dataset(&source),
        Err(ParseError::ColumnCount { line: 7, found: 2, .. })
    ));
}

#[test]
fn field_width_typing_matches_schema_on_short_values() {
    let legacy = LoadOptions::default()
        .column_typing(ColumnTyping::FieldWidth)
        .load(WEEK)
        .unwrap();
    assert_eq!(legacy, load_dataset(WEEK).unwrap());
}
