//! Presentation output tests.

use chrono::{NaiveDate, Weekday};
use staffing_core::{
    calendar::build_calendar,
    distribution::HourlyDistribution,
    forecast::{run_forecast, ForecastTable},
    params::StaffingParams,
    report,
};

const MARCH: &str = "\
Date,Day,Forecasted Call Volume
2024-03-01,Friday,11250
2024-03-02,Saturday,8900
2024-04-01,Monday,1000
";

fn staffing() -> staffing_core::forecast::StaffingTable {
    let forecast = ForecastTable::from_reader(MARCH.as_bytes()).unwrap();
    run_forecast(&forecast, &StaffingParams::from_percentages(300, 85, 20, 90).unwrap())
}

#[test]
fn calendar_html_marks_data_and_gaps() {
    let rows = staffing().for_month(2024, 3);
    let grid = build_calendar(&rows, 2024, 3).unwrap();
    let html = report::calendar_html(&grid);

    for name in ["Monday", "Sunday"] {
        assert!(html.contains(&format!(">{name}</th>")), "missing header {name}");
    }
    assert!(html.contains("11,250"));
    assert!(html.contains("01-03-2024"));
    assert!(html.contains("N/A"));
    assert_eq!(html.matches("<tr>").count(), grid.weeks.len() + 1);
}

#[test]
fn html_document_wraps_body() {
    let page = report::html_document("Calendar View for March 2024", "<p>x</p>");
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("<title>Calendar View for March 2024</title>"));
    assert!(page.contains("<p>x</p>"));
}

#[test]
fn agents_chart_covers_only_the_month() {
    let spec = report::agents_chart_spec(&staffing(), 2024, 3).unwrap();
    assert_eq!(spec["title"], "Agent Requirements for March");
    let values = spec["data"]["values"].as_array().unwrap();
    assert_eq!(values.len(), 2);
    assert_eq!(values[0]["Day"], 1);
    assert!(values[0]["Agents (With Shrinkage)"].as_u64().unwrap() > 0);
    assert_eq!(spec["layer"].as_array().unwrap().len(), 2, "bars plus value labels");
}

#[test]
fn hourly_chart_has_24_bars() {
    let mut calls = [10; 24];
    calls[13] = 300;
    let dist = HourlyDistribution {
        date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        weekday: Weekday::Mon,
        daily_total: 530,
        calls,
    };
    let spec = report::hourly_chart_spec(&dist);
    let values = spec["data"]["values"].as_array().unwrap();
    assert_eq!(values.len(), 24);
    assert_eq!(values[13]["Calls"], 300);
    assert_eq!(spec["title"], "Hourly Call Distribution for 2024-03-04");

    let text = report::hourly_table_text(&dist);
    assert!(text.trim_end().ends_with("530"));
}

#[test]
fn inverse_mode_summaries() {
    assert_eq!(
        report::calls_handled_summary(50, 2596),
        "These 50 agents can handle approximately 2596 calls per day."
    );
    assert_eq!(
        report::service_level_summary(0.2856),
        "Expected Service Level Range: 26.56% - 30.56%"
    );
    assert_eq!(
        report::service_level_summary(1.0),
        "Expected Service Level Range: 98.00% - 100.00%"
    );
}

#[test]
fn text_table_lists_each_row() {
    let text = report::staffing_table_text(&staffing());
    assert_eq!(text.lines().count(), 4);
    assert!(text.lines().nth(3).unwrap().starts_with("2024-04-01"));
}
