//! Presentation outputs: HTML calendar, Vega-Lite bar charts, and
//! the text summaries printed by the runner.
//!
//! Nothing here computes staffing; every function renders values that
//! were already produced by the formulas, forecast and calendar modules.

use crate::{
    calendar::{CalendarCell, CalendarGrid, WEEKDAY_NAMES},
    distribution::HourlyDistribution,
    error::{StaffingError, StaffingResult},
    forecast::StaffingTable,
    formulas::service_level_range,
    types::{AgentCount, CallVolume},
};
use chrono::{Datelike, Month};
use serde_json::{json, Value};

const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

const CELL_STYLE: &str = "background-color:white; padding:10px; border:1px solid #ddd; width:120px;";
const HEADER_STYLE: &str = "background-color:#4682B4; color:white; text-align:center; padding:10px;";
const TABLE_STYLE: &str = "border-collapse:collapse; font-family:Arial, sans-serif; text-align:center;";

pub fn month_name(month: u32) -> StaffingResult<&'static str> {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .ok_or(StaffingError::InvalidMonthNumber(month))
}

/// `1234567` → `"1,234,567"`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ── Calendar ───────────────────────────────────────────────────────

fn cell_html(cell: &CalendarCell) -> String {
    match cell {
        CalendarCell::Blank => String::new(),
        CalendarCell::NoData { .. } => format!(
            "<div style='{CELL_STYLE}'><span style='color:red; font-size:18px;'>N/A</span></div>"
        ),
        CalendarCell::Staffed { agents, call_volume, label, .. } => format!(
            "<div style='{CELL_STYLE}'>\
             <span style='color:blue; font-size:18px; font-weight:bold;'>{agents}</span><br>\
             <span style='font-size:16px; color:black;'>{}</span><br>\
             <span style='font-size:12px; color:gray;'>{label}</span></div>",
            format_thousands(*call_volume)
        ),
    }
}

/// The grid as an HTML `<table>` with Monday..Sunday headers.
pub fn calendar_html(grid: &CalendarGrid) -> String {
    let mut html = format!("<table style='{TABLE_STYLE}'>\n<thead><tr>");
    for name in WEEKDAY_NAMES {
        html.push_str(&format!("<th style='{HEADER_STYLE}'>{name}</th>"));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for week in &grid.weeks {
        html.push_str("<tr>");
        for cell in week {
            html.push_str(&format!("<td style='border:1px solid #ddd; padding:10px;'>{}</td>", cell_html(cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>");
    html
}

/// Wrap body fragments into a standalone page.
pub fn html_document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset='utf-8'><title>{title}</title></head>\n\
         <body>\n<h2>{title}</h2>\n{body}\n</body>\n</html>\n"
    )
}

// ── Charts ─────────────────────────────────────────────────────────

/// Bar chart of agents (with shrinkage) per day of `month`, with a
/// value label over each bar.
pub fn agents_chart_spec(rows: &StaffingTable, year: i32, month: u32) -> StaffingResult<Value> {
    let name = month_name(month)?;
    let values: Vec<Value> = rows
        .for_month(year, month)
        .rows()
        .iter()
        .map(|r| {
            json!({
                "Day": r.date.day(),
                "Date": r.date.to_string(),
                "Agents (With Shrinkage)": r.agents_with_shrinkage,
            })
        })
        .collect();

    Ok(json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": format!("Agent Requirements for {name}"),
        "width": 600,
        "height": 600,
        "data": { "values": values },
        "encoding": {
            "x": { "field": "Day", "type": "ordinal", "title": "Day of the Month", "axis": { "labelAngle": 0 } },
            "y": { "field": "Agents (With Shrinkage)", "type": "quantitative", "title": "Agents Required" }
        },
        "layer": [
            {
                "mark": "bar",
                "encoding": {
                    "color": {
                        "field": "Agents (With Shrinkage)",
                        "type": "quantitative",
                        "scale": { "scheme": "blues" }
                    },
                    "tooltip": [
                        { "field": "Date", "type": "temporal" },
                        { "field": "Agents (With Shrinkage)", "type": "quantitative" }
                    ]
                }
            },
            {
                "mark": { "type": "text", "align": "center", "baseline": "middle", "dy": -5, "color": "brown" },
                "encoding": {
                    "text": { "field": "Agents (With Shrinkage)", "type": "quantitative", "format": ".0f" }
                }
            }
        ]
    }))
}

/// Bar chart of calls per hour for one day, with value labels.
pub fn hourly_chart_spec(dist: &HourlyDistribution) -> Value {
    let values: Vec<Value> = dist
        .calls
        .iter()
        .enumerate()
        .map(|(hour, calls)| json!({ "Hour": hour, "Calls": calls }))
        .collect();

    json!({
        "$schema": VEGA_LITE_SCHEMA,
        "title": format!("Hourly Call Distribution for {}", dist.date),
        "width": 600,
        "height": 400,
        "data": { "values": values },
        "encoding": {
            "x": { "field": "Hour", "type": "ordinal", "title": "Hour of Day", "axis": { "labelAngle": 0 } },
            "y": { "field": "Calls", "type": "quantitative", "title": "Number of Calls" }
        },
        "layer": [
            {
                "mark": "bar",
                "encoding": {
                    "tooltip": [
                        { "field": "Hour", "type": "ordinal" },
                        { "field": "Calls", "type": "quantitative" }
                    ]
                }
            },
            {
                "mark": { "type": "text", "align": "center", "baseline": "middle", "dy": -10, "color": "white" },
                "encoding": { "text": { "field": "Calls", "type": "quantitative" } }
            }
        ]
    })
}

// ── Text ───────────────────────────────────────────────────────────

pub fn calls_handled_summary(agents: AgentCount, calls: CallVolume) -> String {
    format!("These {agents} agents can handle approximately {calls} calls per day.")
}

pub fn service_level_summary(service_level: f64) -> String {
    let (lo, hi) = service_level_range(service_level);
    format!(
        "Expected Service Level Range: {:.2}% - {:.2}%",
        lo * 100.0,
        hi * 100.0
    )
}

pub fn staffing_table_text(rows: &StaffingTable) -> String {
    let mut out = format!(
        "{:<12} {:<10} {:>22} {:>21} {:>23}\n",
        "Date", "Day", "Forecasted Call Volume", "Agents (No Shrinkage)", "Agents (With Shrinkage)"
    );
    for r in rows.rows() {
        out.push_str(&format!(
            "{:<12} {:<10} {:>22} {:>21} {:>23}\n",
            r.date.to_string(),
            r.day,
            r.call_volume,
            r.agents_without_shrinkage,
            r.agents_with_shrinkage
        ));
    }
    out
}

pub fn hourly_table_text(dist: &HourlyDistribution) -> String {
    let mut out = format!("{:>4} {:>8}\n", "Hour", "Calls");
    for (hour, calls) in dist.calls.iter().enumerate() {
        out.push_str(&format!("{hour:>4} {calls:>8}\n"));
    }
    out.push_str(&format!("{:>4} {:>8}\n", "sum", dist.total()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separators() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn month_names() {
        assert_eq!(month_name(1).unwrap(), "January");
        assert_eq!(month_name(12).unwrap(), "December");
        assert!(matches!(month_name(0), Err(StaffingError::InvalidMonthNumber(0))));
        assert!(matches!(month_name(13), Err(StaffingError::InvalidMonthNumber(13))));
    }
}
