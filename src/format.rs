//! Output formatting for contribution calendars.

use crate::contributions::{ContributionInfo, ContributionRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Output format for rendered calendars.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            _ => None,
        }
    }
}

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a calendar as a markdown table, records in their original order.
pub fn format_contributions_markdown(info: &ContributionInfo) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Contributions ({})\n\n", info.total_count));

    if info.records.is_empty() {
        md.push_str("_No contributions recorded._\n");
        return md;
    }

    md.push_str("| Date | Contributions | Color |\n");
    md.push_str("|------|---------------|-------|\n");
    for record in &info.records {
        md.push_str(&format!(
            "| {} | {} | `{}` |\n",
            record.date, record.contribution_count, record.color_hex
        ));
    }

    md
}

/// Format a calendar as pretty JSON using the on-disk field names.
pub fn format_contributions_json(info: &ContributionInfo) -> serde_json::Result<String> {
    serde_json::to_string_pretty(info)
}

/// Render in the requested format.
pub fn format_contributions(
    info: &ContributionInfo,
    format: OutputFormat,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Markdown => Ok(format_contributions_markdown(info)),
        OutputFormat::Json => format_contributions_json(info),
    }
}

/// Aggregate statistics over a calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributionSummary {
    /// Number of records.
    pub days: usize,
    /// The `count` field as declared by the resource.
    pub declared_total: i64,
    /// Sum of per-day contributions. Wider than the counts so any calendar sums.
    pub summed_total: i128,
    /// Days with at least one contribution.
    pub active_days: usize,
    /// Day with the most contributions; earliest wins ties.
    pub busiest: Option<ContributionRecord>,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    /// Longest run of active, consecutive calendar days.
    pub longest_streak: usize,
}

impl ContributionSummary {
    pub fn from_info(info: &ContributionInfo) -> Self {
        let records = &info.records;

        let busiest = records
            .iter()
            .reduce(|best, r| {
                if r.contribution_count > best.contribution_count {
                    r
                } else {
                    best
                }
            })
            .cloned();

        Self {
            days: records.len(),
            declared_total: info.total_count,
            summed_total: records
                .iter()
                .map(|r| i128::from(r.contribution_count))
                .sum(),
            active_days: records.iter().filter(|r| r.is_active()).count(),
            busiest,
            first_date: records.first().map(|r| r.date.clone()),
            last_date: records.last().map(|r| r.date.clone()),
            longest_streak: longest_streak(records),
        }
    }

    /// Whether the declared total agrees with the per-day sum.
    pub fn totals_match(&self) -> bool {
        i128::from(self.declared_total) == self.summed_total
    }
}

/// Unparseable dates and inactive days both end a streak.
fn longest_streak(records: &[ContributionRecord]) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous: Option<NaiveDate> = None;

    for record in records {
        let date = NaiveDate::parse_from_str(&record.date, DATE_FORMAT).ok();
        match (record.is_active(), date) {
            (true, Some(date)) => {
                current = match previous {
                    Some(prev) if prev.succ_opt() == Some(date) => current + 1,
                    _ => 1,
                };
                previous = Some(date);
            }
            _ => {
                current = 0;
                previous = None;
            }
        }
        longest = longest.max(current);
    }

    longest
}

/// Format a summary as markdown.
pub fn format_summary_markdown(summary: &ContributionSummary) -> String {
    let mut md = String::new();

    md.push_str("# Contribution Summary\n");
    md.push_str(&format!("- **days**: {}\n", summary.days));
    md.push_str(&format!("- **total**: {}\n", summary.declared_total));
    if !summary.totals_match() {
        md.push_str(&format!(
            "- **summed**: {} (differs from declared total)\n",
            summary.summed_total
        ));
    }
    md.push_str(&format!("- **active_days**: {}\n", summary.active_days));
    md.push_str(&format!("- **longest_streak**: {}\n", summary.longest_streak));

    if let (Some(first), Some(last)) = (&summary.first_date, &summary.last_date) {
        md.push_str(&format!("- **range**: {} .. {}\n", first, last));
    }

    if let Some(ref busiest) = summary.busiest {
        md.push_str(&format!(
            "- **busiest**: {} ({})\n",
            busiest.date, busiest.contribution_count
        ));
    }

    md
}

/// Render a summary in the requested format.
pub fn format_summary(
    summary: &ContributionSummary,
    format: OutputFormat,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Markdown => Ok(format_summary_markdown(summary)),
        OutputFormat::Json => serde_json::to_string_pretty(summary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, count: i64) -> ContributionRecord {
        ContributionRecord::new(date, count, "#40c463")
    }

    fn info(records: Vec<ContributionRecord>) -> ContributionInfo {
        ContributionInfo {
            total_count: records.iter().map(|r| r.contribution_count).sum(),
            records,
        }
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("md"), Some(OutputFormat::Markdown));
        assert_eq!(OutputFormat::parse("xml"), None);
    }

    #[test]
    fn test_markdown_keeps_order() {
        let md = format_contributions_markdown(&info(vec![
            record("2024-01-02", 1),
            record("2024-01-01", 2),
        ]));
        assert!(md.starts_with("# Contributions (3)\n"));
        let second = md.find("2024-01-02").unwrap();
        let first = md.find("2024-01-01").unwrap();
        assert!(second < first);
        assert!(md.contains("| 2024-01-01 | 2 | `#40c463` |"));
    }

    #[test]
    fn test_markdown_empty_state() {
        let md = format_contributions_markdown(&info(vec![]));
        assert!(md.contains("_No contributions recorded._"));
    }

    #[test]
    fn test_json_uses_wire_names() {
        let json = format_contributions(&info(vec![record("2024-01-01", 2)]), OutputFormat::Json)
            .unwrap();
        assert!(json.contains("\"hexColor\""));
        assert!(json.contains("\"contributions\""));
    }

    #[test]
    fn test_summary_streaks() {
        let summary = ContributionSummary::from_info(&info(vec![
            record("2024-01-01", 1),
            record("2024-01-02", 3),
            record("2024-01-03", 0),
            record("2024-01-04", 2),
            record("2024-01-05", 2),
            record("2024-01-06", 5),
            record("2024-01-08", 1),
        ]));
        assert_eq!(summary.days, 7);
        assert_eq!(summary.active_days, 6);
        assert_eq!(summary.longest_streak, 3);
        assert_eq!(summary.busiest.as_ref().unwrap().date, "2024-01-06");
        assert_eq!(summary.first_date.as_deref(), Some("2024-01-01"));
        assert_eq!(summary.last_date.as_deref(), Some("2024-01-08"));
        assert!(summary.totals_match());
    }

    #[test]
    fn test_summary_unparseable_date_breaks_streak() {
        let summary = ContributionSummary::from_info(&info(vec![
            record("2024-01-01", 1),
            record("yesterday", 1),
            record("2024-01-02", 1),
        ]));
        assert_eq!(summary.active_days, 3);
        assert_eq!(summary.longest_streak, 1);
    }

    #[test]
    fn test_summary_busiest_tie_keeps_earliest() {
        let summary = ContributionSummary::from_info(&info(vec![
            record("2024-01-01", 4),
            record("2024-01-02", 4),
        ]));
        assert_eq!(summary.busiest.unwrap().date, "2024-01-01");
    }

    #[test]
    fn test_summary_empty() {
        let summary = ContributionSummary::from_info(&info(vec![]));
        assert_eq!(summary.longest_streak, 0);
        assert!(summary.busiest.is_none());
        let md = format_summary_markdown(&summary);
        assert!(!md.contains("range"));
    }

    #[test]
    fn test_summary_flags_total_mismatch() {
        let mut calendar = info(vec![record("2024-01-01", 2)]);
        calendar.total_count = 10;
        let summary = ContributionSummary::from_info(&calendar);
        assert!(!summary.totals_match());
        assert!(format_summary_markdown(&summary).contains("differs from declared total"));
    }

    #[test]
    fn test_summary_sum_beyond_i64() {
        let calendar = ContributionInfo {
            total_count: i64::MAX,
            records: vec![record("2024-01-01", i64::MAX), record("2024-01-02", 1)],
        };
        let summary = ContributionSummary::from_info(&calendar);
        assert_eq!(summary.summed_total, i128::from(i64::MAX) + 1);
        assert!(!summary.totals_match());
        assert_eq!(summary.busiest.as_ref().unwrap().date, "2024-01-01");

        let md = format_summary_markdown(&summary);
        assert!(md.contains("- **summed**: 9223372036854775808 (differs from declared total)"));
        let json = format_summary(&summary, OutputFormat::Json).unwrap();
        assert!(json.contains("\"summed_total\": 9223372036854775808"));
    }
}
