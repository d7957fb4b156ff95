//! Alerts Report
//!
//! Spending patterns over the selected period, followed by this month's
//! comparison with last month.

use std::io::Write;

use serde::Serialize;
use tracing::info;

use crate::config::{Settings, Thresholds};
use crate::display::report::section;
use crate::error::PocketResult;
use crate::export::{write_rows, Report};
use crate::models::{Budget, DateRange, PeriodToken, Transaction, YearMonth};
use crate::services::{
    detect_patterns, filter_range, month_over_month, Insight, PatternAlert, PeriodResolver,
    Severity,
};
use crate::storage::Storage;

#[derive(Debug, Clone, Serialize)]
pub struct AlertsReport {
    pub period: PeriodToken,
    pub range: DateRange,
    /// Month the insights describe
    pub month: YearMonth,
    /// Most severe first
    pub patterns: Vec<PatternAlert>,
    pub insights: Vec<Insight>,
}

impl AlertsReport {
    pub fn build(
        transactions: &[Transaction],
        budgets: &[Budget],
        period: PeriodToken,
        range: DateRange,
        month: YearMonth,
        thresholds: &Thresholds,
    ) -> Self {
        let in_range = filter_range(transactions, &range);
        Self {
            period,
            range,
            month,
            patterns: detect_patterns(&in_range, thresholds),
            insights: month_over_month(transactions, budgets, month, thresholds),
        }
    }

    pub fn generate(
        storage: &Storage,
        resolver: &PeriodResolver,
        period: PeriodToken,
        settings: &Settings,
    ) -> PocketResult<Self> {
        let range = resolver.resolve(period);
        let month = resolver.current_month();
        info!(period = %period, %range, %month, "generating alerts report");
        Ok(Self::build(
            &storage.transactions.get_all()?,
            &storage.budgets.get_all()?,
            period,
            range,
            month,
            &settings.thresholds,
        ))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty() && self.insights.is_empty()
    }
}

fn severity_marker(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "[HIGH]",
        Severity::Medium => "[MED] ",
        Severity::Low => "[LOW] ",
    }
}

impl Report for AlertsReport {
    fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&section(&format!(
            "Spending Patterns: {} ({})",
            self.period, self.range
        )));
        if self.patterns.is_empty() {
            output.push_str("No unusual patterns found.\n");
        }
        for pattern in &self.patterns {
            output.push_str(&format!(
                "  {} {}\n",
                severity_marker(pattern.severity),
                pattern.describe(symbol)
            ));
        }

        output.push('\n');
        output.push_str(&section(&format!(
            "This Month vs Last: {} vs {}",
            self.month,
            self.month.prev()
        )));
        if self.insights.is_empty() {
            output.push_str("Nothing notable this month.\n");
        }
        for insight in &self.insights {
            let marker = if insight.is_warning() { "!" } else { "•" };
            output.push_str(&format!("  {} {}\n", marker, insight.describe(symbol)));
        }

        output
    }

    fn export_csv<W: Write>(&self, writer: W) -> PocketResult<()> {
        #[derive(Serialize)]
        struct Row {
            source: &'static str,
            level: &'static str,
            message: String,
        }

        let patterns = self.patterns.iter().map(|p| Row {
            source: "pattern",
            level: p.severity.as_str(),
            message: p.to_string(),
        });
        let insights = self.insights.iter().map(|i| Row {
            source: "insight",
            level: if i.is_warning() { "warning" } else { "info" },
            message: i.to_string(),
        });
        let rows: Vec<Row> = patterns.chain(insights).collect();
        write_rows(&rows, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::services::PatternKind;
    use chrono::NaiveDate;

    fn expense(units: i64, category: &str, m: u32, d: u32) -> Transaction {
        Transaction::expense(
            Money::from_units(units),
            category,
            NaiveDate::from_ymd_opt(2024, m, d).unwrap(),
        )
    }

    fn build(transactions: &[Transaction], budgets: &[Budget]) -> AlertsReport {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        );
        AlertsReport::build(
            transactions,
            budgets,
            PeriodToken::CurrentMonth,
            range,
            YearMonth::new(2024, 3).unwrap(),
            &Thresholds::default(),
        )
    }

    #[test]
    fn test_patterns_limited_to_range() {
        let txns = vec![
            // Duplicate pair in February only
            expense(15, "Streaming", 2, 10),
            expense(15, "Streaming", 2, 11),
            expense(40, "Food", 3, 2),
            expense(40, "Fun", 3, 3),
            expense(40, "Gym", 3, 4),
            expense(40, "Taxi", 3, 5),
        ];
        let report = build(&txns, &[]);
        assert!(report
            .patterns
            .iter()
            .all(|p| p.kind != PatternKind::Duplicate));
    }

    #[test]
    fn test_insights_for_month() {
        let budgets = vec![Budget::new(
            "Food",
            Money::from_units(100),
            YearMonth::new(2024, 3).unwrap(),
        )];
        let txns = vec![
            expense(100, "Food", 2, 5),
            expense(150, "Food", 3, 5),
        ];
        let report = build(&txns, &budgets);

        assert!(report.insights.contains(&Insight::Increased {
            category: "Food".into(),
            percentage: 50.0,
        }));
        assert!(report.insights.contains(&Insight::BudgetOverrun {
            category: "Food".into(),
            excess: Money::from_units(50),
        }));
        assert!(report
            .format_terminal("$")
            .contains("You went over the Food budget by $50.00."));
    }

    #[test]
    fn test_empty_report() {
        let report = build(&[], &[]);
        assert!(report.is_empty());
        let text = report.format_terminal("$");
        assert!(text.contains("No unusual patterns found."));
        assert!(text.contains("Nothing notable this month."));
    }

    #[test]
    fn test_csv_levels() {
        let txns = vec![expense(100, "Food", 2, 5), expense(150, "Food", 3, 5)];
        let mut buffer = Vec::new();
        build(&txns, &[]).export_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("source,level,message\n"));
        assert!(text.contains("insight,warning,You spent 50% more on food this month."));
        assert!(text.contains("pattern,low,Food is 100% of all spending ($150.00)"));
    }
}
