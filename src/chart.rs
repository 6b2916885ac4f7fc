use crate::report::DailyIncome;

/// Width of a full bar, in characters
const BAR_WIDTH: usize = 24;

/// Render an income series as a horizontal terminal bar chart, one row
/// per business day. Bars are scaled against the best day of the window.
pub fn render_bar_chart(series: &[DailyIncome], currency_symbol: &str) -> String {
    if series.is_empty() {
        return "No sales recorded in this window.".to_string();
    }

    let max_income = series
        .iter()
        .map(|entry| entry.income)
        .fold(0.0_f64, f64::max);

    let mut out = String::new();
    for entry in series {
        let filled = if max_income > 0.0 {
            ((entry.income / max_income) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };

        out.push_str(&format!(
            "{} {}  {}{}  {}{:>8.2}\n",
            entry.day,
            entry.date_label,
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH - filled),
            currency_symbol,
            entry.income
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: &str, date_label: &str, income: f64) -> DailyIncome {
        DailyIncome {
            day: day.to_string(),
            date_label: date_label.to_string(),
            income,
            full_day: String::new(),
        }
    }

    #[test]
    fn empty_series_renders_a_message() {
        assert_eq!(
            render_bar_chart(&[], "Bs. "),
            "No sales recorded in this window."
        );
    }

    #[test]
    fn best_day_gets_a_full_bar() {
        let series = vec![
            entry("Lun", "17/06", 500.0),
            entry("Mar", "18/06", 1000.0),
        ];
        let chart = render_bar_chart(&series, "Bs. ");
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].matches('█').count(), BAR_WIDTH);
        assert_eq!(lines[0].matches('█').count(), BAR_WIDTH / 2);
        assert!(lines[0].contains("Lun 17/06"));
        assert!(lines[0].contains("Bs. "));
        assert!(lines[1].contains("1000.00"));
    }

    #[test]
    fn zero_income_rows_render_empty_bars() {
        let series = vec![entry("Lun", "17/06", 0.0)];
        let chart = render_bar_chart(&series, "Bs. ");
        assert_eq!(chart.matches('█').count(), 0);
        assert_eq!(chart.matches('░').count(), BAR_WIDTH);
    }
}
