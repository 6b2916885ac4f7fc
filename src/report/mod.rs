mod aggregate;
mod model;

pub use aggregate::{
    day_totals, running_total, summarize, weekday_labels, weekly_series, yesterday_totals,
};
pub use model::{DailyIncome, DayTotals, WeekSummary};
