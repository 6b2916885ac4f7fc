use serde::Serialize;

/// Income for one business day in the weekly report. Derived fresh on
/// every aggregation call; never persisted.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DailyIncome {
    /// Short weekday label ("Lun".."Dom")
    pub day: String,
    /// Day/month label ("18/06")
    pub date_label: String,
    pub income: f64,
    /// Full weekday name ("Lunes".."Domingo")
    pub full_day: String,
}

/// Summary scalars for a weekly series
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct WeekSummary {
    pub total: f64,
    pub average: f64,
    /// Full name of the highest-income day, empty for an empty series
    pub best_day: String,
}

/// Income and unit count for one exact business day
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct DayTotals {
    pub income: f64,
    pub units_sold: u32,
}
