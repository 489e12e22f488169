use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::task::Task;

/// Which header row of the timeline to lay out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineScale {
    Years,
    Quarters,
    Months,
}

impl TimelineScale {
    pub const ALL: [TimelineScale; 3] = [Self::Years, Self::Quarters, Self::Months];
}

/// A run of consecutive months within one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearBin {
    pub year: i32,
    pub month_count: u32,
}

/// A run of consecutive months within one calendar quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuarterBin {
    pub year: i32,
    /// 1 to 4.
    pub quarter: u32,
    pub month_count: u32,
}

/// One cell of a header row, sized proportionally to the months it covers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderCell {
    pub label: String,
    pub month_count: u32,
    pub width_pct: f64,
}

/// The month-aligned span shared by every task, with its header bins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineRange {
    /// First day of the earliest month touched by any task.
    pub min_date: NaiveDate,
    /// Last day of the latest month touched by any task.
    pub max_date: NaiveDate,
    /// First-of-month dates from `min_date` to `max_date`, no gaps.
    pub months: Vec<NaiveDate>,
    pub years: Vec<YearBin>,
    pub quarters: Vec<QuarterBin>,
}

impl TimelineRange {
    /// Derive the span covering every task's start and end date.
    ///
    /// Returns `None` for an empty task list: there is no axis to draw.
    pub fn compute(tasks: &[Task]) -> Option<Self> {
        let (earliest, latest) = tasks
            .iter()
            .flat_map(|t| [t.start_date, t.end_date])
            .fold(None, |acc: Option<(NaiveDate, NaiveDate)>, date| match acc {
                None => Some((date, date)),
                Some((lo, hi)) => Some((lo.min(date), hi.max(date))),
            })?;
        Some(Self::from_bounds(earliest, latest))
    }

    /// Build the span for an explicit pair of dates, widened to whole months.
    pub fn from_bounds(earliest: NaiveDate, latest: NaiveDate) -> Self {
        let min_date = first_of_month(earliest);
        let max_date = last_of_month(latest);
        let months = month_sequence(min_date, max_date);
        let years = year_bins(&months);
        let quarters = quarter_bins(&months);

        tracing::debug!(
            %min_date,
            %max_date,
            months = months.len(),
            "timeline range computed"
        );

        Self {
            min_date,
            max_date,
            months,
            years,
            quarters,
        }
    }

    /// Days between `min_date` and `max_date`, the denominator for positions.
    pub fn total_days(&self) -> i64 {
        (self.max_date - self.min_date).num_days()
    }

    /// Number of calendar days on the axis, both ends included.
    pub fn day_count(&self) -> i64 {
        self.total_days() + 1
    }

    pub fn month_count(&self) -> usize {
        self.months.len()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min_date <= date && date <= self.max_date
    }

    /// Convert a date to a percentage offset from the start of the span.
    pub fn offset_pct(&self, date: NaiveDate) -> f64 {
        let total = self.total_days();
        if total <= 0 {
            return 0.0;
        }
        (date - self.min_date).num_days() as f64 / total as f64 * 100.0
    }

    /// Cells for one header row, widths summing to 100.
    pub fn header_row(&self, scale: TimelineScale) -> Vec<HeaderCell> {
        let total = self.months.len().max(1) as f64;
        let cell = |label: String, month_count: u32| HeaderCell {
            label,
            month_count,
            width_pct: f64::from(month_count) / total * 100.0,
        };

        match scale {
            TimelineScale::Years => self
                .years
                .iter()
                .map(|y| cell(y.year.to_string(), y.month_count))
                .collect(),
            TimelineScale::Quarters => self
                .quarters
                .iter()
                .map(|q| cell(format!("Q{}", q.quarter), q.month_count))
                .collect(),
            TimelineScale::Months => self
                .months
                .iter()
                .map(|m| cell(m.format("%b").to_string(), 1))
                .collect(),
        }
    }

    /// X positions (percent) of the vertical lines between month columns.
    pub fn month_grid_lines(&self) -> Vec<f64> {
        let n = self.months.len();
        (1..n).map(|i| i as f64 / n as f64 * 100.0).collect()
    }
}

/// Quarter of the year, 1 to 4.
pub fn quarter_of(date: NaiveDate) -> u32 {
    date.month0() / 3 + 1
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

fn month_sequence(min_date: NaiveDate, max_date: NaiveDate) -> Vec<NaiveDate> {
    let mut months = Vec::new();
    let mut current = min_date;
    while current <= max_date {
        months.push(current);
        current = match current.checked_add_months(Months::new(1)) {
            Some(next) => next,
            None => break,
        };
    }
    months
}

fn year_bins(months: &[NaiveDate]) -> Vec<YearBin> {
    let mut bins: Vec<YearBin> = Vec::new();
    for month in months {
        match bins.last_mut() {
            Some(last) if last.year == month.year() => last.month_count += 1,
            _ => bins.push(YearBin {
                year: month.year(),
                month_count: 1,
            }),
        }
    }
    bins
}

fn quarter_bins(months: &[NaiveDate]) -> Vec<QuarterBin> {
    let mut bins: Vec<QuarterBin> = Vec::new();
    for month in months {
        let (year, quarter) = (month.year(), quarter_of(*month));
        match bins.last_mut() {
            Some(last) if last.year == year && last.quarter == quarter => last.month_count += 1,
            _ => bins.push(QuarterBin {
                year,
                quarter,
                month_count: 1,
            }),
        }
    }
    bins
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn empty_task_list_has_no_range() {
        assert!(TimelineRange::compute(&[]).is_none());
    }

    #[test]
    fn normalizes_to_whole_months() {
        let tasks = vec![
            Task::new(1, "a", d(2024, 1, 12), d(2024, 1, 31)),
            Task::new(2, "b", d(2024, 2, 1), d(2024, 2, 15)),
        ];
        let range = TimelineRange::compute(&tasks).unwrap();
        assert_eq!(range.min_date, d(2024, 1, 1));
        // 2024 is a leap year.
        assert_eq!(range.max_date, d(2024, 2, 29));
        assert_eq!(range.months, vec![d(2024, 1, 1), d(2024, 2, 1)]);
        assert_eq!(range.total_days(), 59);
        assert_eq!(range.day_count(), 60);
    }

    #[test]
    fn end_dates_widen_the_span() {
        // The latest end belongs to a task that starts early.
        let tasks = vec![
            Task::new(1, "a", d(2023, 11, 20), d(2024, 3, 2)),
            Task::new(2, "b", d(2024, 1, 1), d(2024, 1, 5)),
        ];
        let range = TimelineRange::compute(&tasks).unwrap();
        assert_eq!(range.min_date, d(2023, 11, 1));
        assert_eq!(range.max_date, d(2024, 3, 31));
        assert_eq!(range.month_count(), 5);
    }

    #[test]
    fn months_have_no_gaps_even_without_tasks() {
        let tasks = vec![
            Task::new(1, "a", d(2024, 1, 1), d(2024, 1, 2)),
            Task::new(2, "b", d(2024, 6, 1), d(2024, 6, 2)),
        ];
        let range = TimelineRange::compute(&tasks).unwrap();
        assert_eq!(range.month_count(), 6);
        assert_eq!(range.months[3], d(2024, 4, 1));
    }

    #[test]
    fn aggregates_years_and_quarters() {
        let range = TimelineRange::from_bounds(d(2023, 11, 15), d(2024, 4, 3));
        assert_eq!(
            range.years,
            vec![
                YearBin { year: 2023, month_count: 2 },
                YearBin { year: 2024, month_count: 4 },
            ]
        );
        assert_eq!(
            range.quarters,
            vec![
                QuarterBin { year: 2023, quarter: 4, month_count: 2 },
                QuarterBin { year: 2024, quarter: 1, month_count: 3 },
                QuarterBin { year: 2024, quarter: 2, month_count: 1 },
            ]
        );
    }

    #[test]
    fn header_rows_are_proportional() {
        let range = TimelineRange::from_bounds(d(2023, 11, 15), d(2024, 4, 3));
        let years = range.header_row(TimelineScale::Years);
        assert_eq!(years[0].label, "2023");
        assert!((years[0].width_pct - 100.0 / 3.0).abs() < 1e-9);

        let quarters = range.header_row(TimelineScale::Quarters);
        assert_eq!(quarters[1].label, "Q1");
        assert_eq!(quarters[1].month_count, 3);

        let months = range.header_row(TimelineScale::Months);
        assert_eq!(months[0].label, "Nov");
        for row in TimelineScale::ALL {
            let total: f64 = range.header_row(row).iter().map(|c| c.width_pct).sum();
            assert!((total - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn grid_lines_split_months_evenly() {
        let range = TimelineRange::from_bounds(d(2024, 1, 1), d(2024, 4, 1));
        assert_eq!(range.month_grid_lines(), vec![25.0, 50.0, 75.0]);
    }

    #[test]
    fn offset_pct_spans_zero_to_hundred() {
        let range = TimelineRange::from_bounds(d(2024, 1, 1), d(2024, 2, 10));
        assert_eq!(range.offset_pct(range.min_date), 0.0);
        assert_eq!(range.offset_pct(range.max_date), 100.0);
        assert!(range.contains(d(2024, 2, 29)));
        assert!(!range.contains(d(2024, 3, 1)));
    }

    #[test]
    fn december_rolls_into_next_year() {
        let range = TimelineRange::from_bounds(d(2024, 12, 5), d(2024, 12, 6));
        assert_eq!(range.max_date, d(2024, 12, 31));
        assert_eq!(range.months, vec![d(2024, 12, 1)]);
    }
}
