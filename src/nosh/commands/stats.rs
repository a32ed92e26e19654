//! The 7-day stats view: a per-day histogram of meals by time-of-day period,
//! plus a most-logged-foods ranking.
//!
//! [`compute`] is a pure function of `(history, library, now)`: no side
//! effects, cheap enough to recompute on every invocation. All tuning knobs
//! are compiled-in constants.

use chrono::{DateTime, Duration, Local, NaiveDate, Timelike};
use serde::Serialize;

use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::{FoodItem, MealEntry};
use crate::store::DataStore;

/// Calendar days covered, ending today.
pub const STATS_WINDOW_DAYS: usize = 7;
/// Size of the most-logged-foods ranking.
pub const TOP_FOODS: usize = 5;

const MORNING_START: u32 = 5;
const AFTERNOON_START: u32 = 11;
const EVENING_START: u32 = 17;
const NIGHT_START: u32 = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPeriod {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPeriod {
    /// Classify a local hour-of-day. Night wraps midnight:
    /// [22:00, 24:00) and [00:00, 05:00).
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            h if h >= NIGHT_START => DayPeriod::Night,
            h if h >= EVENING_START => DayPeriod::Evening,
            h if h >= AFTERNOON_START => DayPeriod::Afternoon,
            h if h >= MORNING_START => DayPeriod::Morning,
            _ => DayPeriod::Night,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayPeriod::Morning => "morning",
            DayPeriod::Afternoon => "afternoon",
            DayPeriod::Evening => "evening",
            DayPeriod::Night => "night",
        }
    }
}

/// Meal counts for one calendar day, split by period.
#[derive(Debug, Clone, Serialize)]
pub struct DayBuckets {
    pub date: NaiveDate,
    pub morning: u32,
    pub afternoon: u32,
    pub evening: u32,
    pub night: u32,
}

impl DayBuckets {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            morning: 0,
            afternoon: 0,
            evening: 0,
            night: 0,
        }
    }

    fn bump(&mut self, period: DayPeriod) {
        match period {
            DayPeriod::Morning => self.morning += 1,
            DayPeriod::Afternoon => self.afternoon += 1,
            DayPeriod::Evening => self.evening += 1,
            DayPeriod::Night => self.night += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.morning + self.afternoon + self.evening + self.night
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoodCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekStats {
    /// One bucket per calendar day, oldest first, ending today.
    pub days: Vec<DayBuckets>,
    /// Most-logged foods in the window, descending; ties keep
    /// first-encountered order.
    pub top_foods: Vec<FoodCount>,
}

/// Derive the stats view from a history/library snapshot. Days and periods
/// are bucketed in the local timezone of `now`.
pub fn compute(history: &[MealEntry], library: &[FoodItem], now: DateTime<Local>) -> WeekStats {
    let today = now.date_naive();
    let start = today - Duration::days(STATS_WINDOW_DAYS as i64 - 1);

    let mut days: Vec<DayBuckets> = (0..STATS_WINDOW_DAYS)
        .map(|i| DayBuckets::new(start + Duration::days(i as i64)))
        .collect();
    let mut tallies: Vec<FoodCount> = Vec::new();

    for entry in history {
        let local = entry.timestamp.with_timezone(&now.timezone());
        let day = local.date_naive();
        if day < start || day > today {
            continue;
        }

        let idx = (day - start).num_days() as usize;
        days[idx].bump(DayPeriod::from_hour(local.hour()));

        for item in &entry.items {
            let name = item.display_name(library);
            match tallies.iter_mut().find(|t| t.name == name) {
                Some(tally) => tally.count += 1,
                None => tallies.push(FoodCount {
                    name: name.to_string(),
                    count: 1,
                }),
            }
        }
    }

    // Stable sort: equal counts keep their first-encountered order.
    tallies.sort_by(|a, b| b.count.cmp(&a.count));
    tallies.truncate(TOP_FOODS);

    WeekStats {
        days,
        top_foods: tallies,
    }
}

pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let library = store.library()?;
    let history = store.history()?;

    let mut result = CmdResult::default();
    result.stats = Some(compute(&history, &library, Local::now()));
    Ok(result)
}
