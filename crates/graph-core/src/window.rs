// File: crates/graph-core/src/window.rs
// Summary: Inclusive calendar-day window shared by all series of one chart, walked newest-first.

use chrono::{Days, NaiveDate};

/// Closed day range `[start, end]`. Contract: `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Window over `[start, end]`; `start` is clamped so it never passes `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start: start.min(end), end }
    }

    /// Smallest window covering every date, or `None` when there are none.
    pub fn spanning<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Option<Self> {
        let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
        for d in dates {
            bounds = Some(match bounds {
                None => (d, d),
                Some((lo, hi)) => (lo.min(d), hi.max(d)),
            });
        }
        bounds.map(|(lo, hi)| Self::new(lo, hi))
    }

    /// Number of days, inclusive on both ends.
    pub fn day_count(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Keep at most the last `days` days, ending at `end`.
    pub fn limit_to(self, days: u32) -> Self {
        let days = days.max(1);
        match self.end.checked_sub_days(Days::new(u64::from(days) - 1)) {
            Some(floor) if floor > self.start => Self { start: floor, end: self.end },
            _ => self,
        }
    }

    /// Days from `end` down to `max(start, floor)`. Empty when `floor > end`.
    pub fn days_desc_from(&self, floor: NaiveDate) -> DaysDesc {
        let stop = self.start.max(floor);
        DaysDesc { next: (stop <= self.end).then_some(self.end), stop }
    }

    /// Every day of the window, newest first.
    pub fn days_desc(&self) -> DaysDesc {
        self.days_desc_from(self.start)
    }
}

/// Iterator walking one day back at a time.
#[derive(Clone, Debug)]
pub struct DaysDesc {
    next: Option<NaiveDate>,
    stop: NaiveDate,
}

impl Iterator for DaysDesc {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = if current > self.stop { current.pred_opt() } else { None };
        Some(current)
    }
}
