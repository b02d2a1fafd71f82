// Copyright (c) 2025 the salsa-scheduler authors.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! The scheduling horizon: the range of calendar days addressed by
//! day-of-year, with its Sundays, holidays, closed days and week quotients.

use std::collections::{BTreeMap, BTreeSet};

/// Day-of-year in `[1, 366]`.
pub type Day = u16;

/// Week number as carried by the input's `ww` column.
pub type Week = u16;

const MAX_DAY: usize = 366;

#[derive(Debug, Clone)]
pub struct Horizon {
    year: i32,
    days: Vec<Day>,
    /// Weekday of January 1st of `year`, 1 = Monday through 7 = Sunday. Day-of-year
    /// weekday arithmetic is anchored here.
    start_weekday: u8,
    present: Vec<bool>,
    sundays: BTreeSet<Day>,
    holidays: BTreeSet<Day>,
    closed_holidays: BTreeSet<Day>,
    special_days: BTreeSet<Day>,
    non_holidays: Vec<Day>,
    week_of: BTreeMap<Day, Week>,
    week_to_days_all: BTreeMap<Week, Vec<Day>>,
    week_to_days: BTreeMap<Week, Vec<Day>>,
}

impl Horizon {
    pub fn new(
        year: i32,
        days: Vec<Day>,
        start_weekday: u8,
        sundays: BTreeSet<Day>,
        holidays: BTreeSet<Day>,
        closed_holidays: BTreeSet<Day>,
        week_of: BTreeMap<Day, Week>,
    ) -> Self {
        debug_assert!(days.windows(2).all(|w| w[0] < w[1]));

        let mut present = vec![false; MAX_DAY + 1];
        for &d in &days {
            present[d as usize] = true;
        }

        let special_days: BTreeSet<Day> = sundays.union(&holidays).copied().collect();
        let non_holidays: Vec<Day> = days
            .iter()
            .copied()
            .filter(|d| !closed_holidays.contains(d))
            .collect();

        let mut week_to_days_all: BTreeMap<Week, Vec<Day>> = BTreeMap::new();
        let mut week_to_days: BTreeMap<Week, Vec<Day>> = BTreeMap::new();
        for &d in &days {
            if let Some(&w) = week_of.get(&d) {
                week_to_days_all.entry(w).or_default().push(d);
                if !closed_holidays.contains(&d) {
                    week_to_days.entry(w).or_default().push(d);
                }
            }
        }

        Self {
            year,
            days,
            start_weekday,
            present,
            sundays,
            holidays,
            closed_holidays,
            special_days,
            non_holidays,
            week_of,
            week_to_days_all,
            week_to_days,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn first_day(&self) -> Day {
        self.days.first().copied().unwrap_or(0)
    }

    pub fn last_day(&self) -> Day {
        self.days.last().copied().unwrap_or(0)
    }

    pub fn contains(&self, day: Day) -> bool {
        (day as usize) <= MAX_DAY && self.present[day as usize]
    }

    pub fn start_weekday(&self) -> u8 {
        self.start_weekday
    }

    /// Weekday of a day-of-year, 1 = Monday through 7 = Sunday.
    pub fn weekday_of(&self, day: Day) -> u8 {
        debug_assert!(day >= 1);
        (((day as u32 - 1) + (self.start_weekday as u32 - 1)) % 7 + 1) as u8
    }

    pub fn is_saturday(&self, day: Day) -> bool {
        self.weekday_of(day) == 6
    }

    pub fn is_sunday(&self, day: Day) -> bool {
        self.weekday_of(day) == 7
    }

    pub fn sundays(&self) -> &BTreeSet<Day> {
        &self.sundays
    }

    /// Non-Sunday days flagged as Sunday-or-holiday in the input.
    pub fn holidays(&self) -> &BTreeSet<Day> {
        &self.holidays
    }

    pub fn closed_holidays(&self) -> &BTreeSet<Day> {
        &self.closed_holidays
    }

    pub fn special_days(&self) -> &BTreeSet<Day> {
        &self.special_days
    }

    pub fn non_holidays(&self) -> &[Day] {
        &self.non_holidays
    }

    pub fn week_of(&self, day: Day) -> Option<Week> {
        self.week_of.get(&day).copied()
    }

    /// All days of each week present in the horizon.
    pub fn week_to_days_all(&self) -> &BTreeMap<Week, Vec<Day>> {
        &self.week_to_days_all
    }

    /// Week days minus closed holidays.
    pub fn week_to_days(&self) -> &BTreeMap<Week, Vec<Day>> {
        &self.week_to_days
    }
}
