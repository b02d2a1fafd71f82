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

//! Per-employee availability mask: which days are pre-committed (absence,
//! vacation, empty slots, pre-fixed days off) and which remain for the
//! engine to assign.

use crate::horizon::{Day, Horizon};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Availability {
    /// Days labelled `-` (or the combined `A-`/`V-` codes) in the calendar.
    pub empty_days: BTreeSet<Day>,
    /// Days labelled `V`, plus the horizon days outside the registered span.
    pub missing_days: BTreeSet<Day>,
    /// Days labelled `A`/`AP`, possibly thinned by the weekly-absence rule.
    pub absence_days: BTreeSet<Day>,
    /// Days labelled `L`, possibly grown by the weekly-absence rule.
    pub fixed_days_off: BTreeSet<Day>,
    /// Saturdays promoted to `LQ` (input `LQ` rows or the weekly rule).
    pub fixed_lqs: BTreeSet<Day>,
    /// `L`/`L_DOM` days of complete-cycle employees.
    pub free_day_complete_cycle: BTreeSet<Day>,
    /// Derived: horizon minus empty, absence, missing and closed days.
    pub working_days: BTreeSet<Day>,
}

impl Availability {
    /// Closed holidays win over every per-employee classification.
    pub fn remove_closed(&mut self, closed: &BTreeSet<Day>) {
        for set in [
            &mut self.empty_days,
            &mut self.missing_days,
            &mut self.absence_days,
            &mut self.fixed_days_off,
            &mut self.fixed_lqs,
            &mut self.free_day_complete_cycle,
        ] {
            set.retain(|d| !closed.contains(d));
        }
    }

    /// Recomputes `working_days` for the registered span `[first, last]`.
    pub fn rebuild_working_days(&mut self, horizon: &Horizon, first: Day, last: Day) {
        self.working_days = horizon
            .days()
            .iter()
            .copied()
            .filter(|&d| d >= first && d <= last && first > 0)
            .filter(|d| {
                !self.empty_days.contains(d)
                    && !self.absence_days.contains(d)
                    && !self.missing_days.contains(d)
                    && !horizon.closed_holidays().contains(d)
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn horizon(days: std::ops::RangeInclusive<Day>, closed: &[Day]) -> Horizon {
        let days: Vec<Day> = days.collect();
        let week_of: BTreeMap<Day, u16> = days.iter().map(|&d| (d, ((d - 1) / 7 + 1))).collect();
        Horizon::new(
            2024,
            days,
            1,
            BTreeSet::new(),
            BTreeSet::new(),
            closed.iter().copied().collect(),
            week_of,
        )
    }

    #[test]
    fn test_closed_days_are_scrubbed_from_every_mask() {
        let mut a = Availability::default();
        a.empty_days = [1, 5].into_iter().collect();
        a.absence_days = [5, 6].into_iter().collect();
        a.fixed_days_off = [5].into_iter().collect();
        a.remove_closed(&[5].into_iter().collect());
        assert_eq!(a.empty_days, [1].into_iter().collect());
        assert_eq!(a.absence_days, [6].into_iter().collect());
        assert!(a.fixed_days_off.is_empty());
    }

    #[test]
    fn test_working_days_respect_span_and_masks() {
        let h = horizon(1..=14, &[4]);
        let mut a = Availability::default();
        a.absence_days = [2].into_iter().collect();
        a.missing_days = [3].into_iter().collect();
        a.empty_days = [6].into_iter().collect();
        a.fixed_days_off = [7].into_iter().collect();
        a.rebuild_working_days(&h, 1, 10);

        // Fixed days off stay in the working-day set; the engine pins them
        // to L instead of excluding them.
        assert!(a.working_days.contains(&7));
        assert!(!a.working_days.contains(&2));
        assert!(!a.working_days.contains(&3));
        assert!(!a.working_days.contains(&4));
        assert!(!a.working_days.contains(&6));
        assert!(!a.working_days.contains(&11));
        assert_eq!(
            a.working_days,
            [1, 5, 7, 8, 9, 10].into_iter().collect::<BTreeSet<_>>()
        );
    }

    #[test]
    fn test_unregistered_employee_has_no_working_days() {
        let h = horizon(1..=7, &[]);
        let mut a = Availability::default();
        a.rebuild_working_days(&h, 0, 0);
        assert!(a.working_days.is_empty());
    }
}
