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

//! The frozen scheduling problem: everything the constraint model needs,
//! derived once from the raw tables and immutable afterwards.

use crate::availability::Availability;
use crate::classify::classify;
use crate::employee::{Employee, EmployeeId, Role};
use crate::err::ModelError;
use crate::horizon::{Day, Horizon, Week};
use crate::label::WorkShift;
use crate::normalize::normalize;
use crate::table::Table;
use std::collections::BTreeMap;

/// Shift eligibility of one employee in one week, inferred from the observed
/// shift entries of the raw calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekShiftPreference {
    MorningOnly,
    AfternoonOnly,
    Both,
    /// No shift entry observed that week; the engine leaves both shifts open.
    Unobserved,
}

impl WeekShiftPreference {
    pub fn allows(self, shift: WorkShift) -> bool {
        match (self, shift) {
            (WeekShiftPreference::MorningOnly, WorkShift::Afternoon) => false,
            (WeekShiftPreference::AfternoonOnly, WorkShift::Morning) => false,
            _ => true,
        }
    }
}

/// Per-(day, shift) staffing targets from the estimate table.
#[derive(Debug, Clone, Default)]
pub struct StaffingTargets {
    pess_obj: BTreeMap<(Day, WorkShift), i32>,
    min_workers: BTreeMap<(Day, WorkShift), i32>,
    max_workers: BTreeMap<(Day, WorkShift), i32>,
}

impl StaffingTargets {
    pub fn insert(&mut self, day: Day, shift: WorkShift, target: i32, min: i32, max: i32) {
        self.pess_obj.insert((day, shift), target);
        self.min_workers.insert((day, shift), min);
        self.max_workers.insert((day, shift), max);
    }

    pub fn pess_obj(&self, day: Day, shift: WorkShift) -> i32 {
        self.pess_obj.get(&(day, shift)).copied().unwrap_or(0)
    }

    pub fn min_workers(&self, day: Day, shift: WorkShift) -> i32 {
        self.min_workers.get(&(day, shift)).copied().unwrap_or(0)
    }

    pub fn max_workers(&self, day: Day, shift: WorkShift) -> i32 {
        self.max_workers.get(&(day, shift)).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
pub struct Problem {
    horizon: Horizon,
    employees: Vec<Employee>,
    availability: BTreeMap<EmployeeId, Availability>,
    week_shift: BTreeMap<(EmployeeId, Week), WeekShiftPreference>,
    targets: StaffingTargets,
}

impl Problem {
    /// Builds the frozen problem from the three raw tables, running the
    /// normalize → classify pipeline.
    pub fn from_tables(tables: BTreeMap<String, Table>) -> Result<Self, ModelError> {
        let normalized = normalize(tables)?;
        classify(&normalized)
    }

    pub(crate) fn from_parts(
        horizon: Horizon,
        employees: Vec<Employee>,
        availability: BTreeMap<EmployeeId, Availability>,
        week_shift: BTreeMap<(EmployeeId, Week), WeekShiftPreference>,
        targets: StaffingTargets,
    ) -> Result<Self, ModelError> {
        if horizon.is_empty() {
            return Err(ModelError::EmptyHorizon);
        }
        if employees.is_empty() {
            return Err(ModelError::EmptyWorkforce);
        }
        debug_assert!(employees.windows(2).all(|w| w[0].id < w[1].id));

        Ok(Self {
            horizon,
            employees,
            availability,
            week_shift,
            targets,
        })
    }

    pub fn horizon(&self) -> &Horizon {
        &self.horizon
    }

    /// The complete employee set, ordered by matricula.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|i| &self.employees[i])
    }

    /// Indices (into [`Self::employees`]) of the employees whose days off the
    /// engine may choose.
    pub fn optimizable_indices(&self) -> Vec<usize> {
        self.employees
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_optimizable())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn availability(&self, id: EmployeeId) -> &Availability {
        static EMPTY: std::sync::OnceLock<Availability> = std::sync::OnceLock::new();
        self.availability
            .get(&id)
            .unwrap_or_else(|| EMPTY.get_or_init(Availability::default))
    }

    pub fn week_shift(&self, id: EmployeeId, week: Week) -> WeekShiftPreference {
        self.week_shift
            .get(&(id, week))
            .copied()
            .unwrap_or(WeekShiftPreference::Unobserved)
    }

    pub fn targets(&self) -> &StaffingTargets {
        &self.targets
    }

    pub fn indices_with_role(&self, role: Role) -> Vec<usize> {
        self.employees
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_optimizable() && e.role == role)
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_shift_preference_allows() {
        assert!(WeekShiftPreference::Both.allows(WorkShift::Morning));
        assert!(WeekShiftPreference::Unobserved.allows(WorkShift::Afternoon));
        assert!(WeekShiftPreference::MorningOnly.allows(WorkShift::Morning));
        assert!(!WeekShiftPreference::MorningOnly.allows(WorkShift::Afternoon));
        assert!(!WeekShiftPreference::AfternoonOnly.allows(WorkShift::Morning));
    }

    #[test]
    fn test_targets_default_to_zero() {
        let mut t = StaffingTargets::default();
        t.insert(3, WorkShift::Morning, 2, 1, 4);
        assert_eq!(t.pess_obj(3, WorkShift::Morning), 2);
        assert_eq!(t.min_workers(3, WorkShift::Morning), 1);
        assert_eq!(t.max_workers(3, WorkShift::Morning), 4);
        assert_eq!(t.pess_obj(3, WorkShift::Afternoon), 0);
        assert_eq!(t.min_workers(4, WorkShift::Morning), 0);
    }
}
