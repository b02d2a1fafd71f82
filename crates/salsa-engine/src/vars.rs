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

//! The decision-variable arena: one boolean literal per legal
//! (employee, day, label) triple, stored in a flat table with a dense
//! existence bitmap. Pre-fixed days carry a single pinned literal.

use crate::sat::{pin_true, PostError};
use fixedbitset::FixedBitSet;
use pumpkin_solver::variables::Literal;
use pumpkin_solver::Solver;
use salsa_model::employee::{Cycle, EmployeeId};
use salsa_model::horizon::Day;
use salsa_model::label::ShiftLabel;
use salsa_model::problem::Problem;
use smallvec::SmallVec;

const MAX_DAY: usize = 366;

#[derive(Debug)]
pub struct VariableArena {
    employees: Vec<EmployeeId>,
    days: Vec<Day>,
    day_index: Vec<Option<u32>>,
    lits: Vec<Option<Literal>>,
    exists: FixedBitSet,
}

impl VariableArena {
    /// Instantiates the decision variables for the whole problem, pruning
    /// labels precluded by pre-fixed assignments and by label-day
    /// compatibility, and pinning the fixed labels of blocked days.
    pub fn build(solver: &mut Solver, problem: &Problem) -> Result<Self, PostError> {
        let employees: Vec<EmployeeId> = problem.employees().iter().map(|e| e.id).collect();
        let days: Vec<Day> = problem.horizon().days().to_vec();

        let mut day_index = vec![None; MAX_DAY + 1];
        for (i, &d) in days.iter().enumerate() {
            day_index[d as usize] = Some(i as u32);
        }

        let slots = employees.len() * days.len() * ShiftLabel::COUNT;
        let mut arena = Self {
            employees,
            days,
            day_index,
            lits: vec![None; slots],
            exists: FixedBitSet::with_capacity(slots),
        };

        let horizon = problem.horizon();
        for (e, employee) in problem.employees().iter().enumerate() {
            let avail = problem.availability(employee.id);
            for &day in horizon.days() {
                // Blocked days get exactly one pinned label; the sets are
                // disjointed in priority order.
                let pinned = if avail.empty_days.contains(&day) {
                    Some(ShiftLabel::Unassigned)
                } else if avail.missing_days.contains(&day) {
                    Some(ShiftLabel::Vacation)
                } else if avail.fixed_lqs.contains(&day) {
                    Some(ShiftLabel::QualityOff)
                } else if avail.fixed_days_off.contains(&day) {
                    Some(ShiftLabel::DayOff)
                } else if avail.absence_days.contains(&day) {
                    Some(ShiftLabel::Absence)
                } else if horizon.closed_holidays().contains(&day) {
                    Some(ShiftLabel::ClosedHoliday)
                } else {
                    None
                };

                if let Some(label) = pinned {
                    let lit = arena.insert(solver, e, day, label);
                    pin_true(solver, lit)?;
                    continue;
                }

                if day < employee.first_day || day > employee.last_day || employee.first_day == 0 {
                    continue;
                }

                arena.insert(solver, e, day, ShiftLabel::Morning);
                arena.insert(solver, e, day, ShiftLabel::Afternoon);
                if employee.cycle == Cycle::Standard {
                    arena.insert(solver, e, day, ShiftLabel::DayOff);
                    if horizon.is_saturday(day) && horizon.contains(day + 1) {
                        arena.insert(solver, e, day, ShiftLabel::QualityOff);
                    }
                }
            }
        }

        tracing::debug!(
            employees = arena.employees.len(),
            days = arena.days.len(),
            variables = arena.exists.count_ones(..),
            "decision variables created"
        );

        Ok(arena)
    }

    fn insert(&mut self, solver: &mut Solver, e: usize, day: Day, label: ShiftLabel) -> Literal {
        let lit = solver.new_literal();
        let slot = self
            .slot(e, day, label)
            .unwrap_or_else(|| unreachable!("day {day} is in the horizon"));
        self.lits[slot] = Some(lit);
        self.exists.insert(slot);
        lit
    }

    fn slot(&self, e: usize, day: Day, label: ShiftLabel) -> Option<usize> {
        let d = (*self.day_index.get(day as usize)?)? as usize;
        Some((e * self.days.len() + d) * ShiftLabel::COUNT + label.index())
    }

    pub fn employee_count(&self) -> usize {
        self.employees.len()
    }

    pub fn employee_id(&self, e: usize) -> EmployeeId {
        self.employees[e]
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    /// Fast existence query through the bitmap.
    pub fn has(&self, e: usize, day: Day, label: ShiftLabel) -> bool {
        self.slot(e, day, label)
            .map(|s| self.exists.contains(s))
            .unwrap_or(false)
    }

    pub fn lit(&self, e: usize, day: Day, label: ShiftLabel) -> Option<Literal> {
        let slot = self.slot(e, day, label)?;
        if self.exists.contains(slot) {
            self.lits[slot]
        } else {
            None
        }
    }

    /// The existing literals among `labels` at (e, day).
    pub fn lits_at(&self, e: usize, day: Day, labels: &[ShiftLabel]) -> SmallVec<[Literal; 4]> {
        labels
            .iter()
            .filter_map(|&label| self.lit(e, day, label))
            .collect()
    }

    /// All existing literals at (e, day), over the full alphabet.
    pub fn all_lits_at(&self, e: usize, day: Day) -> SmallVec<[Literal; 4]> {
        self.lits_at(e, day, &ShiftLabel::ALL)
    }
}
