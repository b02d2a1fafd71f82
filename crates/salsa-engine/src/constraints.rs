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

//! The hard-constraint system: contractual weekly caps, consecutive-working
//! caps, day-off quotas, the quality-weekend coupling and the per-week
//! free-day balance.

use crate::sat::{
    post_clause, post_count_eq, post_count_geq, post_count_leq, post_exactly_one,
    post_implication, reify_all, reify_any, PostError,
};
use crate::vars::VariableArena;
use pumpkin_solver::variables::Literal;
use pumpkin_solver::Solver;
use salsa_model::employee::Cycle;
use salsa_model::horizon::Day;
use salsa_model::label::{ShiftLabel, WorkShift};
use salsa_model::problem::Problem;
use salsa_model::settings::Settings;
use serde::Serialize;
use std::collections::BTreeMap;

const WORKING: [ShiftLabel; 2] = [ShiftLabel::Morning, ShiftLabel::Afternoon];
const FREE: [ShiftLabel; 3] = [ShiftLabel::DayOff, ShiftLabel::ClosedHoliday, ShiftLabel::QualityOff];
const OFF_PAIR: [ShiftLabel; 2] = [ShiftLabel::DayOff, ShiftLabel::QualityOff];

/// Contract types whose holders take part in quality-weekend coupling.
const QW_CONTRACT_TYPES: [u16; 3] = [4, 5, 6];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ConstraintClass {
    Unicity,
    WeeklyCap,
    ConsecutiveCap,
    LqQuota,
    WeekShiftConsistency,
    WorkingDayLabels,
    NoTripleFree,
    QualityWeekend,
    SaturdayExclusion,
    WeeklyFreeDays,
    FirstDayWorking,
    SundayQuota,
}

impl ConstraintClass {
    pub const ALL: [ConstraintClass; 12] = [
        ConstraintClass::Unicity,
        ConstraintClass::WeeklyCap,
        ConstraintClass::ConsecutiveCap,
        ConstraintClass::LqQuota,
        ConstraintClass::WeekShiftConsistency,
        ConstraintClass::WorkingDayLabels,
        ConstraintClass::NoTripleFree,
        ConstraintClass::QualityWeekend,
        ConstraintClass::SaturdayExclusion,
        ConstraintClass::WeeklyFreeDays,
        ConstraintClass::FirstDayWorking,
        ConstraintClass::SundayQuota,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ConstraintClass::Unicity => "unicity",
            ConstraintClass::WeeklyCap => "weekly_cap",
            ConstraintClass::ConsecutiveCap => "consecutive_cap",
            ConstraintClass::LqQuota => "lq_quota",
            ConstraintClass::WeekShiftConsistency => "week_shift_consistency",
            ConstraintClass::WorkingDayLabels => "working_day_labels",
            ConstraintClass::NoTripleFree => "no_three_consecutive_off",
            ConstraintClass::QualityWeekend => "quality_weekend",
            ConstraintClass::SaturdayExclusion => "saturday_l_exclusion",
            ConstraintClass::WeeklyFreeDays => "weekly_free_days",
            ConstraintClass::FirstDayWorking => "first_day_working",
            ConstraintClass::SundayQuota => "sunday_quota",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }
}

/// Number of posted instances per constraint class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstraintCounts([usize; 12]);

impl ConstraintCounts {
    fn bump(&mut self, class: ConstraintClass) {
        self.0[class.index()] += 1;
    }

    pub fn get(&self, class: ConstraintClass) -> usize {
        self.0[class.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConstraintClass, usize)> + '_ {
        ConstraintClass::ALL.iter().map(|&c| (c, self.get(c)))
    }
}

/// Which constraint classes are posted. The infeasibility fallback disables
/// quota classes one at a time in a fixed order.
#[derive(Debug, Clone, Default)]
pub struct ConstraintToggles {
    disabled: Vec<ConstraintClass>,
}

impl ConstraintToggles {
    const RELAX_ORDER: [ConstraintClass; 3] = [
        ConstraintClass::SundayQuota,
        ConstraintClass::LqQuota,
        ConstraintClass::WeeklyFreeDays,
    ];

    pub fn is_enabled(&self, class: ConstraintClass) -> bool {
        !self.disabled.contains(&class)
    }

    /// Disables the next class in the fallback order; `None` when exhausted.
    pub fn relax_next(&mut self) -> Option<ConstraintClass> {
        for class in Self::RELAX_ORDER {
            if self.is_enabled(class) {
                self.disabled.push(class);
                return Some(class);
            }
        }
        None
    }
}

/// Reified coupling literals shared with the objective builder.
pub(crate) struct CouplingVars {
    /// Per optimizable employee index: (saturday day, quality-weekend lit).
    pub quality_weekend: BTreeMap<usize, Vec<(Day, Literal)>>,
}

pub(crate) fn post_all(
    solver: &mut Solver,
    problem: &Problem,
    arena: &VariableArena,
    settings: &Settings,
    toggles: &ConstraintToggles,
) -> Result<(ConstraintCounts, CouplingVars), PostError> {
    let mut counts = ConstraintCounts::default();
    let workers = problem.optimizable_indices();

    unicity(solver, problem, arena, &mut counts)?;
    weekly_cap(solver, problem, arena, &workers, &mut counts)?;
    consecutive_cap(solver, problem, arena, &workers, settings, &mut counts)?;
    if toggles.is_enabled(ConstraintClass::LqQuota) {
        lq_quota(solver, problem, arena, &workers, &mut counts)?;
    }
    week_shift_consistency(solver, problem, arena, &workers, &mut counts)?;
    working_day_labels(solver, problem, arena, &mut counts)?;
    no_triple_free(solver, problem, arena, &workers, &mut counts)?;
    let coupling = quality_weekend(
        solver, problem, arena, &workers, settings, toggles, &mut counts,
    )?;
    saturday_exclusion(solver, problem, arena, &workers, &mut counts)?;
    if toggles.is_enabled(ConstraintClass::WeeklyFreeDays) {
        weekly_free_days(solver, problem, arena, &workers, settings, &mut counts)?;
    }
    first_day_working(solver, problem, arena, &workers, &mut counts)?;
    if toggles.is_enabled(ConstraintClass::SundayQuota) {
        sunday_quota(solver, problem, arena, &workers, &mut counts)?;
    }

    for (class, instances) in counts.iter() {
        tracing::debug!(class = class.name(), instances, "constraints posted");
    }

    Ok((counts, coupling))
}

/// Exactly one created variable holds per (employee, day).
fn unicity(
    solver: &mut Solver,
    problem: &Problem,
    arena: &VariableArena,
    counts: &mut ConstraintCounts,
) -> Result<(), PostError> {
    for e in 0..problem.employees().len() {
        for &day in problem.horizon().days() {
            let lits = arena.all_lits_at(e, day);
            if !lits.is_empty() {
                post_exactly_one(solver, &lits)?;
                counts.bump(ConstraintClass::Unicity);
            }
        }
    }
    Ok(())
}

/// At most `contract_type` working shifts per week; closed holidays are not
/// part of the week here.
fn weekly_cap(
    solver: &mut Solver,
    problem: &Problem,
    arena: &VariableArena,
    workers: &[usize],
    counts: &mut ConstraintCounts,
) -> Result<(), PostError> {
    for &e in workers {
        let employee = &problem.employees()[e];
        let Some(contract) = employee.contract else {
            continue;
        };
        for days in problem.horizon().week_to_days().values() {
            let lits: Vec<Literal> = days
                .iter()
                .flat_map(|&d| arena.lits_at(e, d, &WORKING))
                .collect();
            if !lits.is_empty() {
                post_count_leq(solver, &lits, contract.contract_type as i32)?;
                counts.bump(ConstraintClass::WeeklyCap);
            }
        }
    }
    Ok(())
}

/// At most `maxi` working shifts in any window of `maxi + 1` consecutive
/// days.
fn consecutive_cap(
    solver: &mut Solver,
    problem: &Problem,
    arena: &VariableArena,
    workers: &[usize],
    settings: &Settings,
    counts: &mut ConstraintCounts,
) -> Result<(), PostError> {
    let maxi = settings.max_continuous_working_days as i32;
    let horizon = problem.horizon();
    let (first, last) = (horizon.first_day(), horizon.last_day());
    if last < first + maxi as Day {
        return Ok(());
    }
    for &e in workers {
        for start in first..=(last - maxi as Day) {
            let lits: Vec<Literal> = (start..=start + maxi as Day)
                .flat_map(|d| arena.lits_at(e, d, &WORKING))
                .collect();
            if lits.len() as i32 > maxi {
                post_count_leq(solver, &lits, maxi)?;
                counts.bump(ConstraintClass::ConsecutiveCap);
            }
        }
    }
    Ok(())
}

/// At least `c2d` LQ assignments over the employee's working days.
fn lq_quota(
    solver: &mut Solver,
    problem: &Problem,
    arena: &VariableArena,
    workers: &[usize],
    counts: &mut ConstraintCounts,
) -> Result<(), PostError> {
    for &e in workers {
        let employee = &problem.employees()[e];
        let Some(contract) = employee.contract else {
            continue;
        };
        if contract.c2d <= 0 {
            continue;
        }
        let lits: Vec<Literal> = problem
            .availability(employee.id)
            .working_days
            .iter()
            .filter_map(|&d| arena.lit(e, d, ShiftLabel::QualityOff))
            .collect();
        post_count_geq(solver, &lits, contract.c2d)?;
        counts.bump(ConstraintClass::LqQuota);
    }
    Ok(())
}

/// A week observed as morning-only (or afternoon-only) forbids the other
/// working shift for that week.
fn week_shift_consistency(
    solver: &mut Solver,
    problem: &Problem,
    arena: &VariableArena,
    workers: &[usize],
    counts: &mut ConstraintCounts,
) -> Result<(), PostError> {
    for &e in workers {
        let id = problem.employees()[e].id;
        for (&week, days) in problem.horizon().week_to_days_all() {
            let pref = problem.week_shift(id, week);
            for shift in WorkShift::ALL {
                if pref.allows(shift) {
                    continue;
                }
                let mut posted_any = false;
                for &day in days {
                    if let Some(lit) = arena.lit(e, day, shift.label()) {
                        post_clause(solver, vec![!lit])?;
                        posted_any = true;
                    }
                }
                if posted_any {
                    counts.bump(ConstraintClass::WeekShiftConsistency);
                }
            }
        }
    }
    Ok(())
}

/// On a working day exactly one of the checkable labels holds
/// ({M, T, L, LQ}, or {M, T} for complete-cycle employees).
fn working_day_labels(
    solver: &mut Solver,
    problem: &Problem,
    arena: &VariableArena,
    counts: &mut ConstraintCounts,
) -> Result<(), PostError> {
    for (e, employee) in problem.employees().iter().enumerate() {
        let labels: &[ShiftLabel] = match employee.cycle {
            Cycle::Complete => &WORKING,
            Cycle::Standard => &ShiftLabel::CHECK,
        };
        for &day in &problem.availability(employee.id).working_days {
            let lits = arena.lits_at(e, day, labels);
            if !lits.is_empty() {
                post_exactly_one(solver, &lits)?;
                counts.bump(ConstraintClass::WorkingDayLabels);
            }
        }
    }
    Ok(())
}

/// No three consecutive free days ({L, F, LQ}) inside the working span.
fn no_triple_free(
    solver: &mut Solver,
    problem: &Problem,
    arena: &VariableArena,
    workers: &[usize],
    counts: &mut ConstraintCounts,
) -> Result<(), PostError> {
    for &e in workers {
        let working = &problem.availability(problem.employees()[e].id).working_days;
        let mut free_of: BTreeMap<Day, Literal> = BTreeMap::new();
        for &day in working {
            let lits = arena.lits_at(e, day, &FREE);
            if lits.is_empty() {
                continue;
            }
            let z = solver.new_literal();
            reify_any(solver, lits.to_vec(), z)?;
            free_of.insert(day, z);
        }
        for &day in working {
            let (Some(&a), Some(&b), Some(&c)) = (
                free_of.get(&day),
                free_of.get(&(day + 1)),
                free_of.get(&(day + 2)),
            ) else {
                continue;
            };
            if working.contains(&(day + 1)) && working.contains(&(day + 2)) {
                post_clause(solver, vec![!a, !b, !c])?;
                counts.bump(ConstraintClass::NoTripleFree);
            }
        }
    }
    Ok(())
}

/// Quality-weekend coupling: reifies `qw ↔ (Saturday LQ ∧ Sunday L)`, posts
/// the `c2d` lower bound, and keeps LQ legal only as the Saturday half of a
/// quality weekend. With `f_special_day`, quality-weekend *counting* also
/// accepts a closed-holiday half, but LQ eligibility keeps requiring the
/// Sunday L.
#[allow(clippy::too_many_arguments)]
fn quality_weekend(
    solver: &mut Solver,
    problem: &Problem,
    arena: &VariableArena,
    workers: &[usize],
    settings: &Settings,
    toggles: &ConstraintToggles,
    counts: &mut ConstraintCounts,
) -> Result<CouplingVars, PostError> {
    let horizon = problem.horizon();
    let mut coupling = CouplingVars {
        quality_weekend: BTreeMap::new(),
    };

    for &e in workers {
        let employee = &problem.employees()[e];
        let Some(contract) = employee.contract else {
            continue;
        };
        if !QW_CONTRACT_TYPES.contains(&contract.contract_type) {
            continue;
        }

        let mut weekends: Vec<(Day, Literal)> = Vec::new();
        for &sun in horizon.sundays() {
            if sun < 2 {
                continue;
            }
            let sat = sun - 1;
            let sat_lq = arena.lit(e, sat, ShiftLabel::QualityOff);
            let sun_l = arena.lit(e, sun, ShiftLabel::DayOff);

            let mut conjuncts: Vec<Literal> = Vec::new();
            for (a, b) in [(sat_lq, sun_l)] {
                if let (Some(a), Some(b)) = (a, b) {
                    let z = solver.new_literal();
                    reify_all(solver, vec![a, b], z)?;
                    conjuncts.push(z);
                }
            }
            if settings.f_special_day {
                let sat_f = arena.lit(e, sat, ShiftLabel::ClosedHoliday);
                let sun_f = arena.lit(e, sun, ShiftLabel::ClosedHoliday);
                for (a, b) in [(sat_f, sun_l), (sat_lq, sun_f)] {
                    if let (Some(a), Some(b)) = (a, b) {
                        let z = solver.new_literal();
                        reify_all(solver, vec![a, b], z)?;
                        conjuncts.push(z);
                    }
                }
            }

            let qw = match conjuncts.len() {
                0 => continue,
                1 => conjuncts[0],
                _ => {
                    let z = solver.new_literal();
                    reify_any(solver, conjuncts, z)?;
                    z
                }
            };
            weekends.push((sat, qw));
            counts.bump(ConstraintClass::QualityWeekend);
        }

        if toggles.is_enabled(ConstraintClass::LqQuota) && contract.c2d > 0 {
            let lits: Vec<Literal> = weekends.iter().map(|(_, z)| *z).collect();
            post_count_geq(solver, &lits, contract.c2d)?;
            counts.bump(ConstraintClass::QualityWeekend);
        }

        // LQ eligibility: an LQ is only legal when the following day is a
        // Sunday carrying an L.
        let working = &problem.availability(employee.id).working_days;
        for &day in working {
            let Some(lq) = arena.lit(e, day, ShiftLabel::QualityOff) else {
                continue;
            };
            let sun = day + 1;
            let sunday_l = if horizon.sundays().contains(&sun) {
                arena.lit(e, sun, ShiftLabel::DayOff)
            } else {
                None
            };
            match sunday_l {
                Some(l) => post_implication(solver, lq, l)?,
                None => post_clause(solver, vec![!lq])?,
            }
            counts.bump(ConstraintClass::QualityWeekend);
        }

        coupling.quality_weekend.insert(e, weekends);
    }

    Ok(coupling)
}

/// A Saturday L and the following Sunday L exclude each other; that pair
/// must use the LQ encoding instead.
fn saturday_exclusion(
    solver: &mut Solver,
    problem: &Problem,
    arena: &VariableArena,
    workers: &[usize],
    counts: &mut ConstraintCounts,
) -> Result<(), PostError> {
    let horizon = problem.horizon();
    for &e in workers {
        let working = &problem.availability(problem.employees()[e].id).working_days;
        for &day in working {
            if !horizon.is_saturday(day) || !working.contains(&(day + 1)) {
                continue;
            }
            let (Some(sat_l), Some(sun_l)) = (
                arena.lit(e, day, ShiftLabel::DayOff),
                arena.lit(e, day + 1, ShiftLabel::DayOff),
            ) else {
                continue;
            };
            post_clause(solver, vec![!sat_l, !sun_l])?;
            counts.bump(ConstraintClass::SaturdayExclusion);
        }
    }
    Ok(())
}

/// Each week carries an exact number of free days (L + LQ) over the
/// employee's available days: two for a regular week, pro-rata for weeks
/// containing the admission or dismissal day, never less than the number of
/// pre-fixed days off. The equality is only posted when the week leaves the
/// engine an actual choice.
fn weekly_free_days(
    solver: &mut Solver,
    problem: &Problem,
    arena: &VariableArena,
    workers: &[usize],
    settings: &Settings,
    counts: &mut ConstraintCounts,
) -> Result<(), PostError> {
    for &e in workers {
        let employee = &problem.employees()[e];
        let avail = problem.availability(employee.id);
        for days_all in problem.horizon().week_to_days_all().values() {
            let available: Vec<Day> = days_all
                .iter()
                .copied()
                .filter(|d| avail.working_days.contains(d))
                .collect();
            let n = available.len() as i64;
            if n == 0 {
                continue;
            }

            let proportional = (employee.admission_day > 0
                && days_all.contains(&employee.admission_day))
                || (employee.dismissal_day > 0 && days_all.contains(&employee.dismissal_day));
            let mut required = if proportional {
                settings
                    .admissao_proporcional
                    .apply(n as f64 / 7.0 * 2.0)
                    .max(0)
            } else if n >= 2 {
                2
            } else {
                1
            };

            let fixed = days_all
                .iter()
                .filter(|d| avail.fixed_days_off.contains(d) || avail.fixed_lqs.contains(d))
                .count() as i64;
            if required < fixed {
                required = fixed;
            }

            let lits: Vec<Literal> = available
                .iter()
                .flat_map(|&d| arena.lits_at(e, d, &OFF_PAIR))
                .collect();
            if required == 0 && !lits.is_empty() {
                post_count_eq(solver, &lits, 0)?;
                counts.bump(ConstraintClass::WeeklyFreeDays);
            } else if required > 0 && n > required {
                post_count_eq(solver, &lits, required as i32)?;
                counts.bump(ConstraintClass::WeeklyFreeDays);
            }
        }
    }
    Ok(())
}

/// An employee contracted after the period start must work their first
/// registered day.
fn first_day_working(
    solver: &mut Solver,
    problem: &Problem,
    arena: &VariableArena,
    workers: &[usize],
    counts: &mut ConstraintCounts,
) -> Result<(), PostError> {
    let earliest = workers
        .iter()
        .map(|&e| problem.employees()[e].first_day)
        .filter(|&d| d > 0)
        .min()
        .unwrap_or(0);
    if earliest == 0 {
        return Ok(());
    }
    for &e in workers {
        let employee = &problem.employees()[e];
        let first = employee.first_day;
        if first == 0 || first <= earliest {
            continue;
        }
        if !problem.availability(employee.id).working_days.contains(&first) {
            continue;
        }
        let lits = arena.lits_at(e, first, &WORKING);
        post_count_eq(solver, &lits, 1)?;
        counts.bump(ConstraintClass::FirstDayWorking);
    }
    Ok(())
}

/// At least `total_l_dom` Sundays off (label L) per employee.
fn sunday_quota(
    solver: &mut Solver,
    problem: &Problem,
    arena: &VariableArena,
    workers: &[usize],
    counts: &mut ConstraintCounts,
) -> Result<(), PostError> {
    for &e in workers {
        let employee = &problem.employees()[e];
        let Some(contract) = employee.contract else {
            continue;
        };
        if contract.total_l_dom <= 0 {
            continue;
        }
        let working = &problem.availability(employee.id).working_days;
        let lits: Vec<Literal> = problem
            .horizon()
            .sundays()
            .iter()
            .filter(|d| working.contains(d))
            .filter_map(|&d| arena.lit(e, d, ShiftLabel::DayOff))
            .collect();
        post_count_geq(solver, &lits, contract.total_l_dom)?;
        counts.bump(ConstraintClass::SundayQuota);
    }
    Ok(())
}
