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

//! The weighted objective: staffing deviation, supervisor coverage,
//! inter-employee fairness, intra-year smoothing, shift-mix hygiene and the
//! consecutive-free-day bonus, combined into one integer objective variable
//! the optimizer minimizes.

use crate::constraints::CouplingVars;
use crate::err::SolveError;
use crate::sat::{
    channel_count, channel_weighted, pin_true, post_linear_eq, post_linear_geq, post_linear_leq,
    reify_all, reify_any, reify_count_geq, PostError,
};
use crate::vars::VariableArena;
use pumpkin_solver::variables::{DomainId, Literal, TransformableVariable};
use pumpkin_solver::Solver;
use salsa_model::employee::Role;
use salsa_model::horizon::Day;
use salsa_model::label::{ShiftLabel, WorkShift};
use salsa_model::problem::Problem;

const W_OVERLAP: i32 = 50_000;
const W_BOTH_OFF: i32 = 30_000;
const W_STAFFING: i32 = 1_000;
const W_ZERO_WORKERS: i32 = 300;
const W_SHORTFALL: i32 = 60;
/// One fairness pair costs 50, split over its two deviation directions.
const W_FAIR_SIDE: i32 = 25;
const W_QW_SEGMENT: i32 = 8;
const W_WEEK_MIX: i32 = 3;
const W_SUNDAY_SEGMENT: i32 = 1;
const W_FREE_PAIR: i32 = -1;

/// Labels counting as "off" for supervisor coverage.
const OFF_PAIR: [ShiftLabel; 2] = [ShiftLabel::DayOff, ShiftLabel::QualityOff];
/// Labels counting as "free" for the consecutive-free bonus.
const FREEISH: [ShiftLabel; 5] = [
    ShiftLabel::DayOff,
    ShiftLabel::QualityOff,
    ShiftLabel::ClosedHoliday,
    ShiftLabel::Absence,
    ShiftLabel::Vacation,
];
/// Labels counting as a Sunday off for fairness and smoothing.
const SUNDAY_OFF: [ShiftLabel; 2] = [ShiftLabel::DayOff, ShiftLabel::ClosedHoliday];

pub(crate) struct ObjectiveModel {
    pub objective: DomainId,
}

#[derive(Default)]
struct Terms {
    bool_terms: Vec<(i32, Literal)>,
    /// (weight, variable, upper bound of the variable).
    int_terms: Vec<(i32, DomainId, i64)>,
}

impl Terms {
    fn lit(&mut self, weight: i32, lit: Literal) {
        self.bool_terms.push((weight, lit));
    }

    fn int(&mut self, weight: i32, var: DomainId, upper: i64) {
        self.int_terms.push((weight, var, upper));
    }
}

pub(crate) fn build_objective(
    solver: &mut Solver,
    problem: &Problem,
    arena: &VariableArena,
    coupling: &CouplingVars,
) -> Result<ObjectiveModel, SolveError> {
    let workers = problem.optimizable_indices();
    let mut terms = Terms::default();

    staffing_terms(solver, problem, arena, &workers, &mut terms)?;
    coverage_terms(solver, problem, arena, &mut terms)?;
    free_pair_terms(solver, problem, arena, &workers, &mut terms)?;
    sunday_terms(solver, problem, arena, &workers, &mut terms)?;
    quality_weekend_terms(solver, problem, coupling, &workers, &mut terms)?;
    week_mix_terms(solver, problem, arena, &workers, &mut terms)?;

    assemble(solver, terms)
}

/// Any-of reification that spares an auxiliary literal for singleton lists.
fn any_of(solver: &mut Solver, lits: Vec<Literal>) -> Result<Literal, PostError> {
    if lits.len() == 1 {
        return Ok(lits[0]);
    }
    let z = solver.new_literal();
    reify_any(solver, lits, z)?;
    Ok(z)
}

/// Per (day, working shift): deviation from the staffing target in both
/// directions, the zero-worker flag, and the sub-minimum shortfall.
fn staffing_terms(
    solver: &mut Solver,
    problem: &Problem,
    arena: &VariableArena,
    workers: &[usize],
    terms: &mut Terms,
) -> Result<(), PostError> {
    let targets = problem.targets();
    for &day in problem.horizon().non_holidays() {
        for shift in WorkShift::ALL {
            let lits: Vec<Literal> = workers
                .iter()
                .filter_map(|&e| arena.lit(e, day, shift.label()))
                .collect();
            let target = targets.pess_obj(day, shift);
            let min_workers = targets.min_workers(day, shift);

            if lits.is_empty() {
                // No one can staff this shift: the deficit is a constant.
                if target > 0 {
                    let deficit = solver.new_bounded_integer(target, target);
                    terms.int(W_STAFFING, deficit, target as i64);
                    let zero = solver.new_literal();
                    pin_true(solver, zero)?;
                    terms.lit(W_ZERO_WORKERS, zero);
                }
                if min_workers > 0 {
                    let short = solver.new_bounded_integer(min_workers, min_workers);
                    terms.int(W_SHORTFALL, short, min_workers as i64);
                }
                continue;
            }

            let n = lits.len() as i32;
            let assigned = solver.new_bounded_integer(0, n);
            channel_count(solver, &lits, assigned)?;

            let over = solver.new_bounded_integer(0, n);
            post_linear_leq(solver, vec![assigned.scaled(1), over.scaled(-1)], target)?;
            terms.int(W_STAFFING, over, n as i64);

            let under = solver.new_bounded_integer(0, target);
            post_linear_geq(solver, vec![assigned.scaled(1), under.scaled(1)], target)?;
            terms.int(W_STAFFING, under, target as i64);

            if target > 0 {
                let staffed = any_of(solver, lits.clone())?;
                terms.lit(W_ZERO_WORKERS, !staffed);
            }
            if min_workers > 0 {
                let short = solver.new_bounded_integer(0, min_workers);
                post_linear_geq(solver, vec![assigned.scaled(1), short.scaled(1)], min_workers)?;
                terms.int(W_SHORTFALL, short, min_workers as i64);
            }
        }
    }
    Ok(())
}

/// Manager/keyholder coverage: overlapping days off inside either group and
/// days where both groups lose someone.
fn coverage_terms(
    solver: &mut Solver,
    problem: &Problem,
    arena: &VariableArena,
    terms: &mut Terms,
) -> Result<(), PostError> {
    let managers = problem.indices_with_role(Role::Manager);
    let keyholders = problem.indices_with_role(Role::Keyholder);
    if managers.is_empty() && keyholders.is_empty() {
        return Ok(());
    }

    for &day in problem.horizon().non_holidays() {
        let off_lits = |group: &[usize], arena: &VariableArena| -> Vec<Literal> {
            group
                .iter()
                .flat_map(|&e| arena.lits_at(e, day, &OFF_PAIR))
                .collect()
        };
        let mgr_off = off_lits(&managers, arena);
        let kh_off = off_lits(&keyholders, arena);

        let mgr_any = if mgr_off.is_empty() {
            None
        } else {
            Some(any_of(solver, mgr_off.clone())?)
        };
        let kh_any = if kh_off.is_empty() {
            None
        } else {
            Some(any_of(solver, kh_off.clone())?)
        };

        if let (Some(m), Some(k)) = (mgr_any, kh_any) {
            let both = solver.new_literal();
            reify_all(solver, vec![m, k], both)?;
            terms.lit(W_BOTH_OFF, both);
        }
        if mgr_off.len() >= 2 {
            let overlap = solver.new_literal();
            reify_count_geq(solver, &mgr_off, 2, overlap)?;
            terms.lit(W_OVERLAP, overlap);
        }
        if kh_off.len() >= 2 {
            let overlap = solver.new_literal();
            reify_count_geq(solver, &kh_off, 2, overlap)?;
            terms.lit(W_OVERLAP, overlap);
        }
    }
    Ok(())
}

/// Bonus for pairs of consecutive free-ish days (days off, closed holidays,
/// absences and vacations all count).
fn free_pair_terms(
    solver: &mut Solver,
    problem: &Problem,
    arena: &VariableArena,
    workers: &[usize],
    terms: &mut Terms,
) -> Result<(), PostError> {
    for &e in workers {
        let employee = &problem.employees()[e];
        if employee.first_day == 0 {
            continue;
        }
        let mut previous: Option<(Day, Literal)> = None;
        for &day in problem.horizon().days() {
            if day < employee.first_day || day > employee.last_day {
                continue;
            }
            let lits = arena.lits_at(e, day, &FREEISH);
            let free = if lits.is_empty() {
                None
            } else {
                Some(any_of(solver, lits.to_vec())?)
            };

            if let (Some((prev_day, prev_free)), Some(free)) = (previous, free) {
                if prev_day + 1 == day {
                    let pair = solver.new_literal();
                    reify_all(solver, vec![prev_free, free], pair)?;
                    terms.lit(W_FREE_PAIR, pair);
                }
            }
            previous = free.map(|f| (day, f));
        }
    }
    Ok(())
}

/// An employee's proportional presence, integer-scaled to [0, 100].
fn presence_percent(problem: &Problem, e: usize) -> i32 {
    let employee = &problem.employees()[e];
    let horizon_days = problem.horizon().len() as i64;
    if horizon_days == 0 {
        return 0;
    }
    let p = employee.span_days() as i64 * 100 / horizon_days;
    p.clamp(0, 100) as i32
}

/// Splits `items` into up to five ordered segments, the leftover spread over
/// the leading segments.
fn five_segments<T: Copy>(items: &[T]) -> Vec<Vec<T>> {
    let parts = items.len().min(5);
    if parts == 0 {
        return Vec::new();
    }
    let base = items.len() / parts;
    let extra = items.len() % parts;
    let mut out = Vec::with_capacity(parts);
    let mut at = 0;
    for k in 0..parts {
        let len = base + usize::from(k < extra);
        out.push(items[at..at + len].to_vec());
        at += len;
    }
    out
}

/// The even distribution of `total` over `parts` segments.
fn segment_ideal(total: i32, parts: usize, k: usize) -> i32 {
    let total = total.max(0);
    total / parts as i32 + i32::from((k as i32) < total % parts as i32)
}

/// Posts `|count(lits) - ideal|` deviation variables for one segment.
fn segment_deviation(
    solver: &mut Solver,
    lits: &[Literal],
    ideal: i32,
    weight: i32,
    terms: &mut Terms,
) -> Result<(), PostError> {
    let n = lits.len() as i32;
    let count = solver.new_bounded_integer(0, n);
    channel_count(solver, lits, count)?;

    let ub = n.max(ideal) as i64;
    let over = solver.new_bounded_integer(0, n.max(ideal));
    post_linear_leq(solver, vec![count.scaled(1), over.scaled(-1)], ideal)?;
    terms.int(weight, over, ub);

    let under = solver.new_bounded_integer(0, n.max(ideal));
    post_linear_geq(solver, vec![count.scaled(1), under.scaled(1)], ideal)?;
    terms.int(weight, under, ub);
    Ok(())
}

/// Pairwise proportional imbalance between per-employee counts.
fn pairwise_fairness(
    solver: &mut Solver,
    channels: &[(DomainId, i64, i32)],
    terms: &mut Terms,
) -> Result<(), PostError> {
    for i in 0..channels.len() {
        for j in (i + 1)..channels.len() {
            let (s1, ub1, p1) = channels[i];
            let (s2, ub2, p2) = channels[j];
            let ub = 100 * ub1.max(ub2);
            let Ok(ub32) = i32::try_from(ub) else {
                continue;
            };

            let over = solver.new_bounded_integer(0, ub32);
            post_linear_geq(
                solver,
                vec![over.scaled(1), s1.scaled(-p2), s2.scaled(p1)],
                0,
            )?;
            terms.int(W_FAIR_SIDE, over, ub);

            let under = solver.new_bounded_integer(0, ub32);
            post_linear_geq(
                solver,
                vec![under.scaled(1), s1.scaled(p2), s2.scaled(-p1)],
                0,
            )?;
            terms.int(W_FAIR_SIDE, under, ub);
        }
    }
    Ok(())
}

/// Sunday-off smoothing per employee and pairwise Sunday-off fairness.
fn sunday_terms(
    solver: &mut Solver,
    problem: &Problem,
    arena: &VariableArena,
    workers: &[usize],
    terms: &mut Terms,
) -> Result<(), PostError> {
    if problem.horizon().sundays().is_empty() {
        return Ok(());
    }

    let mut channels: Vec<(DomainId, i64, i32)> = Vec::new();
    for &e in workers {
        let mut off_lits: Vec<Literal> = Vec::new();
        for &sun in problem.horizon().sundays() {
            let lits = arena.lits_at(e, sun, &SUNDAY_OFF);
            if lits.is_empty() {
                continue;
            }
            off_lits.push(any_of(solver, lits.to_vec())?);
        }

        let quota = problem.employees()[e]
            .contract
            .map(|c| c.total_l_dom)
            .unwrap_or(0);
        let segments = five_segments(&off_lits);
        let parts = segments.len();
        for (k, segment) in segments.iter().enumerate() {
            let ideal = segment_ideal(quota, parts, k);
            segment_deviation(solver, segment, ideal, W_SUNDAY_SEGMENT, terms)?;
        }

        let total = if off_lits.is_empty() {
            solver.new_bounded_integer(0, 0)
        } else {
            let total = solver.new_bounded_integer(0, off_lits.len() as i32);
            channel_count(solver, &off_lits, total)?;
            total
        };
        channels.push((total, off_lits.len() as i64, presence_percent(problem, e)));
    }

    pairwise_fairness(solver, &channels, terms)
}

/// Quality-weekend smoothing and pairwise fairness over eligible Saturdays.
fn quality_weekend_terms(
    solver: &mut Solver,
    problem: &Problem,
    coupling: &CouplingVars,
    workers: &[usize],
    terms: &mut Terms,
) -> Result<(), PostError> {
    if problem.horizon().sundays().is_empty() {
        return Ok(());
    }

    let mut channels: Vec<(DomainId, i64, i32)> = Vec::new();
    for &e in workers {
        let weekends: Vec<Literal> = coupling
            .quality_weekend
            .get(&e)
            .map(|w| w.iter().map(|(_, lit)| *lit).collect())
            .unwrap_or_default();

        let quota = problem.employees()[e].contract.map(|c| c.c2d).unwrap_or(0);
        let segments = five_segments(&weekends);
        let parts = segments.len();
        for (k, segment) in segments.iter().enumerate() {
            let ideal = segment_ideal(quota, parts, k);
            segment_deviation(solver, segment, ideal, W_QW_SEGMENT, terms)?;
        }

        let total = if weekends.is_empty() {
            solver.new_bounded_integer(0, 0)
        } else {
            let total = solver.new_bounded_integer(0, weekends.len() as i32);
            channel_count(solver, &weekends, total)?;
            total
        };
        channels.push((total, weekends.len() as i64, presence_percent(problem, e)));
    }

    pairwise_fairness(solver, &channels, terms)
}

/// Penalizes weeks mixing morning and afternoon shifts.
fn week_mix_terms(
    solver: &mut Solver,
    problem: &Problem,
    arena: &VariableArena,
    workers: &[usize],
    terms: &mut Terms,
) -> Result<(), PostError> {
    for &e in workers {
        let working = &problem.availability(problem.employees()[e].id).working_days;
        for days in problem.horizon().week_to_days().values() {
            if days.iter().filter(|d| working.contains(d)).count() < 2 {
                continue;
            }
            let morning: Vec<Literal> = days
                .iter()
                .filter_map(|&d| arena.lit(e, d, ShiftLabel::Morning))
                .collect();
            let afternoon: Vec<Literal> = days
                .iter()
                .filter_map(|&d| arena.lit(e, d, ShiftLabel::Afternoon))
                .collect();
            if morning.is_empty() || afternoon.is_empty() {
                continue;
            }
            let has_morning = any_of(solver, morning)?;
            let has_afternoon = any_of(solver, afternoon)?;
            let mix = solver.new_literal();
            reify_all(solver, vec![has_morning, has_afternoon], mix)?;
            terms.lit(W_WEEK_MIX, mix);
        }
    }
    Ok(())
}

fn to_i32(v: i64, what: &str) -> Result<i32, SolveError> {
    i32::try_from(v).map_err(|_| SolveError::InternalFault(format!("{what} exceeds solver domain")))
}

/// Channels all terms into one objective variable.
fn assemble(solver: &mut Solver, terms: Terms) -> Result<ObjectiveModel, SolveError> {
    if terms.bool_terms.is_empty() && terms.int_terms.is_empty() {
        return Ok(ObjectiveModel {
            objective: solver.new_bounded_integer(0, 0),
        });
    }

    let bool_lb: i64 = terms.bool_terms.iter().map(|(w, _)| (*w as i64).min(0)).sum();
    let bool_ub: i64 = terms.bool_terms.iter().map(|(w, _)| (*w as i64).max(0)).sum();
    let int_ub: i64 = terms
        .int_terms
        .iter()
        .map(|(w, _, ub)| *w as i64 * *ub)
        .sum();

    let lb = to_i32(bool_lb, "objective lower bound")?;
    let ub = to_i32(bool_ub + int_ub, "objective upper bound")?;
    let objective = solver.new_bounded_integer(lb, ub);

    let mut linear: Vec<_> = terms
        .int_terms
        .iter()
        .map(|&(w, var, _)| var.scaled(w))
        .collect();

    if !terms.bool_terms.is_empty() {
        let bool_part = solver.new_bounded_integer(to_i32(bool_lb, "penalty bound")?, to_i32(bool_ub, "penalty bound")?);
        let (weights, lits): (Vec<i32>, Vec<Literal>) = terms.bool_terms.into_iter().unzip();
        channel_weighted(solver, weights, lits, bool_part).map_err(SolveError::from)?;
        linear.push(bool_part.scaled(1));
    }

    linear.push(objective.scaled(-1));
    post_linear_eq(solver, linear, 0).map_err(SolveError::from)?;

    Ok(ObjectiveModel { objective })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{post_all, ConstraintToggles};
    use crate::testutil::two_worker_week;
    use salsa_model::settings::Settings;

    #[test]
    fn test_five_segments_split() {
        let items: Vec<u32> = (1..=12).collect();
        let segments = five_segments(&items);
        assert_eq!(segments.len(), 5);
        let sizes: Vec<usize> = segments.iter().map(|s| s.len()).collect();
        assert_eq!(sizes, vec![3, 3, 2, 2, 2]);

        assert_eq!(five_segments(&items[..3]).len(), 3);
        assert!(five_segments::<u32>(&[]).is_empty());
    }

    #[test]
    fn test_segment_ideal_distributes_quota() {
        // Quota 7 over 5 segments: 2, 2, 1, 1, 1.
        let ideals: Vec<i32> = (0..5).map(|k| segment_ideal(7, 5, k)).collect();
        assert_eq!(ideals, vec![2, 2, 1, 1, 1]);
        assert_eq!(ideals.iter().sum::<i32>(), 7);

        assert_eq!(segment_ideal(-3, 5, 0), 0);
    }

    #[test]
    fn test_objective_builds_on_a_small_problem() {
        let problem = two_worker_week();
        let mut solver = Solver::default();
        let arena = VariableArena::build(&mut solver, &problem).unwrap();
        let (_, coupling) = post_all(
            &mut solver,
            &problem,
            &arena,
            &Settings::default(),
            &ConstraintToggles::default(),
        )
        .unwrap();
        let objective = build_objective(&mut solver, &problem, &arena, &coupling);
        assert!(objective.is_ok());
    }
}
