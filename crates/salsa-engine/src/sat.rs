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

//! Thin posting helpers over the optimizer API: cardinality constraints over
//! literals, reified any/all, and literal-count channels into integer
//! variables. Keeping these in one place keeps the constraint and objective
//! builders readable.

use crate::err::SolveError;
use pumpkin_solver::constraints as cp;
use pumpkin_solver::variables::{DomainId, IntegerVariable, Literal, TransformableVariable};
use pumpkin_solver::Solver;

/// A constraint could not be posted: the model is already conflicting at the
/// root (typically contradictory pre-fixed assignments).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PostError;

impl From<PostError> for SolveError {
    fn from(_: PostError) -> Self {
        SolveError::NoFeasibleSchedule
    }
}

fn posted<E>(result: Result<(), E>) -> Result<(), PostError> {
    result.map_err(|_| PostError)
}

/// Forces a literal to true.
pub(crate) fn pin_true(solver: &mut Solver, lit: Literal) -> Result<(), PostError> {
    post_clause(solver, vec![lit])
}

pub(crate) fn post_clause(solver: &mut Solver, lits: Vec<Literal>) -> Result<(), PostError> {
    if lits.is_empty() {
        return Err(PostError);
    }
    let tag = solver.new_constraint_tag();
    posted(solver.add_constraint(cp::clause(lits, tag)).post())
}

/// `cond → then`.
pub(crate) fn post_implication(
    solver: &mut Solver,
    cond: Literal,
    then: Literal,
) -> Result<(), PostError> {
    post_clause(solver, vec![!cond, then])
}

/// `Σ lits ≤ bound`.
pub(crate) fn post_count_leq(
    solver: &mut Solver,
    lits: &[Literal],
    bound: i32,
) -> Result<(), PostError> {
    if lits.is_empty() {
        return if bound >= 0 { Ok(()) } else { Err(PostError) };
    }
    let tag = solver.new_constraint_tag();
    posted(
        solver
            .add_constraint(cp::boolean_less_than_or_equals(
                vec![1; lits.len()],
                lits.to_vec(),
                bound,
                tag,
            ))
            .post(),
    )
}

/// `Σ lits ≥ bound`, posted as `Σ -lits ≤ -bound`.
pub(crate) fn post_count_geq(
    solver: &mut Solver,
    lits: &[Literal],
    bound: i32,
) -> Result<(), PostError> {
    if lits.is_empty() {
        return if bound <= 0 { Ok(()) } else { Err(PostError) };
    }
    let tag = solver.new_constraint_tag();
    posted(
        solver
            .add_constraint(cp::boolean_less_than_or_equals(
                vec![-1; lits.len()],
                lits.to_vec(),
                -bound,
                tag,
            ))
            .post(),
    )
}

pub(crate) fn post_count_eq(
    solver: &mut Solver,
    lits: &[Literal],
    bound: i32,
) -> Result<(), PostError> {
    post_count_leq(solver, lits, bound)?;
    post_count_geq(solver, lits, bound)
}

pub(crate) fn post_exactly_one(solver: &mut Solver, lits: &[Literal]) -> Result<(), PostError> {
    post_clause(solver, lits.to_vec())?;
    post_count_leq(solver, lits, 1)
}

/// `z ↔ (lit1 ∨ .. ∨ litN)`.
pub(crate) fn reify_any(
    solver: &mut Solver,
    lits: Vec<Literal>,
    z: Literal,
) -> Result<(), PostError> {
    if lits.is_empty() {
        return pin_true(solver, !z);
    }
    let tag = solver.new_constraint_tag();
    posted(solver.add_constraint(cp::clause(lits, tag)).reify(z))
}

/// `z ↔ (lit1 ∧ .. ∧ litN)`.
pub(crate) fn reify_all(
    solver: &mut Solver,
    lits: Vec<Literal>,
    z: Literal,
) -> Result<(), PostError> {
    if lits.is_empty() {
        return pin_true(solver, z);
    }
    let tag = solver.new_constraint_tag();
    posted(solver.add_constraint(cp::conjunction(lits, tag)).reify(z))
}

/// `z → Σ lits ≥ bound` and `¬z → Σ lits ≤ bound - 1`, i.e. a full
/// reification of the threshold through two half-reified inequalities.
pub(crate) fn reify_count_geq(
    solver: &mut Solver,
    lits: &[Literal],
    bound: i32,
    z: Literal,
) -> Result<(), PostError> {
    let tag = solver.new_constraint_tag();
    posted(
        solver
            .add_constraint(cp::boolean_less_than_or_equals(
                vec![-1; lits.len()],
                lits.to_vec(),
                -bound,
                tag,
            ))
            .implied_by(z),
    )?;
    let tag = solver.new_constraint_tag();
    posted(
        solver
            .add_constraint(cp::boolean_less_than_or_equals(
                vec![1; lits.len()],
                lits.to_vec(),
                bound - 1,
                tag,
            ))
            .implied_by(!z),
    )
}

/// `total = Σ lits`.
pub(crate) fn channel_count(
    solver: &mut Solver,
    lits: &[Literal],
    total: DomainId,
) -> Result<(), PostError> {
    channel_weighted(solver, vec![1; lits.len()], lits.to_vec(), total)
}

/// `total = Σ wᵢ·litᵢ`.
pub(crate) fn channel_weighted(
    solver: &mut Solver,
    weights: Vec<i32>,
    lits: Vec<Literal>,
    total: DomainId,
) -> Result<(), PostError> {
    debug_assert_eq!(weights.len(), lits.len());
    if lits.is_empty() {
        return post_linear_eq(solver, vec![total.scaled(1)], 0);
    }
    let tag = solver.new_constraint_tag();
    posted(
        solver
            .add_constraint(cp::boolean_equals(weights, lits, total, tag))
            .post(),
    )
}

/// `Σ terms ≤ rhs` over integer views.
pub(crate) fn post_linear_leq<V: IntegerVariable + 'static>(
    solver: &mut Solver,
    terms: Vec<V>,
    rhs: i32,
) -> Result<(), PostError> {
    let tag = solver.new_constraint_tag();
    posted(
        solver
            .add_constraint(cp::less_than_or_equals(terms, rhs, tag))
            .post(),
    )
}

/// `Σ terms ≥ rhs` over integer views.
pub(crate) fn post_linear_geq<V: IntegerVariable + 'static>(
    solver: &mut Solver,
    terms: Vec<V>,
    rhs: i32,
) -> Result<(), PostError> {
    let tag = solver.new_constraint_tag();
    posted(
        solver
            .add_constraint(cp::greater_than_or_equals(terms, rhs, tag))
            .post(),
    )
}

/// `Σ terms = rhs` over integer views.
pub(crate) fn post_linear_eq<V: IntegerVariable + 'static>(
    solver: &mut Solver,
    terms: Vec<V>,
    rhs: i32,
) -> Result<(), PostError> {
    let tag = solver.new_constraint_tag();
    posted(solver.add_constraint(cp::equals(terms, rhs, tag)).post())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pumpkin_solver::optimisation::linear_sat_unsat::LinearSatUnsat;
    use pumpkin_solver::optimisation::OptimisationDirection;
    use pumpkin_solver::results::{OptimisationResult, SolutionReference};
    use pumpkin_solver::termination::Indefinite;

    fn noop_callback<B>(_: &Solver, _: SolutionReference, _: &B) {}

    fn is_satisfiable(solver: &mut Solver) -> bool {
        let objective = solver.new_bounded_integer(0, 0);
        let mut brancher = solver.default_brancher();
        let mut termination = Indefinite;
        !matches!(
            solver.optimise(
                &mut brancher,
                &mut termination,
                LinearSatUnsat::new(OptimisationDirection::Minimise, objective, noop_callback),
            ),
            OptimisationResult::Unsatisfiable
        )
    }

    #[test]
    fn test_exactly_one_is_satisfiable_and_exclusive() {
        let mut solver = Solver::default();
        let a = solver.new_literal();
        let b = solver.new_literal();
        post_exactly_one(&mut solver, &[a, b]).unwrap();
        pin_true(&mut solver, a).unwrap();
        assert!(is_satisfiable(&mut solver));

        let mut conflicting = Solver::default();
        let a = conflicting.new_literal();
        let b = conflicting.new_literal();
        post_exactly_one(&mut conflicting, &[a, b]).unwrap();
        let both_ok = pin_true(&mut conflicting, a)
            .and_then(|_| pin_true(&mut conflicting, b))
            .is_ok();
        // Either posting already fails or the model is unsatisfiable.
        assert!(!both_ok || !is_satisfiable(&mut conflicting));
    }

    #[test]
    fn test_count_bounds_conflict_when_overconstrained() {
        let mut solver = Solver::default();
        let lits: Vec<Literal> = (0..3).map(|_| solver.new_literal()).collect();
        post_count_geq(&mut solver, &lits, 2).unwrap();
        let ok = post_count_leq(&mut solver, &lits, 1).is_ok();
        assert!(!ok || !is_satisfiable(&mut solver));
    }

    #[test]
    fn test_empty_geq_with_positive_bound_is_infeasible() {
        let mut solver = Solver::default();
        let ok = post_count_geq(&mut solver, &[], 1).is_ok();
        assert!(!ok || !is_satisfiable(&mut solver));
    }
}
