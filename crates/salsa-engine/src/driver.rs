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

//! The search driver: builds the model, configures and invokes the
//! optimizer, records improving solutions, and decodes the best assignment.

use crate::constraints::{post_all, ConstraintToggles};
use crate::decode::decode;
use crate::err::SolveError;
use crate::objective::build_objective;
use crate::report::{ConstraintInstances, Improvement, SolveReport, SolveStatus};
use crate::vars::VariableArena;
use parking_lot::Mutex;
use pumpkin_solver::optimisation::linear_sat_unsat::LinearSatUnsat;
use pumpkin_solver::optimisation::OptimisationDirection;
use pumpkin_solver::results::{OptimisationResult, ProblemSolution, SolutionReference};
use pumpkin_solver::termination::{TerminationCondition, TimeBudget};
use pumpkin_solver::Solver;
use salsa_model::problem::Problem;
use salsa_model::schedule::Schedule;
use salsa_model::settings::Settings;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cheap cooperative cancellation token. Setting it makes the optimizer
/// stop at the next termination check; the best feasible solution found so
/// far is still decoded.
#[derive(Clone, Default, Debug)]
pub struct StopToken(Arc<AtomicBool>);

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn request_stop(&self) {
        self.0.store(true, Ordering::Relaxed)
    }
}

/// Wall-time budget plus external cancellation, as one termination
/// condition.
struct EngineTermination {
    budget: TimeBudget,
    stop: StopToken,
}

impl TerminationCondition for EngineTermination {
    fn should_stop(&mut self) -> bool {
        self.stop.is_set() || self.budget.should_stop()
    }
}

/// Mutex-guarded log of improving solutions, with an atomic mirror of the
/// best objective for cheap reads. The optimizer invokes the callback on a
/// search thread; only the copied fields are kept.
#[derive(Debug)]
struct SearchLog {
    started: Instant,
    best: AtomicI64,
    improvements: Mutex<Vec<Improvement>>,
}

impl SearchLog {
    fn new() -> Self {
        Self {
            started: Instant::now(),
            best: AtomicI64::new(i64::MAX),
            improvements: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, objective: i64) {
        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        self.best.fetch_min(objective, Ordering::AcqRel);
        self.improvements.lock().push(Improvement {
            objective,
            elapsed_ms,
        });
        tracing::info!(objective, elapsed_ms, "improving solution");
    }

    fn snapshot(&self) -> Vec<Improvement> {
        self.improvements.lock().clone()
    }
}

pub struct SolveOutcome {
    pub schedule: Schedule,
    pub report: SolveReport,
}

/// One solver instance per invocation; no state is shared across calls.
pub struct ScheduleSolver<'p> {
    problem: &'p Problem,
    settings: Settings,
    stop: StopToken,
}

impl<'p> ScheduleSolver<'p> {
    pub fn new(problem: &'p Problem, settings: Settings) -> Self {
        Self {
            problem,
            settings,
            stop: StopToken::new(),
        }
    }

    pub fn with_stop_token(mut self, stop: StopToken) -> Self {
        self.stop = stop;
        self
    }

    pub fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    /// Builds and solves the model. With `relax_on_infeasible`, quota
    /// constraint classes are dropped in a fixed order and the solve is
    /// retried before giving up.
    pub fn solve(&self) -> Result<SolveOutcome, SolveError> {
        let mut toggles = ConstraintToggles::default();
        loop {
            match self.solve_once(&toggles) {
                Err(SolveError::NoFeasibleSchedule) if self.settings.relax_on_infeasible => {
                    let Some(dropped) = toggles.relax_next() else {
                        return Err(SolveError::NoFeasibleSchedule);
                    };
                    tracing::warn!(
                        class = dropped.name(),
                        "infeasible; retrying without constraint class"
                    );
                }
                other => return other,
            }
        }
    }

    fn solve_once(&self, toggles: &ConstraintToggles) -> Result<SolveOutcome, SolveError> {
        let started = Instant::now();
        let mut solver = Solver::default();

        let arena = VariableArena::build(&mut solver, self.problem)?;
        let (counts, coupling) =
            post_all(&mut solver, self.problem, &arena, &self.settings, toggles)?;
        let model = build_objective(&mut solver, self.problem, &arena, &coupling)?;

        tracing::debug!(
            workers = self.settings.solver_workers,
            seed = ?self.settings.random_seed,
            "portfolio settings accepted; the backend searches with one deterministic worker"
        );

        let log = Arc::new(SearchLog::new());
        let objective_var = model.objective;
        let callback = {
            let log = Arc::clone(&log);
            move |_: &Solver, solution: SolutionReference, _: &_| {
                log.record(solution.get_integer_value(objective_var) as i64);
            }
        };

        let mut brancher = solver.default_brancher();
        let mut termination = EngineTermination {
            budget: TimeBudget::starting_now(Duration::from_secs(
                self.settings.solver_time_limit_seconds,
            )),
            stop: self.stop.clone(),
        };

        let result = solver.optimise(
            &mut brancher,
            &mut termination,
            LinearSatUnsat::new(OptimisationDirection::Minimise, objective_var, callback),
        );

        let (status, solution) = match result {
            OptimisationResult::Optimal(solution) => (SolveStatus::Optimal, solution),
            OptimisationResult::Satisfiable(solution) => (SolveStatus::Feasible, solution),
            OptimisationResult::Unsatisfiable => return Err(SolveError::NoFeasibleSchedule),
            OptimisationResult::Unknown => return Err(SolveError::NoSolutionWithinBudget),
        };

        let schedule = decode(self.problem, &arena, &solution)?;
        let objective = solution.get_integer_value(objective_var) as i64;
        let report = SolveReport {
            status,
            objective,
            best_bound: (status == SolveStatus::Optimal).then_some(objective),
            wall_time_ms: started.elapsed().as_millis() as u64,
            improvements: log.snapshot(),
            constraints: counts
                .iter()
                .map(|(class, instances)| ConstraintInstances {
                    class: class.name(),
                    instances,
                })
                .collect(),
            employees: schedule.employee_counters(self.problem.horizon()),
            staffing: schedule.staffing(),
        };

        tracing::info!(
            status = ?report.status,
            objective = report.objective,
            wall_time_ms = report.wall_time_ms,
            improvements = report.improvements.len(),
            "solve finished"
        );

        Ok(SolveOutcome { schedule, report })
    }
}
