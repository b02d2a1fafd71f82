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

//! Turns the optimizer's boolean assignment back into a schedule matrix.

use crate::err::SolveError;
use crate::vars::VariableArena;
use pumpkin_solver::results::{ProblemSolution, Solution};
use salsa_model::label::ShiftLabel;
use salsa_model::problem::Problem;
use salsa_model::schedule::Schedule;

/// Reads the single true label of every (employee, day) cell. Cells without
/// any variable (outside the registered span) decode to `-`; a cell with
/// variables but no true label, or with several, is an engine fault.
pub(crate) fn decode(
    problem: &Problem,
    arena: &VariableArena,
    solution: &Solution,
) -> Result<Schedule, SolveError> {
    let days = problem.horizon().days().to_vec();
    let mut rows = Vec::with_capacity(problem.employees().len());

    for (e, employee) in problem.employees().iter().enumerate() {
        let mut row = Vec::with_capacity(days.len());
        for &day in &days {
            let mut assigned: Option<ShiftLabel> = None;
            let mut has_variables = false;
            for label in ShiftLabel::ALL {
                let Some(lit) = arena.lit(e, day, label) else {
                    continue;
                };
                has_variables = true;
                if solution.get_literal_value(lit) {
                    if assigned.is_some() {
                        return Err(SolveError::InternalFault(format!(
                            "two labels set for employee {} on day {}",
                            employee.id, day
                        )));
                    }
                    assigned = Some(label);
                }
            }
            match assigned {
                Some(label) => row.push(label),
                None if !has_variables => row.push(ShiftLabel::Unassigned),
                None => {
                    return Err(SolveError::InternalFault(format!(
                        "no label set for employee {} on day {}",
                        employee.id, day
                    )));
                }
            }
        }
        rows.push(row);
    }

    Ok(Schedule::new(
        days,
        problem.employees().iter().map(|e| e.id).collect(),
        rows,
    ))
}
