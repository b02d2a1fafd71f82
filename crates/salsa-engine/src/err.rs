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

use salsa_model::err::ModelError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// Input could not be turned into a problem.
    Model(ModelError),
    /// The optimizer proved that no assignment satisfies the hard
    /// constraints (or a pre-fixed assignment already contradicts them).
    NoFeasibleSchedule,
    /// The time budget expired before any feasible assignment was found.
    NoSolutionWithinBudget,
    /// Invariant violation inside the engine.
    InternalFault(String),
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveError::Model(e) => write!(f, "{}", e),
            SolveError::NoFeasibleSchedule => {
                write!(f, "no assignment satisfies the hard constraints")
            }
            SolveError::NoSolutionWithinBudget => {
                write!(f, "no feasible assignment found within the time budget")
            }
            SolveError::InternalFault(msg) => write!(f, "internal fault: {}", msg),
        }
    }
}

impl std::error::Error for SolveError {}

impl From<ModelError> for SolveError {
    fn from(err: ModelError) -> Self {
        SolveError::Model(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_conversion() {
        let e = SolveError::from(ModelError::EmptyHorizon);
        assert!(matches!(e, SolveError::Model(ModelError::EmptyHorizon)));
        assert!(!e.to_string().is_empty());
        assert!(SolveError::NoFeasibleSchedule
            .to_string()
            .contains("hard constraints"));
    }
}
