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

//! CP-SAT constraint model and search driver for the salsa scheduling
//! engine.
//!
//! The entry point is [`driver::ScheduleSolver`]: it builds one boolean
//! decision variable per legal (employee, day, label) triple, posts the hard
//! constraint system, assembles the weighted objective and drives the
//! optimizer, decoding the best assignment into a
//! [`salsa_model::schedule::Schedule`].

pub mod constraints;
pub(crate) mod decode;
pub mod driver;
pub mod err;
pub(crate) mod objective;
pub mod report;
pub(crate) mod sat;
pub mod vars;

#[cfg(test)]
pub(crate) mod testutil;

pub mod prelude {
    pub use crate::constraints::{ConstraintClass, ConstraintCounts};
    pub use crate::driver::{ScheduleSolver, SolveOutcome, StopToken};
    pub use crate::err::SolveError;
    pub use crate::report::{Improvement, SolveReport, SolveStatus};
}
