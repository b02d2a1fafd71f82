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

//! Problem model for the salsa workforce day-off and shift assignment engine.
//!
//! The crate turns three raw tabular inputs (`calendario`, `estimativas`,
//! `colaborador`) into a frozen [`problem::Problem`]: a calendar horizon,
//! per-employee availability masks and contract summaries, staffing targets
//! and week-shift preferences. The solver crate consumes that value and
//! produces a [`schedule::Schedule`].

pub mod availability;
pub(crate) mod classify;
pub mod contract;
pub mod employee;
pub mod err;
pub mod horizon;
pub mod label;
pub mod normalize;
pub mod problem;
pub mod schedule;
pub mod settings;
pub mod table;

pub mod prelude {
    pub use crate::availability::Availability;
    pub use crate::contract::Contract;
    pub use crate::employee::{Cycle, Employee, EmployeeId, Role};
    pub use crate::err::{ModelError, NormalizeError};
    pub use crate::horizon::{Day, Horizon, Week};
    pub use crate::label::{RawShift, ShiftLabel, WorkShift};
    pub use crate::problem::{Problem, StaffingTargets, WeekShiftPreference};
    pub use crate::schedule::{DayStaffing, EmployeeCounters, Schedule};
    pub use crate::settings::{Rounding, Settings};
    pub use crate::table::{Table, Value};
}
