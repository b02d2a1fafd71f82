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

use crate::contract::Contract;
use crate::horizon::Day;
use crate::table::Value;
use serde::Serialize;

/// Employee identifier (the matricula column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EmployeeId(u32);

impl EmployeeId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Operational role, derived from the day-off priority column
/// (1 or "manager" → manager, 2 or "keyholder" → keyholder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Manager,
    Keyholder,
    Normal,
}

impl Role {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Int(1)) => Role::Manager,
            Some(Value::Int(2)) => Role::Keyholder,
            Some(Value::Text(s)) => match s.trim().to_lowercase().as_str() {
                "manager" | "1" => Role::Manager,
                "keyholder" | "2" => Role::Keyholder,
                _ => Role::Normal,
            },
            _ => Role::Normal,
        }
    }
}

/// Scheduling cycle category. Complete-cycle employees come with their days
/// off pre-fixed; the engine only picks working shifts for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Cycle {
    Complete,
    Standard,
}

impl Cycle {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value.and_then(|v| v.as_str()) {
            Some(s) if s.trim().eq_ignore_ascii_case("completo") => Cycle::Complete,
            _ => Cycle::Standard,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub cycle: Cycle,
    pub role: Role,
    /// `None` when the contract row carries no usable contract type; such
    /// employees pass through the model with fixed labels only.
    pub contract: Option<Contract>,
    /// Admission day in horizon units, 0 when outside the horizon.
    pub admission_day: Day,
    /// Dismissal day in horizon units, 0 when outside the horizon.
    pub dismissal_day: Day,
    /// First day the employee appears in the calendar, raised to the
    /// admission day when that is later.
    pub first_day: Day,
    /// Last registered day, lowered to the dismissal day when that is set.
    pub last_day: Day,
}

impl Employee {
    /// Whether the engine may choose this employee's days off.
    pub fn is_optimizable(&self) -> bool {
        self.cycle == Cycle::Standard
            && self
                .contract
                .map(|c| c.contract_type > 0 && c.total_l > 0)
                .unwrap_or(false)
    }

    /// Length of the registered span in days, 0 when never registered.
    pub fn span_days(&self) -> u32 {
        if self.first_day == 0 || self.last_day < self.first_day {
            0
        } else {
            (self.last_day - self.first_day + 1) as u32
        }
    }
}
