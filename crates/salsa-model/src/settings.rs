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

use serde::{Deserialize, Serialize};

/// Rounding strategy for the free-day requirement of weeks containing an
/// admission or dismissal day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rounding {
    Floor,
    Ceil,
}

impl Rounding {
    pub fn apply(self, value: f64) -> i64 {
        match self {
            Rounding::Floor => value.floor() as i64,
            Rounding::Ceil => value.ceil() as i64,
        }
    }
}

impl Default for Rounding {
    fn default() -> Self {
        Rounding::Floor
    }
}

impl std::str::FromStr for Rounding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "floor" => Ok(Rounding::Floor),
            "ceil" => Ok(Rounding::Ceil),
            other => Err(format!("unknown rounding mode `{other}`")),
        }
    }
}

/// Engine settings.
///
/// `free_sundays_plus_c2d` is accepted for input compatibility but has no
/// effect; its semantics were never wired up in the constraint system.
/// `solver_workers` and `random_seed` are informational with the current
/// single-worker optimizer backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub admissao_proporcional: Rounding,
    pub f_special_day: bool,
    pub free_sundays_plus_c2d: bool,
    pub max_continuous_working_days: u16,
    pub solver_time_limit_seconds: u64,
    pub solver_workers: u16,
    pub random_seed: Option<u64>,
    pub relax_on_infeasible: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            admissao_proporcional: Rounding::Floor,
            f_special_day: false,
            free_sundays_plus_c2d: false,
            max_continuous_working_days: 6,
            solver_time_limit_seconds: 600,
            solver_workers: 8,
            random_seed: None,
            relax_on_infeasible: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.admissao_proporcional, Rounding::Floor);
        assert!(!s.f_special_day);
        assert_eq!(s.max_continuous_working_days, 6);
        assert_eq!(s.solver_time_limit_seconds, 600);
        assert_eq!(s.solver_workers, 8);
        assert!(!s.relax_on_infeasible);
    }

    #[test]
    fn test_rounding_parse_and_apply() {
        assert_eq!("floor".parse::<Rounding>().unwrap(), Rounding::Floor);
        assert_eq!(" CEIL ".parse::<Rounding>().unwrap(), Rounding::Ceil);
        assert!("round".parse::<Rounding>().is_err());

        assert_eq!(Rounding::Floor.apply(2.0 * 5.0 / 7.0), 1);
        assert_eq!(Rounding::Ceil.apply(2.0 * 5.0 / 7.0), 2);
    }

    #[test]
    fn test_settings_deserialize_accepts_partial_input() {
        let s: Settings =
            serde_json::from_str(r#"{"admissao_proporcional":"ceil","solver_time_limit_seconds":30}"#)
                .unwrap();
        assert_eq!(s.admissao_proporcional, Rounding::Ceil);
        assert_eq!(s.solver_time_limit_seconds, 30);
        assert_eq!(s.solver_workers, 8);
    }
}
