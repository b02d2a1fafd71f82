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

//! The decoded schedule matrix: one row of labels per employee over the
//! horizon days, with summary counters and a re-encoding back into calendar
//! rows.

use crate::employee::EmployeeId;
use crate::horizon::{Day, Horizon};
use crate::label::{ShiftLabel, WorkShift};
use crate::table::{Table, Value};
use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct Schedule {
    days: Vec<Day>,
    employees: Vec<EmployeeId>,
    /// `rows[e][d]` is the label of `employees[e]` on `days[d]`.
    rows: Vec<Vec<ShiftLabel>>,
}

/// Per-employee summary counters of a decoded schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmployeeCounters {
    pub employee: EmployeeId,
    pub l_count: u32,
    pub lq_count: u32,
    pub special_days_worked: u32,
    pub unassigned: u32,
}

/// Realized staffing of one (day, working shift) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayStaffing {
    pub day: Day,
    pub shift: WorkShift,
    pub assigned: u32,
}

impl Schedule {
    pub fn new(days: Vec<Day>, employees: Vec<EmployeeId>, rows: Vec<Vec<ShiftLabel>>) -> Self {
        debug_assert_eq!(employees.len(), rows.len());
        debug_assert!(rows.iter().all(|r| r.len() == days.len()));
        Self {
            days,
            employees,
            rows,
        }
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn employees(&self) -> &[EmployeeId] {
        &self.employees
    }

    pub fn row(&self, employee: EmployeeId) -> Option<&[ShiftLabel]> {
        self.employees
            .iter()
            .position(|e| *e == employee)
            .map(|i| self.rows[i].as_slice())
    }

    pub fn label(&self, employee: EmployeeId, day: Day) -> Option<ShiftLabel> {
        let row = self.row(employee)?;
        let col = self.days.iter().position(|d| *d == day)?;
        Some(row[col])
    }

    /// Per-employee counters: days off, quality weekends, special days
    /// worked and unassigned cells.
    pub fn employee_counters(&self, horizon: &Horizon) -> Vec<EmployeeCounters> {
        self.employees
            .iter()
            .zip(&self.rows)
            .map(|(&employee, row)| {
                let mut c = EmployeeCounters {
                    employee,
                    l_count: 0,
                    lq_count: 0,
                    special_days_worked: 0,
                    unassigned: 0,
                };
                for (&day, &label) in self.days.iter().zip(row) {
                    match label {
                        ShiftLabel::DayOff => c.l_count += 1,
                        ShiftLabel::QualityOff => c.lq_count += 1,
                        ShiftLabel::Unassigned => c.unassigned += 1,
                        _ => {}
                    }
                    if label.is_working() && horizon.special_days().contains(&day) {
                        c.special_days_worked += 1;
                    }
                }
                c
            })
            .collect()
    }

    /// Realized per-(day, shift) staffing counts.
    pub fn staffing(&self) -> Vec<DayStaffing> {
        let mut counts: BTreeMap<(Day, WorkShift), u32> = BTreeMap::new();
        for row in &self.rows {
            for (&day, &label) in self.days.iter().zip(row) {
                let shift = match label {
                    ShiftLabel::Morning => WorkShift::Morning,
                    ShiftLabel::Afternoon => WorkShift::Afternoon,
                    _ => continue,
                };
                *counts.entry((day, shift)).or_insert(0) += 1;
            }
        }
        counts
            .into_iter()
            .map(|((day, shift), assigned)| DayStaffing {
                day,
                shift,
                assigned,
            })
            .collect()
    }

    /// The schedule as a `Worker`/`Day_N` matrix table.
    pub fn to_table(&self) -> Table {
        let mut columns = vec!["Worker".to_string()];
        columns.extend(self.days.iter().map(|d| format!("Day_{d}")));
        let mut table = Table::new("schedule", columns);
        for (employee, row) in self.employees.iter().zip(&self.rows) {
            let mut cells = vec![Value::Int(employee.get() as i64)];
            cells.extend(row.iter().map(|l| Value::text(l.as_str())));
            table.push(cells);
        }
        table
    }

    /// Re-encodes the schedule as calendar rows, so a solved schedule can be
    /// fed back through the engine as fixed assignments.
    pub fn to_calendar_table(&self, horizon: &Horizon) -> Table {
        let mut table = Table::new(
            "calendario",
            ["colaborador", "data", "wd", "dia_tipo", "tipo_turno", "ww"],
        );
        for (&employee, row) in self.employees.iter().zip(&self.rows) {
            for (&day, &label) in self.days.iter().zip(row) {
                let Some(date) = chrono::NaiveDate::from_yo_opt(horizon.year(), day as u32) else {
                    continue;
                };
                let wd = if horizon.sundays().contains(&day) {
                    "Sun"
                } else {
                    weekday_name(date.weekday().number_from_monday())
                };
                let dia_tipo = if horizon.holidays().contains(&day) {
                    "domYf"
                } else {
                    "normal"
                };
                table.push(vec![
                    Value::Int(employee.get() as i64),
                    Value::Date(date),
                    Value::text(wd),
                    Value::text(dia_tipo),
                    Value::text(label.as_str()),
                    Value::Int(horizon.week_of(day).unwrap_or(0) as i64),
                ]);
            }
        }
        table
    }
}

fn weekday_name(number_from_monday: u32) -> &'static str {
    match number_from_monday {
        1 => "Mon",
        2 => "Tue",
        3 => "Wed",
        4 => "Thu",
        5 => "Fri",
        6 => "Sat",
        _ => "Sun",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn horizon() -> Horizon {
        let days: Vec<Day> = (1..=7).collect();
        let week_of: BTreeMap<Day, u16> = days.iter().map(|&d| (d, 1)).collect();
        Horizon::new(
            2024,
            days,
            1,
            [7].into_iter().collect(),
            [3].into_iter().collect(),
            BTreeSet::new(),
            week_of,
        )
    }

    fn schedule() -> Schedule {
        use ShiftLabel::*;
        Schedule::new(
            (1..=7).collect(),
            vec![EmployeeId::new(101), EmployeeId::new(102)],
            vec![
                vec![Morning, Morning, Morning, Afternoon, Morning, QualityOff, DayOff],
                vec![Afternoon, DayOff, Vacation, Morning, Unassigned, Morning, Morning],
            ],
        )
    }

    #[test]
    fn test_counters() {
        let s = schedule();
        let counters = s.employee_counters(&horizon());

        let c101 = counters[0];
        assert_eq!(c101.l_count, 1);
        assert_eq!(c101.lq_count, 1);
        // Worked the day-3 holiday; day-7 Sunday is off.
        assert_eq!(c101.special_days_worked, 1);
        assert_eq!(c101.unassigned, 0);

        let c102 = counters[1];
        assert_eq!(c102.l_count, 1);
        assert_eq!(c102.lq_count, 0);
        assert_eq!(c102.special_days_worked, 1);
        assert_eq!(c102.unassigned, 1);
    }

    #[test]
    fn test_staffing_counts() {
        let s = schedule();
        let staffing = s.staffing();
        let get = |day: Day, shift: WorkShift| {
            staffing
                .iter()
                .find(|c| c.day == day && c.shift == shift)
                .map(|c| c.assigned)
                .unwrap_or(0)
        };
        assert_eq!(get(1, WorkShift::Morning), 1);
        assert_eq!(get(1, WorkShift::Afternoon), 1);
        assert_eq!(get(4, WorkShift::Morning), 1);
        assert_eq!(get(4, WorkShift::Afternoon), 1);
        assert_eq!(get(6, WorkShift::Morning), 1);
        assert_eq!(get(7, WorkShift::Afternoon), 0);
    }

    #[test]
    fn test_reencoding_round_trips_labels() {
        let s = schedule();
        let h = horizon();
        let table = s.to_calendar_table(&h);
        assert_eq!(table.len(), 14);

        // Day 7 of employee 101 decodes to L and re-encodes as a Sunday row.
        let row = (0..table.len())
            .find(|&r| {
                table.get(r, "colaborador") == Some(&Value::Int(101))
                    && table.get(r, "tipo_turno").and_then(|v| v.as_str()) == Some("L")
            })
            .unwrap();
        assert_eq!(table.get(row, "wd").and_then(|v| v.as_str()), Some("Sun"));
        assert_eq!(table.get(row, "ww"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_matrix_table_shape() {
        let s = schedule();
        let t = s.to_table();
        assert_eq!(t.columns()[0], "Worker");
        assert_eq!(t.columns()[1], "Day_1");
        assert_eq!(t.columns().len(), 8);
        assert_eq!(t.len(), 2);
        assert_eq!(t.get(0, "Day_6").and_then(|v| v.as_str()), Some("LQ"));
        assert_eq!(t.get(1, "Day_5").and_then(|v| v.as_str()), Some("-"));
    }

    #[test]
    fn test_label_lookup() {
        let s = schedule();
        assert_eq!(s.label(EmployeeId::new(101), 6), Some(ShiftLabel::QualityOff));
        assert_eq!(s.label(EmployeeId::new(102), 3), Some(ShiftLabel::Vacation));
        assert_eq!(s.label(EmployeeId::new(999), 1), None);
        assert_eq!(s.label(EmployeeId::new(101), 99), None);
    }
}
