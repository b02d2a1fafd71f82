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

//! Calendar classification: turns the normalized tables into the horizon,
//! the employee set with contracts, per-employee availability masks,
//! week-shift preferences and staffing targets.

use crate::availability::Availability;
use crate::contract::{Contract, RawContract};
use crate::employee::{Cycle, Employee, EmployeeId, Role};
use crate::err::{MissingColumnError, ModelError};
use crate::horizon::{Day, Horizon, Week};
use crate::label::{RawShift, WorkShift};
use crate::normalize::NormalizedTables;
use crate::problem::{Problem, StaffingTargets, WeekShiftPreference};
use crate::table::Table;
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};

struct CalendarRow {
    day: Day,
    week: Week,
    shift: Option<RawShift>,
}

pub(crate) fn classify(tables: &NormalizedTables) -> Result<Problem, ModelError> {
    let cal = &tables.calendario;
    let col_emp = column(cal, "colaborador")?;
    let col_data = column(cal, "data")?;
    let col_wd = column(cal, "wd")?;
    let col_dia_tipo = column(cal, "dia_tipo")?;
    let col_shift = column(cal, "tipo_turno")?;
    let col_ww = column(cal, "ww")?;

    let mut days: BTreeSet<Day> = BTreeSet::new();
    let mut sundays: BTreeSet<Day> = BTreeSet::new();
    let mut holidays: BTreeSet<Day> = BTreeSet::new();
    let mut closed: BTreeSet<Day> = BTreeSet::new();
    let mut week_of: BTreeMap<Day, Week> = BTreeMap::new();
    let mut min_date: Option<NaiveDate> = None;
    let mut max_date: Option<NaiveDate> = None;
    let mut per_employee: BTreeMap<EmployeeId, Vec<CalendarRow>> = BTreeMap::new();

    for row in 0..cal.len() {
        let Some(id) = cal.cell(row, col_emp).as_i64() else {
            continue;
        };
        let Some(date) = cal.cell(row, col_data).as_date() else {
            continue;
        };
        let Some(week) = cal.cell(row, col_ww).as_i64() else {
            tracing::warn!(row, "calendar row without a week number, skipped");
            continue;
        };

        let day = date.ordinal() as Day;
        let wd = cal.cell(row, col_wd).as_str().unwrap_or("");
        let dia_tipo = cal.cell(row, col_dia_tipo).as_str().unwrap_or("");
        let shift = cal.cell(row, col_shift).as_str().and_then(RawShift::parse);

        days.insert(day);
        week_of.entry(day).or_insert(week as Week);
        if wd == "Sun" {
            sundays.insert(day);
        } else if dia_tipo == "domYf" {
            holidays.insert(day);
        }
        if shift == Some(RawShift::Closed) {
            closed.insert(day);
        }

        min_date = Some(min_date.map_or(date, |m| m.min(date)));
        max_date = Some(max_date.map_or(date, |m| m.max(date)));

        per_employee
            .entry(EmployeeId::new(id.clamp(0, u32::MAX as i64) as u32))
            .or_default()
            .push(CalendarRow {
                day,
                week: week as Week,
                shift,
            });
    }

    let (Some(min_date), Some(max_date)) = (min_date, max_date) else {
        return Err(ModelError::EmptyHorizon);
    };

    let year = min_date.year();
    let start_weekday = NaiveDate::from_ymd_opt(year, 1, 1)
        .map(|jan1| jan1.weekday().number_from_monday() as u8)
        .unwrap_or(1);

    let horizon = Horizon::new(
        year,
        days.iter().copied().collect(),
        start_weekday,
        sundays,
        holidays,
        closed,
        week_of,
    );

    tracing::info!(
        days = horizon.len(),
        sundays = horizon.sundays().len(),
        holidays = horizon.holidays().len(),
        closed_holidays = horizon.closed_holidays().len(),
        start_weekday,
        "horizon classified"
    );

    // Employees must appear in both tables.
    let colab = &tables.colaborador;
    let col_matricula = column(colab, "matricula")?;
    let mut contract_rows: BTreeMap<EmployeeId, usize> = BTreeMap::new();
    for row in 0..colab.len() {
        if let Some(id) = colab.cell(row, col_matricula).as_i64() {
            contract_rows
                .entry(EmployeeId::new(id.clamp(0, u32::MAX as i64) as u32))
                .or_insert(row);
        }
    }

    for id in per_employee.keys() {
        if !contract_rows.contains_key(id) {
            tracing::warn!(employee = %id, "present in calendario only, dropped");
        }
    }
    for id in contract_rows.keys() {
        if !per_employee.contains_key(id) {
            tracing::warn!(employee = %id, "present in colaborador only, dropped");
        }
    }

    let ids: Vec<EmployeeId> = per_employee
        .keys()
        .filter(|id| contract_rows.contains_key(id))
        .copied()
        .collect();
    if ids.is_empty() {
        return Err(ModelError::EmptyWorkforce);
    }

    let mut employees = Vec::with_capacity(ids.len());
    let mut availability: BTreeMap<EmployeeId, Availability> = BTreeMap::new();
    let mut week_shift: BTreeMap<(EmployeeId, Week), WeekShiftPreference> = BTreeMap::new();

    for id in ids {
        let row = contract_rows[&id];
        let rows = &per_employee[&id];

        let cycle = Cycle::from_value(colab.get(row, "ciclo"));
        let role = Role::from_value(colab.get(row, "prioridade_folgas"));
        let contract = read_contract(colab, row, id);

        let admission_day = day_in_range(colab.get(row, "data_admissao"), min_date, max_date);
        let dismissal_day = day_in_range(colab.get(row, "data_demissao"), min_date, max_date);

        let mut first_day = rows.iter().map(|r| r.day).min().unwrap_or(0);
        let mut last_day = rows.iter().map(|r| r.day).max().unwrap_or(0);
        if admission_day > 0 && first_day < admission_day {
            first_day = admission_day;
        }
        if dismissal_day > 0 && last_day > dismissal_day {
            last_day = dismissal_day;
        }

        let mut avail = build_masks(rows, cycle);
        for &d in horizon.days() {
            if d < first_day || d > last_day {
                avail.missing_days.insert(d);
            }
        }

        apply_week_off_rule(&mut avail, &horizon);
        avail.remove_closed(horizon.closed_holidays());
        avail.rebuild_working_days(&horizon, first_day, last_day);
        if avail.working_days.is_empty() {
            tracing::warn!(employee = %id, "no working days after classification");
        }

        let span = if first_day == 0 || last_day < first_day {
            0
        } else {
            (last_day - first_day + 1) as u32
        };
        let contract = contract.map(|c| c.prorated(span, horizon.len() as u32));

        for (week, pref) in observed_week_shifts(rows) {
            week_shift.insert((id, week), pref);
        }

        availability.insert(id, avail);
        employees.push(Employee {
            id,
            cycle,
            role,
            contract,
            admission_day,
            dismissal_day,
            first_day,
            last_day,
        });
    }

    let targets = read_targets(&tables.estimativas, &horizon)?;

    Problem::from_parts(horizon, employees, availability, week_shift, targets)
}

fn column(table: &Table, name: &str) -> Result<usize, ModelError> {
    table
        .column_index(name)
        .ok_or_else(|| ModelError::from(MissingColumnError::new(table.name(), name)))
}

fn numeric(table: &Table, row: usize, name: &str) -> i64 {
    table.get(row, name).and_then(|v| v.as_i64()).unwrap_or(0)
}

fn read_contract(colab: &Table, row: usize, id: EmployeeId) -> Option<Contract> {
    let contract_type = colab.get(row, "tipo_contrato").and_then(|v| v.as_i64());
    let Some(contract_type) = contract_type.filter(|ct| *ct > 0) else {
        tracing::warn!(employee = %id, "contract type absent, employee excluded from assignment");
        return None;
    };

    let raw = RawContract {
        contract_type,
        total_l: numeric(colab, row, "l_total"),
        l_dom: numeric(colab, row, "l_dom"),
        l_dom_salsa: numeric(colab, row, "l_dom_salsa"),
        c2d: numeric(colab, row, "c2d"),
        c3d: numeric(colab, row, "c3d"),
        l_d: numeric(colab, row, "l_d"),
        cxx: numeric(colab, row, "cxx"),
        vz: numeric(colab, row, "vz"),
        l_res: numeric(colab, row, "l_res"),
        l_res2: numeric(colab, row, "l_res2"),
    };
    let contract = Contract::derive(&raw);
    if contract.l_q < 0 {
        tracing::warn!(employee = %id, l_q = contract.l_q, "derived free-quality quota is negative");
    }
    if contract.total_l <= 0 {
        tracing::warn!(employee = %id, total_l = contract.total_l, "non-positive total days off, employee excluded from assignment");
    }
    Some(contract)
}

fn day_in_range(
    value: Option<&crate::table::Value>,
    min_date: NaiveDate,
    max_date: NaiveDate,
) -> Day {
    match value.and_then(|v| v.as_date()) {
        Some(date) if date >= min_date && date <= max_date => date.ordinal() as Day,
        _ => 0,
    }
}

fn build_masks(rows: &[CalendarRow], cycle: Cycle) -> Availability {
    let mut avail = Availability::default();
    for r in rows {
        let Some(shift) = r.shift else {
            continue;
        };
        if shift.is_empty_slot() {
            avail.empty_days.insert(r.day);
        }
        if shift.is_vacation() {
            avail.missing_days.insert(r.day);
        }
        if shift.is_absence() {
            avail.absence_days.insert(r.day);
        }
        match shift {
            RawShift::DayOff => {
                avail.fixed_days_off.insert(r.day);
                avail.free_day_complete_cycle.insert(r.day);
            }
            RawShift::SundayOff => {
                avail.free_day_complete_cycle.insert(r.day);
            }
            RawShift::QualityOff => {
                avail.fixed_lqs.insert(r.day);
            }
            _ => {}
        }
    }
    if cycle == Cycle::Complete {
        let fixed: Vec<Day> = avail.free_day_complete_cycle.iter().copied().collect();
        avail.fixed_days_off.extend(fixed);
        avail.fixed_days_off = &avail.fixed_days_off - &avail.fixed_lqs;
    }
    avail
}

/// A week with five or more absence days is read as a week off. The two
/// latest non-closed days of the week become fixed days off, encoded as the
/// quality-weekend pair when they are exactly Saturday and Sunday.
pub(crate) fn apply_week_off_rule(avail: &mut Availability, horizon: &Horizon) {
    for days in horizon.week_to_days_all().values() {
        if days.len() < 6 {
            continue;
        }
        let absences = days
            .iter()
            .filter(|d| avail.absence_days.contains(d))
            .count();
        if absences < 5 {
            continue;
        }

        let attributing: Vec<Day> = days
            .iter()
            .copied()
            .filter(|d| !horizon.closed_holidays().contains(d))
            .collect();
        if attributing.len() < 2 {
            continue;
        }
        let l1 = attributing[attributing.len() - 1];
        let l2 = attributing[attributing.len() - 2];

        for d in [l2, l1] {
            avail.absence_days.remove(&d);
            avail.missing_days.remove(&d);
            avail.empty_days.remove(&d);
        }
        if horizon.weekday_of(l2) == 6 && horizon.weekday_of(l1) == 7 {
            avail.fixed_lqs.insert(l2);
            avail.fixed_days_off.insert(l1);
        } else {
            avail.fixed_days_off.insert(l2);
            avail.fixed_days_off.insert(l1);
        }
    }
}

fn observed_week_shifts(rows: &[CalendarRow]) -> Vec<(Week, WeekShiftPreference)> {
    let mut observed: BTreeMap<Week, (bool, bool)> = BTreeMap::new();
    for r in rows {
        match r.shift {
            Some(RawShift::Morning) => observed.entry(r.week).or_default().0 = true,
            Some(RawShift::Afternoon) => observed.entry(r.week).or_default().1 = true,
            _ => {}
        }
    }
    observed
        .into_iter()
        .map(|(week, flags)| {
            let pref = match flags {
                (true, false) => WeekShiftPreference::MorningOnly,
                (false, true) => WeekShiftPreference::AfternoonOnly,
                _ => WeekShiftPreference::Both,
            };
            (week, pref)
        })
        .collect()
}

fn read_targets(est: &Table, horizon: &Horizon) -> Result<StaffingTargets, ModelError> {
    let col_data = column(est, "data")?;
    let col_turno = column(est, "turno")?;
    let col_pess = column(est, "pess_obj")?;
    let col_min = column(est, "min_turno")?;
    let col_max = column(est, "max_turno")?;

    let mut targets = StaffingTargets::default();
    for row in 0..est.len() {
        let Some(date) = est.cell(row, col_data).as_date() else {
            continue;
        };
        let day = date.ordinal() as Day;
        if !horizon.contains(day) {
            continue;
        }
        let shift = match est.cell(row, col_turno).as_str().map(str::trim) {
            Some("M") => WorkShift::Morning,
            Some("T") => WorkShift::Afternoon,
            _ => continue,
        };
        let as_count = |c: usize| -> i32 {
            est.cell(row, c)
                .as_f64()
                .map(|v| v.round().max(0.0) as i32)
                .unwrap_or(0)
        };
        targets.insert(day, shift, as_count(col_pess), as_count(col_min), as_count(col_max));
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{normalize, TABLE_CALENDARIO, TABLE_COLABORADOR, TABLE_ESTIMATIVAS};
    use crate::table::Value;

    // 2024-01-01 is a Monday, so day-of-year 7 is the first Sunday.
    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_yo_opt(2024, day).unwrap()
    }

    fn weekday_name(day: u32) -> &'static str {
        ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"][((day - 1) % 7) as usize]
    }

    fn calendario_table() -> Table {
        Table::new(
            TABLE_CALENDARIO,
            ["colaborador", "data", "wd", "dia_tipo", "tipo_turno", "ww"],
        )
    }

    fn push_day(t: &mut Table, emp: i64, day: u32, shift: &str) {
        push_day_typed(t, emp, day, shift, "normal");
    }

    fn push_day_typed(t: &mut Table, emp: i64, day: u32, shift: &str, dia_tipo: &str) {
        t.push(vec![
            Value::Int(emp),
            Value::Date(date(day)),
            Value::text(weekday_name(day)),
            Value::text(dia_tipo),
            Value::text(shift),
            Value::Int(((day - 1) / 7 + 1) as i64),
        ]);
    }

    fn colaborador_table() -> Table {
        Table::new(
            TABLE_COLABORADOR,
            [
                "matricula",
                "c2d",
                "data_admissao",
                "data_demissao",
                "l_dom_salsa",
                "tipo_contrato",
                "l_total",
                "l_dom",
                "ciclo",
                "prioridade_folgas",
            ],
        )
    }

    fn push_employee(t: &mut Table, emp: i64, contract_type: i64, total_l: i64, c2d: i64) {
        t.push(vec![
            Value::Int(emp),
            Value::Int(c2d),
            Value::Null,
            Value::Null,
            Value::Int(0),
            Value::Int(contract_type),
            Value::Int(total_l),
            Value::Int(0),
            Value::text("Ciclo B"),
            Value::Null,
        ]);
    }

    fn estimativas_table() -> Table {
        Table::new(
            TABLE_ESTIMATIVAS,
            [
                "data",
                "turno",
                "media_turno",
                "max_turno",
                "min_turno",
                "pess_obj",
                "sd_turno",
                "fk_tipo_posto",
                "wday",
            ],
        )
    }

    fn push_estimate(t: &mut Table, day: u32, shift: &str, pess: i64, min: i64) {
        t.push(vec![
            Value::Date(date(day)),
            Value::text(shift),
            Value::Float(pess as f64),
            Value::Int(min + 2),
            Value::Int(min),
            Value::Int(pess),
            Value::Float(0.0),
            Value::Int(1),
            Value::Int(((day - 1) % 7 + 1) as i64),
        ]);
    }

    fn problem_from(cal: Table, colab: Table, est: Table) -> Result<Problem, ModelError> {
        let tables: BTreeMap<String, Table> = [
            (TABLE_CALENDARIO.to_string(), cal),
            (TABLE_COLABORADOR.to_string(), colab),
            (TABLE_ESTIMATIVAS.to_string(), est),
        ]
        .into_iter()
        .collect();
        let normalized = normalize(tables)?;
        classify(&normalized)
    }

    fn two_week_problem(labels: &[(u32, &str)]) -> Problem {
        let mut cal = calendario_table();
        let fixed: BTreeMap<u32, &str> = labels.iter().copied().collect();
        for day in 1..=14 {
            push_day(&mut cal, 101, day, fixed.get(&day).copied().unwrap_or(""));
        }
        let mut colab = colaborador_table();
        push_employee(&mut colab, 101, 5, 4, 0);
        problem_from(cal, colab, estimativas_table()).unwrap()
    }

    #[test]
    fn test_horizon_facts_from_calendar() {
        let mut cal = calendario_table();
        for day in 1..=14 {
            push_day(&mut cal, 101, day, "");
        }
        push_day_typed(&mut cal, 101, 3, "", "domYf"); // mid-week holiday
        push_day(&mut cal, 101, 5, "F"); // closed holiday
        let mut colab = colaborador_table();
        push_employee(&mut colab, 101, 5, 4, 0);
        let p = problem_from(cal, colab, estimativas_table()).unwrap();

        let h = p.horizon();
        assert_eq!(h.len(), 14);
        assert_eq!(h.start_weekday(), 1);
        assert_eq!(h.sundays(), &[7, 14].into_iter().collect());
        assert_eq!(h.holidays(), &[3].into_iter().collect());
        assert_eq!(h.closed_holidays(), &[5].into_iter().collect());
        assert!(h.special_days().contains(&3));
        assert!(h.special_days().contains(&7));
        assert_eq!(h.week_to_days_all()[&1].len(), 7);
        assert_eq!(h.week_to_days()[&1].len(), 6);
    }

    #[test]
    fn test_masks_from_labels() {
        let p = two_week_problem(&[(2, "A"), (3, "AP"), (4, "V"), (5, "-"), (6, "L"), (8, "A-")]);
        let a = p.availability(EmployeeId::new(101));
        assert!(a.absence_days.contains(&2));
        assert!(a.absence_days.contains(&3));
        assert!(a.missing_days.contains(&4));
        assert!(a.empty_days.contains(&5));
        assert!(a.fixed_days_off.contains(&6));
        // Combined code counts as both empty and absence.
        assert!(a.empty_days.contains(&8));
        assert!(a.absence_days.contains(&8));
        // Working days exclude everything blocked except the fixed day off.
        assert!(a.working_days.contains(&6));
        assert!(!a.working_days.contains(&2));
        assert!(!a.working_days.contains(&4));
        assert!(!a.working_days.contains(&5));
    }

    #[test]
    fn test_week_off_rule_promotes_saturday_sunday_pair() {
        // Five absences Monday..Friday; Saturday(6) + Sunday(7) free.
        let p = two_week_problem(&[(1, "A"), (2, "A"), (3, "A"), (4, "A"), (5, "A")]);
        let a = p.availability(EmployeeId::new(101));
        assert!(a.fixed_lqs.contains(&6));
        assert!(a.fixed_days_off.contains(&7));
        assert_eq!(a.absence_days.len(), 5);
    }

    #[test]
    fn test_week_off_rule_on_full_absence_week() {
        // The whole week is absent; the two latest days are reclassified.
        let p = two_week_problem(&[
            (1, "A"),
            (2, "A"),
            (3, "A"),
            (4, "A"),
            (5, "A"),
            (6, "A"),
            (7, "A"),
        ]);
        let a = p.availability(EmployeeId::new(101));
        assert!(a.fixed_lqs.contains(&6));
        assert!(a.fixed_days_off.contains(&7));
        assert!(!a.absence_days.contains(&6));
        assert!(!a.absence_days.contains(&7));
        assert_eq!(a.absence_days.len(), 5);
    }

    #[test]
    fn test_week_off_rule_scattered_when_weekend_is_closed() {
        // Sunday is a closed holiday, so the two latest non-closed days are
        // Friday and Saturday: both become plain fixed days off.
        let mut cal = calendario_table();
        for day in 1..=14 {
            let label = match day {
                1..=5 => "A",
                7 => "F",
                _ => "",
            };
            push_day(&mut cal, 101, day, label);
        }
        let mut colab = colaborador_table();
        push_employee(&mut colab, 101, 5, 4, 0);
        let p = problem_from(cal, colab, estimativas_table()).unwrap();

        let a = p.availability(EmployeeId::new(101));
        assert!(a.fixed_lqs.is_empty());
        assert!(a.fixed_days_off.contains(&5));
        assert!(a.fixed_days_off.contains(&6));
        assert!(!a.absence_days.contains(&5));
    }

    #[test]
    fn test_lq_rows_become_fixed_lqs() {
        let p = two_week_problem(&[(6, "LQ"), (7, "L")]);
        let a = p.availability(EmployeeId::new(101));
        assert!(a.fixed_lqs.contains(&6));
        assert!(a.fixed_days_off.contains(&7));
    }

    #[test]
    fn test_week_shift_preferences() {
        let p = two_week_problem(&[(1, "M"), (3, "M"), (8, "M"), (9, "T")]);
        let id = EmployeeId::new(101);
        assert_eq!(p.week_shift(id, 1), WeekShiftPreference::MorningOnly);
        assert_eq!(p.week_shift(id, 2), WeekShiftPreference::Both);
        assert_eq!(p.week_shift(id, 3), WeekShiftPreference::Unobserved);
    }

    #[test]
    fn test_admission_raises_first_day_and_prorates() {
        let mut cal = calendario_table();
        for day in 1..=14 {
            push_day(&mut cal, 101, day, "");
        }
        let mut colab = colaborador_table();
        colab.push(vec![
            Value::Int(101),
            Value::Int(0),
            Value::Date(date(8)),
            Value::Null,
            Value::Int(2),
            Value::Int(5),
            Value::Int(4),
            Value::Int(0),
            Value::text("Ciclo B"),
            Value::Null,
        ]);
        let p = problem_from(cal, colab, estimativas_table()).unwrap();

        let e = p.employee(EmployeeId::new(101)).unwrap();
        assert_eq!(e.admission_day, 8);
        assert_eq!(e.first_day, 8);
        assert_eq!(e.last_day, 14);
        // span 7 of 14 => quotas halved
        let c = e.contract.unwrap();
        assert_eq!(c.total_l, 2);
        assert_eq!(c.total_l_dom, 1);
        // Days before admission are missing, not workable.
        let a = p.availability(EmployeeId::new(101));
        assert!(a.missing_days.contains(&3));
        assert!(!a.working_days.contains(&3));
        assert!(a.working_days.contains(&9));
    }

    #[test]
    fn test_complete_cycle_fixed_days_include_l_dom() {
        let mut cal = calendario_table();
        for day in 1..=14 {
            let label = match day {
                6 => "L",
                7 => "L_DOM",
                _ => "",
            };
            push_day(&mut cal, 101, day, label);
        }
        let mut colab = colaborador_table();
        colab.push(vec![
            Value::Int(101),
            Value::Int(0),
            Value::Null,
            Value::Null,
            Value::Int(0),
            Value::Int(5),
            Value::Int(4),
            Value::Int(0),
            Value::text("Completo"),
            Value::Null,
        ]);
        let p = problem_from(cal, colab, estimativas_table()).unwrap();

        let e = p.employee(EmployeeId::new(101)).unwrap();
        assert_eq!(e.cycle, Cycle::Complete);
        assert!(!e.is_optimizable());
        let a = p.availability(EmployeeId::new(101));
        assert!(a.fixed_days_off.contains(&6));
        assert!(a.fixed_days_off.contains(&7));
    }

    #[test]
    fn test_targets_are_read_per_day_and_shift() {
        let mut est = estimativas_table();
        push_estimate(&mut est, 1, "M", 2, 1);
        push_estimate(&mut est, 1, "T", 3, 2);
        push_estimate(&mut est, 200, "M", 9, 9); // outside horizon, ignored
        let mut cal = calendario_table();
        for day in 1..=14 {
            push_day(&mut cal, 101, day, "");
        }
        let mut colab = colaborador_table();
        push_employee(&mut colab, 101, 5, 4, 0);
        let p = problem_from(cal, colab, est).unwrap();

        let t = p.targets();
        assert_eq!(t.pess_obj(1, WorkShift::Morning), 2);
        assert_eq!(t.pess_obj(1, WorkShift::Afternoon), 3);
        assert_eq!(t.min_workers(1, WorkShift::Afternoon), 2);
        assert_eq!(t.max_workers(1, WorkShift::Morning), 3);
        assert_eq!(t.pess_obj(200, WorkShift::Morning), 0);
    }

    #[test]
    fn test_employee_in_one_table_only_is_dropped() {
        let mut cal = calendario_table();
        for day in 1..=7 {
            push_day(&mut cal, 101, day, "");
            push_day(&mut cal, 102, day, "");
        }
        let mut colab = colaborador_table();
        push_employee(&mut colab, 101, 5, 4, 0);
        push_employee(&mut colab, 999, 5, 4, 0);
        let p = problem_from(cal, colab, estimativas_table()).unwrap();

        assert_eq!(p.employees().len(), 1);
        assert_eq!(p.employees()[0].id, EmployeeId::new(101));
    }

    #[test]
    fn test_empty_inputs_surface_as_errors() {
        let cal = calendario_table();
        let mut colab = colaborador_table();
        push_employee(&mut colab, 101, 5, 4, 0);
        match problem_from(cal, colab, estimativas_table()) {
            Err(ModelError::EmptyHorizon) => {}
            other => panic!("expected EmptyHorizon, got {other:?}"),
        }

        let mut cal = calendario_table();
        for day in 1..=7 {
            push_day(&mut cal, 101, day, "");
        }
        match problem_from(cal, colaborador_table(), estimativas_table()) {
            Err(ModelError::EmptyWorkforce) => {}
            other => panic!("expected EmptyWorkforce, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_contract_type_keeps_employee_out_of_assignment() {
        let mut cal = calendario_table();
        for day in 1..=7 {
            push_day(&mut cal, 101, day, "");
        }
        let mut colab = Table::new(
            TABLE_COLABORADOR,
            ["matricula", "c2d", "data_admissao", "data_demissao", "l_dom_salsa"],
        );
        colab.push(vec![
            Value::Int(101),
            Value::Int(0),
            Value::Null,
            Value::Null,
            Value::Int(0),
        ]);
        let p = problem_from(cal, colab, estimativas_table()).unwrap();
        assert_eq!(p.employees().len(), 1);
        assert!(p.employees()[0].contract.is_none());
        assert!(p.optimizable_indices().is_empty());
    }
}
