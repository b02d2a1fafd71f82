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

//! Tabular fixtures shared by the engine tests. The base year is 2024, whose
//! January 1st is a Monday, so day-of-year 6 is the first Saturday and 7 the
//! first Sunday.

use chrono::NaiveDate;
use salsa_model::problem::Problem;
use salsa_model::table::{Table, Value};
use std::collections::BTreeMap;

pub(crate) struct FixtureWorker {
    pub id: i64,
    pub contract_type: i64,
    pub total_l: i64,
    pub c2d: i64,
    pub l_dom_salsa: i64,
    pub cycle: &'static str,
    pub role: Option<&'static str>,
    pub admission: Option<u32>,
    pub labels: Vec<(u32, &'static str)>,
}

impl FixtureWorker {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            contract_type: 5,
            total_l: 2,
            c2d: 0,
            l_dom_salsa: 0,
            cycle: "Ciclo B",
            role: None,
            admission: None,
            labels: Vec::new(),
        }
    }

    pub fn contract(mut self, contract_type: i64, total_l: i64, c2d: i64, l_dom: i64) -> Self {
        self.contract_type = contract_type;
        self.total_l = total_l;
        self.c2d = c2d;
        self.l_dom_salsa = l_dom;
        self
    }

    pub fn role(mut self, role: &'static str) -> Self {
        self.role = Some(role);
        self
    }

    pub fn labels(mut self, labels: &[(u32, &'static str)]) -> Self {
        self.labels = labels.to_vec();
        self
    }

    pub fn admitted(mut self, day: u32) -> Self {
        self.admission = Some(day);
        self
    }
}

pub(crate) fn date(day: u32) -> NaiveDate {
    NaiveDate::from_yo_opt(2024, day).unwrap()
}

fn weekday_name(day: u32) -> &'static str {
    ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"][((day - 1) % 7) as usize]
}

/// `estimates` rows are (day, shift, pess_obj, min_workers).
pub(crate) fn fixture_tables(
    days: std::ops::RangeInclusive<u32>,
    workers: &[FixtureWorker],
    estimates: &[(u32, &'static str, i64, i64)],
) -> BTreeMap<String, Table> {
    let mut calendario = Table::new(
        "calendario",
        ["colaborador", "data", "wd", "dia_tipo", "tipo_turno", "ww"],
    );
    for worker in workers {
        let labels: BTreeMap<u32, &str> = worker.labels.iter().copied().collect();
        for day in days.clone() {
            calendario.push(vec![
                Value::Int(worker.id),
                Value::Date(date(day)),
                Value::text(weekday_name(day)),
                Value::text("normal"),
                Value::text(labels.get(&day).copied().unwrap_or("")),
                Value::Int(((day - 1) / 7 + 1) as i64),
            ]);
        }
    }

    let mut colaborador = Table::new(
        "colaborador",
        [
            "matricula",
            "c2d",
            "data_admissao",
            "data_demissao",
            "l_dom_salsa",
            "tipo_contrato",
            "l_total",
            "ciclo",
            "prioridade_folgas",
        ],
    );
    for worker in workers {
        colaborador.push(vec![
            Value::Int(worker.id),
            Value::Int(worker.c2d),
            worker.admission.map(|d| Value::Date(date(d))).unwrap_or(Value::Null),
            Value::Null,
            Value::Int(worker.l_dom_salsa),
            Value::Int(worker.contract_type),
            Value::Int(worker.total_l),
            Value::text(worker.cycle),
            worker.role.map(Value::text).unwrap_or(Value::Null),
        ]);
    }

    let mut estimativas = Table::new(
        "estimativas",
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
    );
    for &(day, shift, pess, min) in estimates {
        estimativas.push(vec![
            Value::Date(date(day)),
            Value::text(shift),
            Value::Float(pess as f64),
            Value::Int(pess + 2),
            Value::Int(min),
            Value::Int(pess),
            Value::Float(0.0),
            Value::Int(1),
            Value::Int(((day - 1) % 7 + 1) as i64),
        ]);
    }

    [
        ("calendario".to_string(), calendario),
        ("estimativas".to_string(), estimativas),
        ("colaborador".to_string(), colaborador),
    ]
    .into_iter()
    .collect()
}

pub(crate) fn build_problem(
    days: std::ops::RangeInclusive<u32>,
    workers: &[FixtureWorker],
    estimates: &[(u32, &'static str, i64, i64)],
) -> Problem {
    Problem::from_tables(fixture_tables(days, workers, estimates)).unwrap()
}

/// Scenario fixture: two interchangeable workers over one Monday-started
/// week, one person per shift on the five weekdays.
pub(crate) fn two_worker_week() -> Problem {
    let estimates: Vec<(u32, &'static str, i64, i64)> = (1..=5)
        .flat_map(|d| [(d, "M", 1, 1), (d, "T", 1, 1)])
        .collect();
    build_problem(
        1..=7,
        &[FixtureWorker::new(101), FixtureWorker::new(102)],
        &estimates,
    )
}

/// One worker over one week with the given pre-fixed labels.
pub(crate) fn problem_with_labels(labels: &[(u32, &'static str)]) -> Problem {
    build_problem(1..=7, &[FixtureWorker::new(101).labels(labels)], &[])
}
