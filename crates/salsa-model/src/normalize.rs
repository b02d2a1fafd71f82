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

//! Input normalization: validates the three raw tables, lowercases column
//! names, coerces key columns and drops rows that fail coercion.

use crate::err::{MissingColumnError, MissingTableError, NormalizeError};
use crate::table::{Table, Value};
use std::collections::BTreeMap;

pub const TABLE_CALENDARIO: &str = "calendario";
pub const TABLE_ESTIMATIVAS: &str = "estimativas";
pub const TABLE_COLABORADOR: &str = "colaborador";

const REQUIRED_COLABORADOR: [&str; 5] =
    ["matricula", "c2d", "data_admissao", "data_demissao", "l_dom_salsa"];
const REQUIRED_CALENDARIO: [&str; 6] = ["colaborador", "data", "wd", "dia_tipo", "tipo_turno", "ww"];
const REQUIRED_ESTIMATIVAS: [&str; 9] = [
    "data",
    "turno",
    "media_turno",
    "max_turno",
    "min_turno",
    "pess_obj",
    "sd_turno",
    "fk_tipo_posto",
    "wday",
];

/// Marker rows some extracts append below the header.
const SENTINEL_ROW: &str = "TIPO_DIA";

/// The three tables after structural validation and coercion.
#[derive(Debug, Clone)]
pub struct NormalizedTables {
    pub calendario: Table,
    pub estimativas: Table,
    pub colaborador: Table,
}

/// Validates and coerces the raw input mapping.
pub fn normalize(mut tables: BTreeMap<String, Table>) -> Result<NormalizedTables, NormalizeError> {
    let mut calendario = take_table(&mut tables, TABLE_CALENDARIO)?;
    let mut estimativas = take_table(&mut tables, TABLE_ESTIMATIVAS)?;
    let mut colaborador = take_table(&mut tables, TABLE_COLABORADOR)?;

    calendario.lowercase_columns();
    estimativas.lowercase_columns();
    colaborador.lowercase_columns();

    require_columns(&colaborador, &REQUIRED_COLABORADOR)?;
    require_columns(&calendario, &REQUIRED_CALENDARIO)?;
    require_columns(&estimativas, &REQUIRED_ESTIMATIVAS)?;

    drop_sentinel_rows(&mut calendario, "colaborador");
    drop_sentinel_rows(&mut colaborador, "matricula");

    coerce_int_column(&mut calendario, "colaborador");
    coerce_date_column(&mut calendario, "data");
    coerce_date_column(&mut estimativas, "data");

    tracing::info!(
        calendario_rows = calendario.len(),
        estimativas_rows = estimativas.len(),
        colaborador_rows = colaborador.len(),
        "input tables normalized"
    );

    Ok(NormalizedTables {
        calendario,
        estimativas,
        colaborador,
    })
}

fn take_table(
    tables: &mut BTreeMap<String, Table>,
    name: &str,
) -> Result<Table, MissingTableError> {
    tables.remove(name).ok_or_else(|| MissingTableError::new(name))
}

fn require_columns(table: &Table, required: &[&str]) -> Result<(), MissingColumnError> {
    for column in required {
        if !table.has_column(column) {
            return Err(MissingColumnError::new(table.name(), *column));
        }
    }
    Ok(())
}

fn drop_sentinel_rows(table: &mut Table, column: &str) {
    let Some(idx) = table.column_index(column) else {
        return;
    };
    let dropped = table.retain_rows(|r| r[idx].as_str().map(|s| s != SENTINEL_ROW).unwrap_or(true));
    if dropped > 0 {
        tracing::debug!(table = table.name(), dropped, "dropped sentinel rows");
    }
}

fn coerce_int_column(table: &mut Table, column: &str) {
    let Some(idx) = table.column_index(column) else {
        return;
    };
    let name = table.name().to_string();
    let dropped = table.retain_rows(|r| r[idx].as_i64().is_some());
    if dropped > 0 {
        tracing::warn!(
            table = name,
            column,
            dropped,
            "dropped rows with non-numeric values"
        );
    }
    for row in 0..table.len() {
        if let Some(v) = table.cell(row, idx).as_i64() {
            table.set(row, idx, Value::Int(v));
        }
    }
}

fn coerce_date_column(table: &mut Table, column: &str) {
    let Some(idx) = table.column_index(column) else {
        return;
    };
    let name = table.name().to_string();
    let dropped = table.retain_rows(|r| r[idx].as_date().is_some());
    if dropped > 0 {
        tracing::warn!(
            table = name,
            column,
            dropped,
            "dropped rows with unparsable dates"
        );
    }
    for row in 0..table.len() {
        if let Some(d) = table.cell(row, idx).as_date() {
            table.set(row, idx, Value::Date(d));
        }
    }
}
