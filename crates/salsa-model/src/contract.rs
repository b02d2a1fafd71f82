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

//! Per-employee contract summary: the day-off quotas the constraint system
//! enforces, derived from the raw `colaborador` row.

use serde::Serialize;

/// Raw quota columns as read from the `colaborador` table. Absent columns
/// default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawContract {
    pub contract_type: i64,
    pub total_l: i64,
    pub l_dom: i64,
    pub l_dom_salsa: i64,
    pub c2d: i64,
    pub c3d: i64,
    pub l_d: i64,
    pub cxx: i64,
    pub vz: i64,
    pub l_res: i64,
    pub l_res2: i64,
}

/// Derived contract summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Contract {
    /// Maximum working days per week (typically 4, 5 or 6).
    pub contract_type: u16,
    /// Total days off to allocate over the horizon.
    pub total_l: i32,
    /// Minimum Sundays off.
    pub total_l_dom: i32,
    /// Minimum two-day quality weekends.
    pub c2d: i32,
    pub c3d: i32,
    pub l_d: i32,
    /// Free-quality quota recomputed from the totals.
    pub l_q: i32,
    pub cxx: i32,
    pub t_lq: i32,
}

impl Contract {
    /// Derives the summary from raw quota columns. `l_q` is recomputed from
    /// the totals; a negative result is a warning, not an error.
    pub fn derive(raw: &RawContract) -> Self {
        let l_q = raw.total_l
            - raw.l_dom
            - raw.c2d
            - raw.c3d
            - raw.l_d
            - raw.cxx
            - raw.vz
            - raw.l_res
            - raw.l_res2;
        let t_lq = l_q + raw.c2d + raw.c3d;

        Self {
            contract_type: raw.contract_type.clamp(0, u16::MAX as i64) as u16,
            total_l: raw.total_l as i32,
            total_l_dom: raw.l_dom_salsa as i32,
            c2d: raw.c2d as i32,
            c3d: raw.c3d as i32,
            l_d: raw.l_d as i32,
            l_q: l_q as i32,
            cxx: raw.cxx as i32,
            t_lq: t_lq as i32,
        }
    }

    /// Scales the quotas of an employee whose registered span covers only
    /// part of the horizon. `c2d` and `c3d` round down; the remaining quotas
    /// round to nearest.
    pub fn prorated(&self, span_days: u32, horizon_days: u32) -> Self {
        if horizon_days == 0 || span_days >= horizon_days {
            return *self;
        }
        let p = (span_days as f64 / horizon_days as f64).clamp(0.0, 1.0);
        let nearest = |v: i32| (p * v as f64).round() as i32;
        let down = |v: i32| (p * v as f64).floor() as i32;

        Self {
            contract_type: self.contract_type,
            total_l: nearest(self.total_l),
            total_l_dom: nearest(self.total_l_dom),
            c2d: down(self.c2d),
            c3d: down(self.c3d),
            l_d: nearest(self.l_d),
            l_q: nearest(self.l_q),
            cxx: nearest(self.cxx),
            t_lq: nearest(self.t_lq),
        }
    }
}
