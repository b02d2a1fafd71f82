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

//! Shift label alphabets.
//!
//! The calendar table speaks a slightly richer dialect than the engine
//! emits: `L_DOM` marks a pre-fixed Sunday off, `AP` a paid absence, and the
//! combined codes `A-`/`V-` mark days that count both as empty slots and as
//! absence/vacation. [`RawShift`] covers that input dialect; [`ShiftLabel`]
//! is the eight-letter output alphabet of the decoded schedule.

use serde::Serialize;

/// A label as it appears in the raw calendar's `tipo_turno` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawShift {
    Morning,
    Afternoon,
    DayOff,
    SundayOff,
    QualityOff,
    Absence,
    PaidAbsence,
    AbsenceEmpty,
    Vacation,
    VacationEmpty,
    Closed,
    Empty,
}

impl RawShift {
    /// Parses a raw calendar label. Unknown codes yield `None` and leave the
    /// day unclassified (a plain working slot).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "M" => Some(RawShift::Morning),
            "T" => Some(RawShift::Afternoon),
            "L" => Some(RawShift::DayOff),
            "L_DOM" => Some(RawShift::SundayOff),
            "LQ" => Some(RawShift::QualityOff),
            "A" => Some(RawShift::Absence),
            "AP" => Some(RawShift::PaidAbsence),
            "A-" => Some(RawShift::AbsenceEmpty),
            "V" => Some(RawShift::Vacation),
            "V-" => Some(RawShift::VacationEmpty),
            "F" => Some(RawShift::Closed),
            "-" => Some(RawShift::Empty),
            _ => None,
        }
    }

    pub fn is_absence(self) -> bool {
        matches!(
            self,
            RawShift::Absence | RawShift::PaidAbsence | RawShift::AbsenceEmpty
        )
    }

    pub fn is_vacation(self) -> bool {
        matches!(self, RawShift::Vacation | RawShift::VacationEmpty)
    }

    pub fn is_empty_slot(self) -> bool {
        matches!(
            self,
            RawShift::Empty | RawShift::AbsenceEmpty | RawShift::VacationEmpty
        )
    }
}

/// One of the two working shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum WorkShift {
    Morning,
    Afternoon,
}

impl WorkShift {
    pub const ALL: [WorkShift; 2] = [WorkShift::Morning, WorkShift::Afternoon];

    pub fn label(self) -> ShiftLabel {
        match self {
            WorkShift::Morning => ShiftLabel::Morning,
            WorkShift::Afternoon => ShiftLabel::Afternoon,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.label().as_str()
    }
}

/// A cell of the decoded schedule matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ShiftLabel {
    /// `M`: morning working shift.
    Morning,
    /// `T`: afternoon working shift.
    Afternoon,
    /// `L`: regular day off.
    DayOff,
    /// `LQ`: the Saturday half of a quality weekend.
    QualityOff,
    /// `F`: site closed.
    ClosedHoliday,
    /// `A`: absence.
    Absence,
    /// `V`: vacation / not registered.
    Vacation,
    /// `-`: no slot.
    Unassigned,
}

impl ShiftLabel {
    pub const COUNT: usize = 8;

    pub const ALL: [ShiftLabel; Self::COUNT] = [
        ShiftLabel::Morning,
        ShiftLabel::Afternoon,
        ShiftLabel::DayOff,
        ShiftLabel::QualityOff,
        ShiftLabel::ClosedHoliday,
        ShiftLabel::Absence,
        ShiftLabel::Vacation,
        ShiftLabel::Unassigned,
    ];

    /// The labels legal on a workable day.
    pub const CHECK: [ShiftLabel; 4] = [
        ShiftLabel::Morning,
        ShiftLabel::Afternoon,
        ShiftLabel::DayOff,
        ShiftLabel::QualityOff,
    ];

    /// Dense index used by the variable arena.
    pub fn index(self) -> usize {
        match self {
            ShiftLabel::Morning => 0,
            ShiftLabel::Afternoon => 1,
            ShiftLabel::DayOff => 2,
            ShiftLabel::QualityOff => 3,
            ShiftLabel::ClosedHoliday => 4,
            ShiftLabel::Absence => 5,
            ShiftLabel::Vacation => 6,
            ShiftLabel::Unassigned => 7,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShiftLabel::Morning => "M",
            ShiftLabel::Afternoon => "T",
            ShiftLabel::DayOff => "L",
            ShiftLabel::QualityOff => "LQ",
            ShiftLabel::ClosedHoliday => "F",
            ShiftLabel::Absence => "A",
            ShiftLabel::Vacation => "V",
            ShiftLabel::Unassigned => "-",
        }
    }

    pub fn is_working(self) -> bool {
        matches!(self, ShiftLabel::Morning | ShiftLabel::Afternoon)
    }
}

impl std::fmt::Display for ShiftLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_parse_covers_the_input_dialect() {
        assert_eq!(RawShift::parse("M"), Some(RawShift::Morning));
        assert_eq!(RawShift::parse("L_DOM"), Some(RawShift::SundayOff));
        assert_eq!(RawShift::parse("AP"), Some(RawShift::PaidAbsence));
        assert_eq!(RawShift::parse(" A- "), Some(RawShift::AbsenceEmpty));
        assert_eq!(RawShift::parse("-"), Some(RawShift::Empty));
        assert_eq!(RawShift::parse("LD"), None);
        assert_eq!(RawShift::parse(""), None);
    }

    #[test]
    fn test_combined_codes_count_twice() {
        let a = RawShift::parse("A-").unwrap();
        assert!(a.is_absence());
        assert!(a.is_empty_slot());
        let v = RawShift::parse("V-").unwrap();
        assert!(v.is_vacation());
        assert!(v.is_empty_slot());
    }

    #[test]
    fn test_label_indices_are_dense_and_unique() {
        let mut seen = [false; ShiftLabel::COUNT];
        for l in ShiftLabel::ALL {
            assert!(!seen[l.index()]);
            seen[l.index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_label_round_trips_through_str() {
        for l in ShiftLabel::ALL {
            let parsed = RawShift::parse(l.as_str());
            match l {
                ShiftLabel::Unassigned => assert_eq!(parsed, Some(RawShift::Empty)),
                ShiftLabel::Morning => assert_eq!(parsed, Some(RawShift::Morning)),
                ShiftLabel::Afternoon => assert_eq!(parsed, Some(RawShift::Afternoon)),
                ShiftLabel::DayOff => assert_eq!(parsed, Some(RawShift::DayOff)),
                ShiftLabel::QualityOff => assert_eq!(parsed, Some(RawShift::QualityOff)),
                ShiftLabel::ClosedHoliday => assert_eq!(parsed, Some(RawShift::Closed)),
                ShiftLabel::Absence => assert_eq!(parsed, Some(RawShift::Absence)),
                ShiftLabel::Vacation => assert_eq!(parsed, Some(RawShift::Vacation)),
            }
        }
    }
}
