//! Curriculum phase (fase) resolution.

use super::level::EducationLevel;
use serde::Serialize;

/// Curriculum phase code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    A,
    B,
    C,
    D,
    E,
    F,
    /// Grade is not numeric or does not belong to the level
    Unknown,
}

impl Phase {
    pub fn code(self) -> &'static str {
        match self {
            Phase::A => "A",
            Phase::B => "B",
            Phase::C => "C",
            Phase::D => "D",
            Phase::E => "E",
            Phase::F => "F",
            Phase::Unknown => "",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Unknown => write!(f, "-"),
            phase => write!(f, "{}", phase.code()),
        }
    }
}

/// Maps an education level and grade to its curriculum phase.
///
/// Never fails: anything outside the grade tables resolves to
/// [`Phase::Unknown`].
pub fn resolve_phase(level: EducationLevel, grade: &str) -> Phase {
    let Ok(grade) = grade.trim().parse::<u32>() else {
        return Phase::Unknown;
    };

    match (level, grade) {
        (EducationLevel::SD, 1..=2) => Phase::A,
        (EducationLevel::SD, 3..=4) => Phase::B,
        (EducationLevel::SD, 5..=6) => Phase::C,
        (EducationLevel::SMP, 7..=9) => Phase::D,
        (EducationLevel::SMA, 10) => Phase::E,
        (EducationLevel::SMA, 11..=12) => Phase::F,
        _ => Phase::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_table() {
        let cases = [
            (EducationLevel::SD, "1", Phase::A),
            (EducationLevel::SD, "2", Phase::A),
            (EducationLevel::SD, "3", Phase::B),
            (EducationLevel::SD, "4", Phase::B),
            (EducationLevel::SD, "5", Phase::C),
            (EducationLevel::SD, "6", Phase::C),
            (EducationLevel::SMP, "7", Phase::D),
            (EducationLevel::SMP, "8", Phase::D),
            (EducationLevel::SMP, "9", Phase::D),
            (EducationLevel::SMA, "10", Phase::E),
            (EducationLevel::SMA, "11", Phase::F),
            (EducationLevel::SMA, "12", Phase::F),
        ];
        for (level, grade, expected) in cases {
            assert_eq!(resolve_phase(level, grade), expected, "{level} {grade}");
        }
    }

    #[test]
    fn out_of_range_is_unknown() {
        assert_eq!(resolve_phase(EducationLevel::SD, "7"), Phase::Unknown);
        assert_eq!(resolve_phase(EducationLevel::SD, "0"), Phase::Unknown);
        assert_eq!(resolve_phase(EducationLevel::SMP, "6"), Phase::Unknown);
        assert_eq!(resolve_phase(EducationLevel::SMA, "9"), Phase::Unknown);
        assert_eq!(resolve_phase(EducationLevel::SMA, "13"), Phase::Unknown);
    }

    #[test]
    fn non_numeric_is_unknown() {
        assert_eq!(resolve_phase(EducationLevel::SD, "satu"), Phase::Unknown);
        assert_eq!(resolve_phase(EducationLevel::SMP, ""), Phase::Unknown);
        assert_eq!(resolve_phase(EducationLevel::SMA, "-1"), Phase::Unknown);
        assert_eq!(Phase::Unknown.code(), "");
    }
}
