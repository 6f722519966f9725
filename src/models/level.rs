use serde::{Deserialize, Serialize};

/// Education level (jenjang)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EducationLevel {
    /// Sekolah Dasar, grades 1-6
    #[default]
    SD,
    /// Sekolah Menengah Pertama, grades 7-9
    SMP,
    /// Sekolah Menengah Atas, grades 10-12
    SMA,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 3] = [EducationLevel::SD, EducationLevel::SMP, EducationLevel::SMA];

    /// Short code used on the form
    pub fn code(self) -> &'static str {
        match self {
            EducationLevel::SD => "SD",
            EducationLevel::SMP => "SMP",
            EducationLevel::SMA => "SMA",
        }
    }

    /// Grades belonging to this level, in display order
    pub fn grades(self) -> &'static [&'static str] {
        match self {
            EducationLevel::SD => &["1", "2", "3", "4", "5", "6"],
            EducationLevel::SMP => &["7", "8", "9"],
            EducationLevel::SMA => &["10", "11", "12"],
        }
    }

    /// Grade selected right after switching to this level
    pub fn first_grade(self) -> &'static str {
        self.grades()[0]
    }

    pub fn has_grade(self, grade: &str) -> bool {
        self.grades().contains(&grade.trim())
    }

    /// Parses a level code, ignoring case and surrounding whitespace
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SD" => Some(EducationLevel::SD),
            "SMP" => Some(EducationLevel::SMP),
            "SMA" => Some(EducationLevel::SMA),
            _ => None,
        }
    }
}

impl std::fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for EducationLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| format!("jenjang tidak dikenal: {s} (pilih SD, SMP, atau SMA)"))
    }
}
