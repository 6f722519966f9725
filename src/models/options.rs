//! Fixed option tables for the lesson-plan form.

use phf::phf_set;

/// Practice assigned to a session that has not been edited
pub const DEFAULT_PRACTICE: &str = "Inkuiri";

/// Academic year pre-filled in a new form
pub const DEFAULT_ACADEMIC_YEAR: &str = "2024/2025";

/// Session duration pre-filled in a new form
pub const DEFAULT_SESSION_DURATION: &str = "2 x 35 menit";

/// Inclusive bounds for the number of sessions
pub const MIN_SESSIONS: u32 = 1;
pub const MAX_SESSIONS: u32 = 10;

/// Pedagogical practices offered per session, in display order
pub const PEDAGOGICAL_PRACTICE_OPTIONS: [&str; 9] = [
    "Inkuiri",
    "PjBL (Project Based Learning)",
    "Diskusi",
    "Kolaboratif",
    "Problem Solving",
    "Game Based Learning",
    "Station Learning",
    "Inkuiri-Discovery Learning",
    "Problem Based Learning",
];

/// Graduate dimensions, in display order
pub const GRADUATE_DIMENSION_OPTIONS: [&str; 8] = [
    "Keimanan & Ketakwaan",
    "Kewargaan",
    "Penalaran Kritis",
    "Kreativitas",
    "Kolaborasi",
    "Kemandirian",
    "Kesehatan",
    "Komunikasi",
];

static GRADUATE_DIMENSIONS: phf::Set<&'static str> = phf_set! {
    "Keimanan & Ketakwaan",
    "Kewargaan",
    "Penalaran Kritis",
    "Kreativitas",
    "Kolaborasi",
    "Kemandirian",
    "Kesehatan",
    "Komunikasi",
};

/// Whether `name` is one of the fixed graduate dimensions
pub fn is_graduate_dimension(name: &str) -> bool {
    GRADUATE_DIMENSIONS.contains(name)
}
