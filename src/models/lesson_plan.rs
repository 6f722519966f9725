use serde::{Deserialize, Serialize};

use super::level::EducationLevel;
use super::options::{
    is_graduate_dimension, DEFAULT_ACADEMIC_YEAR, DEFAULT_PRACTICE, DEFAULT_SESSION_DURATION,
    MAX_SESSIONS, MIN_SESSIONS,
};
use super::phase::{resolve_phase, Phase};

/// Lesson-plan form state.
///
/// Fields map one-to-one onto the request TOML keys. Use the setter methods
/// rather than assigning `education_level`, `grade` or `session_count`
/// directly so the dependent fields stay consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonPlanRequest {
    pub institution_name: String,
    pub teacher_name: String,
    pub teacher_id: String,
    pub principal_name: String,
    pub principal_id: String,
    pub place: String,
    /// ISO calendar date, `YYYY-MM-DD`
    pub creation_date: String,
    pub academic_year: String,
    pub education_level: EducationLevel,
    pub grade: String,
    pub subject: String,
    pub learning_outcome: String,
    pub material_topic: String,
    pub session_count: u32,
    pub session_duration: String,
    /// One practice per session
    pub pedagogical_practices: Vec<String>,
    /// Selected dimensions, in the order they were picked
    pub graduate_dimensions: Vec<String>,
    /// Ask for section 5 with per-dimension assessment tables
    pub include_appendix: bool,
}

impl Default for LessonPlanRequest {
    fn default() -> Self {
        Self {
            institution_name: String::new(),
            teacher_name: String::new(),
            teacher_id: String::new(),
            principal_name: String::new(),
            principal_id: String::new(),
            place: String::new(),
            creation_date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            academic_year: DEFAULT_ACADEMIC_YEAR.to_string(),
            education_level: EducationLevel::SD,
            grade: EducationLevel::SD.first_grade().to_string(),
            subject: String::new(),
            learning_outcome: String::new(),
            material_topic: String::new(),
            session_count: MIN_SESSIONS,
            session_duration: DEFAULT_SESSION_DURATION.to_string(),
            pedagogical_practices: vec![DEFAULT_PRACTICE.to_string()],
            graduate_dimensions: Vec::new(),
            include_appendix: false,
        }
    }
}

impl LessonPlanRequest {
    /// Switches the education level and resets the grade to the level's
    /// first grade.
    pub fn set_education_level(&mut self, level: EducationLevel) {
        self.education_level = level;
        self.grade = level.first_grade().to_string();
    }

    /// Selects a grade; returns `false` and leaves the grade untouched when
    /// it does not belong to the current level.
    pub fn set_grade(&mut self, grade: &str) -> bool {
        if !self.education_level.has_grade(grade) {
            return false;
        }
        self.grade = grade.trim().to_string();
        true
    }

    /// Changes the number of sessions, clamped to `[1, 10]`.
    ///
    /// Growing appends the default practice; shrinking truncates. Existing
    /// entries keep their position.
    pub fn set_session_count(&mut self, count: u32) {
        let count = count.clamp(MIN_SESSIONS, MAX_SESSIONS);
        self.session_count = count;
        self.pedagogical_practices
            .resize(count as usize, DEFAULT_PRACTICE.to_string());
    }

    /// Assigns the practice of one session (0-based). Out-of-range indexes
    /// are ignored.
    pub fn set_practice(&mut self, index: usize, practice: impl Into<String>) -> bool {
        match self.pedagogical_practices.get_mut(index) {
            Some(slot) => {
                *slot = practice.into();
                true
            }
            None => false,
        }
    }

    /// Checks or unchecks a graduate dimension.
    ///
    /// Checking appends (keeping pick order) and is a no-op for names outside
    /// the option set or already selected.
    pub fn toggle_dimension(&mut self, name: &str, checked: bool) -> bool {
        if checked {
            if !is_graduate_dimension(name) || self.graduate_dimensions.iter().any(|d| d == name) {
                return false;
            }
            self.graduate_dimensions.push(name.to_string());
            true
        } else {
            let before = self.graduate_dimensions.len();
            self.graduate_dimensions.retain(|d| d != name);
            before != self.graduate_dimensions.len()
        }
    }

    /// Repairs invariants on a request read from disk: clamps the session
    /// count, pads or truncates practices, resets a grade that does not
    /// belong to the level and drops duplicate dimensions.
    pub fn normalize(&mut self) {
        if !self.education_level.has_grade(&self.grade) {
            self.grade = self.education_level.first_grade().to_string();
        } else {
            self.grade = self.grade.trim().to_string();
        }

        self.set_session_count(self.session_count);

        let mut seen = Vec::with_capacity(self.graduate_dimensions.len());
        self.graduate_dimensions.retain(|d| {
            if seen.contains(d) {
                false
            } else {
                seen.push(d.clone());
                true
            }
        });
    }

    /// Curriculum phase for the current level and grade
    pub fn phase(&self) -> Phase {
        resolve_phase(self.education_level, &self.grade)
    }
}
