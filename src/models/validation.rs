//! Submission checks for the lesson-plan form.

use super::lesson_plan::LessonPlanRequest;
use crate::error::{MissingField, ValidationError};

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Lists every required field that is still empty, in form order.
///
/// Scalar text fields must contain something besides whitespace; the
/// practice list and the dimension set must be non-empty, and every
/// practice entry must be filled.
pub fn missing_fields(req: &LessonPlanRequest) -> Vec<MissingField> {
    let text_fields: [(&'static str, &'static str, &str); 13] = [
        ("institution_name", "Nama Satuan Pendidikan", req.institution_name.as_str()),
        ("teacher_name", "Nama Guru", req.teacher_name.as_str()),
        ("teacher_id", "NIP Guru", req.teacher_id.as_str()),
        ("principal_name", "Nama Kepala Sekolah", req.principal_name.as_str()),
        ("principal_id", "NIP Kepala Sekolah", req.principal_id.as_str()),
        ("place", "Tempat Pembuatan RPM", req.place.as_str()),
        ("creation_date", "Tanggal Pembuatan RPM", req.creation_date.as_str()),
        ("academic_year", "Tahun Pelajaran", req.academic_year.as_str()),
        ("grade", "Kelas", req.grade.as_str()),
        ("subject", "Mata Pelajaran", req.subject.as_str()),
        ("learning_outcome", "Capaian Pembelajaran (CP)", req.learning_outcome.as_str()),
        ("material_topic", "Materi Pelajaran", req.material_topic.as_str()),
        ("session_duration", "Durasi Setiap Pertemuan", req.session_duration.as_str()),
    ];

    let mut missing: Vec<MissingField> = text_fields
        .iter()
        .filter(|(_, _, value)| blank(value))
        .map(|&(field, label, _)| MissingField { field, label })
        .collect();

    if req.pedagogical_practices.is_empty() || req.pedagogical_practices.iter().any(|p| blank(p)) {
        missing.push(MissingField {
            field: "pedagogical_practices",
            label: "Praktik Pedagogis",
        });
    }

    if req.graduate_dimensions.is_empty() {
        missing.push(MissingField {
            field: "graduate_dimensions",
            label: "Dimensi Lulusan",
        });
    }

    missing
}

/// Whether the form may be submitted
pub fn is_submittable(req: &LessonPlanRequest) -> bool {
    missing_fields(req).is_empty()
}

/// `Ok(())` when submittable, otherwise the full list of missing fields
pub fn validate(req: &LessonPlanRequest) -> Result<(), ValidationError> {
    let missing = missing_fields(req);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(missing))
    }
}
