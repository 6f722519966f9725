//! Signature block shared by the display page and the markup export.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::models::LessonPlanRequest;

static UNSAFE_NAME_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[\s/\\:*?"<>|\x00-\x1f]"#).expect("valid file name pattern")
});

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Renders an ISO date as a long Indonesian date, e.g. `5 Maret 2025`.
///
/// The string is read as a plain calendar date, so no timezone can shift the
/// day. Empty input gives an empty string; anything unparsable is returned
/// as-is.
pub fn format_long_date(iso: &str) -> String {
    let iso = iso.trim();
    if iso.is_empty() {
        return String::new();
    }
    match NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        Ok(date) => format!(
            "{} {} {}",
            date.day(),
            MONTHS[date.month0() as usize],
            date.year()
        ),
        Err(_) => iso.to_string(),
    }
}

/// `RPM-<subject>.<ext>`, with whitespace, path separators and characters
/// that are invalid in file names replaced by `_`. The result is always a
/// single path component.
pub fn export_file_name(subject: &str, extension: &str) -> String {
    format!("RPM-{}.{}", UNSAFE_NAME_CHARS.replace_all(subject, "_"), extension)
}

/// Left and right signature columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureBlock {
    pub left: [String; 4],
    pub right: [String; 4],
}

/// Line index holding the signer's name in each column
pub const NAME_LINE: usize = 2;

impl SignatureBlock {
    pub fn from_request(req: &LessonPlanRequest) -> Self {
        Self {
            left: [
                "Mengetahui,".to_string(),
                "Kepala Sekolah".to_string(),
                req.principal_name.clone(),
                format!("NIP. {}", req.principal_id),
            ],
            right: [
                format!("{}, {}", req.place, format_long_date(&req.creation_date)),
                "Guru Mata Pelajaran".to_string(),
                req.teacher_name.clone(),
                format!("NIP. {}", req.teacher_id),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_date_keeps_day() {
        assert_eq!(format_long_date("2025-03-05"), "5 Maret 2025");
        assert_eq!(format_long_date("2024-12-31"), "31 Desember 2024");
        assert_eq!(format_long_date("2025-01-01"), "1 Januari 2025");
    }

    #[test]
    fn long_date_fallbacks() {
        assert_eq!(format_long_date(""), "");
        assert_eq!(format_long_date("besok"), "besok");
        assert_eq!(format_long_date("2025-02-30"), "2025-02-30");
    }

    #[test]
    fn file_names() {
        assert_eq!(export_file_name("Ilmu Pengetahuan Alam", "doc"), "RPM-Ilmu_Pengetahuan_Alam.doc");
        assert_eq!(export_file_name("Seni  Budaya", "pdf"), "RPM-Seni__Budaya.pdf");
        assert_eq!(export_file_name("PPKn", "doc"), "RPM-PPKn.doc");
    }

    #[test]
    fn file_names_stay_inside_output_dir() {
        assert_eq!(export_file_name("PJOK/Olahraga", "doc"), "RPM-PJOK_Olahraga.doc");
        assert_eq!(export_file_name("../../escape", "pdf"), "RPM-.._.._escape.pdf");
        assert_eq!(export_file_name("a\\b:c*d?\"e<f>g|h", "doc"), "RPM-a_b_c_d_e_f_g_h.doc");
        let name = export_file_name("/etc/passwd", "doc");
        assert_eq!(std::path::Path::new(&name).components().count(), 1);
    }

    #[test]
    fn signature_columns() {
        let req = LessonPlanRequest {
            principal_name: "Budi".to_string(),
            principal_id: "123".to_string(),
            teacher_name: "Siti".to_string(),
            teacher_id: "456".to_string(),
            place: "Bandung".to_string(),
            creation_date: "2025-03-05".to_string(),
            ..LessonPlanRequest::default()
        };
        let block = SignatureBlock::from_request(&req);
        assert_eq!(block.left[NAME_LINE], "Budi");
        assert_eq!(block.left[3], "NIP. 123");
        assert_eq!(block.right[0], "Bandung, 5 Maret 2025");
        assert_eq!(block.right[NAME_LINE], "Siti");
    }
}
