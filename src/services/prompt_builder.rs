//! Prompt builder - turns a lesson-plan request into the generation prompt
//!
//! The template is fixed. Literal form data is copied in verbatim and the
//! parts the model must write itself are marked `(GENERATE OTOMATIS)`.
//! Nothing here reads the clock or any other ambient state, so equal
//! requests always give byte-identical prompts.

use crate::models::LessonPlanRequest;

/// Marker for sections the model has to synthesize
pub const AUTO_GENERATE: &str = "(GENERATE OTOMATIS)";

/// Blank rows emitted under each appendix rubric header
pub const APPENDIX_PLACEHOLDER_ROWS: usize = 5;

/// Assessment stages that get a rubric table in the appendix
const ASSESSMENT_STAGES: [&str; 3] = ["Asesmen Awal", "Asesmen Proses", "Asesmen Akhir"];

const PREAMBLE: &str = "Anda adalah seorang ahli perancangan kurikulum dan pedagogi yang sangat berpengalaman di Indonesia. Tugas Anda adalah membuat Rencana Pembelajaran Mendalam (RPM) yang komprehensif, terstruktur, dan inspiratif berdasarkan informasi yang diberikan.

Gunakan Bahasa Indonesia yang formal dan profesional. Pastikan output yang Anda hasilkan mengikuti format yang diminta dengan sangat ketat. Hasilkan output dalam format teks biasa yang terstruktur dengan baik.";

/// Builds the full prompt for one request
pub fn build_prompt(req: &LessonPlanRequest) -> String {
    let mut out = String::with_capacity(6 * 1024);

    out.push('\n');
    out.push_str(PREAMBLE);
    out.push_str("\n\n");

    write_information(&mut out, req);
    out.push_str("**FORMAT OUTPUT RPM (WAJIB DIIKUTI):**\n\n---\n\n");
    write_title(&mut out, req);
    write_identification(&mut out, req);
    write_design(&mut out, req);
    write_learning_experience(&mut out, req);
    write_assessment(&mut out);
    if req.include_appendix {
        write_appendix(&mut out, req);
    }
    out.push_str("---\n");

    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn dimensions(req: &LessonPlanRequest) -> String {
    req.graduate_dimensions.join(", ")
}

fn write_information(out: &mut String, req: &LessonPlanRequest) {
    push_line(out, "**INFORMASI PEMBELAJARAN:**");
    push_line(out, &format!("- Nama Satuan Pendidikan: {}", req.institution_name));
    push_line(out, &format!("- Mata Pelajaran: {}", req.subject));
    push_line(out, &format!("- Jenjang / Kelas: {} / Kelas {}", req.education_level, req.grade));
    push_line(out, &format!("- Fase: {}", req.phase()));
    push_line(out, &format!("- Tahun Pelajaran: {}", req.academic_year));
    push_line(out, &format!("- Materi Pelajaran: {}", req.material_topic));
    push_line(out, &format!("- Capaian Pembelajaran (CP): {}", req.learning_outcome));
    push_line(out, &format!("- Jumlah Pertemuan: {}", req.session_count));
    push_line(out, &format!("- Durasi Setiap Pertemuan: {}", req.session_duration));
    push_line(out, "- Praktik Pedagogis per Pertemuan:");
    write_practice_list(out, req, "");
    push_line(out, &format!("- Dimensi Lulusan yang Dituju: {}", dimensions(req)));
    out.push('\n');
}

fn write_practice_list(out: &mut String, req: &LessonPlanRequest, indent: &str) {
    for (i, practice) in req.pedagogical_practices.iter().enumerate() {
        push_line(out, &format!("{indent}- Pertemuan {}: {}", i + 1, practice));
    }
}

fn write_title(out: &mut String, req: &LessonPlanRequest) {
    push_line(out, "**RENCANA PEMBELAJARAN MENDALAM (RPM)**");
    push_line(out, &format!("Mata Pelajaran: {}", req.subject));
    push_line(out, &format!("Kelas / Jenjang: Kelas {} / {}", req.grade, req.education_level));
    push_line(out, &format!("Materi Pelajaran: {}", req.material_topic));
    out.push('\n');
}

fn write_identification(out: &mut String, req: &LessonPlanRequest) {
    push_line(out, "**1. IDENTIFIKASI**");
    push_line(out, &format!("   - **Siswa:** Jelaskan profil singkat siswa Kelas {} {} secara umum, termasuk kemungkinan tingkat pemahaman awal dan gaya belajar mereka.",
        req.grade, req.education_level));
    push_line(out, &format!("   - **Materi Pelajaran:** {}", req.material_topic));
    push_line(out, &format!("   - **Capaian Dimensi Lulusan:** {}", dimensions(req)));
    out.push('\n');
}

fn write_design(out: &mut String, req: &LessonPlanRequest) {
    push_line(out, "**2. DESAIN PEMBELAJARAN**");
    push_line(out, &format!("   - **Capaian Pembelajaran:** {}", req.learning_outcome));
    push_line(out, &format!("   - **Lintas Disiplin Ilmu:** {AUTO_GENERATE} Berdasarkan materi \"{}\", sebutkan 2-3 mata pelajaran lain yang relevan dan jelaskan secara singkat bagaimana materi ini terhubung.",
        req.material_topic));
    push_line(out, &format!("   - **Tujuan Pembelajaran:** {AUTO_GENERATE} Turunkan 3-5 tujuan pembelajaran yang spesifik, terukur, dan dapat dicapai (SMART) dari Capaian Pembelajaran dan Materi Pelajaran yang diberikan."));
    push_line(out, "   - **Topik Pembelajaran:** Rincikan topik-topik atau sub-materi utama yang akan dibahas dari materi pelajaran.");
    push_line(out, "   - **Praktik Pedagogis per Pertemuan:**");
    write_practice_list(out, req, "     ");
    push_line(out, &format!("   - **Kemitraan Pembelajaran:** {AUTO_GENERATE} Sarankan satu atau dua kemitraan yang bisa dijalin (misalnya: dengan orang tua, komunitas lokal, atau profesional) untuk mendukung pembelajaran materi ini."));
    push_line(out, &format!("   - **Lingkungan Pembelajaran:** {AUTO_GENERATE} Deskripsikan lingkungan belajar yang kondusif untuk materi ini, baik di dalam maupun di luar kelas."));
    push_line(out, &format!("   - **Pemanfaatan Digital:** {AUTO_GENERATE} Sebutkan 2-3 alat atau platform digital (contoh: Quizlet, Canva, Google Earth, platform e-learning) yang bisa digunakan untuk memperkaya pembelajaran materi ini."));
    out.push('\n');
}

fn write_learning_experience(out: &mut String, req: &LessonPlanRequest) {
    push_line(out, "**3. PENGALAMAN BELAJAR**");
    push_line(out, &format!("   {AUTO_GENERATE} Untuk setiap pertemuan, jabarkan alur kegiatan belajar yang mencakup bagian Awal, Inti, Refleksi, dan Penutup. Pastikan untuk mengintegrasikan Praktik Pedagogis yang telah ditentukan untuk setiap pertemuan. Gunakan narasi yang jelas, praktis, dan berpusat pada siswa."));
    out.push('\n');

    let sessions: Vec<String> = (0..req.session_count as usize)
        .map(|i| session_block(i + 1, practice_for(req, i)))
        .collect();
    out.push_str(&sessions.join("\n"));
    out.push('\n');
}

fn practice_for(req: &LessonPlanRequest, index: usize) -> &str {
    req.pedagogical_practices
        .get(index)
        .map(String::as_str)
        .unwrap_or_default()
}

/// One meeting of the learning-experience section, 1-based
fn session_block(number: usize, practice: &str) -> String {
    format!(
        "   **Pertemuan {number} ({practice})**
   - **Awal (Berkesadaran, Bermakna, Menggembirakan):** Aktivitas pembuka untuk menarik minat siswa dan menghubungkan dengan materi sebelumnya.
   - **Inti: Memahami & Mengaplikasi (Berkesadaran, Bermakna):** Kegiatan utama sesuai praktik pedagogis yang dipilih, fokus pada pemahaman konsep dan aplikasi.
   - **Refleksi (Berkesadaran, Menggembirakan):** Aktivitas untuk siswa merenungkan apa yang telah dipelajari dan bagaimana mereka mempelajarinya.
   - **Penutup (Berkesadaran):** Rangkuman, umpan balik, dan penyampaian informasi untuk pertemuan berikutnya.
"
    )
}

fn write_assessment(out: &mut String) {
    push_line(out, "**4. ASESMEN PEMBELAJARAN**");
    push_line(out, &format!("   - **Asesmen Awal (Diagnostik/Apersepsi):** {AUTO_GENERATE} Berikan 1-2 contoh asesmen awal yang relevan untuk mengukur kesiapan siswa (contoh: pertanyaan pemantik, kuis singkat, peta konsep awal)."));
    push_line(out, &format!("   - **Asesmen Proses (Formatif):** {AUTO_GENERATE} Berikan 2-3 contoh asesmen formatif (contoh: observasi partisipasi diskusi, rubrik kerja kelompok, penilaian diri/teman sebaya, umpan balik lisan)."));
    push_line(out, &format!("   - **Asesmen Akhir (Sumatif):** {AUTO_GENERATE} Berikan 2-3 contoh asesmen sumatif yang dapat mengukur ketercapaian tujuan pembelajaran secara holistik (contoh: presentasi proyek, pembuatan produk/artefak, portofolio digital, studi kasus, tes esai)."));
    out.push('\n');
}

fn write_appendix(out: &mut String, req: &LessonPlanRequest) {
    push_line(out, "**5. LAMPIRAN**");
    push_line(out, &format!("   {AUTO_GENERATE} Sertakan rubrik penilaian untuk setiap tahap asesmen di bawah ini. Pertahankan kolom tabel persis seperti contoh, lalu tuliskan kriteria penilaian (Sangat Baik, Baik, Cukup, Perlu Bimbingan) untuk setiap Dimensi Lulusan di bawah tabel."));
    out.push('\n');

    for stage in ASSESSMENT_STAGES {
        push_line(out, &format!("   *Rubrik {stage}*"));
        out.push_str(&rubric_table(&req.graduate_dimensions));
        out.push('\n');
    }
}

/// Markdown table with one column per dimension and blank placeholder rows.
///
/// Every row carries the same number of `|` separators.
pub fn rubric_table(dimensions: &[String]) -> String {
    let mut header: Vec<&str> = vec!["No", "Nama Siswa"];
    header.extend(dimensions.iter().map(String::as_str));
    let columns = header.len();

    let mut table = String::new();
    push_line(&mut table, &table_row(&header));
    push_line(&mut table, &table_row(&vec!["---"; columns]));
    for row in 1..=APPENDIX_PLACEHOLDER_ROWS {
        let number = row.to_string();
        let mut cells = vec![""; columns];
        cells[0] = number.as_str();
        push_line(&mut table, &table_row(&cells));
    }
    table
}

fn table_row(cells: &[&str]) -> String {
    format!("| {} |", cells.join(" | "))
}
