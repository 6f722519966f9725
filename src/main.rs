use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use rpm_generator::config::Config;
use rpm_generator::models::options::{GRADUATE_DIMENSION_OPTIONS, PEDAGOGICAL_PRACTICE_OPTIONS};
use rpm_generator::models::{load_request, missing_fields, resolve_phase, save_request};
use rpm_generator::services::exporter::{
    export_markup, render_display_html, write_markup, PdfExporter,
};
use rpm_generator::services::output_parser::parse_blocks;
use rpm_generator::services::prompt_builder::build_prompt;
use rpm_generator::utils::logging;
use rpm_generator::{App, EducationLevel, LessonPlanRequest, LlmService, PlanSession};

#[derive(Parser)]
#[command(name = "rpm", about = "Generator Rencana Pembelajaran Mendalam (RPM)")]
struct Cli {
    /// Output directory (overrides OUTPUT_DIR)
    #[arg(long, global = true)]
    output_dir: Option<String>,

    /// Debug logging (same as VERBOSE_LOGGING=true)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write an empty request form as TOML
    Init {
        /// Target file
        #[arg(default_value = "rpm.toml")]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// List education levels, grades, practices and graduate dimensions
    Options,
    /// Show the Fase for a level and grade
    Phase {
        #[arg(long)]
        level: EducationLevel,
        #[arg(long)]
        grade: String,
    },
    /// Check that a request has every required field
    Validate { request: PathBuf },
    /// Print the prompt built from a request
    Prompt { request: PathBuf },
    /// Generate a lesson plan and export it
    Generate {
        request: PathBuf,
        /// Print the generated text on stdout instead of writing files
        #[arg(long)]
        raw: bool,
        /// Also export a paginated PDF
        #[arg(long)]
        pdf: bool,
    },
    /// Classify the lines of previously generated text
    Parse {
        /// Generated text file
        text: PathBuf,
        /// Print blocks as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export previously generated text for a request
    Export {
        request: PathBuf,
        /// Generated text file
        text: PathBuf,
        #[arg(long)]
        pdf: bool,
    },
    /// Generate every request in the request folder
    Batch {
        /// Request folder (overrides REQUEST_FOLDER)
        #[arg(long)]
        request_folder: Option<String>,
        #[arg(long)]
        pdf: bool,
    },
}

impl Commands {
    fn calls_generator(&self) -> bool {
        matches!(self, Commands::Generate { .. } | Commands::Batch { .. })
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = if cli.command.calls_generator() {
        Config::from_env().context("konfigurasi tidak lengkap")?
    } else {
        Config::from_env_without_credential()?
    };
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }

    logging::init(cli.verbose || config.verbose_logging);

    match cli.command {
        Commands::Init { path, force } => init_form(&path, force).await,
        Commands::Options => {
            print_options();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Phase { level, grade } => {
            let phase = resolve_phase(level, &grade);
            println!("{level} kelas {grade}: Fase {phase}");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate { request } => validate_request(&request).await,
        Commands::Prompt { request } => {
            let req = load_request(&request).await?;
            print!("{}", build_prompt(&req));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Generate { request, raw, pdf } => {
            config.export_pdf |= pdf;
            generate(&config, &request, raw).await
        }
        Commands::Parse { text, json } => {
            let content = read_text(&text).await?;
            let blocks = parse_blocks(&content);
            if json {
                println!("{}", serde_json::to_string_pretty(&blocks)?);
            } else {
                for block in &blocks {
                    println!("{:<18} {}", block.kind(), block_text(block));
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Export { request, text, pdf } => {
            config.export_pdf |= pdf;
            let req = load_request(&request).await?;
            let raw = read_text(&text).await?;
            export_all(&config, &raw, &req).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Batch {
            request_folder,
            pdf,
        } => {
            if let Some(folder) = request_folder {
                config.request_folder = folder;
            }
            config.export_pdf |= pdf;
            let stats = App::initialize(config).await?.run().await?;
            Ok(if stats.failed == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

async fn init_form(path: &Path, force: bool) -> Result<ExitCode> {
    if path.exists() && !force {
        bail!("{} sudah ada (gunakan --force untuk menimpa)", path.display());
    }
    save_request(path, &LessonPlanRequest::default()).await?;
    info!("✓ Formulir kosong ditulis ke {}", path.display());
    Ok(ExitCode::SUCCESS)
}

fn print_options() {
    println!("Jenjang dan kelas:");
    for level in EducationLevel::ALL {
        println!("  {:<4} {}", level.code(), level.grades().join(", "));
    }
    println!("\nPraktik pedagogis:");
    for practice in PEDAGOGICAL_PRACTICE_OPTIONS {
        println!("  - {practice}");
    }
    println!("\nDimensi lulusan:");
    for dimension in GRADUATE_DIMENSION_OPTIONS {
        println!("  - {dimension}");
    }
}

async fn validate_request(path: &Path) -> Result<ExitCode> {
    let req = load_request(path).await?;
    let missing = missing_fields(&req);
    if missing.is_empty() {
        println!("✓ {} siap dikirim (Fase {})", path.display(), req.phase());
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", rpm_generator::error::VALIDATION_HINT);
    for field in &missing {
        println!("  - {} ({})", field.label, field.field);
    }
    Ok(ExitCode::FAILURE)
}

async fn generate(config: &Config, path: &Path, raw: bool) -> Result<ExitCode> {
    let req = load_request(path).await?;
    let generator = LlmService::new(config);
    let mut session = PlanSession::new(req);

    let doc = session.submit(&generator).await?.clone();
    if raw {
        print!("{}", doc.raw);
        return Ok(ExitCode::SUCCESS);
    }

    export_all(config, &doc.raw, session.request()).await?;
    Ok(ExitCode::SUCCESS)
}

async fn export_all(config: &Config, raw: &str, req: &LessonPlanRequest) -> Result<()> {
    let out_dir = Path::new(&config.output_dir);

    let markup = export_markup(raw, req);
    let path = write_markup(&markup, out_dir).await?;
    println!("{}", path.display());

    if config.export_pdf {
        let html = render_display_html(&parse_blocks(raw), req);
        let path = PdfExporter::new(config).export(&html, req, out_dir).await?;
        println!("{}", path.display());
    }
    Ok(())
}

async fn read_text(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("gagal membaca {}", path.display()))
}

fn block_text(block: &rpm_generator::services::Block) -> &str {
    use rpm_generator::services::Block;
    match block {
        Block::Heading { text }
        | Block::SubHeading { text }
        | Block::ListItem { text }
        | Block::Paragraph { text } => text,
        Block::LabeledParagraph { label } => label,
    }
}
