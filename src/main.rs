// answer-sheet: Generate multiple-choice answer sheets with a QR identifier

use answer_sheet::{
    file_stem, render_plan, LayoutConfig, LayoutPlanner, PdfCanvas, QrMarkerEncoder, SheetError,
    SheetSpec,
};
use chrono::Local;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

// ============================================================================
// Data Structures
// ============================================================================

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Generate multiple-choice answer sheets")]
struct Args {
    /// Subject shown in the header
    #[arg(short, long)]
    subject: String,

    /// Class or group shown in the header
    #[arg(short, long)]
    group: String,

    /// Number of questions (clamped to per-column x columns)
    #[arg(short, long)]
    questions: u32,

    /// Answer alternatives, comma separated
    #[arg(short, long, value_delimiter = ',', default_values = ["A", "B", "C", "D", "E"])]
    alternatives: Vec<String>,

    /// Questions per column
    #[arg(long, default_value = "30")]
    per_column: u32,

    /// Number of columns
    #[arg(short, long, default_value = "4")]
    columns: u32,

    /// Sheet identifier encoded in the QR code (generated when omitted)
    #[arg(short, long)]
    id: Option<String>,

    /// Base output directory; PDFs go to <dir>/pdf, QR images to <dir>/qr
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// JSON file overriding layout spacing
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Do not keep the QR code image next to the PDF
    #[arg(long)]
    no_qr_file: bool,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), SheetError> {
    let args = Args::parse();

    // Layout constants
    let config = load_layout(&args.layout)?;
    let planner = LayoutPlanner::new(config.clone())?;

    let identifier = args.id.unwrap_or_else(generate_sheet_id);

    let spec = SheetSpec::new(
        identifier,
        args.subject,
        args.group,
        args.questions,
        args.alternatives,
    )?
    .with_grid(args.per_column, args.columns)?;

    // Output directories
    let pdf_dir = args.output_dir.join("pdf");
    fs::create_dir_all(&pdf_dir)?;
    let encoder = if args.no_qr_file {
        QrMarkerEncoder::new()
    } else {
        let qr_dir = args.output_dir.join("qr");
        fs::create_dir_all(&qr_dir)?;
        QrMarkerEncoder::with_output_dir(qr_dir)
    };

    let plan = planner.plan(&spec);
    let output_file = pdf_dir.join(format!("{}.pdf", file_stem(spec.identifier())));

    generate_pdf(&spec, &config, &plan, &encoder, &output_file)?;

    let params = plan.params();
    println!("✓ Generated: {}", output_file.display());
    println!("  Subject: {}", spec.subject());
    println!("  Class: {}", spec.group());
    println!("  Sheet ID: {}", spec.identifier());
    println!(
        "  Questions: {} in {} column(s)",
        params.question_count, params.columns_used
    );
    println!("  Pages: {}", plan.page_count());
    if let Some(qr_path) = encoder.artifact_path(spec.identifier()) {
        println!("  QR code: {}", qr_path.display());
    }

    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

fn load_layout(path: &Option<PathBuf>) -> Result<LayoutConfig, SheetError> {
    match path {
        Some(p) => LayoutConfig::from_json_file(p),
        None => Ok(LayoutConfig::default()),
    }
}

fn generate_sheet_id() -> String {
    let uuid = Uuid::new_v4();
    let hex = format!("{:x}", uuid);
    format!(
        "SHEET-{}-{}",
        Local::now().format("%Y%m%d"),
        hex[..8].to_uppercase()
    )
}

// ============================================================================
// PDF Generation
// ============================================================================

fn generate_pdf(
    spec: &SheetSpec,
    config: &LayoutConfig,
    plan: &answer_sheet::LayoutPlan,
    encoder: &QrMarkerEncoder,
    output_path: &Path,
) -> Result<(), SheetError> {
    let title = format!("Answer Sheet {}", spec.identifier());
    let mut canvas = PdfCanvas::new(&title, config.page_width, config.page_height)?;

    render_plan(plan, &mut canvas, encoder)?;

    info!(
        identifier = spec.identifier(),
        pages = canvas.page_count(),
        "answer sheet rendered"
    );
    canvas.save(output_path)
}
