mod output;

use anyhow::{Context, Result};
use arcos_report::{Layout, ReportConfig, convert, load_config, load_table};
use clap::{Parser, ValueEnum};
use output::OutputPaths;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutArg {
    Auto,
    Named,
    Positional,
}

impl From<LayoutArg> for Layout {
    fn from(l: LayoutArg) -> Self {
        match l {
            LayoutArg::Auto => Layout::Auto,
            LayoutArg::Named => Layout::Named,
            LayoutArg::Positional => Layout::Positional,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Structured {
    Xlsx,
    Csv,
    #[value(name = "none")]
    Off,
}

#[derive(Parser, Debug)]
#[command(
    name = "arcos-convert",
    version,
    about = "Convert a sales/purchase/inventory spreadsheet into an ARCOS fixed-width report",
    long_about = "\
Reads a transaction table (Excel .xlsx/.xlsm/.xls/.ods or CSV) and writes:\n\
- <name>.txt: a control header with the last transaction date, then one\n  80-character record per row;\n\
- <name>_formatted.xlsx (or .csv): the same records as a spreadsheet.\n\
The transaction code comes from a code column when the table has one,\n\
otherwise from the file name (sale / purchase / inventory, default sale)."
)]
struct Args {
    /// Transaction table to convert
    #[arg(long, value_name = "FILE")]
    input: PathBuf,

    /// Directory for the generated files (default: next to the input)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Label used to infer the transaction code (default: the input file name)
    #[arg(long, value_name = "TEXT")]
    label: Option<String>,

    /// Worksheet to read; overrides the configured sheet (default "Report")
    #[arg(long, value_name = "NAME")]
    sheet: Option<String>,

    /// How columns are located: by header label, by fixed position, or detected
    #[arg(long, value_enum, default_value_t = LayoutArg::Auto)]
    layout: LayoutArg,

    /// Structured artifact written beside the text report
    #[arg(long, value_enum, default_value_t = Structured::Xlsx)]
    structured: Structured,

    /// JSON configuration (registrant id, frequency, sheet, column labels/positions)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Debug logging on stderr. RUST_LOG takes precedence when set.
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt().with_env_filter(env).with_writer(std::io::stderr).with_target(false).init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut cfg = match &args.config {
        Some(p) => load_config(p).with_context(|| format!("loading config {}", p.display()))?,
        None => ReportConfig::default(),
    };
    if let Some(sheet) = &args.sheet {
        cfg.sheet_name = sheet.clone();
    }

    let label = match &args.label {
        Some(l) => l.clone(),
        None => args
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    // Everything is computed before the first file is written.
    let table = load_table(&args.input, &cfg.sheet_name).with_context(|| format!("reading {}", args.input.display()))?;
    let report = convert(&table, &label, args.layout.into(), &cfg)
        .with_context(|| format!("converting {}", args.input.display()))?;

    let paths = OutputPaths::for_input(&args.input, args.output_dir.as_deref());
    if !paths.dir.as_os_str().is_empty() {
        std::fs::create_dir_all(&paths.dir).with_context(|| format!("creating {}", paths.dir.display()))?;
    }

    let text_path = paths.text();
    output::write_text(&report, &text_path)?;
    println!("{}", text_path.display());

    match args.structured {
        Structured::Xlsx => {
            let p = paths.structured("xlsx");
            output::write_xlsx(&report, &p)?;
            println!("{}", p.display());
        }
        Structured::Csv => {
            let p = paths.structured("csv");
            output::write_csv(&report, &p)?;
            println!("{}", p.display());
        }
        Structured::Off => {}
    }
    info!(rows = report.lines.len(), "done");
    Ok(())
}
