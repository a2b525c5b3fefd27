//! Balancete CLI - reshape Tiny ERP balance sheet exports for BI tools
//!
//! # Commands
//!
//! ```bash
//! balancete transform balancete.csv          # Writes balancete_optimized.csv
//! balancete validate balancete.csv           # Structural check only
//! balancete months                           # Show the month abbreviation table
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use balancete::export::write_json_file;
use balancete::{
    parse_csv_file_auto, transform_file, validate_structure, DecimalSeparator, PipelineError,
    RowOrder, TransformOptions, UnknownColumnPolicy, MONTH_ABBREVIATIONS, MONTH_NAMES,
};

#[derive(Parser)]
#[command(name = "balancete")]
#[command(about = "Convert Tiny ERP balance sheet exports from wide to long format", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform a wide export into a long-format CSV
    Transform {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: <input>_optimized.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sort output by date, then Tipo, Grupo, Categoria
        #[arg(long)]
        sort_by_date: bool,

        /// Do not write a UTF-8 BOM at the start of the output
        #[arg(long)]
        no_bom: bool,

        /// Also write summary statistics as JSON
        #[arg(long)]
        summary_json: Option<PathBuf>,

        #[command(flatten)]
        input_options: InputOptions,
    },

    /// Check an export's structure without transforming it
    Validate {
        /// Input CSV file
        input: PathBuf,

        #[command(flatten)]
        input_options: InputOptions,
    },

    /// Show the month abbreviations recognised in headers
    Months,
}

#[derive(Args)]
struct InputOptions {
    /// CSV delimiter (auto-detect if not specified)
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Decimal separator used by the amounts
    #[arg(long, value_enum, default_value_t = DecimalSeparator::Auto)]
    decimal_separator: DecimalSeparator,

    /// Fail on columns that are neither identity, month nor Total
    #[arg(long)]
    strict_columns: bool,
}

impl InputOptions {
    fn to_options(&self) -> TransformOptions {
        TransformOptions {
            decimal_separator: self.decimal_separator,
            unknown_columns: if self.strict_columns {
                UnknownColumnPolicy::Reject
            } else {
                UnknownColumnPolicy::Ignore
            },
            delimiter: self.delimiter,
            ..TransformOptions::default()
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Transform {
            input,
            output,
            sort_by_date,
            no_bom,
            summary_json,
            input_options,
        } => {
            let options = TransformOptions {
                order: if sort_by_date {
                    RowOrder::ByDate
                } else {
                    RowOrder::Source
                },
                write_bom: !no_bom,
                ..input_options.to_options()
            };
            cmd_transform(&input, output.as_deref(), summary_json.as_deref(), &options)
        }

        Commands::Validate {
            input,
            input_options,
        } => cmd_validate(&input, &input_options.to_options()),

        Commands::Months => {
            cmd_months();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn cmd_transform(
    input: &Path,
    output: Option<&Path>,
    summary_json: Option<&Path>,
    options: &TransformOptions,
) -> Result<(), PipelineError> {
    let (result, output) = transform_file(input, output, options)?;
    let summary = &result.summary;

    eprintln!("📄 Input: {}", input.display());
    eprintln!("   Rows: {}", result.csv_info.row_count);
    eprintln!("   Months: {}", result.month_columns.join(", "));
    if !result.ignored_columns.is_empty() {
        eprintln!("   Ignored: {}", result.ignored_columns.join(", "));
    }

    eprintln!("\n📊 Summary:");
    eprintln!("   Entries: {}", summary.total_entries);
    if let Some(range) = summary.date_range {
        eprintln!("   Period: {} → {}", range.start, range.end);
    }
    eprintln!("   Total: {}", summary.total_value);
    eprintln!("   Income: {}", summary.total_income);
    eprintln!("   Expenses: {}", summary.total_expenses);
    for (tipo, stats) in &summary.by_tipo {
        eprintln!(
            "   {}: {} entries, subtotal {}, range [{}, {}]",
            tipo, stats.entries, stats.subtotal, stats.min, stats.max
        );
    }
    eprintln!(
        "   Groups: {}, categories: {}",
        summary.unique_groups, summary.unique_categories
    );

    if let Some(path) = summary_json {
        write_json_file(path, summary)?;
        eprintln!("   💾 Summary saved to: {}", path.display());
    }

    eprintln!("\n✨ Done! Output written to: {}", output.display());
    Ok(())
}

fn cmd_validate(input: &Path, options: &TransformOptions) -> Result<(), PipelineError> {
    eprintln!("✔️  Validating: {}", input.display());

    let parsed = parse_csv_file_auto(input, options.delimiter)?;
    let layout = validate_structure(&parsed.table, options)?;

    let months: Vec<&str> = layout.months.iter().map(|m| m.header.as_str()).collect();
    eprintln!("   Rows: {}", parsed.table.row_count());
    eprintln!("   Months: {}", months.join(", "));
    if let Some(index) = layout.total {
        eprintln!("   Total column: {}", parsed.table.headers[index]);
    }
    if !layout.ignored.is_empty() {
        eprintln!("   Ignored: {}", layout.ignored.join(", "));
    }
    eprintln!("✅ Structure OK");
    Ok(())
}

fn cmd_months() {
    for (abbrev, name) in MONTH_ABBREVIATIONS.iter().zip(MONTH_NAMES.iter()) {
        println!("{}  {}", abbrev, name);
    }
}
