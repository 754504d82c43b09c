use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::caller::{infer_caller, VariantCaller};
use crate::parsing::header::read_header;
use crate::parsing::samplename::{parse_samplename, NamePatterns, NAME_FIELD_COUNT};
use crate::templates::AssayConfig;
use crate::utils::validation::{archive_name, input_file_name, sample_stem};

const FIELD_LABELS: [&str; NAME_FIELD_COUNT] = [
    "instrument_id",
    "individual_id",
    "clarity_id",
    "epic_code",
    "sex",
    "probeset",
];

#[derive(Args)]
pub struct InspectArgs {
    /// Input VCF (.vcf, .vcf.gz, or .vcf.bgz)
    #[arg(required = true)]
    pub vcf: PathBuf,

    /// Assay config providing the sample name format
    #[arg(long)]
    pub assay_config: Option<PathBuf>,

    /// Validate sample name fields against the assay's name format
    #[arg(long)]
    pub validate_name: bool,

    /// Print the header lines that were read
    #[arg(long)]
    pub show_header: bool,
}

/// Execute inspect subcommand
///
/// # Errors
///
/// Returns an error if the VCF header cannot be read, the assay config is
/// invalid, or the sample name fails validation.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: InspectArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let file_name = input_file_name(&args.vcf)?;
    let stem = sample_stem(&file_name);

    let header = read_header(&args.vcf)?;
    let caller = infer_caller(&header);

    let patterns = match &args.assay_config {
        Some(path) => AssayConfig::load(path)?.name_patterns(),
        None => NamePatterns::default(),
    };
    let fields = parse_samplename(stem, args.validate_name, &patterns)?;

    if verbose && fields.len() != NAME_FIELD_COUNT {
        eprintln!(
            "Warning: sample name has {} fields, generate needs {NAME_FIELD_COUNT}",
            fields.len()
        );
    }

    match format {
        OutputFormat::Text => {
            print_text_results(&args, stem, &header, caller, &fields);
        }
        OutputFormat::Json => print_json_results(&args, stem, &header, caller, &fields)?,
    }

    Ok(())
}

fn print_text_results(
    args: &InspectArgs,
    stem: &str,
    header: &[String],
    caller: VariantCaller,
    fields: &[String],
) {
    println!("VCF: {}", args.vcf.display());
    println!("  Header lines: {}", header.len());
    println!("  Variant caller: {caller}");
    println!("  Archive name: {}", archive_name(stem));

    println!("\nSample name fields:");
    for (i, field) in fields.iter().enumerate() {
        let label = FIELD_LABELS.get(i).copied().unwrap_or("extra");
        println!("  {}. {label}: {field}", i + 1);
    }

    if args.show_header {
        println!("\nHeader:");
        for line in header {
            println!("{line}");
        }
    }
}

fn print_json_results(
    args: &InspectArgs,
    stem: &str,
    header: &[String],
    caller: VariantCaller,
    fields: &[String],
) -> anyhow::Result<()> {
    let mut output = serde_json::json!({
        "vcf": args.vcf.display().to_string(),
        "header_lines": header.len(),
        "caller": caller,
        "archive_name": archive_name(stem),
        "fields": fields,
    });

    if args.show_header {
        output["header"] = serde_json::json!(header);
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
