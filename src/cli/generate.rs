use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::pipeline::{self, RunConfig, RunOutput};

#[derive(Args)]
pub struct GenerateArgs {
    /// Input VCF(s) (.vcf, .vcf.gz, or .vcf.bgz); only the first is used
    #[arg(required = true)]
    pub vcfs: Vec<PathBuf>,

    /// Assay config with overrides for each document (JSON, or YAML by extension)
    #[arg(long, required = true)]
    pub assay_config: PathBuf,

    /// Validate sample name fields against the assay's name format
    #[arg(long)]
    pub validate_name: bool,

    /// Directory of templates to use instead of the bundled ones
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Directory to write the archive to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Also keep the four YAML documents next to the archive
    #[arg(long)]
    pub keep_documents: bool,
}

impl GenerateArgs {
    fn to_run_config(&self) -> RunConfig {
        let mut config = RunConfig::new(self.vcfs.clone(), &self.assay_config)
            .with_validate_name(self.validate_name)
            .with_output_dir(&self.output_dir)
            .with_keep_documents(self.keep_documents);
        if let Some(dir) = &self.templates {
            config = config.with_template_dir(dir);
        }
        config
    }
}

/// Execute generate subcommand
///
/// # Errors
///
/// Returns an error if any step of the run fails; no archive is written then.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: GenerateArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.to_run_config();
    let output = pipeline::run(&config)?;

    match format {
        OutputFormat::Text => print_text_output(&output, verbose),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
    }

    Ok(())
}

fn print_text_output(output: &RunOutput, verbose: bool) {
    if verbose {
        eprintln!("Header lines: {}", output.header_lines);
        eprintln!("Variant caller: {}", output.caller);
        eprintln!("Individual: {}", output.sample.individual_id);
        eprintln!("Sample: {}", output.sample.instrument_id);
    }
    println!("{}", output.archive.display());
}
