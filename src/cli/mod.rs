//! Command-line interface for vcf-metadata.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **generate**: Write the OpenCGA metadata archive for a VCF
//! - **inspect**: Show what would be derived from a VCF without writing anything
//!
//! ## Usage
//!
//! ```text
//! # Generate configs for a VCF
//! vcf-metadata generate INSTR1-IND2-CLAR3-EPIC4-F-PROBE5.vcf.gz --assay-config myeloid.json
//!
//! # Validate the sample name against the assay's name format
//! vcf-metadata generate sample.vcf.gz --assay-config myeloid.json --validate-name
//!
//! # Check caller detection and name parsing
//! vcf-metadata inspect sample.vcf.gz --format json
//! ```

use clap::{Parser, Subcommand};

pub mod generate;
pub mod inspect;

#[derive(Parser)]
#[command(name = "vcf-metadata")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Generate OpenCGA metadata configs for a VCF")]
#[command(
    long_about = "vcf-metadata builds the manifest, individuals, samples and clinical configs needed to load a VCF into OpenCGA.\n\nIdentifiers are parsed from the VCF file name (INSTRUMENT-INDIVIDUAL-CLARITY-EPIC-SEX-PROBESET), assay-specific values come from an assay config, and the four documents are bundled into <name>.opencga_configs.zip."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the metadata archive for a VCF
    Generate(generate::GenerateArgs),

    /// Show the caller and sample name fields derived from a VCF
    Inspect(inspect::InspectArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
