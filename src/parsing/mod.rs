//! Parsers for the two inputs taken from a VCF: its header and its name.
//!
//! - **Header lines**: leading `#` lines of a plain or gzip/bgzip VCF
//! - **Sample names**: six `-` separated identifier fields
//!
//! ## Example
//!
//! ```rust,no_run
//! use vcf_metadata::parsing::header::read_header;
//! use vcf_metadata::parsing::samplename::{parse_samplename, NamePatterns};
//! use std::path::Path;
//!
//! let header = read_header(Path::new("INSTR1-IND2-CLAR3-EPIC4-F-PROBE5.vcf.gz")).unwrap();
//! let fields = parse_samplename("INSTR1-IND2-CLAR3-EPIC4-F-PROBE5", true, &NamePatterns::default())
//!     .unwrap();
//! ```

pub mod header;
pub mod samplename;
