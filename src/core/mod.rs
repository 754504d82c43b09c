//! Core logic for deriving metadata from a VCF.
//!
//! - [`caller`]: Variant caller inference from header lines
//!
//! Caller detection is a substring heuristic over the header, see
//! [`caller::KNOWN_CALLERS`] for the recognised callers:
//!
//! | Header substring | Caller |
//! |------------------|--------|
//! | `pindel` | cgpPindel |
//! | `tnhaplotyper2` | TNhaplotyper2 |
//! | `pisces` | Pisces |
//! | `sentieoncommandline.haplotyper` | GATK HaplotypeCaller |

pub mod caller;
