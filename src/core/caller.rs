use std::fmt;

use serde::{Deserialize, Serialize};

/// Variant callers recognised from VCF header content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariantCaller {
    #[serde(rename = "cgpPindel")]
    CgpPindel,
    #[serde(rename = "TNhaplotyper2")]
    TnHaplotyper2,
    #[serde(rename = "Pisces")]
    Pisces,
    #[serde(rename = "GATK HaplotypeCaller")]
    GatkHaplotypeCaller,
    #[serde(rename = "unknown")]
    Unknown,
}

/// Lower-case header substring for each caller, checked in this order
pub const KNOWN_CALLERS: [(&str, VariantCaller); 4] = [
    ("pindel", VariantCaller::CgpPindel),
    ("tnhaplotyper2", VariantCaller::TnHaplotyper2),
    ("pisces", VariantCaller::Pisces),
    (
        "sentieoncommandline.haplotyper",
        VariantCaller::GatkHaplotypeCaller,
    ),
];

impl VariantCaller {
    /// Canonical name used downstream
    #[must_use]
    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::CgpPindel => "cgpPindel",
            Self::TnHaplotyper2 => "TNhaplotyper2",
            Self::Pisces => "Pisces",
            Self::GatkHaplotypeCaller => "GATK HaplotypeCaller",
            Self::Unknown => "unknown",
        }
    }

    #[must_use]
    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

impl fmt::Display for VariantCaller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Infer the variant caller from VCF header lines.
///
/// Returns the first entry of [`KNOWN_CALLERS`] whose substring appears in
/// any lower-cased header line, or [`VariantCaller::Unknown`].
pub fn infer_caller<S: AsRef<str>>(header: &[S]) -> VariantCaller {
    let lowered: Vec<String> = header.iter().map(|l| l.as_ref().to_lowercase()).collect();

    KNOWN_CALLERS
        .iter()
        .find(|(needle, _)| lowered.iter().any(|line| line.contains(needle)))
        .map_or(VariantCaller::Unknown, |(_, caller)| *caller)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_each_known_caller() {
        let cases = [
            ("##source=cgpPindel", VariantCaller::CgpPindel),
            (
                "##TNhaplotyper2CommandLine=<ID=TNhaplotyper2>",
                VariantCaller::TnHaplotyper2,
            ),
            ("##source=PISCES 5.2.10.49", VariantCaller::Pisces),
            (
                "##SentieonCommandLine.Haplotyper=<ID=Haplotyper>",
                VariantCaller::GatkHaplotypeCaller,
            ),
        ];

        for (line, expected) in cases {
            let header = vec!["##fileformat=VCFv4.2", line, "#CHROM\tPOS"];
            assert_eq!(infer_caller(&header), expected, "line: {line}");
        }
    }

    #[test]
    fn test_canonical_names() {
        assert_eq!(VariantCaller::CgpPindel.to_string(), "cgpPindel");
        assert_eq!(VariantCaller::TnHaplotyper2.to_string(), "TNhaplotyper2");
        assert_eq!(VariantCaller::Pisces.to_string(), "Pisces");
        assert_eq!(
            VariantCaller::GatkHaplotypeCaller.to_string(),
            "GATK HaplotypeCaller"
        );
        assert_eq!(VariantCaller::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_unknown_when_nothing_matches() {
        let header = vec!["##fileformat=VCFv4.2", "##source=freebayes"];
        assert_eq!(infer_caller(&header), VariantCaller::Unknown);
        assert!(!infer_caller(&header).is_known());

        let empty: Vec<String> = Vec::new();
        assert_eq!(infer_caller(&empty), VariantCaller::Unknown);
    }

    #[test]
    fn test_serializes_as_canonical_name() {
        let json = serde_json::to_string(&VariantCaller::GatkHaplotypeCaller).unwrap();
        assert_eq!(json, r#""GATK HaplotypeCaller""#);
        let json = serde_json::to_string(&VariantCaller::Unknown).unwrap();
        assert_eq!(json, r#""unknown""#);
    }

    #[test]
    fn test_first_table_entry_wins() {
        // Both pisces and pindel appear; pindel is earlier in the table
        let header = vec!["##source=Pisces", "##cmd=pindel -f ref.fa"];
        assert_eq!(infer_caller(&header), VariantCaller::CgpPindel);
    }
}
