//! Command-line tests for the `vcf-metadata` binary

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SAMPLE: &str = "INSTR1-IND2-CLAR3-EPIC4-F-PROBE5";

fn setup(dir: &Path, vcf_name: &str, source: &str) {
    std::fs::write(
        dir.join(vcf_name),
        format!(
            "##fileformat=VCFv4.2\n##source={source}\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n"
        ),
    )
    .unwrap();
    std::fs::write(
        dir.join("assay.json"),
        r#"{"samples": {"somatic": true}, "sample_name_format": {"5": "^[MFU]$"}}"#,
    )
    .unwrap();
}

fn cmd() -> Command {
    Command::cargo_bin("vcf-metadata").unwrap()
}

#[test]
fn test_generate_prints_archive_path() {
    let dir = TempDir::new().unwrap();
    setup(dir.path(), &format!("{SAMPLE}.vcf"), "Pisces");

    cmd()
        .current_dir(dir.path())
        .args([
            "generate",
            &format!("{SAMPLE}.vcf"),
            "--assay-config",
            "assay.json",
            "--validate-name",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "INSTR1-IND2-CLAR3-EPIC4-F-PROBE5.opencga_configs.zip",
        ));

    assert!(dir
        .path()
        .join("INSTR1-IND2-CLAR3-EPIC4-F-PROBE5.opencga_configs.zip")
        .exists());
}

#[test]
fn test_generate_json_output() {
    let dir = TempDir::new().unwrap();
    setup(dir.path(), &format!("{SAMPLE}.vcf"), "TNhaplotyper2");

    let output = cmd()
        .current_dir(dir.path())
        .args([
            "generate",
            &format!("{SAMPLE}.vcf"),
            "--assay-config",
            "assay.json",
            "--output-dir",
            "out",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["caller"], "TNhaplotyper2");
    assert_eq!(json["sample"]["individual_id"], "IND2");
    assert_eq!(json["header_lines"], 3);
}

#[test]
fn test_generate_validation_failure() {
    let dir = TempDir::new().unwrap();
    let name = "INSTR1-IND2-CLAR3-EPIC4-X-PROBE5.vcf";
    setup(dir.path(), name, "Pisces");

    cmd()
        .current_dir(dir.path())
        .args(["generate", name, "--assay-config", "assay.json", "--validate-name"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error(s) in sample name format: X"));

    assert!(!dir
        .path()
        .join("INSTR1-IND2-CLAR3-EPIC4-X-PROBE5.opencga_configs.zip")
        .exists());
}

#[test]
fn test_generate_rejects_non_vcf() {
    let dir = TempDir::new().unwrap();
    setup(dir.path(), &format!("{SAMPLE}.txt"), "Pisces");

    cmd()
        .current_dir(dir.path())
        .args(["generate", &format!("{SAMPLE}.txt"), "--assay-config", "assay.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a vcf"));
}

#[test]
fn test_generate_requires_assay_config() {
    cmd()
        .args(["generate", "sample.vcf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--assay-config"));
}

#[test]
fn test_inspect_text() {
    let dir = TempDir::new().unwrap();
    setup(dir.path(), &format!("{SAMPLE}.vcf"), "cgpPindel");

    cmd()
        .current_dir(dir.path())
        .args(["inspect", &format!("{SAMPLE}.vcf")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Variant caller: cgpPindel"))
        .stdout(predicate::str::contains("2. individual_id: IND2"))
        .stdout(predicate::str::contains("Header lines: 3"));

    // Inspect never writes outputs
    assert!(!dir
        .path()
        .join("INSTR1-IND2-CLAR3-EPIC4-F-PROBE5.opencga_configs.zip")
        .exists());
}

#[test]
fn test_inspect_json_unknown_caller() {
    let dir = TempDir::new().unwrap();
    setup(dir.path(), "A-B.vcf", "freebayes");

    let output = cmd()
        .current_dir(dir.path())
        .args(["inspect", "A-B.vcf", "--format", "json", "--show-header"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["caller"], "unknown");
    assert_eq!(json["fields"], serde_json::json!(["A", "B"]));
    assert_eq!(json["header"].as_array().unwrap().len(), 3);
}

#[test]
fn test_generate_verbose_logs_assay_config() {
    let dir = TempDir::new().unwrap();
    setup(dir.path(), &format!("{SAMPLE}.vcf"), "Pisces");

    cmd()
        .current_dir(dir.path())
        .args([
            "--verbose",
            "generate",
            &format!("{SAMPLE}.vcf"),
            "--assay-config",
            "assay.json",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Assay config:"))
        .stderr(predicate::str::contains("somatic"));
}
