// Integration tests for the seqscan command line

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const ECORI_SEQ: &str = "ACTGATCGATTACGTATAGTAGAATTCTATCATACATATATATCGATGCGTTCAT";

fn seqscan() -> Command {
    Command::cargo_bin("seqscan").unwrap()
}

// Helper to create a temporary input file
fn create_test_file(dir: &TempDir, filename: &str, content: &str) -> Result<PathBuf> {
    let path = dir.path().join(filename);
    fs::write(&path, content)?;
    Ok(path)
}

#[test]
fn test_composition_literal() {
    seqscan()
        .args(["composition", "-s", "aattgc", "--symbols", "AT"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.6667").and(predicate::str::contains("high")));
}

#[test]
fn test_composition_percent_protein() {
    seqscan()
        .args(["composition", "-s", "MSRSLLLRFLLFLLLLPPLP", "-a", "protein", "--symbols", "AILMFWYV", "--percent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("65.00%").and(predicate::str::contains("medium")));
}

#[test]
fn test_invalid_symbol_fails() {
    seqscan()
        .args(["composition", "-s", "ACGTX"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid symbol 'X' at position 4"));
}

#[test]
fn test_purge_before_validation() {
    seqscan()
        .args(["composition", "-s", "ATxxGC", "--purge", "X", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"length\": 4"));
}

#[test]
fn test_complement_and_reverse() {
    seqscan()
        .args(["complement", "-s", "AAGT"])
        .assert()
        .success()
        .stdout("TTCA\n");

    seqscan()
        .args(["complement", "-s", "AAGT", "--reverse"])
        .assert()
        .success()
        .stdout("ACTT\n");
}

#[test]
fn test_motif_fragments() {
    seqscan()
        .args(["motif", "-s", ECORI_SEQ, "-m", "gaattc", "--all"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("GAATTC\t21")
                .and(predicate::str::contains("fragments\t22\t33"))
                .and(predicate::str::contains("occurrences\t21")),
        );
}

#[test]
fn test_motif_absent() {
    seqscan()
        .args(["motif", "-s", "ACGT", "-m", "GGG", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"index\": null"));
}

#[test]
fn test_splice_from_fasta() -> Result<()> {
    let dir = TempDir::new()?;
    let fasta = create_test_file(&dir, "genomic.fasta", ">genomic\nATCGATCG\n")?;

    seqscan()
        .args(["splice", "-i", fasta.to_str().unwrap(), "--span", "0:3", "--span", "6:8"])
        .assert()
        .success()
        .stdout("ATCCG\n");
    Ok(())
}

#[test]
fn test_splice_partition_and_bounds() {
    seqscan()
        .args(["splice", "-s", "AACCGGTT", "--span", "2:6", "--partition"])
        .assert()
        .success()
        .stdout("leading\tAA\nexon\tCCGG\ntrailing\tTT\n");

    seqscan()
        .args(["splice", "-s", "ACGT", "--span", "2:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of bounds"));
}

#[test]
fn test_kmers() {
    seqscan()
        .args(["kmers", "-s", "ATAT", "-k", "2"])
        .assert()
        .success()
        .stdout("AT\nTA\nAT\n");

    seqscan()
        .args(["kmers", "-s", "A", "-k", "2"])
        .assert()
        .success()
        .stdout("");

    seqscan()
        .args(["kmers", "-s", "ATATATCG", "-k", "2", "--min-count", "2"])
        .assert()
        .success()
        .stdout("AT\t3\nTA\t2\n");

    seqscan()
        .args(["kmers", "-s", "ACGT", "-k", "2", "--min-count", "2"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_classify_with_report() -> Result<()> {
    let dir = TempDir::new()?;
    let gc_rich_100 = format!("{}{}", "GC".repeat(45), "AT".repeat(5));
    let content = format!(
        "Drosophila melanogaster,{},kdr,500\nDrosophila yakuba,ATATATAT,ninaE,10\nDrosophila simulans,ATGC,bad,lots\nMus musculus,ACGN,broken,300\n",
        gc_rich_100
    );
    let records = create_test_file(&dir, "data.csv", &content)?;
    let report_path = dir.path().join("report.json");
    let text_path = dir.path().join("report.tsv");

    seqscan()
        .args([
            "classify",
            "-r", records.to_str().unwrap(),
            "-j", report_path.to_str().unwrap(),
            "--output-text", text_path.to_str().unwrap(),
            "--threads", "2",
        ])
        .assert()
        .success();

    let text = fs::read_to_string(&text_path)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5, "header, two classified rows, skipped header and row");
    assert!(lines[1].starts_with("kdr\tDrosophila melanogaster\t100\t0.1000\tlow\tyes\tyes\tyes"));
    assert!(lines[2].starts_with("ninaE\t"));
    assert_eq!(lines[3], "#skipped\tindex\tline\tname\treason");
    // "broken" is the third surviving record but sits on line 4 of the input
    assert!(lines[4].starts_with("#skipped\t2\t4\tbroken"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report_path)?)?;
    assert_eq!(json["rejected"].as_array().unwrap().len(), 1);
    assert_eq!(json["rejected"][0]["line"], 3);
    assert_eq!(json["results"]["skipped"][0]["line"], 4);
    assert_eq!(json["results"]["classified"].as_array().unwrap().len(), 2);
    assert_eq!(json["results"]["classified"][0]["tags"]["species"], true);
    Ok(())
}

#[test]
fn test_classify_with_config() -> Result<()> {
    let dir = TempDir::new()?;
    let records = create_test_file(&dir, "data.csv", "Drosophila yakuba,GGCC,g1,50\n")?;
    let config = create_test_file(
        &dir,
        "config.json",
        r#"{"classifier": {"epithets": ["yakuba"], "min_expression": 10}}"#,
    )?;

    seqscan()
        .args(["classify", "-r", records.to_str().unwrap(), "-c", config.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("g1\tDrosophila yakuba\t4\t0.0000\tlow\tyes\tno\tyes"));
    Ok(())
}

#[test]
fn test_missing_input_file() {
    seqscan()
        .args(["kmers", "-i", "/nonexistent/seq.fa", "-k", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read sequence file"));
}
