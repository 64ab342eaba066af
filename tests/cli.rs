//! CLI integration tests for the batch runner.

use std::fs;

use assert_cmd::Command;
use event_vectorizer::VectorizerModel;
use predicates::prelude::*;
use serde_json::{json, Value};

const BATCH: &str = r#"{"events": [
    {"id": 1, "date": "2021-01-01", "text": "cat sat cat mat", "entities": ["PER"]},
    {"id": "b", "date": "2021-01-02", "text": "cat mat mat mat", "entities": []},
    {"id": 3, "date": "2021-01-03", "text": "dog ran fast", "entities": [{"kind": "LOC"}]}
]}"#;

const OPEN_FLAGS: &[&str] = &[
    "--frequency-floor",
    "0",
    "--min-doc-freq",
    "1",
    "--max-doc-freq-fraction",
    "1.0",
];

fn vectorizer() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("event-vectorizer").unwrap()
}

fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

#[test]
fn writes_enriched_batch_and_dictionary() {
    let dir = temp_dir();
    let input = dir.path().join("events.json");
    let output = dir.path().join("out.json");
    let dictionary = dir.path().join("dict.txt");
    fs::write(&input, BATCH).unwrap();

    vectorizer()
        .args(OPEN_FLAGS)
        .arg("--similarity")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--dictionary-out")
        .arg(&dictionary)
        .assert()
        .success();

    let out: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let events = out["events"].as_array().unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[1]["id"], json!("b"));
    assert_eq!(events[2]["entities"], json!([{"kind": "LOC"}]));

    let a = events[0]["tf_idf"].as_object().unwrap();
    let mut keys: Vec<&str> = a.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["0", "1", "2"]);
    let cat = a["0"].as_f64().unwrap();
    assert!((cat - 2.0 * 1.5f64.ln()).abs() < 1e-9);

    let row = events[0]["cos_sim"].as_array().unwrap();
    assert_eq!(row.len(), 3);
    assert_eq!(row[0], json!(1.0));
    assert_eq!(row[2], json!(0.0));
    assert!(row[1].as_f64().unwrap() > 0.0);

    assert_eq!(
        fs::read_to_string(&dictionary).unwrap(),
        "3\n0\tcat\t2\n1\tsat\t1\n2\tmat\t2\n3\tdog\t1\n4\tran\t1\n5\tfast\t1\n"
    );
}

#[test]
fn reads_stdin_and_writes_stdout() {
    vectorizer()
        .args(OPEN_FLAGS)
        .write_stdin(BATCH)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"tf_idf\""))
        .stdout(predicate::str::contains("cos_sim").not());
}

#[test]
fn config_file_values_apply_and_flags_override_them() {
    let dir = temp_dir();
    let config = dir.path().join("vectorizer.toml");
    fs::write(
        &config,
        "frequency_floor = 0\nmin_doc_freq = 1\nmax_doc_freq_fraction = 1.0\nenable_similarity = true\n",
    )
    .unwrap();

    vectorizer()
        .arg("--config")
        .arg(&config)
        .write_stdin(BATCH)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"cos_sim\""))
        .stdout(predicate::str::contains("\"tf_idf\":{\"0\""));

    // min_doc_freq 2 leaves only cat and mat
    let dictionary = dir.path().join("dict.txt");
    vectorizer()
        .arg("--config")
        .arg(&config)
        .args(["--min-doc-freq", "2", "--dictionary-out"])
        .arg(&dictionary)
        .write_stdin(BATCH)
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&dictionary).unwrap(), "3\n0\tcat\t2\n1\tmat\t2\n");
}

#[test]
fn model_snapshot_round_trips() {
    let dir = temp_dir();
    let model_path = dir.path().join("model.cbor");

    vectorizer()
        .args(OPEN_FLAGS)
        .arg("--model-out")
        .arg(&model_path)
        .write_stdin(BATCH)
        .assert()
        .success();

    let model = VectorizerModel::read_cbor(fs::File::open(&model_path).unwrap()).unwrap();
    assert_eq!(model.doc_num, 3);
    assert_eq!(model.terms, vec!["cat", "sat", "mat", "dog", "ran", "fast"]);
    assert_eq!(model.doc_freqs, vec![2, 1, 2, 1, 1, 1]);
    assert!((model.idf[1] - 3f64.ln()).abs() < 1e-12);
}

#[test]
fn malformed_event_fails_without_output() {
    let dir = temp_dir();
    let output = dir.path().join("out.json");
    let dictionary = dir.path().join("dict.txt");

    vectorizer()
        .arg("--output")
        .arg(&output)
        .arg("--dictionary-out")
        .arg(&dictionary)
        .write_stdin(r#"{"events": [{"id": 1, "date": "d", "text": "a"}, {"id": 2, "date": "d", "text": "b", "entities": []}]}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required field `entities`"));

    assert!(!output.exists());
    assert!(!dictionary.exists());
}

#[test]
fn failed_side_output_leaves_batch_unwritten() {
    let dir = temp_dir();
    let output = dir.path().join("out.json");
    let model = dir.path().join("model.cbor");

    vectorizer()
        .args(OPEN_FLAGS)
        .arg("--output")
        .arg(&output)
        .arg("--model-out")
        .arg(&model)
        .arg("--dictionary-out")
        .arg(dir.path().join("no_such_dir").join("dict.txt"))
        .write_stdin(BATCH)
        .assert()
        .failure()
        .stderr(predicate::str::contains("dict.txt"));

    assert!(!output.exists());
    assert!(!model.exists());
    let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert!(leftovers.is_empty());
}

#[test]
fn failed_file_output_keeps_stdout_empty() {
    let dir = temp_dir();

    vectorizer()
        .args(OPEN_FLAGS)
        .arg("--model-out")
        .arg(dir.path().join("missing").join("model.cbor"))
        .write_stdin(BATCH)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn no_similarity_overrides_config_file() {
    let dir = temp_dir();
    let config = dir.path().join("vectorizer.toml");
    fs::write(&config, "frequency_floor = 0\nmin_doc_freq = 1\nenable_similarity = true\nkeep_n = 0\n")
        .unwrap();

    vectorizer()
        .arg("--config")
        .arg(&config)
        .arg("--no-similarity")
        .write_stdin(BATCH)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"tf_idf\""))
        .stdout(predicate::str::contains("cos_sim").not());

    vectorizer()
        .args(["--similarity", "--no-similarity"])
        .write_stdin(BATCH)
        .assert()
        .failure();
}

#[test]
fn invalid_threshold_is_rejected() {
    vectorizer()
        .args(["--max-doc-freq-fraction", "1.5"])
        .write_stdin(BATCH)
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_doc_freq_fraction"));
}

#[test]
fn keep_n_flags_conflict() {
    vectorizer()
        .args(["--keep-n", "10", "--no-keep-n"])
        .write_stdin(BATCH)
        .assert()
        .failure();
}

#[test]
fn empty_batch_succeeds() {
    vectorizer()
        .arg("--similarity")
        .write_stdin(r#"{"events": []}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"events":[]}"#));
}
