use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn inspect_dumps_the_sentence_model_as_json() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.vrt");
    fs::write(
        &input_path,
        "<s id=\"s1\">\nThey\tPRON\nsleep\tVERB\n</s>\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("corpconv");
    cmd.arg("inspect")
        .arg(input_path.as_os_str())
        .arg("--from")
        .arg("vrt");

    let output_pred = predicate::str::contains("\"id\": \"s1\"")
        .and(predicate::str::contains("\"id\": \"t1\""))
        .and(predicate::str::contains("\"PRON\""))
        .and(predicate::str::contains("\"sleep\""));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn inspect_requires_a_source_format() {
    let mut cmd = cargo_bin_cmd!("corpconv");
    cmd.arg("inspect").arg("doc.vrt");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--from"));
}

#[test]
fn list_presets_shows_the_built_ins() {
    let mut cmd = cargo_bin_cmd!("corpconv");
    cmd.arg("--list-presets");

    let output_pred = predicate::str::contains("conll")
        .and(predicate::str::contains("eltc0_"))
        .and(predicate::str::contains("vrt"))
        .and(predicate::str::contains("xltxne"));

    cmd.assert().success().stdout(output_pred);
}
