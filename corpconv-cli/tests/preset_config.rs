use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn presets_from_config_file_are_usable() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.txt");
    fs::write(&input_path, "They/PRON sleep/VERB\n").unwrap();

    let config_path = dir.path().join("corpconv.toml");
    fs::write(
        &config_path,
        r#"[presets]
slash = "ls/nne"
"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("corpconv");
    cmd.arg(input_path.as_os_str())
        .arg("--from")
        .arg("slash")
        .arg("--to")
        .arg("tsv")
        .arg("--config")
        .arg(config_path.as_os_str());

    cmd.assert()
        .success()
        .stdout("They\tPRON\nsleep\tVERB\n\n");
}

#[test]
fn configured_xml_names_apply_without_flags() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("doc.tsv");
    fs::write(&input_path, "They\tPRON\nsleep\tVERB\n\n").unwrap();

    let config_path = dir.path().join("corpconv.toml");
    fs::write(
        &config_path,
        r#"[xml]
tag = "sentence"
id = "sid"
"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("corpconv");
    cmd.arg(input_path.as_os_str())
        .arg("--from")
        .arg("tsv")
        .arg("--to")
        .arg("vrt")
        .arg("--config")
        .arg(config_path.as_os_str());

    cmd.assert()
        .success()
        .stdout("<sentence sid=\"s1\">\nThey\tPRON\nsleep\tVERB\n</sentence>\n");
}

#[test]
fn config_presets_shadow_built_ins_in_the_listing() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("corpconv.toml");
    fs::write(
        &config_path,
        r#"[presets]
tsv = "elsnne"
"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("corpconv");
    cmd.arg("--list-presets")
        .arg("--config")
        .arg(config_path.as_os_str());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("elsnne").and(predicate::str::contains("conll")));
}

#[test]
fn missing_explicit_config_file_is_an_error() {
    let mut cmd = cargo_bin_cmd!("corpconv");
    cmd.arg("--list-presets")
        .arg("--config")
        .arg("no-such-config.toml");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}
