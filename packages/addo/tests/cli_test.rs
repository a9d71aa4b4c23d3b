//! Tests for the `addo render` command.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn addo() -> Command {
    Command::cargo_bin("addo").unwrap()
}

fn output_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_render_requires_destinations() {
    let output = TempDir::new().unwrap();

    addo()
        .args(["render", "-o"])
        .arg(output.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Missing `destinations` setting"));
}

#[test]
fn test_render_missing_output_directory() {
    let dir = TempDir::new().unwrap();

    addo()
        .args(["render", "-d"])
        .arg(fixture("destinations.xml"))
        .arg("-o")
        .arg(dir.path().join("does-not-exist"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid output directory"));
}

#[test]
fn test_render_html_files() {
    let output = TempDir::new().unwrap();

    addo()
        .args(["render", "-d"])
        .arg(fixture("destinations.xml"))
        .arg("-t")
        .arg(fixture("taxonomy.xml"))
        .arg("-o")
        .arg(output.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 3 files"));

    assert_eq!(
        output_files(output.path()),
        vec!["africa.html", "cape_town.html", "south_africa.html"]
    );

    let page = fs::read_to_string(output.path().join("south_africa.html")).unwrap();
    assert!(page.contains("<title>South Africa</title>"));
    assert!(page.contains("<a href=\"africa.html\">Africa</a>"));
    assert!(page.contains("<a href=\"cape_town.html\">Cape Town</a>"));
}

#[test]
fn test_render_without_taxonomy() {
    let output = TempDir::new().unwrap();

    addo()
        .args(["render", "-d"])
        .arg(fixture("destinations.xml"))
        .arg("-o")
        .arg(output.path())
        .assert()
        .success();

    let page = fs::read_to_string(output.path().join("africa.html")).unwrap();
    assert!(!page.contains("south_africa.html"));
}

#[test]
fn test_render_override_template() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("page.html");
    fs::write(&template, "DESTINATION: {{title}}").unwrap();
    let output = dir.path().join("out");
    fs::create_dir(&output).unwrap();

    addo()
        .args(["render", "-d"])
        .arg(fixture("destinations.xml"))
        .arg("-o")
        .arg(&output)
        .arg("-r")
        .arg(&template)
        .assert()
        .success();

    let page = fs::read_to_string(output.join("africa.html")).unwrap();
    assert_eq!(page, "DESTINATION: Africa");
}

#[test]
fn test_render_missing_template() {
    let output = TempDir::new().unwrap();

    addo()
        .args(["render", "-d"])
        .arg(fixture("destinations.xml"))
        .arg("-o")
        .arg(output.path())
        .arg("-r")
        .arg(output.path().join("missing.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid template file"));
}

#[test]
fn test_render_from_settings_file() {
    let dir = TempDir::new().unwrap();
    fs::copy(fixture("destinations.xml"), dir.path().join("destinations.xml")).unwrap();
    fs::copy(fixture("taxonomy.xml"), dir.path().join("taxonomy.xml")).unwrap();
    fs::create_dir(dir.path().join("site")).unwrap();

    let config = dir.path().join("addo.yaml");
    fs::write(
        &config,
        "destinations: \"{here}/destinations.xml\"\n\
         taxonomy: \"{here}/taxonomy.xml\"\n\
         output: \"{here}/site\"\n",
    )
    .unwrap();

    addo().arg("render").arg(&config).assert().success();

    assert_eq!(output_files(&dir.path().join("site")).len(), 3);
}

#[test]
fn test_render_arguments_override_settings_file() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("site")).unwrap();
    fs::create_dir(dir.path().join("other")).unwrap();

    let config = dir.path().join("addo.yaml");
    fs::write(
        &config,
        format!(
            "destinations: \"{}\"\noutput: \"{{here}}/site\"\n",
            fixture("destinations.xml").display()
        ),
    )
    .unwrap();

    addo()
        .arg("render")
        .arg(&config)
        .arg("-o")
        .arg(dir.path().join("other"))
        .assert()
        .success();

    assert!(output_files(&dir.path().join("site")).is_empty());
    assert_eq!(output_files(&dir.path().join("other")).len(), 3);
}

#[test]
fn test_render_malformed_destinations() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("broken.xml");
    fs::write(&source, "<destinations><destination title=\"Africa\">").unwrap();
    let output = dir.path().join("out");
    fs::create_dir(&output).unwrap();

    addo()
        .args(["render", "-d"])
        .arg(&source)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed source document"));

    assert!(output_files(&output).is_empty());
}

#[test]
fn test_render_yaml_format() {
    let output = TempDir::new().unwrap();

    addo()
        .args(["render", "--format", "yaml", "-d"])
        .arg(fixture("destinations.xml"))
        .arg("-t")
        .arg(fixture("taxonomy.xml"))
        .arg("-o")
        .arg(output.path())
        .assert()
        .success();

    assert_eq!(
        output_files(output.path()),
        vec!["africa.yaml", "cape_town.yaml", "south_africa.yaml"]
    );
    let yaml = fs::read_to_string(output.path().join("africa.yaml")).unwrap();
    assert!(yaml.contains("title: Africa"));
}

#[test]
fn test_render_duplicate_keys_get_suffixed_files() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("destinations.xml");
    fs::write(
        &source,
        r#"<destinations>
 <destination title="Africa" asset_id="1"/>
 <destination title="africa" asset_id="2"/>
</destinations>"#,
    )
    .unwrap();
    let output = dir.path().join("out");
    fs::create_dir(&output).unwrap();

    addo()
        .args(["render", "-d"])
        .arg(&source)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 2 files"));

    assert_eq!(output_files(&output), vec!["africa.html", "africa_1.html"]);
}

#[test]
fn test_render_titles_with_path_separators() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("destinations.xml");
    fs::write(
        &source,
        r#"<destinations>
 <destination title="Africa"/>
 <destination title="Bosnia/Herzegovina"/>
 <destination title="../Zambia"/>
</destinations>"#,
    )
    .unwrap();
    let output = dir.path().join("out");
    fs::create_dir(&output).unwrap();

    addo()
        .args(["render", "-d"])
        .arg(&source)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 3 files"));

    assert_eq!(
        output_files(&output),
        vec![".._zambia.html", "africa.html", "bosnia_herzegovina.html"]
    );
    assert_eq!(output_files(dir.path()), vec!["destinations.xml", "out"]);
}
