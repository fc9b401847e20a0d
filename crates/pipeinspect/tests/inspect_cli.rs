use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
    "event_id": 57,
    "textures": [
        { "id": 10, "name": "albedo", "texture_type": "texture_2d",
          "width": 512, "height": 512, "format": { "name": "GL_RGBA8" } }
    ],
    "buffers": [ { "id": 20, "name": "globals", "length": 64 } ],
    "stages": {
        "vs": { "shader": 1 },
        "fs": {
            "shader": 2,
            "reflection": {
                "entry_point": "main",
                "read_only": [ { "name": "albedoMap", "is_texture": true } ],
                "constant_blocks": [ { "name": "Globals", "byte_size": 64 } ]
            },
            "mapping": {
                "read_only": [ { "bind": 0, "used": true } ],
                "constant_blocks": [ { "bind": 0, "used": true } ]
            },
            "textures": [
                { "texture": { "resource": 10, "texture_type": "texture_2d" } },
                {}
            ],
            "uniform_buffers": [ { "resource": 20, "offset": 0, "size": 64 } ]
        }
    },
    "draw": { "topology": "triangle_list" }
}"#;

fn write_snapshot(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("event57.json");
    fs::write(&path, SNAPSHOT).unwrap();
    path
}

fn pipeinspect(config_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pipeinspect"))
        .env("PIPEINSPECT_CONFIG_DIR", config_dir)
        .env("RUST_LOG", "warn")
        .args(args)
        .output()
        .expect("failed to run pipeinspect")
}

#[test]
fn prints_text_report() {
    let root = TempDir::new().unwrap();
    let snapshot = write_snapshot(root.path());

    let output = pipeinspect(root.path(), &[snapshot.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Event 57"));
    assert!(stdout.contains("== FS (ResourceId::2, entry main) =="));
    assert!(stdout.contains("0: albedoMap"));
    assert!(stdout.contains("0 Variables, 64 bytes"));
}

#[test]
fn json_report_honours_flags() {
    let root = TempDir::new().unwrap();
    let snapshot = write_snapshot(root.path());

    let output = pipeinspect(
        root.path(),
        &[
            snapshot.to_str().unwrap(),
            "--format",
            "json",
            "--show-empty",
            "--stage",
            "fs",
        ],
    );
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["event_id"], 57);
    assert_eq!(report["visibility"]["show_empty"], true);

    let stages = report["stages"].as_array().unwrap();
    assert_eq!(stages.len(), 1);
    assert_eq!(stages[0]["stage"], "fs");
    let textures = stages[0]["textures"].as_array().unwrap();
    assert_eq!(textures.len(), 2);
    assert_eq!(textures[1]["fill"], "empty");
}

#[test]
fn config_file_in_config_dir_is_applied() {
    let root = TempDir::new().unwrap();
    let snapshot = write_snapshot(root.path());
    fs::write(
        root.path().join("config.toml"),
        "version = 1\n[output]\nformat = \"json\"\nstages = [\"vs\"]\n",
    )
    .unwrap();

    let output = pipeinspect(root.path(), &[snapshot.to_str().unwrap()]);
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let stages = report["stages"].as_array().unwrap();
    assert_eq!(stages.len(), 1);
    assert_eq!(stages[0]["stage"], "vs");
}

#[test]
fn invalid_config_fails() {
    let root = TempDir::new().unwrap();
    let snapshot = write_snapshot(root.path());
    fs::write(root.path().join("config.toml"), "version = 3\n").unwrap();

    let output = pipeinspect(root.path(), &[snapshot.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("config.toml"));
}

#[test]
fn missing_snapshot_fails() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("nope.json");

    let output = pipeinspect(root.path(), &[missing.to_str().unwrap()]);
    assert!(!output.status.success());

    let output = pipeinspect(root.path(), &[]);
    assert!(!output.status.success());
}

#[test]
fn where_prints_config_dir() {
    let root = TempDir::new().unwrap();
    let output = pipeinspect(root.path(), &["where"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(&root.path().display().to_string()));
    assert!(stdout.contains("(not present)"));
}
