use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::{tempdir, TempDir};

#[allow(deprecated)]
fn ftag(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ftag").expect("binary");
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn setup(files: &[&str]) -> TempDir {
    let dir = tempdir().unwrap();
    for file in files {
        fs::write(dir.path().join(file), file).unwrap();
    }
    dir
}

fn tag_map(dir: &Path, name: &str) -> Value {
    serde_json::from_slice(&fs::read(dir.join(name)).unwrap()).unwrap()
}

#[test]
fn add_find_and_list() {
    let dir = setup(&["foo", "bar", "baz"]);
    let root = dir.path();

    ftag(root).args(&["add", "foo", "tag1"]).assert().success();
    ftag(root).args(&["add", "bar", "tag2"]).assert().success();
    ftag(root)
        .args(&["add", "baz", "tag2", "tag1"])
        .assert()
        .success();

    ftag(root)
        .args(&["find", "tag1", "tag2"])
        .assert()
        .success()
        .stdout("baz\n");
    ftag(root)
        .args(&["find", "tag1"])
        .assert()
        .success()
        .stdout("baz\nfoo\n");
    ftag(root)
        .args(&["list"])
        .assert()
        .success()
        .stdout("tag1\ntag2\n");
    ftag(root)
        .args(&["list", "bar", "untracked"])
        .assert()
        .success()
        .stdout("tag2\n");

    let doc = tag_map(root, ".ftag");
    assert_eq!(doc["version"], "1");
    assert_eq!(doc["fileToTag"]["baz"], serde_json::json!(["tag1", "tag2"]));
    assert_eq!(doc["tagToFile"]["tag1"], serde_json::json!(["foo", "baz"]));
}

#[test]
fn empty_results_are_not_errors() {
    let dir = setup(&[]);

    ftag(dir.path())
        .args(&["find", "nothing"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    ftag(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    // Read-only commands don't create the tag map.
    assert!(!dir.path().join(".ftag").exists());
}

#[test]
fn add_missing_file_fails() {
    let dir = setup(&[]);

    ftag(dir.path())
        .args(&["add", "missing.txt", "tag"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot access missing.txt"));

    assert!(!dir.path().join(".ftag").exists());
}

#[test]
fn remove_and_clear() {
    let dir = setup(&["foo", "bar"]);
    let root = dir.path();

    ftag(root).args(&["add", "foo", "a", "b"]).assert().success();
    ftag(root).args(&["add", "bar", "a"]).assert().success();

    ftag(root).args(&["rm", "foo", "a", "nope"]).assert().success();
    ftag(root)
        .args(&["find", "a"])
        .assert()
        .success()
        .stdout("bar\n");

    ftag(root).args(&["clr", "foo", "untracked"]).assert().success();
    ftag(root)
        .args(&["ls"])
        .assert()
        .success()
        .stdout("a\n");

    let doc = tag_map(root, ".ftag");
    assert_eq!(
        doc["fileToTag"],
        serde_json::json!({ "bar": ["a"] })
    );
    assert_eq!(
        doc["tagToFile"],
        serde_json::json!({ "a": ["bar"] })
    );
}

#[test]
fn move_file() {
    let dir = setup(&["old"]);
    let root = dir.path();

    ftag(root).args(&["a", "old", "t1"]).assert().success();
    fs::rename(root.join("old"), root.join("new")).unwrap();

    ftag(root).args(&["mv", "old", "new"]).assert().success();
    ftag(root)
        .args(&["f", "t1"])
        .assert()
        .success()
        .stdout("new\n");

    ftag(root)
        .args(&["move", "old", "elsewhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "tag mapping for file not found: old",
        ));
}

#[test]
fn check_reports_every_missing_file() {
    let dir = setup(&["one", "two", "three"]);
    let root = dir.path();

    for file in &["one", "two", "three"] {
        ftag(root).args(&["add", *file, "tag"]).assert().success();
    }
    ftag(root).arg("check").assert().success();

    fs::remove_file(root.join("one")).unwrap();
    fs::remove_file(root.join("three")).unwrap();

    ftag(root)
        .arg("check")
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("2 tracked file(s) missing")
                .and(predicate::str::contains("cannot access one"))
                .and(predicate::str::contains("cannot access three"))
                .and(predicate::str::contains("cannot access two").not()),
        );
}

#[test]
fn tag_map_option() {
    let dir = setup(&["foo"]);
    let root = dir.path();
    fs::create_dir(root.join("meta")).unwrap();

    ftag(root)
        .args(&["-m", "meta/tags.json", "add", "foo", "tag"])
        .assert()
        .success();
    assert!(!root.join(".ftag").exists());
    assert_eq!(
        tag_map(root, "meta/tags.json")["fileToTag"]["foo"],
        serde_json::json!(["tag"])
    );

    let absolute = root.join("meta").join("tags.json");
    ftag(root)
        .arg("--tag-map")
        .arg(&absolute)
        .args(&["find", "tag"])
        .assert()
        .success()
        .stdout("foo\n");
}

#[test]
fn rejects_unusable_tag_maps() {
    let dir = setup(&["foo"]);
    let root = dir.path();

    fs::write(root.join(".ftag"), "{ not json").unwrap();
    ftag(root)
        .args(&["list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("serialisation error"));

    fs::write(
        root.join(".ftag"),
        r#"{"version":"99","fileToTag":{},"tagToFile":{}}"#,
    )
    .unwrap();
    ftag(root)
        .args(&["add", "foo", "tag"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tag map version"));
}

#[test]
fn usage_errors() {
    let dir = setup(&["foo"]);

    ftag(dir.path()).args(&["add", "foo"]).assert().failure();
    ftag(dir.path()).args(&["find"]).assert().failure();
    ftag(dir.path()).args(&["move", "foo"]).assert().failure();
    ftag(dir.path()).assert().failure();
}
