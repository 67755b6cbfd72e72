use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

const STATIC_PAGE: &str = "\
module Pages.Home_ exposing (page)

import Gen.Params.Home_ exposing (Params)
import Page exposing (Page)
import Request
import Shared
import View exposing (View)


page : Shared.Model -> Request.With Params -> Page
page shared req =
    Page.static
        { view = view
        }


view : View msg
view =
    View.placeholder \"Home_\"
";

fn cmd() -> Command {
    Command::cargo_bin("pagelift").unwrap()
}

fn write_static_page(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("Home_.elm");
    fs::write(&path, STATIC_PAGE).unwrap();
    path
}

#[test]
fn test_rewrites_file_in_place() {
    let dir = TempDir::new().unwrap();
    let path = write_static_page(&dir);

    cmd()
        .arg(&path)
        .arg("element")
        .assert()
        .success()
        .stderr(contains("static -> element"))
        .stderr(contains("Archived: view"));

    let rewritten = fs::read_to_string(&path).unwrap();
    assert!(rewritten.contains("Page.element"));
    assert!(rewritten.contains("-- superseded by rewrite to element:"));
    assert!(!dir.path().join("Home_.elm.tmp").exists());
}

#[test]
fn test_dry_run_prints_without_writing() {
    let dir = TempDir::new().unwrap();
    let path = write_static_page(&dir);

    cmd()
        .arg(&path)
        .arg("element")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(contains("Page.element"));

    assert_eq!(fs::read_to_string(&path).unwrap(), STATIC_PAGE);
}

#[test]
fn test_shared_and_request_flags_thread_context() {
    let dir = TempDir::new().unwrap();
    let path = write_static_page(&dir);

    cmd()
        .args(["--shared", "--request"])
        .arg(&path)
        .arg("element")
        .assert()
        .success();

    let rewritten = fs::read_to_string(&path).unwrap();
    assert!(rewritten.contains("update : Shared.Model -> Request.With Params -> Msg -> Model"));
    assert!(rewritten.contains("{ init = init shared req"));
}

#[test]
fn test_json_report() {
    let dir = TempDir::new().unwrap();
    let path = write_static_page(&dir);

    let output = cmd()
        .arg(&path)
        .arg("advanced")
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["detected"], "static");
    assert_eq!(report["target"], "advanced");
    assert_eq!(report["archived"][0], "view");
    assert!(report["imports_added"]
        .as_array()
        .unwrap()
        .contains(&serde_json::Value::from("Effect")));
}

#[test]
fn test_unrecognized_module_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Main.elm");
    fs::write(&path, "module Main exposing (main)\n\nmain =\n    text \"hi\"\n").unwrap();

    cmd()
        .arg(&path)
        .arg("element")
        .assert()
        .failure()
        .stderr(contains("unrecognized page shape"));

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "module Main exposing (main)\n\nmain =\n    text \"hi\"\n"
    );
}

#[test]
fn test_sandbox_template_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_static_page(&dir);

    cmd()
        .arg(&path)
        .arg("sandbox")
        .assert()
        .failure()
        .stderr(contains("sandbox pages are not supported"));
}

#[test]
fn test_missing_file_fails_with_context() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(dir.path().join("Absent.elm"))
        .arg("static")
        .assert()
        .failure()
        .stderr(contains("Failed to read"));
}
