//! Runs the `fpcheck` binary against small projects on disk.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write(dir: &Path, rel: &str, contents: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create dirs");
    }
    fs::write(path, contents).expect("write file");
}

fn fpcheck(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fpcheck"))
        .args(args)
        .current_dir(dir)
        .env_remove("FILEPRIVATE_LOG")
        .env("XDG_CONFIG_HOME", dir.join(".xdg"))
        .output()
        .expect("fpcheck runs")
}

fn violating_project() -> TempDir {
    let tmp = TempDir::new().expect("tempdir");
    write(tmp.path(), "pkg/item.go", "package pkg\n\ntype item struct{ price int }\n");
    write(
        tmp.path(),
        "pkg/sale.go",
        "package pkg\n\nfunc discount(i *item) { i.price = 0 }\n",
    );
    tmp
}

#[test]
fn clean_package_exits_zero() {
    let tmp = TempDir::new().expect("tempdir");
    write(tmp.path(), "main.go", "package main\n\nfunc main() {}\n");
    let out = fpcheck(tmp.path(), &[]);
    assert_eq!(out.status.code(), Some(0));
    assert!(out.stdout.is_empty());
}

#[test]
fn findings_exit_three_with_text_output() {
    let tmp = violating_project();
    let out = fpcheck(tmp.path(), &["./..."]);
    assert_eq!(out.status.code(), Some(3));
    let stdout = String::from_utf8(out.stdout).expect("utf8");
    assert!(
        stdout.contains("sale.go:3:28: accessing item.price outside of the suggested context"),
        "{stdout}"
    );
}

#[test]
fn json_output_lists_findings() {
    let tmp = violating_project();
    let out = fpcheck(tmp.path(), &["--format", "json", "pkg"]);
    assert_eq!(out.status.code(), Some(3));
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json");
    assert_eq!(value[0]["type"], "item");
    assert_eq!(value[0]["line"], 3);
}

#[test]
fn project_config_is_honoured() {
    let tmp = violating_project();
    write(tmp.path(), "fileprivate.toml", "[check]\nexclude = [\"pkg/sale.go\"]\n");
    let out = fpcheck(tmp.path(), &["./..."]);
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn errors_exit_one() {
    let tmp = TempDir::new().expect("tempdir");
    write(tmp.path(), "broken.go", "func main() {}\n");
    let out = fpcheck(tmp.path(), &[]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).expect("utf8");
    assert!(stderr.contains("fpcheck error:"), "{stderr}");
}
