//! Fixture packages annotated with `// want "substring"` comments.
//!
//! Every diagnostic must match an expectation on its own line, and every
//! expectation must be matched by exactly one diagnostic.

use std::fs;
use std::path::{Path, PathBuf};

use fp_checker::check_package;
use fp_parser::Package;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Want {
    file: String,
    line: u32,
    pattern: String,
}

fn fixture_dir(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn read_fixture(name: &str) -> Vec<(PathBuf, String)> {
    let mut paths: Vec<PathBuf> = fs::read_dir(fixture_dir(name))
        .expect("fixture dir exists")
        .map(|entry| entry.expect("dir entry").path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "go"))
        .collect();
    paths.sort();
    paths
        .into_iter()
        .map(|path| {
            let source = fs::read_to_string(&path).expect("read fixture");
            (path, source)
        })
        .collect()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn parse_wants(path: &Path, source: &str) -> Vec<Want> {
    let file = file_name(path);
    let mut wants = Vec::new();
    for (idx, line) in source.lines().enumerate() {
        let Some(at) = line.find("// want ") else {
            continue;
        };
        let line_no = u32::try_from(idx + 1).expect("line fits");
        for pattern in line[at + "// want ".len()..].split('"').skip(1).step_by(2) {
            wants.push(Want {
                file: file.clone(),
                line: line_no,
                pattern: pattern.to_string(),
            });
        }
    }
    wants
}

/// Check a fixture and return the unmatched diagnostics and expectations.
fn run_fixture(name: &str) -> (Vec<String>, Vec<String>) {
    let sources = read_fixture(name);
    let mut wants: Vec<Want> = sources
        .iter()
        .flat_map(|(path, source)| parse_wants(path, source))
        .collect();
    let pkg = Package::from_sources(sources).expect("fixture package builds");
    let diagnostics = check_package(&pkg, pkg.files()).expect("check succeeds");

    let mut unexpected = Vec::new();
    for diag in diagnostics {
        let pos = pkg
            .file_set()
            .position(diag.span.start_pos())
            .expect("diagnostic position");
        let file = file_name(&pos.path);
        let matched = wants.iter().position(|w| {
            w.file == file && w.line == pos.line && diag.message.contains(&w.pattern)
        });
        match matched {
            Some(idx) => {
                wants.remove(idx);
            }
            None => unexpected.push(format!("{file}:{}: {}", pos.line, diag.message)),
        }
    }
    let missing = wants
        .into_iter()
        .map(|w| format!("{}:{}: {}", w.file, w.line, w.pattern))
        .collect();
    (unexpected, missing)
}

#[rstest]
#[case::basic("basic")]
#[case::closures("closures")]
#[case::literals("literals")]
#[case::switches("switches")]
fn fixture_expectations_hold(#[case] name: &str) {
    let (unexpected, missing) = run_fixture(name);
    assert_eq!(unexpected, Vec::<String>::new(), "unexpected diagnostics");
    assert_eq!(missing, Vec::<String>::new(), "expected diagnostics not reported");
}

#[test]
fn diagnostics_follow_walk_order() {
    let sources = read_fixture("basic");
    let pkg = Package::from_sources(sources).expect("fixture package builds");
    let diagnostics = check_package(&pkg, pkg.files()).expect("check succeeds");
    let starts: Vec<(u32, u32)> = diagnostics
        .iter()
        .map(|d| (d.span.file.0, d.span.start))
        .collect();
    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts, sorted);
}

#[test]
fn wants_parse_multiple_patterns() {
    let wants = parse_wants(
        Path::new("x.go"),
        "package x\n\nvar a = b // want \"one\" \"two\"\n",
    );
    assert_eq!(
        wants.iter().map(|w| (w.line, w.pattern.as_str())).collect::<Vec<_>>(),
        vec![(3, "one"), (3, "two")]
    );
}
