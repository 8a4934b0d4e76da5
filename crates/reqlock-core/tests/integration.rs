use std::path::Path;

use reqlock_core::{
    DiscoverOptions, HashComment, HashStrategy, VerifyError, discover, raw_digest, robust_digest,
    sha1_hex, verify, verify_parallel,
};
use tempfile::TempDir;

/// Output file the way pip-compile style generators lay it out.
fn lock_file(comment: Option<&HashComment>, pins: &[&str]) -> String {
    let mut out = String::new();
    if let Some(c) = comment {
        out.push_str(&c.encode());
    }
    out.push_str("#\n# This file is autogenerated. To update, run the generator.\n#\n");
    for pin in pins {
        out.push_str(pin);
        out.push('\n');
    }
    out
}

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

fn requirements_dir() -> (TempDir, DiscoverOptions) {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("requirements");
    std::fs::create_dir_all(&dir).unwrap();
    let opts = DiscoverOptions {
        directory: dir,
        ..Default::default()
    };
    (tmp, opts)
}

#[test]
fn six_click_scenario() {
    let (_tmp, opts) = requirements_dir();
    let dir = &opts.directory;
    write(dir, "base.in", "six\nclick\n");

    let expected = sha1_hex(b"clicksix");
    assert_eq!(robust_digest("six\nclick\n"), expected);

    let good = HashComment::new(expected).unwrap();
    write(dir, "base.txt", &lock_file(Some(&good), &["click==8.1.7", "six==1.16.0"]));
    let report = verify(&discover(&opts).unwrap()).unwrap();
    assert!(report.success());

    let bad = HashComment::new(sha1_hex(b"sixclick")).unwrap();
    write(dir, "base.txt", &lock_file(Some(&bad), &["click==8.1.7", "six==1.16.0"]));
    let report = verify(&discover(&opts).unwrap()).unwrap();
    assert!(!report.success());
    assert_eq!(report.results[0].expected, good);
    assert_eq!(report.results[0].found.as_ref(), Some(&bad));
}

#[test]
fn mixed_workspace() {
    let (_tmp, opts) = requirements_dir();
    let dir = &opts.directory;

    // Current, robust hash
    let base = "six\nclick\n";
    write(dir, "base.in", base);
    let c = HashComment::new(robust_digest(base)).unwrap();
    write(dir, "base.txt", &lock_file(Some(&c), &["six==1.16.0"]));

    // Current, legacy raw hash
    let local = "-r base.in\nipython  # repl\n";
    write(dir, "local.in", local);
    let c = HashComment::new(raw_digest(local.as_bytes())).unwrap();
    write(dir, "local.txt", &lock_file(Some(&c), &["ipython==8.0.0"]));

    // Never generated
    write(dir, "docs.in", "sphinx\n");

    // Input edited after generation
    write(dir, "test.in", "-r base.in\npytest\n");
    let c = HashComment::new(robust_digest("-r base.in\n")).unwrap();
    write(dir, "test.txt", &lock_file(Some(&c), &["pytest==8.0.0"]));

    let envs = discover(&opts).unwrap();
    let names: Vec<_> = envs.iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["base", "docs", "local", "test"]);

    let report = verify(&envs).unwrap();
    assert!(!report.success());
    let matched: Vec<_> = report.results.iter().map(|r| r.matched_by).collect();
    assert_eq!(
        matched,
        vec![
            Some(HashStrategy::Robust),
            None,
            Some(HashStrategy::Raw),
            None
        ]
    );

    let parallel = verify_parallel(&envs, 3).unwrap();
    assert_eq!(parallel.results, report.results);
}

#[test]
fn reordered_and_recommented_input_still_current() {
    let (_tmp, opts) = requirements_dir();
    let dir = &opts.directory;
    let c = HashComment::new(robust_digest("flask\nsix\nclick\n")).unwrap();
    write(dir, "base.txt", &lock_file(Some(&c), &[]));
    write(
        dir,
        "base.in",
        "# web\nclick  # cli\n\n  flask\nsix   # compat shim\n",
    );

    assert!(verify(&discover(&opts).unwrap()).unwrap().success());
}

#[test]
fn missing_input_aborts_run() {
    let (_tmp, opts) = requirements_dir();
    let dir = &opts.directory;
    write(dir, "base.in", "six\n");
    let mut envs = discover(&opts).unwrap();
    envs.push(reqlock_core::Environment::from_input(dir.join("gone.in"), "txt"));

    match verify(&envs) {
        Err(VerifyError::Input { path, .. }) => assert_eq!(path, dir.join("gone.in")),
        other => panic!("expected input error, got {other:?}"),
    }
}

#[test]
fn verification_is_read_only() {
    let (_tmp, opts) = requirements_dir();
    let dir = &opts.directory;
    write(dir, "base.in", "six\n");
    let before = lock_file(None, &["six==1.0"]);
    write(dir, "base.txt", &before);

    verify(&discover(&opts).unwrap()).unwrap();
    assert_eq!(std::fs::read_to_string(dir.join("base.txt")).unwrap(), before);
    assert!(!dir.join("docs.txt").exists());
}

#[test]
fn report_serializes_to_json() {
    let (_tmp, opts) = requirements_dir();
    let dir = &opts.directory;
    write(dir, "base.in", "six\nclick\n");

    let report = verify(&discover(&opts).unwrap()).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    let first = &json["results"][0];
    assert_eq!(first["expected"], sha1_hex(b"clicksix"));
    assert!(first["found"].is_null());
    assert!(first["matched_by"].is_null());
}
