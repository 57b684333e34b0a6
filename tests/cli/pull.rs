//! Tests for `envault pull`.

use crate::support::*;

const RESOLVED: &str = "# database connection\nDATABASE_URL=postgres://localhost/myapp\nAPI_KEY=sk-123\n";

#[test]
fn test_pull_writes_framed_env_file() {
    let t = Test::signed_in("dev");
    t.write_file("app.env.tpl", SAMPLE_TEMPLATE);
    t.set_inject(RESOLVED);

    let output = t.pull("app.env.tpl", &["--force"]);
    assert_success(&output);
    assert_stdout_contains(&output, "pulled secrets");

    let env = t.read_file("app.env");
    assert!(env.contains("# Generated by envault pull"));
    assert!(env.contains("DATABASE_URL=postgres://localhost/myapp"));
    // Document's own comment survives below the header.
    assert!(env.contains("# database connection"));
}

#[test]
fn test_repeated_pull_does_not_stack_headers() {
    let t = Test::signed_in("dev");
    t.write_file("app.env.tpl", SAMPLE_TEMPLATE);
    t.set_inject(RESOLVED);

    assert_success(&t.pull("app.env.tpl", &["--force"]));
    assert_success(&t.pull("app.env.tpl", &["--force"]));

    let env = t.read_file("app.env");
    let rule = "# ============================================================";
    let rules = env.lines().filter(|l| *l == rule).count();
    assert_eq!(rules, 2, "expected exactly one header block:\n{}", env);
}

#[test]
fn test_pull_declined_leaves_existing_file_untouched() {
    // Stdin is not a terminal, so the overwrite confirmation counts as
    // declined: exit 0, byte-identical file, no provider call at all.
    let t = Test::signed_in("dev");
    t.write_file("app.env.tpl", SAMPLE_TEMPLATE);
    t.write_file("app.env", "ORIGINAL=1\n");

    let output = t.pull("app.env.tpl", &[]);
    assert_success(&output);
    assert_stdout_contains(&output, "cancelled");

    assert_eq!(t.read_file("app.env"), "ORIGINAL=1\n");
    assert!(t.provider_calls().is_empty());
}

#[test]
fn test_pull_force_overwrites_existing_file() {
    let t = Test::signed_in("dev");
    t.write_file("app.env.tpl", SAMPLE_TEMPLATE);
    t.write_file("app.env", "ORIGINAL=1\n");
    t.set_inject(RESOLVED);

    assert_success(&t.pull("app.env.tpl", &["--force"]));
    let env = t.read_file("app.env");
    assert!(env.contains("API_KEY=sk-123"));
    assert!(!env.contains("ORIGINAL=1"));
}

#[test]
fn test_pull_writes_to_custom_output() {
    let t = Test::signed_in("dev");
    t.write_file("app.env.tpl", SAMPLE_TEMPLATE);
    t.set_inject(RESOLVED);

    assert_success(&t.pull("app.env.tpl", &["--force", "--output", "local.env"]));
    assert!(t.has_file("local.env"));
    assert!(!t.has_file("app.env"));
}

#[test]
fn test_pull_signs_in_when_unauthenticated() {
    let t = Test::new();
    t.write_file("app.env.tpl", SAMPLE_TEMPLATE);
    t.set_inject(RESOLVED);

    let output = t.pull("app.env.tpl", &["--force"]);
    assert_success(&output);
    assert!(t.provider_calls().iter().any(|c| c.starts_with("signin")));
}

#[test]
fn test_pull_dry_run_never_resolves_secrets() {
    let t = Test::signed_in("dev");
    t.write_file("app.env.tpl", SAMPLE_TEMPLATE);
    t.set_inject(RESOLVED);

    let output = t.pull("app.env.tpl", &["--dry-run"]);
    assert_success(&output);
    assert_stdout_contains(&output, "would resolve 2 references");

    assert!(!t
        .provider_calls()
        .iter()
        .any(|c| c.starts_with("inject")));
    assert!(!t.has_file("app.env"));
}
