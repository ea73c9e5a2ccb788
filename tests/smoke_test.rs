/// Smoke tests to verify the binary runs without panicking
use std::process::Command;

fn lsysart(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "--quiet", "--"])
        .args(args)
        .output()
        .expect("Failed to execute cargo run")
}

#[test]
fn binary_shows_help() {
    let output = lsysart(&["--help"]);

    assert!(
        output.status.success(),
        "Binary failed to run --help: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("lsysart"),
        "Help output should mention lsysart"
    );
}

#[test]
fn binary_shows_version() {
    let output = lsysart(&["--version"]);

    assert!(
        output.status.success(),
        "Binary failed to run --version: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn invalid_subcommand_fails_gracefully() {
    let output = lsysart(&["nonexistent-command"]);

    assert!(
        !output.status.success(),
        "Invalid subcommand should return error status"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("panicked at"),
        "Invalid subcommand should not cause panic"
    );
}

#[test]
fn print_renders_braille() {
    let output = lsysart(&["print", "--preset", "koch", "-W", "40", "-H", "12", "--plain"]);

    assert!(
        output.status.success(),
        "print failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 12);
    assert!(stdout.chars().any(|c| ('\u{2801}'..='\u{28FF}').contains(&c)));
    assert!(!stdout.contains('\x1b'), "--plain output should have no escapes");
}

#[test]
fn expand_prints_sequence() {
    let output = lsysart(&["expand", "--axiom", "F", "--rules", "F:F+F", "-n", "2"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "F+F+F+F");
}

#[test]
fn expand_stats_lists_generations() {
    let output = lsysart(&["expand", "--axiom", "F", "--rules", "F:FF", "-n", "3", "--stats"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec![
        "generation 0: 1 symbols",
        "generation 1: 2 symbols",
        "generation 2: 4 symbols",
        "generation 3: 8 symbols",
    ]);
}

#[test]
fn invalid_configuration_is_reported() {
    let output = lsysart(&["expand", "--length", "0"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Step length"), "unexpected stderr: {}", stderr);
    assert!(!stderr.contains("panicked at"));

    let output = lsysart(&["expand", "--preset", "teapot"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown preset"));
}

#[test]
fn symbol_budget_is_enforced() {
    let output = lsysart(&["expand", "--axiom", "F", "--rules", "F:FF", "-n", "40"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("limit"));
}

#[test]
fn presets_are_listed() {
    let output = lsysart(&["presets"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["plant", "koch", "dragon", "gosper"] {
        assert!(stdout.contains(name), "missing preset {}", name);
    }
}

#[test]
fn oversized_jitter_is_rejected() {
    for flag in ["--angle-jitter", "--length-jitter"] {
        let output = lsysart(&["print", "--preset", "koch", "-W", "20", "-H", "6", flag, "1e308"]);
        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Jitter"), "unexpected stderr: {}", stderr);
        assert!(!stderr.contains("panicked at"));
    }
}
