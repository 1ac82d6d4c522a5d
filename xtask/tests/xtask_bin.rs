use std::process::Command;

fn xtask(arg: &str) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_xtask"))
        .arg(arg)
        .output()
        .expect("run xtask")
}

#[test]
fn xtask_help_runs() {
    let output = xtask("help");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("xtask commands"));
}

#[test]
fn print_schema_ids_lists_every_schema() {
    let output = xtask("print-schema-ids");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for id in [
        "cloudscore.report.v1",
        "cloudscore.config.v1",
        "cloudscore.catalog.v1",
        "cloudscore.inventory.v1",
    ] {
        assert!(stdout.contains(id), "missing {id}");
    }
}

#[test]
fn fixtures_conform_to_schemas() {
    let output = xtask("conform");
    assert!(
        output.status.success(),
        "conform failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn unknown_command_fails() {
    assert!(!xtask("nope").status.success());
}
