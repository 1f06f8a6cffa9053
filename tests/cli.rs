use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn arctic_dock_cmd() -> Command {
    Command::cargo_bin("arctic-dock").expect("binary exists")
}

#[test]
fn help_prints_usage() {
    arctic_dock_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nord palette dock"))
        .stdout(predicate::str::contains("--print-palette"));
}

#[test]
fn version_includes_package_version() {
    arctic_dock_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn print_palette_defaults_to_html_hex() {
    let assert = arctic_dock_cmd()
        .env_remove("DISPLAY")
        .arg("--print-palette")
        .assert()
        .success()
        .stdout(predicate::str::contains("nord0\t#2E3440\n"))
        .stdout(predicate::str::contains("nord15\t#B48EAD\n"));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.lines().count(), 16);
}

#[test]
fn print_palette_honors_format() {
    arctic_dock_cmd()
        .args(["--print-palette", "--format", "css-rgb"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nord10\trgb(94, 129, 172);"));
}

#[test]
fn unknown_format_is_rejected() {
    arctic_dock_cmd()
        .args(["--print-palette", "--format", "cmyk"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown color format"));
}

#[test]
fn format_requires_print_palette() {
    arctic_dock_cmd()
        .args(["--format", "hsl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "required arguments were not provided",
        ));
}

#[test]
fn dock_fails_without_display() {
    let temp = TempDir::new().unwrap();

    arctic_dock_cmd()
        .env_remove("DISPLAY")
        .env("XDG_CONFIG_HOME", temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to open display"));
}

#[test]
fn invalid_config_file_is_reported() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "[dock]\npadding = \"wide\"\n").unwrap();

    arctic_dock_cmd()
        .env_remove("DISPLAY")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn schema_dump_lists_config_sections() {
    Command::cargo_bin("dump_config_schema")
        .expect("binary exists")
        .assert()
        .success()
        .stdout(predicate::str::contains("height_margin"))
        .stdout(predicate::str::contains("item_padding"));
}
