//! End-to-end tests of the `api-toolkit` binary

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command running inside `dir` with an empty explicit config file
fn toolkit_in(dir: &TempDir) -> Command {
    let config = dir.path().join("api-toolkit.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }

    let mut cmd = Command::cargo_bin("api-toolkit").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config);
    cmd
}

/// Position of the table row whose first cell is `kind`
fn row_position(stdout: &str, kind: &str) -> Option<usize> {
    stdout.find(&format!("│ {kind} "))
}

#[test]
fn cli_shows_help() {
    Command::cargo_bin("api-toolkit")
        .unwrap()
        .args(["generate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--soft-delete"))
        .stdout(predicate::str::contains("--request"))
        .stdout(predicate::str::contains("--group"));
}

#[test]
fn cli_model_with_schema() {
    let dir = TempDir::new().unwrap();
    let output = toolkit_in(&dir)
        .args(["generate", "post", "title:string,published:boolean"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Here is your schema :"))
        .stdout(predicate::str::contains("Generated Files :"))
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();

    let title = stdout.find("title").unwrap();
    let published = stdout.find("published").unwrap();
    assert!(title < published);
    assert!(stdout.contains("boolean"));

    assert!(row_position(&stdout, "model").is_some());
    assert!(row_position(&stdout, "migration").is_none());
    assert!(dir.path().join("app/Models/Post.php").is_file());
}

#[test]
fn cli_reserved_name_fails() {
    let dir = TempDir::new().unwrap();
    toolkit_in(&dir)
        .args(["generate", "class"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Here is your schema").not())
        .stderr(predicate::str::contains(
            "error: The name \"class\" is reserved by PHP.",
        ));
}

#[test]
fn cli_validates_before_loading_stubs() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("stubs")).unwrap();
    fs::write(dir.path().join("stubs/model.stub"), "{% if %}\n").unwrap();
    fs::write(dir.path().join("api-toolkit.toml"), "stubs_dir = \"stubs\"\n").unwrap();

    toolkit_in(&dir)
        .args(["generate", "class"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "error: The name \"class\" is reserved by PHP.",
        ))
        .stderr(predicate::str::contains("Failed to load stubs").not());

    toolkit_in(&dir)
        .args(["generate", "post"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load stubs"));
    assert!(!dir.path().join("app").exists());
}

#[test]
fn cli_all_follows_registry_order() {
    let dir = TempDir::new().unwrap();
    let output = toolkit_in(&dir)
        .args(["generate", "post", "title:string", "--all"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();

    let positions: Vec<usize> = [
        "model",
        "migration",
        "factory",
        "seeder",
        "filter",
        "create-request",
        "update-request",
        "resource",
        "controller",
        "test",
        "routes",
    ]
    .iter()
    .map(|kind| row_position(&stdout, kind).unwrap_or_else(|| panic!("{kind} missing")))
    .collect();

    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(row_position(&stdout, "soft-delete").is_none());
}

#[test]
fn cli_request_only() {
    let dir = TempDir::new().unwrap();
    let output = toolkit_in(&dir)
        .args(["generate", "post", "-R"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();

    assert!(row_position(&stdout, "model").is_some());
    assert!(row_position(&stdout, "create-request").is_some());
    assert!(row_position(&stdout, "update-request").is_some());
    for kind in ["migration", "controller", "resource", "routes"] {
        assert!(row_position(&stdout, kind).is_none(), "{kind} unexpected");
    }
}

#[test]
fn cli_bogus_group_fails() {
    let dir = TempDir::new().unwrap();
    toolkit_in(&dir)
        .args(["generate", "post", "--all", "-g", "bogus"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "The path group you entered is not valid",
        ));
    assert!(!dir.path().join("app").exists());
}

#[test]
fn cli_schema_error_is_one_line() {
    let dir = TempDir::new().unwrap();
    toolkit_in(&dir)
        .args(["generate", "post", "title:varchar"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid schema: Unknown type 'varchar'"));
}

#[test]
fn cli_force_overwrites() {
    let dir = TempDir::new().unwrap();
    toolkit_in(&dir).args(["generate", "post"]).assert().success();

    toolkit_in(&dir)
        .args(["generate", "post"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to generate model"))
        .stderr(predicate::str::contains("already exists"));

    toolkit_in(&dir)
        .args(["generate", "post", "--force"])
        .assert()
        .success();
}

#[test]
fn cli_group_from_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("api-toolkit.toml"),
        "[groups.blog]\nplugin_path = \"plugins/acme/blog\"\nnamespace = \"Acme\\\\Blog\"\n",
    )
    .unwrap();

    toolkit_in(&dir)
        .args(["generate", "post", "-g", "blog"])
        .assert()
        .success();

    let model =
        fs::read_to_string(dir.path().join("plugins/acme/blog/app/Models/Post.php")).unwrap();
    assert!(model.contains("namespace Acme\\Blog\\Models;"));
}

#[test]
fn cli_missing_config_file_fails() {
    Command::cargo_bin("api-toolkit")
        .unwrap()
        .args(["--config", "/nonexistent/api-toolkit.toml", "generate", "post"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}
