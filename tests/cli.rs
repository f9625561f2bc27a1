use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `redlist` with a clean configuration: no key in the environment, and the only
/// `.env` candidate is a file that does not exist.
fn redlist(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("redlist").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("IUCN_API_KEY")
        .env_remove("IUCN_API_URL")
        .env_remove("RUST_LOG")
        .env("IUCN_ENV_FILE", dir.path().join("absent.env"));
    cmd
}

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("redlist").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("redlist"))
        .stdout(predicate::str::contains("lookup"));
}

#[test]
fn missing_key_is_reported_before_lookup() {
    let dir = TempDir::new().unwrap();
    redlist(&dir)
        .args(["lookup", "Panthera leo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration error"))
        .stderr(predicate::str::contains("IUCN_API_KEY"))
        .stdout(predicate::str::contains("Species:").not());
}

#[test]
fn missing_key_stops_prompt_before_reading_input() {
    let dir = TempDir::new().unwrap();
    redlist(&dir)
        .write_stdin("Panthera leo\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("species>").not());
}

#[test]
fn blank_species_is_invalid_input() {
    let dir = TempDir::new().unwrap();
    // The base URL points at a closed port; the lookup must fail before reaching it.
    redlist(&dir)
        .env("IUCN_API_KEY", "dummy")
        .env("IUCN_API_URL", "http://127.0.0.1:9")
        .args(["lookup", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid input"));
}

#[test]
fn key_from_env_file_is_accepted() {
    let dir = TempDir::new().unwrap();
    let env_file = dir.path().join("creds.env");
    std::fs::write(&env_file, "IUCN_API_KEY=from-file\n").unwrap();

    redlist(&dir)
        .env("IUCN_ENV_FILE", &env_file)
        .write_stdin(":quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("species>"));
}

#[test]
fn prompt_reprompts_after_blank_input_and_prints_stats() {
    let dir = TempDir::new().unwrap();
    redlist(&dir)
        .args(["--api-key", "dummy", "prompt"])
        .write_stdin("\n   \n:stats\n:quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Please enter a species name.").count(2))
        .stdout(predicate::str::contains("0 species looked up"));
}

#[test]
fn prompt_ends_on_eof_and_saves_empty_session() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("session.json");
    redlist(&dir)
        .args(["--api-key", "dummy", "--out"])
        .arg(&out)
        .write_stdin("")
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved 0 records"));

    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert!(v.as_array().unwrap().is_empty());
}

// Live test (opt-in): cargo test --features online
#[cfg(feature = "online")]
#[test]
fn lookup_online_lion() {
    let mut cmd = Command::cargo_bin("redlist").unwrap();
    cmd.args(["lookup", "Panthera leo", "--json"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("conservationStatus"));
}
