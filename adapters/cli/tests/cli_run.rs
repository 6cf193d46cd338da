use std::{fs, path::PathBuf, process::Command};

const SMALL_MAP: &str = "\
C - 3 - 4
M - 1 - 0
M - 2 - 1
T - 0 - 3 - 2
T - 1 - 3 - 3
A - Lara - 1 - 1 - S - AADADAGGA
";

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("treasure-quest-{name}-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("scratch directory is created");
    dir
}

#[test]
fn scripted_run_writes_final_state() {
    let dir = scratch_dir("scripted");
    let scenario = dir.join("map.txt");
    let output = dir.join("results.txt");
    fs::write(&scenario, SMALL_MAP).expect("scenario is written");

    let result = Command::new(env!("CARGO_BIN_EXE_treasure-quest"))
        .arg("--file")
        .arg(&scenario)
        .arg("--output")
        .arg(&output)
        .env("RUST_LOG", "warn")
        .output()
        .expect("binary runs");

    assert!(result.status.success(), "{result:?}");
    let expected = "C - 3 - 4\nM - 1 - 0\nM - 2 - 1\nT - 1 - 3 - 2\nA - Lara - 0 - 3 - S - 3\n";
    assert_eq!(fs::read_to_string(&output).expect("results exist"), expected);
    assert_eq!(String::from_utf8_lossy(&result.stdout), expected);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn random_run_writes_replayable_initial_state() {
    let dir = scratch_dir("random");
    let output = dir.join("results.txt");
    let initial = dir.join("initial.txt");

    let result = Command::new(env!("CARGO_BIN_EXE_treasure-quest"))
        .args(["--random", "--seed", "3", "--turns", "25", "--format", "json"])
        .arg("--output")
        .arg(&output)
        .arg("--initial-state")
        .arg(&initial)
        .env("RUST_LOG", "warn")
        .output()
        .expect("binary runs");
    assert!(result.status.success(), "{result:?}");
    assert!(String::from_utf8_lossy(&result.stdout).contains("\"adventurers\""));

    let replay_output = dir.join("replay.txt");
    let replay = Command::new(env!("CARGO_BIN_EXE_treasure-quest"))
        .arg("--file")
        .arg(&initial)
        .arg("--output")
        .arg(&replay_output)
        .env("RUST_LOG", "warn")
        .output()
        .expect("binary runs");
    assert!(replay.status.success(), "{replay:?}");

    assert_eq!(
        fs::read_to_string(&replay_output).expect("replay results exist"),
        fs::read_to_string(&output).expect("results exist")
    );

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn unknown_record_fails_with_line_number() {
    let dir = scratch_dir("invalid");
    let scenario = dir.join("map.txt");
    fs::write(&scenario, "C - 3 - 4\nZ - 1 - 1\n").expect("scenario is written");

    let result = Command::new(env!("CARGO_BIN_EXE_treasure-quest"))
        .arg("--file")
        .arg(&scenario)
        .arg("--output")
        .arg(dir.join("results.txt"))
        .output()
        .expect("binary runs");

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("line 2"));

    let _ = fs::remove_dir_all(dir);
}
