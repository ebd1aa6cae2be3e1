use std::process::Command;

fn hawkdove() -> Command {
    Command::new(env!("CARGO_BIN_EXE_hawkdove"))
}

#[test]
fn init_then_sweep_writes_report() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("experiment.yaml");
    let report = dir.path().join("out/report.json");

    let status = hawkdove()
        .args(["init", "--path"])
        .arg(&config)
        .status()
        .expect("failed to run hawkdove init");
    assert!(status.success());
    assert!(config.exists());

    let output = hawkdove()
        .arg("--config")
        .arg(&config)
        .args([
            "sweep",
            "--size",
            "12",
            "--generations",
            "8",
            "--window",
            "4",
            "--beta",
            "0.9",
            "--beta",
            "2.0",
            "--tables",
            "--output",
        ])
        .arg(&report)
        .output()
        .expect("failed to run hawkdove sweep");
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("mean-field"));
    assert!(stdout.lines().next().unwrap().trim_end().ends_with("deviation"));
    assert_eq!(stdout.lines().count(), 3);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["window"], 4);
    assert_eq!(json["summaries"].as_array().unwrap().len(), 2);
    assert_eq!(json["tables"][0]["rows"].as_array().unwrap().len(), 4);
}

#[test]
fn init_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("experiment.yaml");
    std::fs::write(&config, "width: 5\n").unwrap();

    let status = hawkdove()
        .args(["init", "--path"])
        .arg(&config)
        .status()
        .unwrap();
    assert!(!status.success());
    assert_eq!(std::fs::read_to_string(&config).unwrap(), "width: 5\n");
}

#[test]
fn grid_prints_lattice_rows() {
    let output = hawkdove()
        .args([
            "grid",
            "--size",
            "6",
            "--generations",
            "3",
            "--window",
            "1",
            "--beta",
            "1.5",
            "--generation",
            "0",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let rows: Vec<&str> = stdout.lines().skip(1).collect();
    assert_eq!(rows.len(), 6);
    assert!(rows
        .iter()
        .all(|r| r.len() == 6 && r.chars().all(|c| c == 'H' || c == 'D')));
}

#[test]
fn empty_beta_list_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("experiment.yaml");
    std::fs::write(&config, "betas: []\n").unwrap();

    let status = hawkdove()
        .arg("--config")
        .arg(&config)
        .arg("sweep")
        .status()
        .unwrap();
    assert!(!status.success());
}
