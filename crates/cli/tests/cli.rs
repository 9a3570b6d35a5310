use assert_cmd::Command;

fn courselib() -> Command {
    Command::cargo_bin("courselib").unwrap()
}

#[test]
fn help_lists_subcommands() {
    let output = courselib().arg("--help").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("routes"));
    assert!(stdout.contains("openapi"));
}

#[test]
fn routes_prints_mount_paths() {
    let output = courselib().arg("routes").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "authors\t/api/authors",
            "courses\t/api/authors/{author_id}/courses",
            "authorcollections\t/api/authorcollections",
        ]
    );
}

#[test]
fn openapi_prints_merged_document() {
    let output = courselib().arg("openapi").output().unwrap();
    assert!(output.status.success());

    let document: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(document["openapi"], "3.1.0");
    assert!(document["paths"]["/api/authors"].is_object());
    assert!(document["paths"]["/api/authorcollections/{ids}"].is_object());
    assert!(document["components"]["schemas"]["Course"].is_object());
}

#[test]
fn unknown_subcommand_fails() {
    let output = courselib().arg("migrate").output().unwrap();
    assert!(!output.status.success());
}
