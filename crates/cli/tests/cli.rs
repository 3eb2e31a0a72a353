use assert_cmd::Command;

#[test]
fn routes_command_prints_car_endpoints() {
    let output = Command::cargo_bin("rental")
        .unwrap()
        .arg("routes")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("GET     /api/cars\n"));
    assert!(stdout.contains("POST    /api/cars\n"));
    assert!(stdout.contains("DELETE  /api/cars/{id}"));
    assert!(stdout.contains("GET     /healthz"));
}

#[test]
fn unknown_environment_fails_startup() {
    Command::cargo_bin("rental")
        .unwrap()
        .env("RENTAL_ENV", "qa")
        .arg("routes")
        .assert()
        .failure();
}
