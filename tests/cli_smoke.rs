use assert_cmd::Command;

#[test]
fn help_lists_the_options() {
    let output = Command::cargo_bin("kanatype")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();
    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    for flag in [
        "--category",
        "--length",
        "--prompt",
        "--topic",
        "--no-sound",
        "--hide-romaji",
        "--log-file",
    ] {
        assert!(help.contains(flag), "missing {flag}");
    }
}

#[test]
fn refuses_to_run_without_a_tty() {
    Command::cargo_bin("kanatype")
        .unwrap()
        .args(["-p", "すし"])
        .write_stdin("")
        .assert()
        .failure();
}

#[test]
fn rejects_prompts_that_cannot_be_typed() {
    let output = Command::cargo_bin("kanatype")
        .unwrap()
        .args(["-p", "未知"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot be typed"));
}

#[test]
fn rejects_topics_that_cannot_be_typed() {
    let output = Command::cargo_bin("kanatype")
        .unwrap()
        .args(["-c", "custom", "-t", "鬱"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot be typed"));
}
