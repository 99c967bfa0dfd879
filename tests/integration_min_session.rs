// Drives the compiled binary through a pseudo terminal, exercising the real
// event loop and crossterm input handling.
//
// Unix-only and ignored by default; run with
// `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn minimal_session_completes_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("kanatype");
    let cmd = format!("{} --no-sound -p すし", bin.display());

    let mut p = spawn(cmd)?;

    // let the app enter the alternate screen
    std::thread::sleep(Duration::from_millis(200));

    p.send("sushi")?;
    std::thread::sleep(Duration::from_millis(200));

    p.send("\x1b")?; // ESC

    p.expect(Eof)?;
    Ok(())
}
