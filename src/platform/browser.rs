//! Opening deep links in the default web browser.

use std::io;
use std::process::{Command, Stdio};

/// Spawn the platform URL opener detached from the TUI.
///
/// The child is not awaited; the dashboard keeps running whether or not
/// the browser comes up.
pub fn open_url(url: &str) -> io::Result<()> {
    let mut command = if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/c", "start", url]);
        c
    } else if cfg!(target_os = "macos") {
        let mut c = Command::new("open");
        c.arg(url);
        c
    } else {
        let mut c = Command::new("xdg-open");
        c.arg(url);
        c
    };

    command
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}
