//! Driver binary discovery
//!
//! Locates a WebDriver server binary when the caller does not hand over an
//! explicit path.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Locates the binary called `name` on this machine.
///
/// The search order:
/// 1. The environment variable named by `env_override`, when set and
///    pointing at an existing file (runtime override, useful on NixOS-style
///    systems where nothing lands in the conventional locations).
/// 2. `which <name>` (`where` on windows), first line of output.
/// 3. `extra_locations` as given, then a fixed set of common install
///    directories joined with the platform binary name.
///
/// # Errors
///
/// Returns [`Error::ExecutableNotFound`] when every source comes up empty.
pub fn find_executable(name: &str, env_override: &str, extra_locations: &[&str]) -> Result<PathBuf> {
    if let Ok(path) = std::env::var(env_override) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Ok(path);
        }
    }

    if let Some(path) = find_in_path(name) {
        return Ok(path);
    }

    for location in extra_locations {
        let path = PathBuf::from(location);
        if path.exists() {
            return Ok(path);
        }
    }

    for dir in common_directories() {
        let path = Path::new(dir).join(binary_name(name));
        if path.exists() {
            return Ok(path);
        }
    }

    Err(Error::ExecutableNotFound {
        name: name.to_string(),
    })
}

fn find_in_path(name: &str) -> Option<PathBuf> {
    #[cfg(not(windows))]
    let which_cmd = "which";
    #[cfg(windows)]
    let which_cmd = "where";

    let output = Command::new(which_cmd)
        .arg(name)
        .stderr(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first = stdout.lines().next()?.trim();
    if first.is_empty() {
        return None;
    }

    let path = PathBuf::from(first);
    path.exists().then_some(path)
}

#[cfg(not(windows))]
fn common_directories() -> &'static [&'static str] {
    &[
        "/usr/local/bin",
        "/usr/bin",
        "/opt/homebrew/bin",
        "/opt/local/bin",
    ]
}

#[cfg(windows)]
fn common_directories() -> &'static [&'static str] {
    &["C:\\WebDriver\\bin"]
}

fn binary_name(name: &str) -> String {
    if cfg!(windows) {
        format!("{name}.exe")
    } else {
        name.to_string()
    }
}
