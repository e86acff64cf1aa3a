//! Launcher
//!
//! Hands an application's `Exec` line to the shell and returns immediately.
//! The started program is backgrounded by the shell, so its lifetime is not
//! tied to the launcher and nothing about it is tracked.

use crate::error::{FuzzMenuError, Result};
use crate::logging;
use crate::registry::Application;
use regex::{Captures, Regex};
use std::process::{Command, Stdio};
use std::sync::OnceLock;

/// Starts applications
pub trait Launcher {
    fn launch(&self, app: &Application) -> Result<()>;
}

/// Runs `sh -c "<exec> &"`
#[derive(Debug, Clone)]
pub struct ShellLauncher {
    shell: String,
}

impl Default for ShellLauncher {
    fn default() -> Self {
        Self {
            shell: "/bin/sh".to_string(),
        }
    }
}

impl ShellLauncher {
    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl Launcher for ShellLauncher {
    fn launch(&self, app: &Application) -> Result<()> {
        let line = command_line(app);
        logging::log_launch(&app.name, &line);

        if line.is_empty() {
            logging::warn("LAUNCH", &format!("'{}' has no Exec line", app.filename));
            return Ok(());
        }

        // The shell backgrounds the program and exits right away, so waiting
        // on it only reaps the shell itself.
        let status = Command::new(&self.shell)
            .arg("-c")
            .arg(format!("{} &", line))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| FuzzMenuError::LaunchError(app.name.clone(), e))?;

        if !status.success() {
            logging::warn("LAUNCH", &format!("shell exited with {} for '{}'", status, line));
        }
        Ok(())
    }
}

fn field_code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"%(.)").expect("field code pattern is valid"))
}

/// The `Exec` line with desktop-entry field codes expanded or removed.
///
/// `%%` becomes `%`, `%i` becomes `--icon <Icon>`, file and URL codes are
/// dropped since the launcher never passes arguments.
pub fn command_line(app: &Application) -> String {
    let expanded = field_code_regex().replace_all(&app.exec, |caps: &Captures| {
        match &caps[1] {
            "%" => "%".to_string(),
            "i" if !app.icon.is_empty() => format!("--icon {}", app.icon),
            "f" | "F" | "u" | "U" | "d" | "D" | "n" | "N" | "i" | "c" | "k" | "v" | "m" => {
                String::new()
            }
            _ => caps[0].to_string(),
        }
    });
    expanded.trim().to_string()
}
