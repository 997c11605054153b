// src/system/notify.rs

//! Desktop notifications.

use log::{debug, warn};
use std::io;
use std::process::{Command as StdCommand, Stdio};

/// Builds the platform command that shows a desktop notification, if the
/// platform has one.
fn notification_command(title: &str, message: &str) -> Option<StdCommand> {
    if cfg!(target_os = "macos") {
        let script = format!(
            "display notification \"{}\" with title \"{}\"",
            escape_quotes(message),
            escape_quotes(title)
        );
        let mut command = StdCommand::new("osascript");
        command.arg("-e").arg(script);
        Some(command)
    } else if cfg!(target_os = "windows") {
        let mut command = StdCommand::new("powershell");
        command
            .arg("-Command")
            .arg("[System.Media.SystemSounds]::Beep.Play()");
        Some(command)
    } else if cfg!(unix) {
        let mut command = StdCommand::new("notify-send");
        command.arg(title).arg(message);
        Some(command)
    } else {
        None
    }
}

fn escape_quotes(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Shows a desktop notification.
///
/// Arguments are passed to the notifier directly, never through a shell.
///
/// # Errors
/// Returns the spawn error when the notifier is not installed. A notifier that
/// exits with a failure status is only logged.
pub fn send(title: &str, message: &str) -> io::Result<()> {
    let Some(mut command) = notification_command(title, message) else {
        debug!("No desktop notifier on this platform");
        return Ok(());
    };

    let status = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;
    if !status.success() {
        warn!("Notifier exited with {}", status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quotes_are_escaped() {
        assert_eq!(escape_quotes(r#"say "hi""#), r#"say \"hi\""#);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_uses_notify_send() {
        let command = notification_command("Build", "done").unwrap();
        assert_eq!(command.get_program(), "notify-send");
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, vec!["Build", "done"]);
    }
}
