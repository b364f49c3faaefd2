use anyhow::{Context, Result, anyhow};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

type ClipboardCommand = (&'static str, &'static [&'static str]);

const UNIX_COMMANDS: &[ClipboardCommand] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

pub fn copy_text(text: &str) -> Result<()> {
    if cfg!(target_os = "macos") {
        return copy_with(&[("pbcopy", &[])], text);
    }
    if cfg!(target_os = "windows") {
        return copy_with(&[("clip", &[])], text);
    }
    copy_with(UNIX_COMMANDS, text)
}

/// A terminal has no native share target, so sharing copies the title and
/// body as one block.
pub fn share_content(title: &str, text: &str) -> Result<()> {
    copy_text(&share_block(title, text))
}

fn share_block(title: &str, text: &str) -> String {
    format!("{title}\n\n{text}")
}

fn copy_with(commands: &[ClipboardCommand], text: &str) -> Result<()> {
    for (cmd, args) in commands {
        match run_copy_command(cmd, args, text) {
            Ok(()) => return Ok(()),
            Err(err) => debug!(cmd, "clipboard command failed: {err:#}"),
        }
    }
    let tried: Vec<_> = commands.iter().map(|(cmd, _)| *cmd).collect();
    Err(anyhow!(
        "no clipboard command available (tried {})",
        tried.join(", ")
    ))
}

fn run_copy_command(cmd: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to start '{cmd}'"))?;
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };
    let status = child.wait()?;
    written.with_context(|| format!("failed to write to '{cmd}'"))?;
    if status.success() {
        Ok(())
    } else {
        Err(anyhow!("clipboard command '{}' failed", cmd))
    }
}
