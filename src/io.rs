use std::io::{BufRead, IsTerminal, Write};
use std::path::Path;

use crate::error::CliError;

pub async fn read_file(path: &Path) -> Result<Vec<u8>, CliError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| CliError::io(path, source))
}

pub async fn write_file(path: &Path, data: &[u8]) -> Result<(), CliError> {
    tokio::fs::write(path, data)
        .await
        .map_err(|source| CliError::io(path, source))
}

/// A password file holds the password on its first line.
pub fn read_password_file(path: &Path) -> Result<String, CliError> {
    let data = std::fs::read_to_string(path).map_err(|source| CliError::io(path, source))?;
    Ok(data.lines().next().unwrap_or_default().to_string())
}

pub fn prompt_line(label: &str) -> Result<String, CliError> {
    let mut stderr = std::io::stderr();
    write!(stderr, "{label}").map_err(CliError::Output)?;
    stderr.flush().map_err(CliError::Output)?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|source| CliError::io("<stdin>", source))?;
    Ok(line.trim().to_string())
}

pub fn prompt_password(label: &str) -> Result<String, CliError> {
    rpassword::prompt_password(label).map_err(|source| CliError::io("<tty>", source))
}

/// Ask before a destructive action. `--no-prompt` skips the question; a
/// non-interactive stdin without it is refused.
pub fn confirm(question: &str, no_prompt: bool) -> Result<bool, CliError> {
    if no_prompt {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::usage(
            "refusing to prompt on a non-interactive terminal; pass --no-prompt",
        ));
    }
    let answer = prompt_line(&format!("{question} [y/N]: "))?;
    Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Split `NAME=VALUE`; the value may itself contain `=`.
pub fn split_pair(raw: &str, flag: &str) -> Result<(String, String), CliError> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(CliError::usage(format!(
            "--{flag} expects NAME=VALUE, got `{raw}`"
        ))),
    }
}

/// Split a comma-separated list where `\,` stands for a literal comma.
#[must_use]
pub fn split_escaped(raw: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&',') => {
                current.push(',');
                chars.next();
            }
            ',' => values.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    values.push(current);
    values
}
