//! Line-oriented terminal helpers shared by the login gate and the menu.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// ANSI sequence: clear screen, cursor to top-left.
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

/// Print a prompt and read one line without its line ending.
///
/// Returns `None` at end of input. Bytes that are not valid UTF-8 are
/// replaced rather than treated as a read failure.
pub fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> Result<Option<String>> {
    write!(output, "{}", label)?;
    output.flush()?;

    let mut raw = Vec::new();
    let read = input
        .read_until(b'\n', &mut raw)
        .context("Failed to read from terminal")?;
    if read == 0 {
        return Ok(None);
    }

    let mut line = String::from_utf8_lossy(&raw).into_owned();
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

pub fn clear_screen<W: Write>(output: &mut W) -> Result<()> {
    write!(output, "{}", CLEAR_SCREEN)?;
    output.flush()?;
    Ok(())
}
