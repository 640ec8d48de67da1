//! Generated code is emitted with tabs and newlines only. Running it through `gofmt` aligns it
//! the way the rest of a Go code base is, but requires `gofmt` to be installed.

use std::io::Write;
use std::process::{Command, Stdio};

use error::{ErrKind, Error};

/// Formatting failed. The source is handed back untouched so that it can still be written
#[derive(Debug)]
pub struct FormatError {
    pub error: Error,
    pub unformatted: String,
}

fn formatting_error(msg: String) -> Error {
    Error::new(ErrKind::Formatting).with_msg(msg)
}

/// Pipe `source` through `program` and collect its output
fn pipe(program: &str, source: &str) -> Result<String, Error> {
    let mut child = Command::new(program)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| formatting_error(format!("could not run `{program}`: {e}")))?;

    // a formatter may exit before reading all of its input, so its status is checked first
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(source.as_bytes()),
        None => Ok(()),
    };

    let output = child.wait_with_output()?;
    if !output.status.success() {
        return Err(formatting_error(format!(
            "`{program}` failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    written?;

    String::from_utf8(output.stdout)
        .map_err(|_| formatting_error(format!("`{program}` produced invalid UTF-8")))
}

pub fn format_with(program: &str, source: String) -> Result<String, FormatError> {
    pipe(program, &source).map_err(|error| FormatError {
        error,
        unformatted: source,
    })
}

pub fn gofmt(source: String) -> Result<String, FormatError> {
    format_with("gofmt", source)
}
