mod args;

use std::fs;
use std::path::Path;
use std::process;

use anyhow::Context;
use colored::Colorize;

use error::Error;
use location::Source;
use plumb::format::{self, FormatError};

use args::Args;

/// Generate the code for a declaration file. A formatting failure still hands back the
/// unformatted code alongside the error
fn handle_input(args: &Args, file: &Path) -> Result<Option<String>, (Error, Option<String>)> {
    let input = fs::read_to_string(file).map_err(|e| (Error::from(e), None))?;

    let unit = plumb::load(&input, Source::Path(file)).map_err(|e| (e, None))?;
    let generated = match plumb::generate(&unit).map_err(|e| (e, None))? {
        Some(generated) => generated,
        None => return Ok(None),
    };

    match args.gofmt() {
        true => format::gofmt(generated)
            .map(Some)
            .map_err(|FormatError { error, unformatted }| (error, Some(unformatted))),
        false => Ok(Some(generated)),
    }
}

fn write_output(args: &Args, generated: &str) -> anyhow::Result<()> {
    if args.stdout() {
        print!("{generated}");
        return Ok(());
    }

    let output = args.output();
    fs::write(&output, generated)
        .with_context(|| format!("could not write generated code to {}", output.display()))?;

    eprintln!("{}: wrote {}", "plumb".green(), output.display());

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::handle();
    if args.debug() {
        error::log::enable();
    }

    match handle_input(&args, args.input()) {
        Ok(Some(generated)) => write_output(&args, &generated),
        Ok(None) => {
            eprintln!(
                "{}: no injectors found in {}",
                "note".black().on_white(),
                args.input().display()
            );
            Ok(())
        }
        Err((e, unformatted)) => {
            e.emit();
            if let Some(unformatted) = unformatted {
                write_output(&args, &unformatted)?;
            }

            process::exit(e.exit_code())
        }
    }
}
