//! Interactive and scripted front ends over a [`CommandExecutor`].

use crate::executor::CommandExecutor;
use std::error::Error;
use std::io::{self, Write};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Clone, Copy)]
pub struct OutputHandlers {
    pub out: fn(&str),
    pub err: fn(&str),
}

pub struct ReplOptions<'a> {
    pub banner_lines: &'a [&'a str],
    pub exit_commands: &'a [&'a str],
    pub handle_ctrl_c: bool,
}

/// Runs every command in a script, stopping at the first failure.
/// Blank lines and lines starting with `#` are skipped.
pub async fn run_file(
    executor: &mut CommandExecutor,
    output: OutputHandlers,
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let content = tokio::fs::read_to_string(path).await?;
    for (number, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match executor.execute_line(trimmed).await {
            Ok(result) => (output.out)(&result.output),
            Err(err) => {
                let message = format!("Error on line {} '{}': {}", number + 1, trimmed, err);
                (output.err)(&message);
                return Err(io::Error::other(message).into());
            }
        }
    }
    Ok(())
}

/// Possible outcomes from reading a single REPL line.
enum ReadLineResult {
    /// A non-empty input line to process.
    Input(String),
    /// Empty line; re-prompt.
    Skip,
    /// EOF, Ctrl-C or an exit command.
    Exit,
    /// I/O error while reading.
    Error(io::Error),
}

fn classify_line(
    result: Result<Option<String>, io::Error>,
    exit_commands: &[&str],
) -> ReadLineResult {
    match result {
        Ok(Some(input)) => {
            let trimmed = input.trim();
            if trimmed.is_empty() {
                ReadLineResult::Skip
            } else if exit_commands.contains(&trimmed) {
                ReadLineResult::Exit
            } else {
                ReadLineResult::Input(trimmed.to_string())
            }
        }
        Ok(None) => ReadLineResult::Exit,
        Err(e) => ReadLineResult::Error(e),
    }
}

async fn prompt(executor: &CommandExecutor) -> String {
    match executor.pipeline().gateway().current_user().await {
        Some(user) => format!("glossa@{user}> "),
        None => "glossa> ".to_string(),
    }
}

pub async fn run_repl(
    executor: &mut CommandExecutor,
    output: OutputHandlers,
    options: ReplOptions<'_>,
) -> Result<(), Box<dyn Error>> {
    for line in options.banner_lines {
        (output.out)(line);
    }

    let mut reader = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = io::stdout();

    loop {
        print!("{}", prompt(executor).await);
        stdout.flush()?;

        let read = if options.handle_ctrl_c {
            tokio::select! {
                line = reader.next_line() => classify_line(line, options.exit_commands),
                _ = tokio::signal::ctrl_c() => ReadLineResult::Exit,
            }
        } else {
            classify_line(reader.next_line().await, options.exit_commands)
        };

        match read {
            ReadLineResult::Input(line) => match executor.execute_line(&line).await {
                Ok(result) => (output.out)(&result.output),
                Err(err) => (output.err)(&format!("Error: {}", err)),
            },
            ReadLineResult::Skip => continue,
            ReadLineResult::Exit => break,
            ReadLineResult::Error(e) => return Err(e.into()),
        }
    }
    Ok(())
}
