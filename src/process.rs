use std::io::Write;
use std::process::{Command, Output, Stdio};

use crate::error::{TvError, TvResult};

#[must_use]
pub fn command_exists(program: &str) -> bool {
    which::which(program).is_ok()
}

/// Run a subprocess to completion, capturing stdout and stderr.
///
/// Calls block until the child exits; collaborators are trusted to
/// terminate on their own and a hung child hangs the caller.
pub fn run_command(program: &str, args: &[String]) -> TvResult<Output> {
    run_command_with_stdin(program, args, None)
}

/// Like [`run_command`], optionally feeding `stdin_data` to the child's
/// standard input (used for translators that read text from stdin).
pub fn run_command_with_stdin(
    program: &str,
    args: &[String],
    stdin_data: Option<&[u8]>,
) -> TvResult<Output> {
    if !command_exists(program) {
        return Err(TvError::CommandMissing {
            command: program.to_owned(),
        });
    }

    let rendered = format!("{} {}", program, args.join(" "));
    let mut command = Command::new(program);
    command.args(args);
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());

    let output = match stdin_data {
        Some(data) => {
            command.stdin(Stdio::piped());
            let mut child = command.spawn()?;
            {
                let mut stdin = child
                    .stdin
                    .take()
                    .ok_or_else(|| TvError::Io(std::io::Error::other("child stdin unavailable")))?;
                stdin.write_all(data)?;
            }
            child.wait_with_output()?
        }
        None => {
            command.stdin(Stdio::null());
            command.output()?
        }
    };

    validate_command_output(&rendered, output)
}

fn validate_command_output(rendered: &str, output: Output) -> TvResult<Output> {
    if output.status.success() {
        return Ok(output);
    }

    let status = output.status.code().unwrap_or(-1);
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    Err(TvError::from_command_failure(
        rendered.to_owned(),
        status,
        stderr,
    ))
}
