use crate::error::{MixturaError, Result};
use crate::ui;
use std::io::Read;
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Lines of backend output kept in a diagnostic
const DIAGNOSTIC_LINES: usize = 6;

/// Execute a backend command with timeout (non-interactive, output captured)
pub(crate) fn run_command_with_timeout(
    provider: &str,
    argv: &[String],
    timeout: Duration,
) -> Result<Output> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| MixturaError::Other("empty backend command".to_string()))?;

    ui::command(argv);

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd
        .spawn()
        .map_err(|e| MixturaError::backend(provider, format!("failed to start {}: {}", program, e)))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| MixturaError::SystemCommandFailed {
            command: program.clone(),
            reason: "Failed to capture stdout".to_string(),
        })?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| MixturaError::SystemCommandFailed {
            command: program.clone(),
            reason: "Failed to capture stderr".to_string(),
        })?;

    let stdout_thread = thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = std::io::BufReader::new(stdout).read_to_end(&mut buf);
        buf
    });
    let stderr_thread = thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = std::io::BufReader::new(stderr).read_to_end(&mut buf);
        buf
    });

    let start = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    let _ = stdout_thread.join();
                    let _ = stderr_thread.join();
                    return Err(MixturaError::backend(
                        provider,
                        format!(
                            "{} timed out after {} seconds",
                            program,
                            timeout.as_secs()
                        ),
                    ));
                }
                thread::sleep(Duration::from_millis(50));
            }
            Err(e) => {
                return Err(MixturaError::SystemCommandFailed {
                    command: program.clone(),
                    reason: e.to_string(),
                });
            }
        }
    };

    let stdout = stdout_thread.join().unwrap_or_default();
    let stderr = stderr_thread.join().unwrap_or_default();

    Ok(Output {
        status,
        stdout,
        stderr,
    })
}

/// Run a mutating backend command and turn its result into a summary or a
/// `Backend` error. Non-zero exit, or stderr containing one of
/// `failure_markers`, counts as failure.
pub(crate) fn run_mutation(
    provider: &str,
    argv: &[String],
    timeout: Duration,
    failure_markers: &[&str],
) -> Result<String> {
    let output = run_command_with_timeout(provider, argv, timeout)?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    if ui::is_verbose() {
        for line in stdout.lines().chain(stderr.lines()) {
            ui::verbose(line);
        }
    }

    if !output.status.success() {
        let code = output
            .status
            .code()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string());
        return Err(MixturaError::backend(
            provider,
            format!("exit code {}: {}", code, diagnostic(&stderr, &stdout)),
        ));
    }

    if let Some(marker) = failure_markers.iter().find(|m| stderr.contains(**m)) {
        ui::verbose(&format!("{}: matched failure marker '{}'", provider, marker));
        return Err(MixturaError::backend(provider, diagnostic(&stderr, &stdout)));
    }

    Ok(last_line(&stdout).unwrap_or_else(|| "done".to_string()))
}

/// Run a read-only backend command and return stdout, or a `Backend` error
pub(crate) fn run_query(provider: &str, argv: &[String], timeout: Duration) -> Result<String> {
    let output = run_command_with_timeout(provider, argv, timeout)?;
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MixturaError::backend(provider, diagnostic(&stderr, &stdout)));
    }
    Ok(stdout)
}

/// Tail of the backend's complaint, preferring stderr
pub(crate) fn diagnostic(stderr: &str, stdout: &str) -> String {
    let source = if stderr.trim().is_empty() { stdout } else { stderr };
    let lines: Vec<&str> = source
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return "no diagnostic output".to_string();
    }
    let start = lines.len().saturating_sub(DIAGNOSTIC_LINES);
    lines[start..].join(" | ")
}

fn last_line(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .rfind(|l| !l.is_empty())
        .map(str::to_string)
}
