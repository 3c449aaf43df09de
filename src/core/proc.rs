//! The fidx companion process module.
//!
//! The companion is an external metadata extractor (a Python script by default). This
//! module finds it, builds its argument list, runs it to completion and classifies the
//! result into a [Summary] or an [InvokeError].
//!
//! [invoke] blocks until the child exits and is meant to run on the process worker
//! (see core/worker.rs). Its output is captured whole: stdout first, then stderr.
//!
//! [summarize] is a best-effort parse of that output. It only decorates a success,
//! the exit status alone decides between success and failure.

use crate::config::CompanionConfig;
use crate::core::naming::{self, ExportFormat};

use thiserror::Error;

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Files that must ship with the companion.
pub const REQUIRED_FILES: &[&str] = &["file_metadata_extractor.py", "requirements.txt"];

/// Everything the wizard collected for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeRequest {
    pub directory: PathBuf,
    pub output_name: String,
    pub format: ExportFormat,
    pub debug: bool,
    pub label: String,
}

impl InvokeRequest {
    /// Full path the companion writes to.
    pub fn output_path(&self) -> PathBuf {
        naming::output_path(&self.directory, &self.output_name, self.format)
    }

    /// Arguments passed to the interpreter, script first.
    pub fn args(&self, script: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            script.into(),
            "--directory".into(),
            self.directory.clone().into(),
            "--output".into(),
            self.output_path().into(),
        ];
        if let Some(flag) = self.format.companion_flag() {
            args.push(flag.into());
        }
        if self.debug {
            args.push("--debug".into());
        }
        let label = self.label.trim();
        if !label.is_empty() {
            args.push("--litigant".into());
            args.push(label.into());
        }
        args
    }
}

/// What a successful run reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    files_processed: Option<u64>,
    saved_to: PathBuf,
    output: String,
}

impl Summary {
    /// Number of processed items, when the companion printed one.
    #[inline]
    pub fn files_processed(&self) -> Option<u64> {
        self.files_processed
    }

    #[inline]
    pub fn saved_to(&self) -> &Path {
        &self.saved_to
    }

    /// The captured output, verbatim.
    #[inline]
    pub fn output(&self) -> &str {
        &self.output
    }
}

/// Why a run failed.
///
/// Only strings and paths are kept so the error can be cloned into the UI state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvokeError {
    #[error("could not find {script} (searched: {})", join_paths(.searched))]
    CompanionNotFound {
        script: String,
        searched: Vec<PathBuf>,
    },
    #[error("interpreter '{interpreter}' is not installed or not in PATH")]
    InterpreterMissing { interpreter: String },
    #[error("failed to launch '{interpreter}': {message}")]
    Launch {
        interpreter: String,
        message: String,
    },
    #[error("companion {}\n{output}", describe_exit(.code))]
    NonZeroExit { code: Option<i32>, output: String },
}

impl InvokeError {
    /// Captured companion output, if the companion got to run.
    pub fn output(&self) -> Option<&str> {
        match self {
            InvokeError::NonZeroExit { output, .. } => Some(output),
            _ => None,
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with code {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

/// Locations tried for the companion script, in order.
///
/// The configured `script_path` comes first, then the directory of the running
/// executable, the working directory and its parent.
pub fn script_candidates(companion: &CompanionConfig) -> Vec<PathBuf> {
    let script = companion.script();
    let mut candidates = Vec::new();
    if let Some(path) = companion.script_path() {
        candidates.push(path.clone());
    }
    if let Ok(exe) = std::env::current_exe()
        && let Some(dir) = exe.parent()
    {
        candidates.push(dir.join(script));
    }
    candidates.push(PathBuf::from(script));
    candidates.push(Path::new("..").join(script));
    candidates
}

/// First candidate that is an existing file.
pub fn find_companion(script: &str, candidates: &[PathBuf]) -> Result<PathBuf, InvokeError> {
    candidates
        .iter()
        .find(|p| p.is_file())
        .cloned()
        .ok_or_else(|| InvokeError::CompanionNotFound {
            script: script.to_string(),
            searched: candidates.to_vec(),
        })
}

/// Runs the companion to completion.
pub fn invoke(
    request: &InvokeRequest,
    companion: &CompanionConfig,
) -> Result<Summary, InvokeError> {
    let script = find_companion(companion.script(), &script_candidates(companion))?;
    let interpreter = companion.interpreter();
    let program = which::which(interpreter).map_err(|_| InvokeError::InterpreterMissing {
        interpreter: interpreter.to_string(),
    })?;

    let args = request.args(&script);
    tracing::info!(
        interpreter = %program.display(),
        script = %script.display(),
        output = %request.output_path().display(),
        "launching companion"
    );

    let output = Command::new(&program)
        .args(&args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| launch_error(interpreter, e))?;

    let combined = combine_output(&output.stdout, &output.stderr);
    if !output.status.success() {
        tracing::warn!(code = ?output.status.code(), "companion failed");
        return Err(InvokeError::NonZeroExit {
            code: output.status.code(),
            output: combined,
        });
    }

    tracing::info!("companion finished");
    Ok(summarize(&combined, request.output_path()))
}

fn launch_error(interpreter: &str, e: io::Error) -> InvokeError {
    match e.kind() {
        io::ErrorKind::NotFound => InvokeError::InterpreterMissing {
            interpreter: interpreter.to_string(),
        },
        _ => InvokeError::Launch {
            interpreter: interpreter.to_string(),
            message: e.to_string(),
        },
    }
}

fn combine_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut combined = String::from_utf8_lossy(stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(stderr));
    combined
}

/// Extracts the saved path and the processed count from companion output.
///
/// Recognises "... saved to <path>" / "saved to: <path>" and lines holding "processed"
/// next to a number. Missing pieces fall back to `expected_path` and no count.
pub fn summarize(output: &str, expected_path: PathBuf) -> Summary {
    Summary {
        files_processed: parse_processed_count(output),
        saved_to: parse_saved_path(output).unwrap_or(expected_path),
        output: output.to_string(),
    }
}

fn parse_saved_path(output: &str) -> Option<PathBuf> {
    const MARKER: &str = "saved to";
    output.lines().find_map(|line| {
        // ascii lowering keeps byte offsets valid for the original line
        let idx = line.to_ascii_lowercase().find(MARKER)?;
        let rest = line[idx + MARKER.len()..]
            .trim_start_matches(':')
            .trim();
        (!rest.is_empty()).then(|| PathBuf::from(rest))
    })
}

fn parse_processed_count(output: &str) -> Option<u64> {
    output
        .lines()
        .filter(|line| line.to_ascii_lowercase().contains("processed"))
        .find_map(|line| {
            line.split_whitespace().find_map(|token| {
                token
                    .trim_matches(|c: char| !c.is_ascii_digit())
                    .parse::<u64>()
                    .ok()
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(format: ExportFormat, debug: bool, label: &str) -> InvokeRequest {
        InvokeRequest {
            directory: PathBuf::from("/data/case"),
            output_name: "index".into(),
            format,
            debug,
            label: label.into(),
        }
    }

    fn strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn minimal_arguments() {
        let args = strings(request(ExportFormat::Excel, false, "").args(Path::new("x.py")));
        assert_eq!(
            args,
            vec![
                "x.py",
                "--directory",
                "/data/case",
                "--output",
                "/data/case/index.xlsx"
            ]
        );
    }

    #[test]
    fn all_optional_arguments_in_order() {
        let args = strings(request(ExportFormat::Both, true, " ACME Corp ").args(Path::new("x.py")));
        assert_eq!(
            &args[4..],
            &[
                "/data/case/index.xlsx",
                "--csv",
                "--debug",
                "--litigant",
                "ACME Corp"
            ]
        );
        let csv = strings(request(ExportFormat::Csv, false, "").args(Path::new("x.py")));
        assert_eq!(&csv[4..], &["/data/case/index.csv", "--csv-only"]);
    }

    #[test]
    fn summarize_reads_path_and_count() {
        let out = "Scanning...\nProcessed 42 items from /data/case\nMetadata extracted and saved to /data/case/out.xlsx\n";
        let summary = summarize(out, PathBuf::from("/fallback.xlsx"));
        assert_eq!(summary.files_processed(), Some(42));
        assert_eq!(summary.saved_to(), Path::new("/data/case/out.xlsx"));
        assert_eq!(summary.output(), out);
    }

    #[test]
    fn summarize_falls_back_on_unknown_output() {
        let summary = summarize("done\n", PathBuf::from("/fallback.xlsx"));
        assert_eq!(summary.files_processed(), None);
        assert_eq!(summary.saved_to(), Path::new("/fallback.xlsx"));

        let summary = summarize("Saved to:   \n3 files processed", PathBuf::from("/f"));
        assert_eq!(summary.saved_to(), Path::new("/f"));
        assert_eq!(summary.files_processed(), Some(3));
    }

    #[test]
    fn missing_companion_lists_searched_locations() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let candidates = vec![dir.path().join("a.py"), dir.path().join("b.py")];
        let err = find_companion("a.py", &candidates).unwrap_err();
        match &err {
            InvokeError::CompanionNotFound { searched, .. } => assert_eq!(searched, &candidates),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("b.py"));
        Ok(())
    }

    #[test]
    fn configured_script_path_is_tried_first() {
        let companion = CompanionConfig::new("python3", Some(PathBuf::from("/opt/x.py")));
        let candidates = script_candidates(&companion);
        assert_eq!(candidates.first(), Some(&PathBuf::from("/opt/x.py")));
        assert_eq!(
            candidates.last(),
            Some(&Path::new("..").join("file_metadata_extractor.py"))
        );
    }

    #[test]
    fn exit_description() {
        let err = InvokeError::NonZeroExit {
            code: Some(2),
            output: "boom".into(),
        };
        assert_eq!(err.to_string(), "companion exited with code 2\nboom");
        assert_eq!(err.output(), Some("boom"));
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::fs;

        fn companion_script(dir: &Path, body: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
            let path = dir.join("file_metadata_extractor.py");
            fs::write(&path, body)?;
            Ok(path)
        }

        #[test]
        fn successful_run_is_summarized() -> Result<(), Box<dyn std::error::Error>> {
            let dir = tempfile::tempdir()?;
            let script = companion_script(
                dir.path(),
                "echo \"Processed 7 items from $2\"\necho \"Metadata extracted and saved to $4\"\n",
            )?;
            let companion = CompanionConfig::new("sh", Some(script));
            let req = InvokeRequest {
                directory: dir.path().to_path_buf(),
                ..request(ExportFormat::Csv, false, "")
            };

            let summary = invoke(&req, &companion)?;
            assert_eq!(summary.files_processed(), Some(7));
            assert_eq!(summary.saved_to(), dir.path().join("index.csv"));
            Ok(())
        }

        #[test]
        fn failing_run_keeps_output() -> Result<(), Box<dyn std::error::Error>> {
            let dir = tempfile::tempdir()?;
            let script = companion_script(
                dir.path(),
                "echo 'starting'\necho 'permission denied' >&2\nexit 1\n",
            )?;
            let companion = CompanionConfig::new("sh", Some(script));

            let err = invoke(&request(ExportFormat::Excel, false, ""), &companion).unwrap_err();
            match err {
                InvokeError::NonZeroExit { code, output } => {
                    assert_eq!(code, Some(1));
                    assert_eq!(output, "starting\npermission denied\n");
                }
                other => panic!("unexpected error: {other:?}"),
            }
            Ok(())
        }

        #[test]
        fn missing_interpreter_is_classified() -> Result<(), Box<dyn std::error::Error>> {
            let dir = tempfile::tempdir()?;
            let script = companion_script(dir.path(), "exit 0\n")?;
            let companion = CompanionConfig::new("fidx-no-such-interpreter-xyz", Some(script));

            let err = invoke(&request(ExportFormat::Excel, false, ""), &companion).unwrap_err();
            assert_eq!(
                err,
                InvokeError::InterpreterMissing {
                    interpreter: "fidx-no-such-interpreter-xyz".into()
                }
            );
            Ok(())
        }
    }
}
