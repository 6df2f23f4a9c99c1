//! External drawing conversion
//!
//! Gerber files go through `gerbv` to PDF, PDF through `pstoedit` to PIC,
//! and PIC is read into strokes. The external tools are reached through
//! [`ProcessRunner`] so that arguments are passed as a list, never through a
//! shell, and so tests can substitute a fake.

use std::path::{Path, PathBuf};
use std::process::Command;
use stencilcut_camtools::read_pic_file;
use stencilcut_core::{ConversionError, Stroke};
use tempfile::TempDir;
use tracing::{debug, info};

pub const GERBV: &str = "gerbv";
pub const PSTOEDIT: &str = "pstoedit";

/// Captured result of an external program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub success: bool,
    /// Exit code, if the program exited normally
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Runs external programs
pub trait ProcessRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<ProcessOutput, ConversionError>;
}

/// Runs programs with [`std::process::Command`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<ProcessOutput, ConversionError> {
        debug!("Running {} {:?}", program, args);
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| ConversionError::Launch {
                program: program.to_string(),
                reason: e.to_string(),
            })?;

        Ok(ProcessOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Input kinds, by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Pic,
    Pdf,
    Gerber,
}

impl InputKind {
    pub fn of(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("pic") => Self::Pic,
            Some("pdf") => Self::Pdf,
            _ => Self::Gerber,
        }
    }
}

/// Turns an input drawing into strokes
pub struct Converter<R: ProcessRunner = SystemRunner> {
    runner: R,
}

impl Converter<SystemRunner> {
    pub fn new() -> Self {
        Self::with_runner(SystemRunner)
    }
}

impl Default for Converter<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ProcessRunner> Converter<R> {
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    /// Convert `input` and read the resulting strokes.
    ///
    /// Intermediate files live in a temporary directory removed on return.
    pub fn strokes(&self, input: &Path) -> Result<Vec<Stroke>, ConversionError> {
        let kind = InputKind::of(input);
        if kind == InputKind::Pic {
            return read_pic_file(input);
        }

        let workdir = TempDir::new().map_err(|e| ConversionError::Read {
            path: std::env::temp_dir(),
            reason: e.to_string(),
        })?;
        let pic = self.to_pic(input, kind, workdir.path())?;
        let strokes = read_pic_file(&pic)?;
        info!("Extracted {} strokes from {}", strokes.len(), input.display());
        Ok(strokes)
    }

    /// Run the converters for `kind`, returning the PIC file written in `workdir`
    pub fn to_pic(
        &self,
        input: &Path,
        kind: InputKind,
        workdir: &Path,
    ) -> Result<PathBuf, ConversionError> {
        let pdf = match kind {
            InputKind::Pic => return Ok(input.to_path_buf()),
            InputKind::Pdf => input.to_path_buf(),
            InputKind::Gerber => {
                let pdf = workdir.join("drawing.pdf");
                self.invoke(
                    GERBV,
                    vec![
                        "--export=pdf".to_string(),
                        format!("--output={}", pdf.display()),
                        "--border=20".to_string(),
                        input.display().to_string(),
                    ],
                    &pdf,
                )?;
                pdf
            }
        };

        let pic = workdir.join("drawing.pic");
        self.invoke(
            PSTOEDIT,
            vec![
                "-f".to_string(),
                "pic".to_string(),
                pdf.display().to_string(),
                pic.display().to_string(),
            ],
            &pic,
        )?;
        Ok(pic)
    }

    fn invoke(
        &self,
        program: &str,
        args: Vec<String>,
        expected: &Path,
    ) -> Result<(), ConversionError> {
        let output = self.runner.run(program, &args)?;
        if !output.success {
            return Err(ConversionError::ExitStatus {
                program: program.to_string(),
                status: output
                    .code
                    .map_or_else(|| "terminated by signal".to_string(), |c| c.to_string()),
                stderr: output.stderr.trim().to_string(),
            });
        }
        if !expected.is_file() {
            return Err(ConversionError::MissingOutput {
                program: program.to_string(),
                path: expected.to_path_buf(),
            });
        }
        Ok(())
    }
}
