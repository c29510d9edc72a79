//! External tools: the repository fetcher and the line-counting analyzer.
//!
//! The orchestrator only talks to the [`Toolchain`] trait, so tests can
//! substitute a fake that never spawns a process.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tracing::debug;

use crate::config::Config;
use crate::error::GlocError;
use crate::source::RepoUrl;

/// Captured output streams of one analyzer run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzerOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl AnalyzerOutput {
    /// Both streams, all of stdout followed by all of stderr.
    ///
    /// The streams are captured on separate pipes, so lines the analyzer
    /// interleaved across them are not restored to their original order.
    pub fn combined(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.stdout.len() + self.stderr.len());
        bytes.extend_from_slice(&self.stdout);
        bytes.extend_from_slice(&self.stderr);
        bytes
    }
}

impl From<Output> for AnalyzerOutput {
    fn from(output: Output) -> Self {
        Self {
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

/// The commands a run depends on.
pub trait Toolchain {
    /// Fail with [`GlocError::MissingDependency`] unless every tool resolves.
    fn check(&self) -> Result<(), GlocError>;

    /// Clone `url` into the existing, empty directory `dest`.
    fn fetch(&self, url: &RepoUrl, dest: &Path) -> Result<(), GlocError>;

    /// Produce a JSON line-count report for the tree at `dir`.
    fn analyze(&self, dir: &Path) -> Result<AnalyzerOutput, GlocError>;
}

/// Runs the real `git` and `cloc` executables.
#[derive(Debug, Clone)]
pub struct SystemToolchain {
    git: String,
    cloc: String,
    cloc_args: Vec<String>,
    clone_depth: Option<u32>,
}

impl SystemToolchain {
    pub fn from_config(config: &Config) -> Self {
        Self {
            git: config.git.clone(),
            cloc: config.cloc.clone(),
            cloc_args: config.cloc_args.clone(),
            clone_depth: config.clone_depth,
        }
    }

    /// Arguments for the clone command, excluding the program itself.
    fn clone_args(&self, url: &RepoUrl, dest: &Path) -> Vec<String> {
        let mut args = vec!["clone".to_string()];
        if let Some(depth) = self.clone_depth {
            args.push("--depth".to_string());
            args.push(depth.to_string());
        }
        args.push(url.as_str().to_string());
        args.push(dest.to_string_lossy().to_string());
        args
    }

    /// Arguments for the analyzer, excluding the program itself.
    fn analyze_args(&self, dir: &Path) -> Vec<String> {
        let mut args = vec!["--json".to_string()];
        args.extend(self.cloc_args.iter().cloned());
        args.push(dir.to_string_lossy().to_string());
        args
    }
}

/// Locate `tool` on PATH, or at the given path if it names a file.
fn resolve(tool: &str) -> Result<PathBuf, GlocError> {
    which::which(tool).map_err(|e| {
        debug!(tool, error = %e, "tool lookup failed");
        GlocError::MissingDependency {
            tool: tool.to_string(),
        }
    })
}

impl Toolchain for SystemToolchain {
    fn check(&self) -> Result<(), GlocError> {
        for tool in [&self.cloc, &self.git] {
            let path = resolve(tool)?;
            debug!(tool = %tool, path = %path.display(), "found tool");
        }
        Ok(())
    }

    fn fetch(&self, url: &RepoUrl, dest: &Path) -> Result<(), GlocError> {
        let args = self.clone_args(url, dest);
        debug!(command = %self.git, ?args, "running fetch");

        let status = Command::new(&self.git)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| GlocError::FetchFailure(format!("could not run {}: {}", self.git, e)))?;

        if !status.success() {
            return Err(GlocError::FetchFailure(format!(
                "{} exited with {}",
                self.git, status
            )));
        }
        Ok(())
    }

    fn analyze(&self, dir: &Path) -> Result<AnalyzerOutput, GlocError> {
        let args = self.analyze_args(dir);
        debug!(command = %self.cloc, ?args, "running analyzer");

        let output = Command::new(&self.cloc)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                GlocError::AnalysisFailure(format!("could not run {}: {}", self.cloc, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() {
                output.status.to_string()
            } else {
                format!("{}: {}", output.status, stderr)
            };
            return Err(GlocError::AnalysisFailure(format!(
                "{} exited with {}",
                self.cloc, detail
            )));
        }

        Ok(output.into())
    }
}
