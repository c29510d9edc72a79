//! Orchestration of one run: validate, fetch, analyze, decode, render.
//!
//! Every step runs to completion before the next one starts, and the first
//! failure ends the run. The clone lives in a [`Workspace`] that is removed
//! when the run returns, whichever path it returns by.

use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::decode;
use crate::error::GlocError;
use crate::model::RowOrder;
use crate::report;
use crate::source::RepoUrl;
use crate::tools::Toolchain;

/// Prefix of the per-run temporary directory.
pub const WORKSPACE_PREFIX: &str = "gloc-repo-";

/// How the analyzer output is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Forward the analyzer's output without decoding it
    Raw,
    /// Aligned summary table
    Table(RowOrder),
    /// Normalized JSON summary
    Json(RowOrder),
}

/// Private temporary directory owned by a single run.
///
/// Deleted on drop.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn create() -> Result<Self, GlocError> {
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir()?;
        debug!(path = %dir.path().display(), "created workspace");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        debug!(path = %self.dir.path().display(), "removing workspace");
    }
}

/// A configured analysis run.
pub struct Analysis {
    config: Config,
    quiet: bool,
}

impl Analysis {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            quiet: false,
        }
    }

    /// Suppress the progress lines written to stderr.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Run the whole pipeline for `url`, writing the result to `out`.
    pub fn run<T, W>(
        &self,
        url: &str,
        mode: OutputMode,
        tools: &T,
        out: &mut W,
    ) -> Result<(), GlocError>
    where
        T: Toolchain + ?Sized,
        W: Write,
    {
        let url = RepoUrl::parse(url, &self.config.allowed_prefixes)?;
        tools.check()?;

        let workspace = Workspace::create()?;

        info!(url = %url, "fetching repository");
        if !self.quiet {
            report::status_cloning(url.as_str(), &workspace.path().to_string_lossy());
        }
        tools.fetch(&url, workspace.path())?;

        info!(repo = url.name(), dir = %workspace.path().display(), "running analyzer");
        if !self.quiet {
            report::status_analyzing();
        }
        let output = tools.analyze(workspace.path())?;

        match mode {
            OutputMode::Raw => {
                report::write_raw(out, &output.combined())?;
            }
            OutputMode::Table(order) | OutputMode::Json(order) => {
                if !output.stderr.is_empty() {
                    let diagnostics = String::from_utf8_lossy(&output.stderr);
                    warn!(stderr = %diagnostics.trim(), "analyzer wrote diagnostics");
                }

                let decoded = decode::decode(&output.stdout)?;
                info!(languages = decoded.languages.len(), "decoded report");
                if !decoded.is_consistent() {
                    warn!(
                        total = decoded.total.code,
                        summed = decoded.summed_code(),
                        "total code lines differ from the per-language sum"
                    );
                }

                match mode {
                    OutputMode::Json(_) => report::write_json(out, &decoded, order)?,
                    _ => {
                        report::write_table(out, &decoded, order)?;
                        if !self.quiet {
                            report::write_footer(&decoded);
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
