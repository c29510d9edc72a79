//! gloc - lines of code for a remote repository.
//!
//! gloc clones a repository into a temporary directory, runs `cloc` on it
//! and summarizes the per-language report.
//!
//! # Architecture
//!
//! Data flows one way through the pipeline:
//!
//! - `source`: validates the repository URL
//! - `tools`: the `Toolchain` seam over `git` and `cloc`
//! - `analyze`: runs the steps in order inside a scoped workspace
//! - `decode`: tolerant JSON decoding of the analyzer report
//! - `model`: the typed report
//! - `report`: table, JSON and raw output
//! - `config`: optional YAML configuration

pub mod analyze;
pub mod cli;
pub mod config;
pub mod decode;
pub mod error;
pub mod model;
pub mod report;
pub mod source;
pub mod tools;

pub use analyze::{Analysis, OutputMode, Workspace};
pub use config::Config;
pub use decode::decode;
pub use error::{DecodeError, GlocError};
pub use model::{LanguageStats, Report, ReportHeader, RowOrder};
pub use source::RepoUrl;
pub use tools::{AnalyzerOutput, SystemToolchain, Toolchain};
