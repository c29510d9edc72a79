//! Repository references accepted on the command line.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::GlocError;

/// Hosting prefix accepted when no config overrides it.
pub const DEFAULT_PREFIX: &str = "https://github.com/";

lazy_static! {
    /// `owner/repo`, optionally followed by `.git` and a trailing slash.
    static ref REPO_PATH: Regex =
        Regex::new(r"^[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+/?$").unwrap();
}

/// A validated repository URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoUrl {
    url: String,
    name: String,
}

impl RepoUrl {
    /// Validate `input` against the allowed hosting prefixes.
    ///
    /// Nothing touches the network or filesystem before this succeeds.
    pub fn parse(input: &str, allowed_prefixes: &[String]) -> Result<Self, GlocError> {
        let url = input.trim();

        let Some(rest) = allowed_prefixes
            .iter()
            .find_map(|prefix| strip_host_prefix(url, prefix))
        else {
            return Err(GlocError::InvalidArgument(format!(
                "{:?} is not a supported repository URL (expected a URL starting with {})",
                url,
                allowed_prefixes.join(" or ")
            )));
        };

        if !REPO_PATH.is_match(rest) {
            return Err(GlocError::InvalidArgument(format!(
                "{:?} does not name a repository (expected <prefix>owner/repo)",
                url
            )));
        }

        let repo = rest.trim_end_matches('/').rsplit('/').next().unwrap_or(rest);
        let name = repo.strip_suffix(".git").unwrap_or(repo);
        if name.is_empty() || name.chars().all(|c| c == '.') {
            return Err(GlocError::InvalidArgument(format!(
                "{:?} does not name a repository",
                url
            )));
        }

        Ok(Self {
            url: url.to_string(),
            name: name.to_string(),
        })
    }

    /// The URL as passed to the fetch tool.
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Repository name without any `.git` suffix.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Strip `prefix` from `url` only where it ends on a path boundary, so
/// `https://github.com` never matches `https://github.com.example.org/..`.
fn strip_host_prefix<'a>(url: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = url.strip_prefix(prefix)?;
    if prefix.ends_with('/') {
        Some(rest)
    } else {
        rest.strip_prefix('/')
    }
}

impl std::fmt::Display for RepoUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url)
    }
}
