//! Filesystem roots ("volumes") exposed by the browser.

use std::path::{Component, Path, PathBuf};

use log::debug;
use serde::Deserialize;

/// The set of candidate roots and the base they are resolved against.
///
/// A root identifier `r` names the directory `base.join(r)`. On Windows the
/// base is empty and the candidates are the drive roots `A:\` to `Z:\`;
/// elsewhere the base is `/` and the candidates are the conventional
/// top-level directories.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Volumes {
    /// Directory every root identifier and request path is resolved against.
    pub base: PathBuf,
    /// Root identifiers to probe, in display order.
    pub candidates: Vec<String>,
}

#[cfg(windows)]
impl Default for Volumes {
    fn default() -> Self {
        Self {
            base: PathBuf::new(),
            candidates: ('A'..='Z').map(|letter| format!("{letter}:\\")).collect(),
        }
    }
}

#[cfg(not(windows))]
impl Default for Volumes {
    fn default() -> Self {
        const TOP_LEVEL: [&str; 13] = [
            "bin", "boot", "dev", "etc", "home", "media", "mnt", "opt", "root", "srv", "tmp", "usr",
            "var",
        ];

        Self {
            base: PathBuf::from("/"),
            candidates: TOP_LEVEL.iter().map(|dir| dir.to_string()).collect(),
        }
    }
}

impl Volumes {
    /// Create a volume set with an explicit base and candidate list.
    pub fn new<I, S>(base: impl Into<PathBuf>, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base: base.into(),
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    /// Probe every candidate and keep those that currently exist and can be
    /// stat'ed. Missing or inaccessible roots are skipped without error.
    pub async fn enumerate(&self) -> Vec<String> {
        let mut roots = Vec::new();
        for candidate in &self.candidates {
            match tokio::fs::metadata(self.root_path(candidate)).await {
                Ok(_) => roots.push(candidate.clone()),
                Err(e) => debug!("Skipping root {candidate}: {e}"),
            }
        }
        roots
    }

    /// Filesystem path of a root identifier.
    ///
    /// On Windows a bare drive letter (`C:`) means the drive root, not the
    /// drive's current directory.
    pub fn root_path(&self, root: &str) -> PathBuf {
        if cfg!(windows) && root.ends_with(':') {
            self.locate(&format!("{root}\\"))
        } else {
            self.locate(root)
        }
    }

    /// Whether a single request path segment may be joined onto the base.
    ///
    /// A segment is parsed with the host's path rules, so on Windows
    /// `..\..` or `C:\` hide several components. Parent components are
    /// never admitted. Drive prefixes and root components are admitted only
    /// when the base is empty, since joining them replaces the base.
    pub fn admits(&self, segment: &str) -> bool {
        let unrooted = self.base.as_os_str().is_empty();
        Path::new(segment).components().all(|component| match component {
            Component::Normal(_) | Component::CurDir => true,
            Component::ParentDir => false,
            Component::Prefix(_) | Component::RootDir => unrooted,
        })
    }

    /// Filesystem path of a slash-joined request path.
    pub fn locate(&self, url: &str) -> PathBuf {
        self.base.join(url)
    }
}
