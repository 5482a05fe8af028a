//! Request path classification.
//!
//! Every request path is resolved exactly once, by [`classify`], into a
//! [`Target`]. The filesystem is probed after the path is assembled, so a
//! request is a directory, a file or missing according to the filesystem
//! and never according to how the path looks.

use std::path::PathBuf;

use log::debug;

use crate::browser::volumes::Volumes;

/// First path segment that forces a file download of the remaining path.
pub const DOWNLOAD_MARKER: &str = "download";

/// A resolved request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// The path segments joined with `/`, without a leading slash.
    pub url: String,
    /// The filesystem path the segments resolve to.
    pub path: PathBuf,
}

/// What a request path resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// `/`: the list of available roots.
    RootList,
    /// `/<root>`: the directories at the top of a root.
    RootView(Location),
    /// A directory below a root.
    DirectoryView(Location),
    /// A file below a root.
    FileDownload(Location),
    /// A file named through `/download/<path>`.
    DownloadAlias(Location),
    /// Nothing on the filesystem answers to this path.
    NotFound(String),
}

/// Resolve a decoded request path against `volumes`.
///
/// Empty and `.` segments are ignored. A path with a segment the volumes
/// do not admit (see [`Volumes::admits`]) is never resolved and classifies
/// as [`Target::NotFound`].
pub async fn classify(volumes: &Volumes, path: &str) -> Target {
    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            segment if !volumes.admits(segment) => {
                debug!("Refusing segment {segment:?} of {path}");
                return Target::NotFound(path.to_string());
            }
            segment => segments.push(segment),
        }
    }

    match segments.as_slice() {
        [] => Target::RootList,
        [root] => Target::RootView(Location {
            url: root.to_string(),
            path: volumes.root_path(root),
        }),
        [marker, rest @ ..] if *marker == DOWNLOAD_MARKER => probe(volumes, path, rest, true).await,
        all => probe(volumes, path, all, false).await,
    }
}

async fn probe(volumes: &Volumes, request_path: &str, segments: &[&str], alias: bool) -> Target {
    let url = segments.join("/");
    let location = Location {
        path: volumes.locate(&url),
        url,
    };

    match tokio::fs::metadata(&location.path).await {
        Ok(meta) if meta.is_dir() => Target::DirectoryView(location),
        Ok(_) if alias => Target::DownloadAlias(location),
        Ok(_) => Target::FileDownload(location),
        Err(e) => {
            debug!("{} does not resolve: {e}", location.path.display());
            Target::NotFound(request_path.to_string())
        }
    }
}
