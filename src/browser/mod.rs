//! The file browser: maps request paths onto the host filesystem.
//!
//! `/` lists the available roots, `/<root>` lists the directories at the
//! top of a root, deeper paths list directories or stream files, and
//! `/download/<path>` streams a file as an attachment.

mod download;
mod error;
mod listing;
mod page;
mod target;
mod volumes;

use std::sync::Arc;

use log::debug;

use crate::parser::{HttpRequest, Method};
use crate::server::{Error as ServerError, HttpResponse, HttpServer, StatusCode};

pub use download::serve_file;
pub use error::Error;
pub use listing::{Entry, EntryKind, Listing, list_directory};
pub use page::{LinkList, escape_html, href, render_page};
pub use target::{DOWNLOAD_MARKER, Location, Target, classify};
pub use volumes::Volumes;

/// Request handler for the file browser.
///
/// Cloning is cheap; clones share the same [`Volumes`].
#[derive(Debug, Clone, Default)]
pub struct Browser {
    volumes: Arc<Volumes>,
}

impl Browser {
    pub fn new(volumes: Volumes) -> Self {
        Self {
            volumes: Arc::new(volumes),
        }
    }

    pub fn volumes(&self) -> &Volumes {
        &self.volumes
    }

    /// Resolve a decoded request path. See [`classify`].
    pub async fn classify(&self, path: &str) -> Target {
        classify(&self.volumes, path).await
    }

    /// Answer a request.
    pub async fn respond(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let target = self.classify(&request.path).await;
        debug!("{} -> {target:?}", request.path);

        match target {
            Target::RootList => Ok(self.root_list().await),
            Target::RootView(location) => root_view(&location).await,
            Target::DirectoryView(location) => directory_view(&location).await,
            Target::FileDownload(location) => serve_file(&location, false).await,
            Target::DownloadAlias(location) => serve_file(&location, true).await,
            Target::NotFound(path) => Err(Error::NotFound(path)),
        }
    }

    /// One link per root that currently exists.
    pub async fn root_list(&self) -> HttpResponse {
        let mut links = LinkList::new();
        for root in self.volumes.enumerate().await {
            links.push(&href(&[root.as_str()]), &root);
        }
        links.into_response()
    }

    /// Register the browser's routes on `server`.
    pub async fn mount(&self, server: &HttpServer) {
        let browser = self.clone();
        server
            .add_route("/", vec![Method::GET, Method::HEAD], move |req| {
                let browser = browser.clone();
                async move { browser.respond(&req).await.map_err(ServerError::from) }
            })
            .await;

        // Browsers ask for this on every page; answer without touching the filesystem
        server
            .add_route("/favicon.ico", vec![Method::GET, Method::HEAD], |_req| async {
                Ok(HttpResponse::new(StatusCode::Ok))
            })
            .await;
    }
}

/// Top of a root: directories only, each linking one level down.
async fn root_view(location: &Location) -> Result<HttpResponse, Error> {
    let listing = list_directory(&location.path).await?;

    let mut links = LinkList::new();
    for dir in &listing.directories {
        links.push(&href(&[location.url.as_str(), dir.as_str()]), dir);
    }
    Ok(links.into_response())
}

/// A nested directory: subdirectories browse further, files download.
async fn directory_view(location: &Location) -> Result<HttpResponse, Error> {
    let listing = list_directory(&location.path).await?;

    let mut links = LinkList::new();
    for dir in &listing.directories {
        links.push(&href(&[location.url.as_str(), dir.as_str()]), dir);
    }
    for file in &listing.files {
        links.push(&href(&[DOWNLOAD_MARKER, location.url.as_str(), file.as_str()]), file);
    }
    Ok(links.into_response())
}
