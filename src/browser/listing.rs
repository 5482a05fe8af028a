//! Directory listings.

use std::path::Path;

use tokio::fs::DirEntry;

use crate::browser::error::Error;

/// Kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// One immediate child of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
}

/// The immediate children of a directory, split by kind.
///
/// Both lists keep the order the filesystem returned the entries in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub directories: Vec<String>,
    pub files: Vec<String>,
}

impl Listing {
    fn push(&mut self, entry: Entry) {
        match entry.kind {
            EntryKind::Directory => self.directories.push(entry.name),
            EntryKind::File => self.files.push(entry.name),
        }
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.directories.len() + self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Symlinks are followed; a dangling link is listed as a file.
async fn entry_kind(entry: &DirEntry) -> EntryKind {
    let is_dir = match entry.file_type().await {
        Ok(ft) if ft.is_symlink() => tokio::fs::metadata(entry.path())
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false),
        Ok(ft) => ft.is_dir(),
        Err(_) => false,
    };

    if is_dir {
        EntryKind::Directory
    } else {
        EntryKind::File
    }
}

/// Read the immediate children of `path`.
///
/// # Errors
///
/// Returns [`Error::List`] if `path` does not exist, is not a directory,
/// or cannot be read.
pub async fn list_directory(path: &Path) -> Result<Listing, Error> {
    let list_error = |source| Error::List {
        path: path.to_path_buf(),
        source,
    };

    let mut dir = tokio::fs::read_dir(path).await.map_err(list_error)?;
    let mut listing = Listing::default();

    while let Some(entry) = dir.next_entry().await.map_err(list_error)? {
        let kind = entry_kind(&entry).await;
        listing.push(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            kind,
        });
    }

    Ok(listing)
}
