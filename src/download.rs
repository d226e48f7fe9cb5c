//! File download collaborator.
//!
//! Exports only need "text in, file saved". [`Downloader`] is that seam:
//! [`DirectoryDownloader`] writes files to disk the way a browser save
//! would, [`MemoryDownloader`] keeps them for inspection.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Result, TableError};
use crate::serialize::CsvDocument;

/// MIME type attached to every export.
pub const CSV_MIME: &str = "text/csv";

/// A file ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub mime: &'static str,
    pub document: CsvDocument,
}

/// Saves downloads somewhere.
pub trait Downloader {
    /// Save `download`, returning where it ended up.
    fn save(&mut self, download: &Download) -> io::Result<PathBuf>;
}

/// Build `<prefix><suffix>.csv`.
pub fn file_name(prefix: &str, suffix: &str) -> String {
    format!("{prefix}{suffix}.csv")
}

/// Hand `document` to `downloader` as `<prefix><suffix>.csv`.
pub fn trigger_download(
    document: CsvDocument,
    prefix: &str,
    suffix: &str,
    downloader: &mut dyn Downloader,
) -> Result<PathBuf> {
    let download = Download {
        file_name: file_name(prefix, suffix),
        mime: CSV_MIME,
        document,
    };

    downloader
        .save(&download)
        .map_err(|source| TableError::Download {
            file_name: download.file_name.clone(),
            source,
        })
}

/// Writes downloads into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectoryDownloader {
    dir: PathBuf,
    overwrite: bool,
}

impl DirectoryDownloader {
    pub fn new(dir: impl Into<PathBuf>, overwrite: bool) -> Self {
        Self {
            dir: dir.into(),
            overwrite,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Downloader for DirectoryDownloader {
    fn save(&mut self, download: &Download) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let target = self.dir.join(&download.file_name);
        let path = if self.overwrite {
            target
        } else {
            unique_path(&target)
        };

        fs::write(&path, download.document.as_str())?;
        tracing::info!(
            "Saved {} ({} bytes, {})",
            path.display(),
            download.document.len(),
            download.mime
        );
        Ok(path)
    }
}

/// First of `name.csv`, `name (1).csv`, `name (2).csv`, … that does not exist.
fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    (1..)
        .map(|n| path.with_file_name(format!("{stem} ({n}){ext}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

/// Keeps downloads in memory.
#[derive(Debug, Default)]
pub struct MemoryDownloader {
    pub downloads: Vec<Download>,
}

impl MemoryDownloader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a saved download by file name.
    pub fn get(&self, file_name: &str) -> Option<&Download> {
        self.downloads.iter().find(|d| d.file_name == file_name)
    }

    pub fn file_names(&self) -> Vec<&str> {
        self.downloads.iter().map(|d| d.file_name.as_str()).collect()
    }
}

impl Downloader for MemoryDownloader {
    fn save(&mut self, download: &Download) -> io::Result<PathBuf> {
        self.downloads.push(download.clone());
        Ok(PathBuf::from(&download.file_name))
    }
}
