//! OlduBil PDF discovery and text extraction.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lopdf::Document;
use thiserror::Error;

/// Filename → extracted text, or the per-file error string.
pub type DocumentCollection = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("No OlduBil-related PDF files found in the server directory.")]
    NoMatches,
    #[error("Failed to list {}: {source}", .path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Case-insensitive `.pdf` suffix with `oldubil` anywhere in the name.
pub fn is_oldubil_pdf(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    lower.ends_with(".pdf") && lower.contains("oldubil")
}

/// Text of every page in page order, joined by newlines and trimmed.
pub fn extract_pdf_text(path: &Path) -> Result<String, lopdf::Error> {
    let document = Document::load(path)?;
    let mut pages = Vec::new();
    for page_number in document.get_pages().keys() {
        pages.push(document.extract_text(&[*page_number])?);
    }
    Ok(pages.join("\n").trim().to_string())
}

/// A directory of OlduBil documents. Every call re-reads the disk.
#[derive(Debug, Clone)]
pub struct DocumentLibrary {
    dir: PathBuf,
}

impl DocumentLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Matching entries as `(filename, path)`, sorted by filename.
    pub fn matching_files(&self) -> Result<Vec<(String, PathBuf)>, DocumentError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| DocumentError::ListDir {
            path: self.dir.clone(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| DocumentError::ListDir {
                path: self.dir.clone(),
                source,
            })?;
            let Ok(filename) = entry.file_name().into_string() else {
                log::debug!("skipping non UTF-8 entry {:?}", entry.path());
                continue;
            };
            if is_oldubil_pdf(&filename) {
                files.push((filename, entry.path()));
            }
        }
        files.sort();
        Ok(files)
    }

    /// Extract every matching PDF.
    ///
    /// A file that fails to parse gets `"Error reading <filename>: <reason>"` as
    /// its value; the remaining files are still returned.
    pub fn get_oldubil_info(&self) -> Result<DocumentCollection, DocumentError> {
        let files = self.matching_files()?;
        if files.is_empty() {
            return Err(DocumentError::NoMatches);
        }

        let mut collection = DocumentCollection::new();
        for (filename, path) in files {
            let text = match extract_pdf_text(&path) {
                Ok(text) => text,
                Err(err) => {
                    log::warn!("failed to extract {}: {}", path.display(), err);
                    format!("Error reading {}: {}", filename, err)
                }
            };
            collection.insert(filename, text);
        }

        log::info!(
            "extracted {} OlduBil document(s) from {}",
            collection.len(),
            self.dir.display()
        );
        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_filter() {
        assert!(is_oldubil_pdf("OldUbil_Report.pdf"));
        assert!(is_oldubil_pdf("report-OLDUBIL.PDF"));
        assert!(is_oldubil_pdf("oldubil.pdf"));
        assert!(!is_oldubil_pdf("unrelated.pdf"));
        assert!(!is_oldubil_pdf("oldubil.txt"));
        assert!(!is_oldubil_pdf("oldubil.pdf.bak"));
        assert!(!is_oldubil_pdf("old_ubil.pdf"));
    }

    #[test]
    fn test_missing_directory_is_reported() {
        let library = DocumentLibrary::new("/definitely/not/here");
        let err = library.get_oldubil_info().unwrap_err();
        assert!(matches!(err, DocumentError::ListDir { .. }));
        assert!(err.to_string().contains("/definitely/not/here"));
    }

    #[test]
    fn test_no_matches_message() {
        assert_eq!(
            DocumentError::NoMatches.to_string(),
            "No OlduBil-related PDF files found in the server directory."
        );
    }
}
