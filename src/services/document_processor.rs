use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use uuid::Uuid;

use crate::{
    errors::InputError,
    models::{
        domain::Document,
        dto::response::{DocumentReport, IngestionSummary},
    },
};

pub const PAGE_BREAK: char = '\x0C';

/// A file as received from the client.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

/// Text of one extracted page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub number: usize,
    pub text: String,
}

/// Turns a staged file into pages of text.
pub trait PageExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<Vec<Page>, InputError>;
}

/// Reads UTF-8 text and treats form feeds as page breaks.
pub struct PlainTextExtractor;

impl PageExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<Vec<Page>, InputError> {
        let display = path.display().to_string();
        let bytes = fs::read(path).map_err(|e| InputError::Unreadable {
            filename: display.clone(),
            reason: e.to_string(),
        })?;
        let text = String::from_utf8(bytes).map_err(|e| InputError::Unreadable {
            filename: display,
            reason: e.to_string(),
        })?;

        Ok(text
            .split(PAGE_BREAK)
            .enumerate()
            .filter(|(_, page)| !page.trim().is_empty())
            .map(|(i, page)| Page {
                number: i + 1,
                text: page.to_string(),
            })
            .collect())
    }
}

/// An upload written to disk for the extractor. The file is removed when the
/// guard goes out of scope, whatever happened in between.
pub struct StagedFile {
    path: PathBuf,
}

impl StagedFile {
    pub fn create(dir: &Path, filename: &str, content: &[u8]) -> std::io::Result<Self> {
        let path = dir.join(staged_name(filename));
        let staged = StagedFile { path };
        fs::write(&staged.path, content)?;
        Ok(staged)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Failed to remove staged file {}: {}", self.path.display(), e);
            }
        }
    }
}

/// `notes.txt` becomes `notes_<32 hex chars>.txt`.
fn staged_name(filename: &str) -> String {
    let base = Path::new(filename)
        .file_name()
        .map(|n| Path::new(n).to_path_buf())
        .unwrap_or_else(|| PathBuf::from("upload"));
    let stem = base
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("upload");
    let unique = Uuid::new_v4().simple().to_string();

    match base.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{}.{}", stem, unique, ext),
        None => format!("{}_{}", stem, unique),
    }
}

/// Stages and extracts uploads. Holds no ingestion state, so it can be
/// cloned out of [`DocumentProcessor`] and run on a blocking thread.
#[derive(Clone)]
pub struct DocumentLoader {
    staging_dir: PathBuf,
    extractor: Arc<dyn PageExtractor>,
}

/// Outcome of loading a set of uploads, before it is recorded.
#[derive(Debug)]
pub struct LoadedUploads {
    reports: Vec<DocumentReport>,
    documents: Vec<Document>,
}

impl DocumentLoader {
    /// Stage, extract and report every upload. A failing file is reported and
    /// does not stop the others.
    pub fn load(&self, uploads: Vec<UploadedFile>) -> Result<LoadedUploads, InputError> {
        if uploads.is_empty() {
            return Err(InputError::NoDocuments);
        }

        let mut reports = Vec::with_capacity(uploads.len());
        let mut loaded = Vec::new();
        for upload in uploads {
            match self.process(&upload) {
                Ok(documents) => {
                    log::info!("{} contains {} pages", upload.filename, documents.len());
                    reports.push(DocumentReport {
                        filename: upload.filename,
                        pages: documents.len(),
                        error: None,
                    });
                    loaded.extend(documents);
                }
                Err(e) => {
                    log::warn!("Skipping {}: {}", upload.filename, e);
                    reports.push(DocumentReport {
                        filename: upload.filename,
                        pages: 0,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        Ok(LoadedUploads {
            reports,
            documents: loaded,
        })
    }

    fn process(&self, upload: &UploadedFile) -> Result<Vec<Document>, InputError> {
        let staged = StagedFile::create(&self.staging_dir, &upload.filename, &upload.content)
            .map_err(|e| InputError::Unreadable {
                filename: upload.filename.clone(),
                reason: e.to_string(),
            })?;

        let pages = self
            .extractor
            .extract(staged.path())
            .map_err(|e| match e {
                InputError::Unreadable { reason, .. } => InputError::Unreadable {
                    filename: upload.filename.clone(),
                    reason,
                },
                other => other,
            })?;

        Ok(pages
            .into_iter()
            .map(|page| Document::from_page(&upload.filename, page.number, page.text))
            .collect())
    }
}

pub struct DocumentProcessor {
    loader: DocumentLoader,
    pages: Vec<Document>,
}

impl DocumentProcessor {
    pub fn new(staging_dir: impl Into<PathBuf>, extractor: Arc<dyn PageExtractor>) -> Self {
        Self {
            loader: DocumentLoader {
                staging_dir: staging_dir.into(),
                extractor,
            },
            pages: Vec::new(),
        }
    }

    pub fn loader(&self) -> DocumentLoader {
        self.loader.clone()
    }

    pub fn ingest(&mut self, uploads: Vec<UploadedFile>) -> Result<IngestionSummary, InputError> {
        let loaded = self.loader.load(uploads)?;
        Ok(self.record(loaded))
    }

    /// Append loaded pages to the ingested set.
    pub fn record(&mut self, loaded: LoadedUploads) -> IngestionSummary {
        self.pages.extend(loaded.documents);
        log::info!("Total pages processed: {}", self.pages.len());

        IngestionSummary {
            documents: loaded.reports,
            total_pages: self.pages.len(),
        }
    }

    pub fn pages(&self) -> &[Document] {
        &self.pages
    }

    pub fn clear(&mut self) {
        self.pages.clear();
    }
}
