//! Per-session state: the uploaded dataset and the current control values.

use crate::config::ReportOptions;
use crate::data::{DataLoader, Dataset, LoaderError, SortMode};
use std::path::Path;
use tracing::{info, warn};

/// Sidebar selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub section_id: Option<String>,
    pub sort: SortMode,
}

/// State owned by one running app. Every pipeline stage reads from here;
/// nothing derived from the dataset is stored.
#[derive(Debug, Default)]
pub struct Session {
    loader: DataLoader,
    options: ReportOptions,
    file_name: Option<String>,
    dataset: Option<Dataset>,
    load_error: Option<String>,
    pub selection: Selection,
}

impl Session {
    pub fn new(loader: DataLoader, options: ReportOptions) -> Self {
        Self {
            loader,
            options,
            ..Self::default()
        }
    }

    /// Replace the session data with an uploaded workbook.
    ///
    /// Zero bytes count as no upload. A parse failure clears the dataset and
    /// is kept until the next upload.
    pub fn upload(&mut self, file_name: impl Into<String>, bytes: &[u8]) {
        let file_name = file_name.into();
        self.dataset = None;
        self.load_error = None;
        self.selection.section_id = None;

        if bytes.is_empty() {
            info!(file = %file_name, "empty upload ignored");
            self.file_name = Some(file_name);
            return;
        }

        match self.loader.load_bytes(bytes) {
            Ok(dataset) => {
                self.selection.section_id = dataset.section_ids().into_iter().next();
                self.dataset = Some(dataset);
            }
            Err(err) => self.fail(&file_name, err),
        }
        self.file_name = Some(file_name);
    }

    /// Read a workbook from disk and upload it.
    pub fn upload_path(&mut self, path: &Path) {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        match std::fs::read(path) {
            Ok(bytes) => self.upload(file_name, &bytes),
            Err(err) => {
                self.dataset = None;
                self.selection.section_id = None;
                self.fail(&file_name, LoaderError::Io(err));
                self.file_name = Some(file_name);
            }
        }
    }

    fn fail(&mut self, file_name: &str, err: LoaderError) {
        warn!(file = %file_name, error = %err, "failed to load workbook");
        self.load_error = Some(err.to_string());
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Distinct section ids of the loaded data.
    pub fn section_ids(&self) -> Vec<String> {
        self.dataset
            .as_ref()
            .map(Dataset::section_ids)
            .unwrap_or_default()
    }

    /// Selected section, falling back to the first one in the data.
    pub fn active_section(&self) -> Option<String> {
        let ids = self.section_ids();
        match &self.selection.section_id {
            Some(id) if ids.contains(id) => Some(id.clone()),
            _ => ids.into_iter().next(),
        }
    }

    pub fn select_section(&mut self, section_id: impl Into<String>) {
        self.selection.section_id = Some(section_id.into());
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.selection.sort = sort;
    }
}
