//! One-time registration of the reference regulation document.

use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;

use crate::error::{CatchguideError, Result};
use crate::llm::{DocumentHandle, InferenceGateway};

/// Outcome of ensuring the document is registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub handle: DocumentHandle,
    /// True only for the call that performed the upload.
    pub newly_registered: bool,
}

impl Registration {
    /// Notice shown to the user for this registration.
    pub fn notice(&self) -> String {
        if self.newly_registered {
            format!("File uploaded successfully! File ID: {}", self.handle)
        } else {
            format!("Using previously uploaded file. File ID: {}", self.handle)
        }
    }
}

/// Registers a static document with the provider at most once.
///
/// The handle starts empty, is set by the first successful registration and
/// is only read afterwards. Concurrent callers wait on the in-flight upload
/// instead of starting their own. A failed upload leaves the cell empty.
#[derive(Debug)]
pub struct DocumentRegistrar {
    path: PathBuf,
    handle: OnceCell<DocumentHandle>,
}

impl DocumentRegistrar {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            handle: OnceCell::new(),
        }
    }

    /// Registrar that starts out with a known handle.
    pub fn with_handle(path: impl Into<PathBuf>, handle: DocumentHandle) -> Self {
        Self {
            path: path.into(),
            handle: OnceCell::with_value(handle),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored handle, if registration already happened.
    pub fn handle(&self) -> Option<&DocumentHandle> {
        self.handle.get()
    }

    /// Return the stored handle, registering the document first if needed.
    pub fn ensure_registered(&self, gateway: &dyn InferenceGateway) -> Result<Registration> {
        let mut newly_registered = false;
        let handle = self.handle.get_or_try_init(|| {
            let handle = self.register(gateway)?;
            newly_registered = true;
            Ok::<_, CatchguideError>(handle)
        })?;

        if !newly_registered {
            tracing::debug!(document = %handle, "reusing registered document");
        }

        Ok(Registration {
            handle: handle.clone(),
            newly_registered,
        })
    }

    fn register(&self, gateway: &dyn InferenceGateway) -> Result<DocumentHandle> {
        let bytes = std::fs::read(&self.path).map_err(|source| CatchguideError::Io {
            path: self.path.clone(),
            source,
        })?;
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "reference.pdf".to_string());

        tracing::info!(
            provider = gateway.name(),
            file = %file_name,
            size_bytes = bytes.len(),
            "registering reference document"
        );
        let handle = gateway.register_document(&file_name, &bytes)?;
        tracing::info!(document = %handle, "reference document registered");
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockGateway;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn pdf() -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(b"%PDF-1.7 regulations").expect("Failed to write");
        file
    }

    #[test]
    fn test_registers_once() {
        let file = pdf();
        let mock = MockGateway::new();
        let registrar = DocumentRegistrar::new(file.path());

        let first = registrar.ensure_registered(&mock).unwrap();
        let second = registrar.ensure_registered(&mock).unwrap();

        assert!(first.newly_registered);
        assert!(!second.newly_registered);
        assert_eq!(first.handle, second.handle);
        assert_eq!(mock.register_calls(), 1);
        assert_eq!(first.notice(), "File uploaded successfully! File ID: file-mock-1");
        assert_eq!(second.notice(), "Using previously uploaded file. File ID: file-mock-1");
    }

    #[test]
    fn test_failed_registration_leaves_cell_empty() {
        let file = pdf();
        let mock = MockGateway::new();
        mock.set_fail_register(true);
        let registrar = DocumentRegistrar::new(file.path());

        assert!(registrar.ensure_registered(&mock).is_err());
        assert!(registrar.handle().is_none());

        mock.set_fail_register(false);
        let registration = registrar.ensure_registered(&mock).unwrap();
        assert!(registration.newly_registered);
        assert_eq!(mock.register_calls(), 2);
    }

    #[test]
    fn test_missing_document_is_io_error() {
        let mock = MockGateway::new();
        let registrar = DocumentRegistrar::new("/nonexistent/regulations.pdf");

        let err = registrar.ensure_registered(&mock).unwrap_err();
        assert!(matches!(err, CatchguideError::Io { .. }));
        assert_eq!(mock.register_calls(), 0);
    }

    #[test]
    fn test_preset_handle_skips_upload() {
        let mock = MockGateway::new();
        let registrar =
            DocumentRegistrar::with_handle("/nonexistent/regulations.pdf", DocumentHandle::new("file-known"));

        let registration = registrar.ensure_registered(&mock).unwrap();
        assert_eq!(registration.handle.as_str(), "file-known");
        assert!(!registration.newly_registered);
        assert_eq!(mock.register_calls(), 0);
    }
}
