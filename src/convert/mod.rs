//! Batch conversion of downloaded Word documents to PDF.
//!
//! Documents are discovered one directory level below a downloads root
//! (`<root>/<identifier dir>/<file>.doc*`) and handed to an external
//! converter, by default LibreOffice in headless mode. The PDF is written next
//! to its source.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{debug, info};

/// Default downloads root, relative to the working directory.
pub const DEFAULT_DOWNLOADS_DIR: &str = "../downloads";

/// Default converter executable.
pub const DEFAULT_CONVERTER_BINARY: &str = "libreoffice";

/// File-name fragment selecting Word documents (`.doc`, `.docx`, `.docm`...).
const DOCUMENT_MARKER: &str = ".doc";

/// Errors that can occur while discovering or converting documents.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The downloads root or one of its subdirectories could not be listed
    #[error("cannot list '{}': {source}\n  Suggestion: {suggestion}", path.display())]
    Discover {
        /// Directory being listed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
        /// How to fix the issue
        suggestion: String,
    },

    /// The converter executable could not be started at all
    #[error("cannot start converter '{binary}': {source}\n  Suggestion: {suggestion}")]
    Launch {
        /// Executable that failed to start
        binary: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
        /// How to fix the issue
        suggestion: String,
    },
}

impl ConvertError {
    /// Creates a `Discover` error for `path`.
    #[must_use]
    pub fn discover(path: &Path, source: std::io::Error) -> Self {
        Self::Discover {
            path: path.to_path_buf(),
            source,
            suggestion: "Check the path passed with --downloads-dir".to_string(),
        }
    }

    /// Creates a `Launch` error for `binary`.
    #[must_use]
    pub fn launch(binary: &str, source: std::io::Error) -> Self {
        Self::Launch {
            binary: binary.to_string(),
            source,
            suggestion: "Install LibreOffice or pass its path with --converter".to_string(),
        }
    }
}

/// Returns the Word documents exactly two levels below `root`, sorted.
///
/// Matches `<root>/*/*.doc*`: regular files whose name contains `.doc`, inside
/// immediate subdirectories of `root`. Hidden directories and files are
/// skipped; files directly in `root` are ignored.
///
/// # Errors
///
/// Returns [`ConvertError::Discover`] if `root` or a subdirectory cannot be listed.
#[tracing::instrument(skip(root), fields(root = %root.display()))]
pub fn discover_documents(root: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let mut documents = Vec::new();

    for subdir in visible_entries(root)? {
        if !subdir.is_dir() {
            continue;
        }
        for file in visible_entries(&subdir)? {
            if file.is_file() && is_word_document(&file) {
                documents.push(file);
            }
        }
    }

    documents.sort();
    debug!(count = documents.len(), "Documents discovered");
    Ok(documents)
}

fn visible_entries(dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let entries = fs::read_dir(dir).map_err(|source| ConvertError::discover(dir, source))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ConvertError::discover(dir, source))?;
        if !entry.file_name().to_string_lossy().starts_with('.') {
            paths.push(entry.path());
        }
    }
    Ok(paths)
}

fn is_word_document(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().contains(DOCUMENT_MARKER))
}

/// Result of one converter invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// Converter exited successfully
    Converted,
    /// Converter ran but exited unsuccessfully (code is `None` if killed by a signal)
    Rejected {
        /// Exit code reported by the converter
        code: Option<i32>,
    },
}

/// Something that can turn one document into a PDF next to it.
pub trait DocumentConverter {
    /// Returns the converter name for logging.
    fn name(&self) -> &str;

    /// Converts `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Launch`] if the converter cannot be started.
    /// An unsuccessful run is reported as [`ConversionOutcome::Rejected`].
    fn convert(&self, source: &Path) -> Result<ConversionOutcome, ConvertError>;
}

/// Converts documents with `libreoffice --headless --convert-to pdf`.
#[derive(Debug, Clone)]
pub struct LibreOfficeConverter {
    binary: String,
}

impl LibreOfficeConverter {
    /// Creates a converter invoking `binary`.
    #[must_use]
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Returns the arguments passed to the converter for `source`.
    #[must_use]
    pub fn command_args(source: &Path) -> Vec<OsString> {
        let outdir = match source.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        vec![
            OsString::from("--headless"),
            OsString::from("--convert-to"),
            OsString::from("pdf"),
            OsString::from("--outdir"),
            outdir.as_os_str().to_os_string(),
            source.as_os_str().to_os_string(),
        ]
    }
}

impl Default for LibreOfficeConverter {
    fn default() -> Self {
        Self::new(DEFAULT_CONVERTER_BINARY)
    }
}

impl DocumentConverter for LibreOfficeConverter {
    fn name(&self) -> &str {
        &self.binary
    }

    fn convert(&self, source: &Path) -> Result<ConversionOutcome, ConvertError> {
        let status = Command::new(&self.binary)
            .args(Self::command_args(source))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|error| ConvertError::launch(&self.binary, error))?;

        if status.success() {
            Ok(ConversionOutcome::Converted)
        } else {
            Ok(ConversionOutcome::Rejected {
                code: status.code(),
            })
        }
    }
}

/// Counts for one conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Documents the converter accepted
    pub converted: usize,
    /// Documents the converter exited unsuccessfully on
    pub rejected: usize,
}

/// Converts every file in `files`, one invocation each, in order.
///
/// Unsuccessful conversions are logged and skipped.
///
/// # Errors
///
/// Returns [`ConvertError::Launch`] as soon as the converter cannot be started.
pub fn convert_all(
    converter: &dyn DocumentConverter,
    files: &[PathBuf],
) -> Result<ConvertSummary, ConvertError> {
    let mut summary = ConvertSummary::default();

    for file in files {
        debug!(converter = converter.name(), file = %file.display(), "Converting");
        match converter.convert(file)? {
            ConversionOutcome::Converted => summary.converted += 1,
            ConversionOutcome::Rejected { code } => {
                debug!(file = %file.display(), code = ?code, "Converter exited unsuccessfully");
                summary.rejected += 1;
            }
        }
    }

    info!(
        converted = summary.converted,
        rejected = summary.rejected,
        "Conversion complete"
    );
    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"x").unwrap();
    }

    #[derive(Default)]
    struct FakeConverter {
        reject: Vec<&'static str>,
        fail_launch: bool,
        calls: RefCell<Vec<PathBuf>>,
    }

    impl DocumentConverter for FakeConverter {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn convert(&self, source: &Path) -> Result<ConversionOutcome, ConvertError> {
            if self.fail_launch {
                return Err(ConvertError::launch(
                    "fake",
                    std::io::Error::from(std::io::ErrorKind::NotFound),
                ));
            }
            self.calls.borrow_mut().push(source.to_path_buf());
            let name = source.file_name().unwrap().to_string_lossy();
            if self.reject.iter().any(|r| name == *r) {
                Ok(ConversionOutcome::Rejected { code: Some(1) })
            } else {
                Ok(ConversionOutcome::Converted)
            }
        }
    }

    #[test]
    fn test_discover_documents_only_second_level() {
        let root = TempDir::new().unwrap();
        touch(&root.path().join("top.docx"));
        touch(&root.path().join("10.1_a/si.docx"));
        touch(&root.path().join("10.1_a/si.pdf"));
        touch(&root.path().join("10.1_b/esi.doc"));
        touch(&root.path().join("10.1_b/deep/nested.doc"));

        let found = discover_documents(root.path()).unwrap();

        assert_eq!(
            found,
            [
                root.path().join("10.1_a/si.docx"),
                root.path().join("10.1_b/esi.doc"),
            ]
        );
    }

    #[test]
    fn test_discover_documents_matches_doc_anywhere_in_name() {
        let root = TempDir::new().unwrap();
        touch(&root.path().join("d/report.docm"));
        touch(&root.path().join("d/archive.doc.bak"));
        touch(&root.path().join("d/notes.txt"));

        let found = discover_documents(root.path()).unwrap();

        assert_eq!(
            found,
            [
                root.path().join("d/archive.doc.bak"),
                root.path().join("d/report.docm"),
            ]
        );
    }

    #[test]
    fn test_discover_documents_skips_hidden_entries() {
        let root = TempDir::new().unwrap();
        touch(&root.path().join(".cache/x.docx"));
        touch(&root.path().join("d/.~lock.si.docx"));
        touch(&root.path().join("d/si.docx"));

        let found = discover_documents(root.path()).unwrap();

        assert_eq!(found, [root.path().join("d/si.docx")]);
    }

    #[test]
    fn test_discover_documents_missing_root() {
        let root = TempDir::new().unwrap();
        let err = discover_documents(&root.path().join("missing")).unwrap_err();
        assert!(matches!(err, ConvertError::Discover { .. }));
    }

    #[test]
    fn test_convert_all_continues_after_rejection() {
        let files = vec![
            PathBuf::from("a/one.docx"),
            PathBuf::from("b/two.doc"),
            PathBuf::from("c/three.docx"),
        ];
        let converter = FakeConverter {
            reject: vec!["two.doc"],
            ..FakeConverter::default()
        };

        let summary = convert_all(&converter, &files).unwrap();

        assert_eq!(
            summary,
            ConvertSummary {
                converted: 2,
                rejected: 1
            }
        );
        assert_eq!(*converter.calls.borrow(), files);
    }

    #[test]
    fn test_convert_all_launch_failure_is_fatal() {
        let converter = FakeConverter {
            fail_launch: true,
            ..FakeConverter::default()
        };
        let err = convert_all(&converter, &[PathBuf::from("a/one.docx")]).unwrap_err();
        assert!(matches!(err, ConvertError::Launch { .. }));
    }

    #[test]
    fn test_convert_all_empty_list() {
        let summary = convert_all(&FakeConverter::default(), &[]).unwrap();
        assert_eq!(summary, ConvertSummary::default());
    }

    #[test]
    fn test_libreoffice_command_args() {
        let args = LibreOfficeConverter::command_args(Path::new("../downloads/10.1_a/si.docx"));
        assert_eq!(
            args,
            [
                "--headless",
                "--convert-to",
                "pdf",
                "--outdir",
                "../downloads/10.1_a",
                "../downloads/10.1_a/si.docx",
            ]
            .map(OsString::from)
        );
    }

    #[test]
    fn test_libreoffice_command_args_bare_file_uses_cwd() {
        let args = LibreOfficeConverter::command_args(Path::new("si.doc"));
        assert_eq!(args[4], OsString::from("."));
    }

    #[test]
    fn test_libreoffice_missing_binary_is_launch_error() {
        let converter = LibreOfficeConverter::new("suppinfo-no-such-converter-binary");
        let err = converter.convert(Path::new("x/si.docx")).unwrap_err();
        assert!(matches!(err, ConvertError::Launch { .. }));
        assert!(err.to_string().contains("--converter"));
    }

    #[cfg(unix)]
    #[test]
    fn test_libreoffice_nonzero_exit_is_rejected() {
        let converter = LibreOfficeConverter::new("false");
        let outcome = converter.convert(Path::new("x/si.docx")).unwrap();
        assert_eq!(outcome, ConversionOutcome::Rejected { code: Some(1) });
    }

    #[cfg(unix)]
    #[test]
    fn test_libreoffice_zero_exit_is_converted() {
        let converter = LibreOfficeConverter::new("true");
        let outcome = converter.convert(Path::new("x/si.docx")).unwrap();
        assert_eq!(outcome, ConversionOutcome::Converted);
    }
}
