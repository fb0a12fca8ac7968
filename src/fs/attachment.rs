//! Reading text attachments for file fields.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::catalog::extension_accepted;

/// Errors raised while loading an attachment.
#[derive(Debug, Error)]
pub enum AttachmentError {
    /// The file's extension is not in the field's accept list.
    #[error("対応していないファイル形式です: {name} (対応形式: {accept})")]
    Unsupported {
        /// File name.
        name: String,
        /// The field's accept list.
        accept: String,
    },
    /// The file could not be read.
    #[error("ファイルを読み込めませんでした: {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// A loaded text attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// File name without directories.
    pub name: String,
    /// Text content. Invalid UTF-8 is replaced.
    pub content: String,
}

/// Returns the display name of `path`.
fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}

/// Reads `path` as text after checking its extension against `accept`.
///
/// # Errors
///
/// Returns [`AttachmentError::Unsupported`] for rejected extensions and
/// [`AttachmentError::Io`] if the file cannot be read.
pub async fn read_attachment(path: &Path, accept: &str) -> Result<Attachment, AttachmentError> {
    let name = file_name(path);
    if !extension_accepted(&name, accept) {
        return Err(AttachmentError::Unsupported {
            name,
            accept: accept.to_string(),
        });
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| AttachmentError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(Attachment {
        name,
        content: String::from_utf8_lossy(&bytes).into_owned(),
    })
}
