use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("no hay archivo para compartir")]
    NoReport,

    #[error("compartir no está disponible; el archivo se guardó en: {}", path.display())]
    Unavailable { path: PathBuf },
}

/// Resolve the file the share surface should receive. Sharing is only valid
/// after a confirmed materialization, so both "never generated" and "file
/// removed since" resolve to `NoReport`.
pub fn share_target(last_report: Option<&Path>) -> Result<PathBuf, ShareError> {
    let path = last_report.ok_or(ShareError::NoReport)?;
    if !path.is_file() {
        return Err(ShareError::NoReport);
    }
    Ok(path.to_path_buf())
}
