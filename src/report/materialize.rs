use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use log::{info, warn};
use thiserror::Error;

pub const TEXT_REPORT_FILENAME: &str = "lecturas_sensores.txt";
pub const PDF_REPORT_FILENAME: &str = "reporte_sensor.pdf";

static STAGING_SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no se pudo generar el reporte: {0}")]
    Render(String),

    #[error("no se pudo guardar el reporte: {0}")]
    Io(#[from] std::io::Error),
}

/// Write the delimited text report to its fixed destination, replacing any
/// previous report. The content lands in a staging sibling first and is
/// renamed into place, so the returned path always names a complete file.
pub fn write_text_report(reports_dir: &Path, content: &str) -> Result<PathBuf, ReportError> {
    let destination = reports_dir.join(TEXT_REPORT_FILENAME);
    let staging = staging_path(reports_dir, TEXT_REPORT_FILENAME);

    fs::write(&staging, content)?;
    if let Err(err) = fs::rename(&staging, &destination) {
        let _ = fs::remove_file(&staging);
        return Err(err.into());
    }

    info!("text report written to {}", destination.display());
    Ok(destination)
}

/// Move a platform-rendered PDF from its temporary location to the fixed
/// destination, replacing any previous report. Rendering itself happens in
/// the webview's print service; this only relocates and validates the result.
pub fn finalize_pdf_report(rendered_tmp: &Path, reports_dir: &Path) -> Result<PathBuf, ReportError> {
    let metadata = fs::metadata(rendered_tmp)
        .map_err(|_| ReportError::Render("el PDF generado no existe".to_string()))?;
    if metadata.len() == 0 {
        return Err(ReportError::Render("el PDF generado está vacío".to_string()));
    }

    let destination = reports_dir.join(PDF_REPORT_FILENAME);
    move_file(rendered_tmp, &destination, reports_dir)?;

    info!("pdf report written to {}", destination.display());
    Ok(destination)
}

// rename fails with EXDEV when the render service's temp dir sits on another
// filesystem; fall back to a staged copy.
fn move_file(from: &Path, to: &Path, reports_dir: &Path) -> Result<(), ReportError> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(err) => {
            warn!(
                "rename {} -> {} failed ({}), copying instead",
                from.display(),
                to.display(),
                err
            );
            copy_via_staging(from, to, reports_dir)?;
            if let Err(cleanup) = fs::remove_file(from) {
                warn!("could not remove {}: {}", from.display(), cleanup);
            }
            Ok(())
        }
    }
}

// The destination must not be touched until every byte is in place: a copy
// that dies midway (disk full, pulled storage) would otherwise truncate a
// previously materialized report while share still points at it. Copy into a
// staging sibling on the destination filesystem, then rename.
fn copy_via_staging(from: &Path, to: &Path, reports_dir: &Path) -> Result<(), ReportError> {
    let staging = staging_path(reports_dir, PDF_REPORT_FILENAME);

    if let Err(err) = fs::copy(from, &staging) {
        let _ = fs::remove_file(&staging);
        return Err(err.into());
    }
    if let Err(err) = fs::rename(&staging, to) {
        let _ = fs::remove_file(&staging);
        return Err(err.into());
    }
    Ok(())
}

// Per-call staging names keep two uncoordinated generations from sharing one
// staging inode; the racing runs then only contend on the final rename.
fn staging_path(reports_dir: &Path, filename: &str) -> PathBuf {
    let seq = STAGING_SEQ.fetch_add(1, Ordering::Relaxed);
    reports_dir.join(format!("{}.{}-{}.tmp", filename, std::process::id(), seq))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_leftovers(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".tmp"))
            .collect()
    }

    #[test]
    fn text_report_round_trips_content() {
        let dir = tempfile::tempdir().unwrap();
        let content = "ID Lectura, Valor de Salida, Fecha y Hora, ID Sensor, ID Usuario\n1, 22.5, 2024-01-01, 10, 1\n";

        let path = write_text_report(dir.path(), content).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
        assert_eq!(path.file_name().unwrap(), TEXT_REPORT_FILENAME);
        assert!(tmp_leftovers(dir.path()).is_empty());
    }

    #[test]
    fn text_report_overwrites_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        write_text_report(dir.path(), "first\n").unwrap();
        let path = write_text_report(dir.path(), "second\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
    }

    #[test]
    fn finalize_rejects_missing_render_output() {
        let dir = tempfile::tempdir().unwrap();
        let err = finalize_pdf_report(&dir.path().join("nope.pdf"), dir.path()).unwrap_err();
        assert!(matches!(err, ReportError::Render(_)));
    }

    #[test]
    fn finalize_rejects_empty_render_output() {
        let dir = tempfile::tempdir().unwrap();
        let tmp = dir.path().join("render.pdf");
        fs::write(&tmp, b"").unwrap();

        let err = finalize_pdf_report(&tmp, dir.path()).unwrap_err();
        assert!(matches!(err, ReportError::Render(_)));
    }

    #[test]
    fn finalize_moves_rendered_pdf_into_place() {
        let dir = tempfile::tempdir().unwrap();
        let tmp = dir.path().join("render.pdf");
        fs::write(&tmp, b"%PDF-1.4 fake").unwrap();

        let path = finalize_pdf_report(&tmp, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), PDF_REPORT_FILENAME);
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.4 fake");
        assert!(!tmp.exists());
    }

    #[test]
    fn failed_finalize_leaves_previous_report_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join(PDF_REPORT_FILENAME);
        fs::write(&destination, b"%PDF-1.4 prior complete").unwrap();

        let err = finalize_pdf_report(&dir.path().join("nope.pdf"), dir.path()).unwrap_err();
        assert!(matches!(err, ReportError::Render(_)));
        assert_eq!(fs::read(&destination).unwrap(), b"%PDF-1.4 prior complete");
    }

    #[test]
    fn failed_fallback_copy_preserves_previous_report() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join(PDF_REPORT_FILENAME);
        fs::write(&destination, b"%PDF-1.4 prior complete").unwrap();

        // A directory as the copy source makes fs::copy fail after the
        // rename fallback has been entered, like a copy dying midway.
        let unreadable = dir.path().join("srcdir");
        fs::create_dir(&unreadable).unwrap();

        let err = copy_via_staging(&unreadable, &destination, dir.path()).unwrap_err();
        assert!(matches!(err, ReportError::Io(_)));
        assert_eq!(fs::read(&destination).unwrap(), b"%PDF-1.4 prior complete");
        assert!(tmp_leftovers(dir.path()).is_empty());
    }

    #[test]
    fn fallback_copy_replaces_destination_only_when_complete() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join(PDF_REPORT_FILENAME);
        fs::write(&destination, b"%PDF-1.4 prior").unwrap();

        let source = dir.path().join("render.pdf");
        fs::write(&source, b"%PDF-1.4 fresh").unwrap();

        copy_via_staging(&source, &destination, dir.path()).unwrap();
        assert_eq!(fs::read(&destination).unwrap(), b"%PDF-1.4 fresh");
        assert!(tmp_leftovers(dir.path()).is_empty());
    }

    #[test]
    fn staging_names_do_not_collide_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        let a = staging_path(dir.path(), TEXT_REPORT_FILENAME);
        let b = staging_path(dir.path(), TEXT_REPORT_FILENAME);
        assert_ne!(a, b);
    }
}
