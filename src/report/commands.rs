use std::path::PathBuf;

use log::{error, info, warn};
use tauri::State;

use crate::{
    models::Reading,
    report::{
        finalize_pdf_report, share_target, to_delimited_text, to_html_table, write_text_report,
        ShareError,
    },
    AppState,
};

/// Format the readings the screen currently shows and write the text report.
/// The screen owns the readings; nothing is cached backend-side, so each
/// generation reflects exactly what the user sees.
#[tauri::command]
pub fn generate_text_report(
    state: State<'_, AppState>,
    readings: Vec<Reading>,
) -> Result<PathBuf, String> {
    let content = to_delimited_text(&readings);
    let path = write_text_report(&state.reports_dir, &content).map_err(|e| {
        error!("text report failed: {}", e);
        e.to_string()
    })?;

    *state.report.lock().unwrap() = Some(path.clone());
    Ok(path)
}

/// HTML document for the PDF flow. The webview hands this to the platform's
/// print-to-PDF service and reports the rendered temp file back through
/// `materialize_pdf_report`.
#[tauri::command]
pub fn render_report_html(readings: Vec<Reading>) -> Result<String, String> {
    Ok(to_html_table(&readings))
}

#[tauri::command]
pub fn materialize_pdf_report(
    state: State<'_, AppState>,
    rendered_path: PathBuf,
) -> Result<PathBuf, String> {
    let path = finalize_pdf_report(&rendered_path, &state.reports_dir).map_err(|e| {
        error!("pdf report failed: {}", e);
        e.to_string()
    })?;

    *state.report.lock().unwrap() = Some(path.clone());
    Ok(path)
}

#[tauri::command]
pub fn last_report_path(state: State<'_, AppState>) -> Result<Option<PathBuf>, String> {
    Ok(state.report.lock().unwrap().clone())
}

/// Hand the last materialized report to the platform share surface. When the
/// platform refuses (mobile webviews without a share target, headless
/// desktops), the error carries the saved location so the screen can show it
/// instead of failing silently.
#[tauri::command]
pub fn share_report(state: State<'_, AppState>) -> Result<(), String> {
    let last = state.report.lock().unwrap().clone();
    let path = share_target(last.as_deref()).map_err(|e| e.to_string())?;

    info!("sharing report {}", path.display());
    tauri_plugin_opener::reveal_item_in_dir(&path).map_err(|err| {
        warn!("share surface unavailable: {}", err);
        ShareError::Unavailable { path }.to_string()
    })
}
