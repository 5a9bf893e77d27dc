use tauri::State;

use crate::{
    explorer::{list_documents, FileEntry},
    AppState,
};

#[tauri::command]
pub fn list_document_files(state: State<'_, AppState>) -> Result<Vec<FileEntry>, String> {
    list_documents(&state.reports_dir).map_err(|e| e.to_string())
}
