pub mod api;
pub mod explorer;
pub mod models;
pub mod report;
pub mod settings;

use std::path::PathBuf;
use std::sync::{Mutex, RwLock};

use api::commands::{fetch_readings, login, logout, send_motor_command, session_active};
use api::{ApiClient, AuthSession};
use explorer::commands::list_document_files;
use report::commands::{
    generate_text_report, last_report_path, materialize_pdf_report, render_report_html,
    share_report,
};
use settings::SettingsStore;
use tauri::{Manager, State};

pub struct AppState {
    pub(crate) api: ApiClient,
    pub(crate) settings: SettingsStore,
    pub(crate) session: RwLock<Option<AuthSession>>,
    // Set only after a materialization fully succeeds; read by share.
    pub(crate) report: Mutex<Option<PathBuf>>,
    pub(crate) reports_dir: PathBuf,
}

#[tauri::command]
fn get_api_base_url(state: State<AppState>) -> Result<String, String> {
    Ok(state.settings.api_base_url())
}

#[tauri::command]
fn set_api_base_url(base_url: String, state: State<AppState>) -> Result<(), String> {
    state
        .settings
        .update_api_base_url(base_url)
        .map_err(|e| e.to_string())
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Control Motor client starting up...");

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = app
                    .path()
                    .app_data_dir()
                    .map_err(|err| anyhow::anyhow!(err))?;
                std::fs::create_dir_all(&app_data_dir)?;

                let settings_path = app_data_dir.join("settings.json");
                let settings_store = SettingsStore::new(settings_path)?;

                app.manage(AppState {
                    api: ApiClient::new(),
                    settings: settings_store,
                    session: RwLock::new(None),
                    report: Mutex::new(None),
                    reports_dir: app_data_dir,
                });

                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            login,
            logout,
            session_active,
            send_motor_command,
            fetch_readings,
            generate_text_report,
            render_report_html,
            materialize_pdf_report,
            last_report_path,
            share_report,
            list_document_files,
            get_api_base_url,
            set_api_base_url,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
