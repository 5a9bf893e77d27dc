use log::{info, warn};
use tauri::State;

use crate::{api::AuthSession, models::Reading, AppState};

#[tauri::command]
pub async fn login(
    state: State<'_, AppState>,
    usuario: String,
    contrasena: String,
) -> Result<(), String> {
    let base_url = state.settings.api_base_url();
    let session = state
        .api
        .login(&base_url, &usuario, &contrasena)
        .await
        .map_err(|e| e.to_string())?;

    info!("login succeeded for '{}'", usuario);
    *state.session.write().unwrap() = Some(session);
    Ok(())
}

#[tauri::command]
pub fn logout(state: State<'_, AppState>) -> Result<(), String> {
    let previous = state.session.write().unwrap().take();
    if previous.is_none() {
        warn!("logout called without an active session");
    }
    Ok(())
}

#[tauri::command]
pub fn session_active(state: State<'_, AppState>) -> Result<bool, String> {
    Ok(state.session.read().unwrap().is_some())
}

#[tauri::command]
pub async fn send_motor_command(
    state: State<'_, AppState>,
    accion: String,
) -> Result<String, String> {
    let base_url = state.settings.api_base_url();
    let token = current_token(&state);

    state
        .api
        .send_motor_command(&base_url, token.as_deref(), &accion)
        .await
        .map_err(|e| e.to_string())
}

/// Backing call for the report screen's mount fetch. A failure leaves
/// whatever the screen currently shows untouched; the error string is
/// surfaced as-is.
#[tauri::command]
pub async fn fetch_readings(state: State<'_, AppState>) -> Result<Vec<Reading>, String> {
    let base_url = state.settings.api_base_url();
    let token = current_token(&state);

    state
        .api
        .fetch_readings(&base_url, token.as_deref())
        .await
        .map_err(|e| e.to_string())
}

fn current_token(state: &State<'_, AppState>) -> Option<String> {
    state
        .session
        .read()
        .unwrap()
        .as_ref()
        .map(|s: &AuthSession| s.token.clone())
}
