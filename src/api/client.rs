use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Reading;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no se pudo contactar al servidor: {0}")]
    Request(#[source] reqwest::Error),

    #[error("el servidor respondió {status}")]
    Status { status: u16 },

    #[error("respuesta inválida del servidor: {0}")]
    Body(#[source] reqwest::Error),
}

/// Opaque session returned by login. The token is passed through to the
/// `Authorization` header as-is; the app never inspects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    usuario: &'a str,
    contrasena: &'a str,
}

#[derive(Serialize)]
struct MotorRequest<'a> {
    accion: &'a str,
}

#[derive(Deserialize)]
struct MotorResponse {
    mensaje: Option<String>,
}

/// HTTP client for the control-motor service. Every call is a single
/// best-effort attempt: no retries, no caching, no per-call timeout override.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// `POST <base>/api/login`. Exchanges credentials for an opaque bearer
    /// token.
    pub async fn login(
        &self,
        base_url: &str,
        usuario: &str,
        contrasena: &str,
    ) -> Result<AuthSession, ApiError> {
        let url = format!("{}/api/login", base_url.trim_end_matches('/'));
        debug!("login request to {}", url);

        let response = self
            .http
            .post(&url)
            .json(&LoginRequest { usuario, contrasena })
            .send()
            .await
            .map_err(ApiError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }

        response.json::<AuthSession>().await.map_err(ApiError::Body)
    }

    /// `POST <base>/api/motor` with the requested action ("encender",
    /// "apagar", ...). Returns the server's acknowledgement message.
    pub async fn send_motor_command(
        &self,
        base_url: &str,
        token: Option<&str>,
        accion: &str,
    ) -> Result<String, ApiError> {
        let url = format!("{}/api/motor", base_url.trim_end_matches('/'));
        debug!("motor command '{}' to {}", accion, url);

        let mut request = self.http.post(&url).json(&MotorRequest { accion });
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(ApiError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }

        let ack = response.json::<MotorResponse>().await.map_err(ApiError::Body)?;
        Ok(ack
            .mensaje
            .unwrap_or_else(|| format!("acción '{}' enviada", accion)))
    }

    /// `GET <base>/api/lecturas`, optionally authenticated. The readings come
    /// back exactly in server order; nothing is sorted or deduplicated.
    pub async fn fetch_readings(
        &self,
        base_url: &str,
        token: Option<&str>,
    ) -> Result<Vec<Reading>, ApiError> {
        let url = format!("{}/api/lecturas", base_url.trim_end_matches('/'));
        debug!("fetching readings from {}", url);

        let mut request = self.http.get(&url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(ApiError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }

        response.json::<Vec<Reading>>().await.map_err(ApiError::Body)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
