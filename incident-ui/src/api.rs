use crate::session;
use incident_core::incident::{Incident, IncidentStatus};
use incident_core::stats::{self, DashboardStats};
use reqwest::{multipart, Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;

const BASE_API_PATH: &str = "/incidencias/api/cuadrilla/incidencias/";
const LOGIN_PATH: &str = "/incidencias/api/auth/login/";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("sesion no autorizada")]
    Unauthorized,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// A file staged for evidence upload, already read out of the browser.
#[derive(Clone, Debug)]
pub struct EvidenceUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// The one service module every page goes through. Carries the credential on
/// each request and performs the light client-side aggregation the dashboard
/// needs; it never caches or merges state locally.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            token,
        }
    }

    /// Client bound to the current browser session (injected config plus the
    /// stored credential).
    pub fn from_session() -> Self {
        Self::new(crate::config::api_base(), session::token())
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, LOGIN_PATH))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?;
        let body: LoginResponse = check(response).await?.json().await?;
        Ok(body.token)
    }

    pub async fn list_incidents(&self) -> Result<Vec<Incident>, ApiError> {
        self.list_incidents_by_status(None).await
    }

    /// The backend also accepts a server-side status filter; pages normally
    /// fetch the full set and filter locally instead.
    pub async fn list_incidents_by_status(
        &self,
        status: Option<IncidentStatus>,
    ) -> Result<Vec<Incident>, ApiError> {
        let mut request = self.client.get(self.collection_url(""));
        if let Some(status) = status {
            request = request.query(&[("estado", status.as_wire())]);
        }
        let response = self.authorized(request).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// The backend exposes no single-incident resource; the collection is
    /// fetched and the record selected locally.
    pub async fn get_incident(&self, id: i64) -> Result<Option<Incident>, ApiError> {
        let incidents = self.list_incidents().await?;
        Ok(incidents.into_iter().find(|incident| incident.id == id))
    }

    /// Dashboard counters, aggregated client-side from the full list.
    pub async fn stats(&self) -> Result<DashboardStats, ApiError> {
        let incidents = self.list_incidents().await?;
        Ok(stats::aggregate(&incidents))
    }

    pub async fn start(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .authorized(
                self.client
                    .post(self.collection_url(&format!("{id}/iniciar/"))),
            )
            .send()
            .await?;
        check(response).await.map(drop)
    }

    pub async fn upload_evidence(
        &self,
        id: i64,
        files: Vec<EvidenceUpload>,
    ) -> Result<(), ApiError> {
        let mut form = multipart::Form::new();
        for file in files {
            let part = multipart::Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.mime_type)?;
            form = form.part("evidencias", part);
        }

        let response = self
            .authorized(
                self.client
                    .post(self.collection_url(&format!("{id}/evidencias/"))),
            )
            .multipart(form)
            .send()
            .await?;
        check(response).await.map(drop)
    }

    pub async fn finalize(&self, id: i64, comment: &str) -> Result<(), ApiError> {
        let response = self
            .authorized(
                self.client
                    .post(self.collection_url(&format!("{id}/finalizar/"))),
            )
            .json(&serde_json::json!({ "comentario": comment }))
            .send()
            .await?;
        check(response).await.map(drop)
    }

    pub async fn reject(&self, id: i64, reason: &str) -> Result<(), ApiError> {
        let response = self
            .authorized(
                self.client
                    .post(self.collection_url(&format!("{id}/rechazar/"))),
            )
            .json(&serde_json::json!({ "motivo_rechazo": reason }))
            .send()
            .await?;
        check(response).await.map(drop)
    }

    fn collection_url(&self, suffix: &str) -> String {
        format!("{}{}{}", self.base_url, BASE_API_PATH, suffix)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", format!("Token {token}")),
            None => builder,
        }
    }
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

/// Shared response gate. An authorization failure on any call evicts the
/// stored credential and forces the login view; every other non-success
/// status surfaces with its body.
async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        evict_session();
        return Err(ApiError::Unauthorized);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Http { status, body });
    }
    Ok(response)
}

fn evict_session() {
    #[cfg(target_arch = "wasm32")]
    {
        session::clear_token();
        session::force_login_redirect();
    }
}
