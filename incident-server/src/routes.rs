use crate::store::{IncidentStore, StoreError};
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use incident_core::incident::{Incident, IncidentStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiContext {
    pub store: Arc<IncidentStore>,
    pub token: String,
}

pub fn api_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/incidencias/api/auth/login/", post(login))
        .route("/incidencias/api/cuadrilla/incidencias/", get(list_incidents))
        .route(
            "/incidencias/api/cuadrilla/incidencias/:id/iniciar/",
            post(start_incident),
        )
        .route(
            "/incidencias/api/cuadrilla/incidencias/:id/evidencias/",
            post(upload_evidence),
        )
        .route(
            "/incidencias/api/cuadrilla/incidencias/:id/finalizar/",
            post(finalize_incident),
        )
        .route(
            "/incidencias/api/cuadrilla/incidencias/:id/rechazar/",
            post(reject_incident),
        )
        .with_state(ctx)
}

#[derive(Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Serialize)]
struct LoginResponse {
    token: String,
}

#[derive(Deserialize)]
struct ListQuery {
    estado: Option<IncidentStatus>,
}

#[derive(Deserialize)]
struct FinalizeRequest {
    comentario: String,
}

#[derive(Deserialize)]
struct RejectRequest {
    motivo_rechazo: String,
}

async fn login(
    State(ctx): State<ApiContext>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, StatusCode> {
    if request.username.trim().is_empty() || request.password.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(Json(LoginResponse {
        token: ctx.token.clone(),
    }))
}

async fn list_incidents(
    State(ctx): State<ApiContext>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Incident>>, StatusCode> {
    check_token(&ctx, &headers)?;
    let mut incidents = ctx.store.list();
    if let Some(status) = query.estado {
        incidents.retain(|incident| incident.status == status);
    }
    Ok(Json(incidents))
}

async fn start_incident(
    State(ctx): State<ApiContext>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Incident>, StatusCode> {
    check_token(&ctx, &headers)?;
    ctx.store.start(id).map(Json).map_err(store_status)
}

async fn upload_evidence(
    State(ctx): State<ApiContext>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<Incident>, StatusCode> {
    check_token(&ctx, &headers)?;

    let mut file_names = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        if field.name() != Some("evidencias") {
            continue;
        }
        let name = field.file_name().unwrap_or("evidencia.jpg").to_string();
        // The stub keeps no file contents, only the reference.
        let _ = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
        file_names.push(name);
    }

    ctx.store
        .add_evidence(id, &file_names)
        .map(Json)
        .map_err(store_status)
}

async fn finalize_incident(
    State(ctx): State<ApiContext>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(request): Json<FinalizeRequest>,
) -> Result<Json<Incident>, StatusCode> {
    check_token(&ctx, &headers)?;
    ctx.store
        .finalize(id, &request.comentario)
        .map(Json)
        .map_err(store_status)
}

async fn reject_incident(
    State(ctx): State<ApiContext>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(request): Json<RejectRequest>,
) -> Result<Json<Incident>, StatusCode> {
    check_token(&ctx, &headers)?;
    ctx.store
        .reject(id, &request.motivo_rechazo)
        .map(Json)
        .map_err(store_status)
}

fn check_token(ctx: &ApiContext, headers: &HeaderMap) -> Result<(), StatusCode> {
    let provided = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Token "));

    match provided {
        Some(token) if token == ctx.token => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

fn store_status(err: StoreError) -> StatusCode {
    match err {
        StoreError::NotFound => StatusCode::NOT_FOUND,
        StoreError::Conflict(reason) => {
            eprintln!("transicion rechazada: {reason}");
            StatusCode::CONFLICT
        }
        StoreError::Invalid(reason) => {
            eprintln!("peticion invalida: {reason}");
            StatusCode::BAD_REQUEST
        }
    }
}
