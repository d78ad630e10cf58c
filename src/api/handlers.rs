use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::api::auth::AdminGuard;
use crate::logic::validate::{
    validate, EntitySchema, Mode, ValidationError, ARTWORK_SCHEMA, CONTACT_SCHEMA,
    EXHIBITION_SCHEMA, SERIES_SCHEMA,
};
use crate::model::{Artwork, ArtworkStatus, Contact, Exhibition, Id, Series};
use crate::store::{Catalog, CatalogEntity, Storage, StoreError};

/// Shared per-process state: the catalog stores plus the admin secret
pub struct CatalogState<S> {
    pub catalog: Catalog<S>,
    pub admin_secret: Option<String>,
}

impl<S: Storage> CatalogState<S> {
    pub fn new(catalog: Catalog<S>, admin_secret: Option<String>) -> Self {
        Self {
            catalog,
            admin_secret,
        }
    }
}

pub type AppState<S> = Arc<CatalogState<S>>;

pub type ApiError = (StatusCode, Json<ErrorResponse>);
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct ArtworkQuery {
    pub status: Option<String>,
    pub featured: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExhibitionQuery {
    pub current: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SeriesUsageResponse {
    pub id: Id,
    pub count: usize,
}

/// A collection exposed through the generic CRUD handlers
pub trait Resource: CatalogEntity {
    fn schema() -> &'static EntitySchema;
}

impl Resource for Artwork {
    fn schema() -> &'static EntitySchema {
        &ARTWORK_SCHEMA
    }
}

impl Resource for Exhibition {
    fn schema() -> &'static EntitySchema {
        &EXHIBITION_SCHEMA
    }
}

impl Resource for Series {
    fn schema() -> &'static EntitySchema {
        &SERIES_SCHEMA
    }
}

fn error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(ErrorResponse::new(message)))
}

fn not_found() -> ApiError {
    error(StatusCode::NOT_FOUND, "Not found")
}

fn validation_error(e: ValidationError) -> ApiError {
    error(StatusCode::BAD_REQUEST, &e.to_string())
}

fn store_error(e: StoreError) -> ApiError {
    match e {
        StoreError::DuplicateKey { .. } | StoreError::InUse { .. } => {
            error(StatusCode::CONFLICT, &e.to_string())
        }
        StoreError::InvalidRecord(_) => error(StatusCode::BAD_REQUEST, &e.to_string()),
        StoreError::Io(_) | StoreError::Serialization(_) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save data")
        }
    }
}

fn json_body(body: Result<Json<Value>, JsonRejection>) -> ApiResult<Value> {
    body.map(|Json(value)| value).map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            error(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
        } else {
            error(StatusCode::BAD_REQUEST, "Invalid JSON body")
        }
    })
}

fn parse_bool_filter(name: &str, value: Option<&str>) -> ApiResult<Option<bool>> {
    match value {
        None => Ok(None),
        Some("true") => Ok(Some(true)),
        Some("false") => Ok(Some(false)),
        Some(other) => Err(error(
            StatusCode::BAD_REQUEST,
            &format!("Invalid {} filter: {} (expected true or false)", name, other),
        )),
    }
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

// Generic record handlers

pub async fn get_record<S: Storage, T: Resource>(
    State(state): State<AppState<S>>,
    Path(id): Path<Id>,
) -> ApiResult<Json<T>> {
    T::collection(&state.catalog)
        .get(&id)
        .await
        .map(Json)
        .ok_or_else(not_found)
}

pub async fn create_record<S: Storage, T: Resource>(
    _admin: AdminGuard,
    State(state): State<AppState<S>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<T>)> {
    let body = json_body(body)?;
    let fields = validate(T::schema(), &body, Mode::Create).map_err(validation_error)?;

    // Optional fields the schema left out take the record's serde defaults
    let record: T = serde_json::from_value(Value::Object(fields))
        .map_err(|e| error(StatusCode::BAD_REQUEST, &e.to_string()))?;

    let created = T::collection(&state.catalog)
        .insert(record)
        .await
        .map_err(store_error)?;

    log::info!("Created {} {}", T::KIND, created.id());
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_record<S: Storage, T: Resource>(
    _admin: AdminGuard,
    State(state): State<AppState<S>>,
    Path(id): Path<Id>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<T>> {
    let body = json_body(body)?;
    let changes = validate(T::schema(), &body, Mode::Update).map_err(validation_error)?;

    match T::collection(&state.catalog).update(&id, changes).await {
        Ok(Some(updated)) => {
            log::info!("Updated {} {}", T::KIND, id);
            Ok(Json(updated))
        }
        Ok(None) => Err(not_found()),
        Err(e) => Err(store_error(e)),
    }
}

pub async fn delete_record<S: Storage, T: Resource>(
    _admin: AdminGuard,
    State(state): State<AppState<S>>,
    Path(id): Path<Id>,
) -> ApiResult<Json<SuccessResponse>> {
    match T::collection(&state.catalog).remove(&id).await {
        Ok(true) => {
            log::info!("Deleted {} {}", T::KIND, id);
            Ok(Json(SuccessResponse { success: true }))
        }
        Ok(false) => Err(not_found()),
        Err(e) => Err(store_error(e)),
    }
}

// Artworks

pub async fn list_artworks<S: Storage>(
    State(state): State<AppState<S>>,
    Query(query): Query<ArtworkQuery>,
) -> ApiResult<Json<Vec<Artwork>>> {
    let status = query
        .status
        .as_deref()
        .map(|s| {
            s.parse::<ArtworkStatus>().map_err(|_| {
                error(
                    StatusCode::BAD_REQUEST,
                    &format!("Invalid status filter: {} (expected available, sold or reserved)", s),
                )
            })
        })
        .transpose()?;
    let featured = parse_bool_filter("featured", query.featured.as_deref())?;

    let artworks = state
        .catalog
        .artworks
        .filter(|artwork| {
            status.map_or(true, |status| artwork.status == status)
                && featured.map_or(true, |featured| artwork.featured == featured)
        })
        .await;

    Ok(Json(artworks))
}

// Exhibitions

pub async fn list_exhibitions<S: Storage>(
    State(state): State<AppState<S>>,
    Query(query): Query<ExhibitionQuery>,
) -> ApiResult<Json<Vec<Exhibition>>> {
    let current = parse_bool_filter("current", query.current.as_deref())?;
    let now = chrono::Utc::now();

    let exhibitions = state
        .catalog
        .exhibitions
        .filter(|exhibition| current.map_or(true, |current| exhibition.is_current_at(now) == current))
        .await;

    Ok(Json(exhibitions))
}

// Series

pub async fn list_series<S: Storage>(State(state): State<AppState<S>>) -> Json<Vec<Series>> {
    Json(state.catalog.series.all().await)
}

pub async fn get_series_usage<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<Id>,
) -> ApiResult<Json<SeriesUsageResponse>> {
    let count = state.catalog.series_usage(&id).await.ok_or_else(not_found)?;
    Ok(Json(SeriesUsageResponse { id, count }))
}

/// Series deletion is refused while artworks still use the series name
pub async fn delete_series<S: Storage>(
    _admin: AdminGuard,
    State(state): State<AppState<S>>,
    Path(id): Path<Id>,
) -> ApiResult<Json<SuccessResponse>> {
    match state.catalog.delete_series(&id).await {
        Ok(true) => {
            log::info!("Deleted Series {}", id);
            Ok(Json(SuccessResponse { success: true }))
        }
        Ok(false) => Err(not_found()),
        Err(e) => Err(store_error(e)),
    }
}

// Contact

pub async fn get_contact<S: Storage>(State(state): State<AppState<S>>) -> Json<Contact> {
    Json(state.catalog.contact.get().await)
}

pub async fn update_contact<S: Storage>(
    _admin: AdminGuard,
    State(state): State<AppState<S>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Contact>> {
    let body = json_body(body)?;
    let changes: Map<String, Value> =
        validate(&CONTACT_SCHEMA, &body, Mode::Update).map_err(validation_error)?;

    let updated = state
        .catalog
        .contact
        .update(changes)
        .await
        .map_err(store_error)?;

    log::info!("Updated contact details");
    Ok(Json(updated))
}
