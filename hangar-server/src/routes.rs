//! HTTP handlers for Hangar server.

use std::sync::Arc;

use actix_web::error::BlockingError;
use actix_web::{HttpResponse, Responder, delete, get, post, web};
use chrono::{DateTime, TimeZone, Utc};
use hangar_core::{
    HangarError, NewShip, PageRequest, RatingConfig, Ship, ShipCriteria, ShipOrder, ShipService,
    ShipStore, ShipType, ShipUpdate,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::openapi::ApiDoc;

/// Store handle shared across worker threads.
pub type SharedStore = Arc<dyn ShipStore + Send + Sync>;

#[derive(Clone)]
/// Shared application state for handlers.
pub struct AppState {
    /// Ship registry operations.
    pub ships: Arc<ShipService<SharedStore>>,
}

impl AppState {
    /// Build state around a store and rating epoch.
    pub fn new(store: SharedStore, rating: RatingConfig) -> Self {
        Self {
            ships: Arc::new(ShipService::with_rating(store, rating)),
        }
    }
}

/// Error response payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub message: String,
}

/// Query parameters for listing and counting ships.
///
/// `order`, `pageNumber` and `pageSize` only affect listings.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ShipQuery {
    /// Substring of the ship name.
    pub name: Option<String>,
    /// Substring of the planet.
    pub planet: Option<String>,
    /// Exact ship type.
    pub ship_type: Option<ShipType>,
    /// Earliest production date, epoch milliseconds.
    pub after: Option<i64>,
    /// Latest production date, epoch milliseconds.
    pub before: Option<i64>,
    /// Used flag.
    pub is_used: Option<bool>,
    /// Minimum speed.
    pub min_speed: Option<f64>,
    /// Maximum speed.
    pub max_speed: Option<f64>,
    /// Minimum crew size.
    pub min_crew_size: Option<i32>,
    /// Maximum crew size.
    pub max_crew_size: Option<i32>,
    /// Minimum rating.
    pub min_rating: Option<f64>,
    /// Maximum rating.
    pub max_rating: Option<f64>,
    /// Sort key.
    pub order: Option<ShipOrder>,
    /// Zero-based page index (default 0).
    pub page_number: Option<u32>,
    /// Page size (default 3).
    pub page_size: Option<u32>,
}

impl ShipQuery {
    /// Convert the filter parameters into core criteria.
    pub fn criteria(&self) -> Result<ShipCriteria, HangarError> {
        Ok(ShipCriteria {
            name: self.name.clone(),
            planet: self.planet.clone(),
            ship_type: self.ship_type,
            after: from_millis(self.after, "after")?,
            before: from_millis(self.before, "before")?,
            is_used: self.is_used,
            min_speed: self.min_speed,
            max_speed: self.max_speed,
            min_crew_size: self.min_crew_size,
            max_crew_size: self.max_crew_size,
            min_rating: self.min_rating,
            max_rating: self.max_rating,
        })
    }

    /// The requested page.
    pub fn page(&self) -> PageRequest {
        PageRequest {
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }
}

fn from_millis(
    value: Option<i64>,
    field: &'static str,
) -> Result<Option<DateTime<Utc>>, HangarError> {
    value
        .map(|millis| {
            Utc.timestamp_millis_opt(millis)
                .single()
                .ok_or(HangarError::invalid_field(field))
        })
        .transpose()
}

fn error_response(err: &HangarError) -> HttpResponse {
    let body = ErrorResponse {
        message: err.to_string(),
    };
    match err {
        HangarError::InvalidField { .. } | HangarError::PageOutOfRange { .. } => {
            log::warn!("rejected request: {err}");
            HttpResponse::BadRequest().json(body)
        }
        HangarError::NotFound(_) => HttpResponse::NotFound().json(body),
        HangarError::Store(_) => {
            log::error!("{err}");
            HttpResponse::InternalServerError().json(body)
        }
    }
}

fn respond<T>(
    result: Result<Result<T, HangarError>, BlockingError>,
    ok: impl FnOnce(T) -> HttpResponse,
) -> HttpResponse {
    match result {
        Ok(Ok(value)) => ok(value),
        Ok(Err(err)) => error_response(&err),
        Err(err) => {
            log::error!("store task failed: {err}");
            HttpResponse::InternalServerError().json(ErrorResponse {
                message: format!("store task failed: {err}"),
            })
        }
    }
}

/// Ship identifiers must be positive integers.
fn parse_id(raw: &str) -> Result<i64, HttpResponse> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(HttpResponse::BadRequest().json(ErrorResponse {
            message: format!("invalid ship id: {raw}"),
        })),
    }
}

/// Register every ship route. `count` must precede `{id}` so it is not
/// captured as an identifier.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_ships)
        .service(count_ships)
        .service(create_ship)
        .service(get_ship)
        .service(update_ship)
        .service(delete_ship)
        .service(openapi_json);
}

#[utoipa::path(
    get,
    path = "/rest/ships",
    params(ShipQuery),
    responses(
        (status = 200, description = "Page of matching ships", body = [Ship]),
        (status = 400, description = "Invalid query or page out of range", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/rest/ships")]
/// List ships matching the filters, sorted and paginated.
pub async fn list_ships(
    state: web::Data<AppState>,
    query: web::Query<ShipQuery>,
) -> impl Responder {
    let query = query.into_inner();
    let criteria = match query.criteria() {
        Ok(criteria) => criteria,
        Err(err) => return error_response(&err),
    };
    let ships = state.ships.clone();
    let result =
        web::block(move || ships.query_ships(&criteria, query.order, &query.page())).await;
    respond(result, |page| HttpResponse::Ok().json(page))
}

#[utoipa::path(
    get,
    path = "/rest/ships/count",
    params(ShipQuery),
    responses(
        (status = 200, description = "Number of matching ships", body = usize),
        (status = 400, description = "Invalid query", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/rest/ships/count")]
/// Count ships matching the filters.
pub async fn count_ships(
    state: web::Data<AppState>,
    query: web::Query<ShipQuery>,
) -> impl Responder {
    let criteria = match query.criteria() {
        Ok(criteria) => criteria,
        Err(err) => return error_response(&err),
    };
    let ships = state.ships.clone();
    let result = web::block(move || ships.count_ships(&criteria)).await;
    respond(result, |count| HttpResponse::Ok().json(count))
}

#[utoipa::path(
    post,
    path = "/rest/ships",
    request_body = NewShip,
    responses(
        (status = 200, description = "Created ship", body = Ship),
        (status = 400, description = "Invalid ship", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[post("/rest/ships")]
/// Create a ship.
pub async fn create_ship(
    state: web::Data<AppState>,
    payload: web::Json<NewShip>,
) -> impl Responder {
    let candidate = payload.into_inner();
    let ships = state.ships.clone();
    let result = web::block(move || ships.create_ship(&candidate)).await;
    respond(result, |ship| {
        log::info!("created ship {} ({})", ship.id, ship.name);
        HttpResponse::Ok().json(ship)
    })
}

#[utoipa::path(
    get,
    path = "/rest/ships/{id}",
    params(
        ("id" = i64, Path, description = "Ship identifier")
    ),
    responses(
        (status = 200, description = "Ship", body = Ship),
        (status = 400, description = "Invalid identifier", body = ErrorResponse),
        (status = 404, description = "Ship not found", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/rest/ships/{id}")]
/// Fetch a ship by identifier.
pub async fn get_ship(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = match parse_id(&path) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let ships = state.ships.clone();
    let result = web::block(move || ships.get_ship(id)).await;
    respond(result, |ship| HttpResponse::Ok().json(ship))
}

#[utoipa::path(
    post,
    path = "/rest/ships/{id}",
    params(
        ("id" = i64, Path, description = "Ship identifier")
    ),
    request_body = ShipUpdate,
    responses(
        (status = 200, description = "Updated ship", body = Ship),
        (status = 400, description = "Invalid identifier or field", body = ErrorResponse),
        (status = 404, description = "Ship not found", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[post("/rest/ships/{id}")]
/// Apply a partial update to a ship.
pub async fn update_ship(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<ShipUpdate>,
) -> impl Responder {
    let id = match parse_id(&path) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let update = payload.into_inner();
    let ships = state.ships.clone();
    let result = web::block(move || ships.update_ship(id, &update)).await;
    respond(result, |ship| {
        log::info!("updated ship {}", ship.id);
        HttpResponse::Ok().json(ship)
    })
}

#[utoipa::path(
    delete,
    path = "/rest/ships/{id}",
    params(
        ("id" = i64, Path, description = "Ship identifier")
    ),
    responses(
        (status = 200, description = "Ship deleted"),
        (status = 400, description = "Invalid identifier", body = ErrorResponse),
        (status = 404, description = "Ship not found", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[delete("/rest/ships/{id}")]
/// Delete a ship.
pub async fn delete_ship(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = match parse_id(&path) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let ships = state.ships.clone();
    let result = web::block(move || ships.delete_ship(id)).await;
    respond(result, |()| {
        log::info!("deleted ship {id}");
        HttpResponse::Ok().finish()
    })
}

#[utoipa::path(
    get,
    path = "/rest/openapi.json",
    responses(
        (status = 200, description = "OpenAPI document")
    ),
    tag = "system"
)]
#[get("/rest/openapi.json")]
/// Serve the OpenAPI document.
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
