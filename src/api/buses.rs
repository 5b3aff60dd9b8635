//! Simulated bus positions for the live-tracking demo page.
//!
//! There is no real vehicle telemetry; positions are the same fixtures the
//! frontend map used to carry, one demo vehicle per route.

use axum::extract::Query;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::error::{bad_request, method_not_allowed, not_found, ApiError};
use crate::api::ErrorResponse;

pub fn router() -> Router {
    Router::new().route("/", get(get_buses).fallback(method_not_allowed))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct BusesQuery {
    /// Numeric id of the route to get vehicle positions for
    pub route_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Bus {
    /// Fleet identifier, e.g. "R1-001"
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    /// "On Time" or "Delayed"
    pub status: String,
    /// Name of the next stop on the route
    pub next_stop: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BusListResponse {
    pub route_id: i64,
    pub buses: Vec<Bus>,
}

fn fixture(id: &str, lat: f64, lon: f64, status: &str, next_stop: &str) -> Bus {
    Bus {
        id: id.to_string(),
        lat,
        lon,
        status: status.to_string(),
        next_stop: next_stop.to_string(),
    }
}

fn buses_for_route(route_id: i64) -> Option<Vec<Bus>> {
    let buses = match route_id {
        1 => vec![fixture("R1-001", 44.6488, -63.5752, "On Time", "Main Street")],
        2 => vec![fixture("R2-001", 44.6360, -63.5910, "On Time", "Campus Entrance")],
        3 => vec![fixture("R3-001", 44.6600, -63.5800, "On Time", "Marina District")],
        4 => vec![fixture("R4-001", 44.6800, -63.6000, "Delayed", "Residential Area")],
        5 => vec![fixture("R5-001", 44.6550, -63.5750, "On Time", "Business District")],
        _ => return None,
    };
    Some(buses)
}

/// Get simulated bus positions for a route
#[utoipa::path(
    get,
    path = "/buses",
    params(BusesQuery),
    responses(
        (status = 200, description = "Simulated vehicle positions on the route", body = BusListResponse),
        (status = 400, description = "Missing route_id", body = ErrorResponse),
        (status = 404, description = "Unknown route", body = ErrorResponse)
    ),
    tag = "buses"
)]
pub async fn get_buses(Query(query): Query<BusesQuery>) -> Result<Json<BusListResponse>, ApiError> {
    let route_id = match query.route_id.as_deref() {
        Some(id) if !id.is_empty() => id,
        _ => return Err(bad_request("Route ID required")),
    };
    let route_id: i64 = match route_id.parse() {
        Ok(id) => id,
        Err(_) => return Err(not_found("Route not found")),
    };

    let buses = buses_for_route(route_id).ok_or_else(|| not_found("Route not found"))?;
    Ok(Json(BusListResponse { route_id, buses }))
}
