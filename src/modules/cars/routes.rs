//! HTTP boundary for the cars resource. Controller results are mapped to
//! status codes here and nowhere else.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use rental_http::error::AppError;
use serde::Deserialize;

use super::controller::CarController;
use super::error::OperationFailure;
use super::models::{CarInput, CarList, CarRecord};
use super::store::CarFilter;

/// Query string accepted by the list endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCarsQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub size: Option<String>,
    pub is_currently_rented: Option<bool>,
}

pub fn router(controller: Arc<CarController>) -> Router {
    Router::new()
        .route("/", get(list_cars).post(create_car))
        .route("/health", get(health_check))
        .route("/{id}", get(get_car).put(update_car).delete(delete_car))
        .with_state(controller)
}

async fn health_check() -> &'static str {
    "cars module is healthy"
}

/// Unparseable JSON is a bad request; well-formed JSON with the wrong field
/// types is a rejected car, like any other validation failure.
fn body_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(_) => {
            OperationFailure::validation(rejection.body_text()).into()
        }
        _ => AppError::bad_request(rejection.body_text()),
    }
}

fn path_error(rejection: PathRejection) -> AppError {
    AppError::bad_request(rejection.body_text())
}

async fn list_cars(
    State(controller): State<Arc<CarController>>,
    query: Result<Query<ListCarsQuery>, QueryRejection>,
) -> Result<Json<CarList>, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

    let page = controller
        .page_request(query.page, query.page_size)
        .map_err(|err| AppError::bad_request(err.to_string()))?;
    let filter = CarFilter {
        size: query.size,
        is_currently_rented: query.is_currently_rented,
    };

    // No local recovery: store failures surface as server errors
    let list = controller
        .list_cars(page, filter)
        .await
        .map_err(|failure| AppError::Internal(failure.into()))?;
    Ok(Json(list))
}

async fn create_car(
    State(controller): State<Arc<CarController>>,
    body: Result<Json<CarInput>, JsonRejection>,
) -> Result<(StatusCode, Json<CarRecord>), AppError> {
    let Json(input) = body.map_err(body_error)?;

    let car = controller.create_car(input).await?;
    Ok((StatusCode::CREATED, Json(car)))
}

/// Responds 200 even when the car is absent; the body is then `null`.
async fn get_car(
    State(controller): State<Arc<CarController>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Option<CarRecord>>, AppError> {
    let Path(id) = id.map_err(path_error)?;
    let car = controller
        .get_car(&id)
        .await
        .map_err(|failure| AppError::Internal(failure.into()))?;
    Ok(Json(car))
}

async fn update_car(
    State(controller): State<Arc<CarController>>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<CarInput>, JsonRejection>,
) -> Result<Json<CarRecord>, AppError> {
    let Path(id) = id.map_err(path_error)?;
    let Json(input) = body.map_err(body_error)?;

    let car = controller.update_car(&id, input).await?;
    Ok(Json(car))
}

async fn delete_car(
    State(controller): State<Arc<CarController>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id.map_err(path_error)?;
    controller
        .delete_car(&id)
        .await
        .map_err(|failure| AppError::Internal(failure.into()))?;
    Ok(StatusCode::NO_CONTENT)
}
