// src/routes.rs
use log::info;
use warp::http::StatusCode;
use warp::reject::Rejection;
use warp::{Filter, Reply};

use std::convert::Infallible;
use std::sync::Arc;

use crate::handlers::dashboard::{get_dashboard, get_filters, get_records, DashboardQuery};
use crate::handlers::error::ApiError;
use crate::models::LoadResult;

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status;
        message = api_error.message.clone();
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        code = StatusCode::BAD_REQUEST;
        message = e.to_string();
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = StatusCode::METHOD_NOT_ALLOWED;
        message = "Method Not Allowed".to_string();
    } else {
        code = StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(load: Arc<LoadResult>) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let load_filter = warp::any().map(move || load.clone());

    let dashboard_route = warp::path!("api" / "v1" / "dashboard")
        .and(warp::get())
        .and(warp::query::<DashboardQuery>())
        .and(load_filter.clone())
        .and_then(get_dashboard);

    let filters_route = warp::path!("api" / "v1" / "filters")
        .and(warp::get())
        .and(load_filter.clone())
        .and_then(get_filters);

    let records_route = warp::path!("api" / "v1" / "records")
        .and(warp::get())
        .and(load_filter.clone())
        .and_then(get_records);

    info!("All routes configured successfully.");

    dashboard_route
        .or(filters_route)
        .or(records_route)
        .recover(handle_rejection)
}
