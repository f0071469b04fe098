//! HTTP front end: `GET /weather?city=<name>` renders one city as HTML.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{format::format_html, provider::WeatherSource};

#[derive(Clone)]
struct AppState {
    source: Arc<dyn WeatherSource>,
}

#[derive(Debug, Deserialize)]
struct WeatherQuery {
    city: Option<String>,
}

pub fn router(source: Arc<dyn WeatherSource>) -> Router {
    Router::new()
        .route("/weather", get(weather))
        .with_state(AppState { source })
}

/// Bind `listen` and serve until the process is stopped.
pub async fn serve(listen: &str, source: Arc<dyn WeatherSource>) -> std::io::Result<()> {
    let listener = TcpListener::bind(listen).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!(%addr, "weather server listening");

    axum::serve(listener, router(source)).await
}

async fn weather(State(state): State<AppState>, Query(query): Query<WeatherQuery>) -> Response {
    let city = match query.city.as_deref().map(str::trim) {
        Some(city) if !city.is_empty() => city.to_owned(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                "Missing required query parameter: city",
            )
                .into_response();
        }
    };

    info!(city = %city, "weather requested");

    match state.source.fetch(&city).await {
        Ok(record) => Html(format_html(&record)).into_response(),
        Err(err) => {
            warn!(city = %city, error = %err, "responding with server error");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}
