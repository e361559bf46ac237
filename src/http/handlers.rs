//! Route handlers.
//!
//! Proxied routes are one-liners into the dispatcher; the endpoint kind is
//! the only thing that differs between them. The static and health routes
//! answer locally.

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::gateway::EndpointKind;
use crate::http::server::AppState;
use crate::registry;

type QueryMap = Query<HashMap<String, String>>;

pub async fn balance(State(state): State<AppState>, Query(query): QueryMap) -> impl IntoResponse {
    state.dispatcher.handle(EndpointKind::Balance, &query).await
}

pub async fn chart(State(state): State<AppState>, Query(query): QueryMap) -> impl IntoResponse {
    state
        .dispatcher
        .handle(EndpointKind::ChartByPeriodSeconds, &query)
        .await
}

pub async fn chart_range(
    State(state): State<AppState>,
    Query(query): QueryMap,
) -> impl IntoResponse {
    state
        .dispatcher
        .handle(EndpointKind::ChartByPeriodLabel, &query)
        .await
}

pub async fn quote(State(state): State<AppState>, Query(query): QueryMap) -> impl IntoResponse {
    state.dispatcher.handle(EndpointKind::Quote, &query).await
}

pub async fn fusion_plus_quote(
    State(state): State<AppState>,
    Query(query): QueryMap,
) -> impl IntoResponse {
    state
        .dispatcher
        .handle(EndpointKind::FusionPlusQuote, &query)
        .await
}

pub async fn history(State(state): State<AppState>, Query(query): QueryMap) -> impl IntoResponse {
    state
        .dispatcher
        .handle(EndpointKind::TransactionHistory, &query)
        .await
}

pub async fn news(State(state): State<AppState>, Query(query): QueryMap) -> impl IntoResponse {
    state.dispatcher.handle(EndpointKind::News, &query).await
}

/// Static symbol → contract-address table; no upstream dependency.
pub async fn tokens() -> Json<Value> {
    Json(registry::token_directory())
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
}

/// Liveness probe; no upstream dependency.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "OK",
        message: "API server is running",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
