use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::RelayConfig,
    error::RelayError,
    llm,
    models::{Provider, SummarizeRequest},
};

/**
 * \brief 中继共享状态。凭据随 Provider 注入，处理函数不读取环境变量。
 */
#[derive(Clone)]
pub struct RelayState {
    provider: Arc<Provider>,
    http: reqwest::Client,
}

impl RelayState {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider: Arc::new(provider),
            http: reqwest::Client::new(),
        }
    }
}

/**
 * \brief 构建中继路由。转录文本不设大小上限。
 */
pub fn app(state: RelayState) -> Router {
    Router::new()
        .route("/api/summarize", post(summarize))
        .route("/api/health", get(health_check))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/**
 * \brief 启动中继服务，直到进程退出。
 * \param config 监听地址与上游 API 配置
 */
pub async fn run(config: RelayConfig) -> Result<()> {
    let addr = config.addr();
    let app = app(RelayState::new(config.provider));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

/**
 * \brief POST /api/summarize
 */
async fn summarize(
    State(state): State<RelayState>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Response, RelayError> {
    let Json(request) = payload.map_err(|rejection| match rejection {
        JsonRejection::JsonDataError(_)
        | JsonRejection::JsonSyntaxError(_)
        | JsonRejection::MissingJsonContentType(_) => {
            tracing::debug!("unusable summarize body: {}", rejection);
            RelayError::MissingField
        }
        other => RelayError::Body(other.body_text()),
    })?;

    let body = llm::summarize(&state.http, &state.provider, &request).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}
