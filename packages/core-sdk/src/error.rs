use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorBody;

/** \brief 缺少转录文本或指令时返回的消息。 */
pub const MISSING_FIELD_MESSAGE: &str = "Transcript and prompt required.";
/** \brief 其他所有中继失败统一返回的消息。 */
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/**
 * \brief 摘要中继的错误。
 *
 * 只有 `MissingField` 原样返回给调用方，其余错误记录日志后统一折叠为服务器错误。
 */
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("transcript and prompt required")]
    MissingField,

    #[error("unreadable request body: {0}")]
    Body(String),

    #[error("API error: {status} - {message}")]
    Upstream { status: u16, message: String },

    #[error("upstream transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingField => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let message = match &self {
            RelayError::MissingField => {
                tracing::debug!("rejecting summarize request: {}", self);
                MISSING_FIELD_MESSAGE
            }
            _ => {
                tracing::error!("summarize failed: {}", self);
                SERVER_ERROR_MESSAGE
            }
        };
        (self.status(), Json(ErrorBody::new(message))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid port {value:?}: {source}")]
    InvalidPort {
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("failed to read {path}: {source}")]
    Dotenv {
        path: String,
        source: dotenvy::Error,
    },
}

/**
 * \brief 表单调用中继时的错误。
 */
#[derive(Debug, Error)]
pub enum ClientError {
    /** \brief 网络失败，或响应体不是 JSON。 */
    #[error("relay request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /** \brief JSON 中既没有摘要内容也没有错误信息。 */
    #[error("relay response has neither a completion nor an error")]
    UnexpectedShape,
}
