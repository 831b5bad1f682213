use axum::body::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use secrecy::ExposeSecret;
use serde_json::Value;

use crate::error::RelayError;
use crate::models::{ChatCompletionRequest, Message, Provider, SummarizeRequest};

/**
 * \brief 上游 API 的回复，中继处理前先分类。
 */
#[derive(Debug)]
pub enum UpstreamReply {
    /** \brief 2xx 且为 JSON，保留原始字节。 */
    Success { body: Bytes },
    /** \brief 非 2xx，附带上游错误信息。 */
    Failure { status: u16, message: String },
}

/**
 * \brief 将转录文本与指令拼成发往上游的单条用户消息。
 */
pub fn combined_prompt(transcript: &str, prompt: &str) -> String {
    format!(
        "Transcript:\n---\n{}\n---\nInstruction: {}",
        transcript, prompt
    )
}

/**
 * \brief 执行一次摘要请求，原样返回上游响应体。
 */
pub async fn summarize(
    client: &reqwest::Client,
    provider: &Provider,
    request: &SummarizeRequest,
) -> Result<Bytes, RelayError> {
    if !request.is_complete() {
        return Err(RelayError::MissingField);
    }

    let messages = [Message::user(combined_prompt(
        &request.transcript,
        &request.prompt,
    ))];
    tracing::debug!(
        model = %provider.model,
        transcript_len = request.transcript.len(),
        prompt_len = request.prompt.len(),
        "forwarding summarize request"
    );

    match chat_once(client, provider, &messages).await? {
        UpstreamReply::Success { body } => {
            tracing::debug!(body_len = body.len(), "completion received");
            Ok(body)
        }
        UpstreamReply::Failure { status, message } => {
            Err(RelayError::Upstream { status, message })
        }
    }
}

/**
 * \brief 非流式调用。
 */
pub async fn chat_once(
    client: &reqwest::Client,
    provider: &Provider,
    messages: &[Message],
) -> Result<UpstreamReply, RelayError> {
    let url = format!(
        "{}/v1/chat/completions",
        provider.api_base.trim_end_matches('/')
    );
    let body = ChatCompletionRequest {
        messages,
        model: &provider.model,
    };

    let resp = client
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .header(
            AUTHORIZATION,
            format!("Bearer {}", provider.api_key.expose_secret()),
        )
        .json(&body)
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        return Ok(UpstreamReply::Failure {
            status: status.as_u16(),
            message: extract_error_message(&text),
        });
    }

    let body = resp.bytes().await?;
    serde_json::from_slice::<Value>(&body)?;
    Ok(UpstreamReply::Success { body })
}

fn extract_error_message(text: &str) -> String {
    let Ok(v) = serde_json::from_str::<Value>(text) else {
        return text.to_string();
    };
    let error = v.get("error");
    error
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .or_else(|| error.and_then(|e| e.as_str()))
        .map(|s| s.to_string())
        .unwrap_or_else(|| text.to_string())
}
