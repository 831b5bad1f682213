use serde_json::Value;

use crate::error::ClientError;
use crate::form::{self, Effect, FormEvent, FormState, SelectedFile};
use crate::models::{SummarizeRequest, SummarizeResult, UploadedFile};

pub const DEFAULT_RELAY_URL: &str = "http://localhost:5000";

/**
 * \brief 中继摘要接口的 HTTP 客户端。
 */
#[derive(Debug, Clone)]
pub struct RelayClient {
    base_url: String,
    http: reqwest::Client,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /**
     * \brief 发送请求并分类返回的 JSON，不看状态码。
     */
    pub async fn summarize(
        &self,
        request: &SummarizeRequest,
    ) -> Result<SummarizeResult, ClientError> {
        let url = format!("{}/api/summarize", self.base_url.trim_end_matches('/'));
        let resp = self.http.post(url).json(request).send().await?;
        let v: Value = resp.json().await?;
        SummarizeResult::from_value(&v).ok_or(ClientError::UnexpectedShape)
    }
}

/**
 * \brief 执行状态转换要求的副作用，驱动 [`FormState`]。
 */
pub struct FormSession {
    state: FormState,
    relay: RelayClient,
}

impl FormSession {
    pub fn new(relay: RelayClient) -> Self {
        Self {
            state: FormState::default(),
            relay,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /**
     * \brief 应用事件及其副作用产生的后续事件。
     * \return 事件链以分享结束时返回邮件链接
     */
    pub async fn dispatch(&mut self, event: FormEvent) -> Option<String> {
        let mut next = Some(event);
        let mut mail_link = None;
        while let Some(event) = next.take() {
            let (state, effect) = form::update(std::mem::take(&mut self.state), event);
            self.state = state;
            next = match effect {
                Effect::None => None,
                Effect::ReadFile(file) => Some(read_selected(file).await),
                Effect::SendRequest(request) => Some(FormEvent::GenerateFinished(
                    self.relay.summarize(&request).await,
                )),
                Effect::OpenMailLink(link) => {
                    mail_link = Some(link);
                    None
                }
            };
        }
        mail_link
    }
}

async fn read_selected(file: SelectedFile) -> FormEvent {
    match tokio::fs::read_to_string(&file.path).await {
        Ok(content) => FormEvent::FileLoaded(UploadedFile {
            name: file.name,
            content,
        }),
        Err(err) => {
            tracing::warn!("failed to read {}: {}", file.path.display(), err);
            FormEvent::FileReadFailed
        }
    }
}
