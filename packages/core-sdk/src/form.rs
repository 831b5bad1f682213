//! 摘要表单状态机。
//!
//! 每个用户操作都是一个 [`FormEvent`]；[`update`] 将其合并进 [`FormState`]，
//! 并以 [`Effect`] 给出调用方接下来要执行的 I/O，I/O 的结果再作为新事件传回。

use std::path::PathBuf;

use crate::error::ClientError;
use crate::mailto;
use crate::models::{SummarizeRequest, SummarizeResult, UploadedFile};

pub const DEFAULT_PROMPT: &str = "Summarize in bullet points for executives.";
pub const PLAIN_TEXT_MIME: &str = "text/plain";

/** \brief 展示给用户的错误信息。 */
pub mod messages {
    pub const INVALID_FILE: &str = "Please upload a valid .txt file.";
    pub const FILE_READ_FAILED: &str = "Failed to read the file.";
    pub const TRANSCRIPT_MISSING: &str = "Please upload a transcript first.";
    pub const PROMPT_MISSING: &str = "Please enter instructions for the summary.";
    pub const UNEXPECTED_RESPONSE: &str = "Unexpected response from server.";
    pub const GENERATE_FAILED: &str = "Failed to generate summary.";
    pub const SHARE_INPUT_MISSING: &str =
        "Please generate a summary and enter recipient emails to share.";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub transcript: String,
    pub file_name: String,
    pub prompt: String,
    /** \brief 生成后用户可直接编辑 */
    pub summary: String,
    pub recipients: String,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            transcript: String::new(),
            file_name: String::new(),
            prompt: DEFAULT_PROMPT.to_string(),
            summary: String::new(),
            recipients: String::new(),
            is_loading: false,
            error: None,
        }
    }
}

/**
 * \brief 用户选中但尚未读取的文件。
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    /** \brief 声明的类型，如 `text/plain` */
    pub mime_type: String,
    pub path: PathBuf,
}

impl SelectedFile {
    /**
     * \brief 描述本地文件，`.txt` 视为纯文本。
     */
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let is_txt = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("txt"))
            .unwrap_or(false);
        let mime_type = if is_txt {
            PLAIN_TEXT_MIME
        } else {
            "application/octet-stream"
        };
        Self {
            name,
            mime_type: mime_type.to_string(),
            path,
        }
    }
}

#[derive(Debug)]
pub enum FormEvent {
    FileSelected(SelectedFile),
    FileLoaded(UploadedFile),
    FileReadFailed,
    PromptChanged(String),
    SummaryEdited(String),
    RecipientsChanged(String),
    GenerateClicked,
    GenerateFinished(Result<SummarizeResult, ClientError>),
    ShareClicked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    ReadFile(SelectedFile),
    SendRequest(SummarizeRequest),
    OpenMailLink(String),
}

/**
 * \brief 将一个事件应用到表单。
 */
pub fn update(mut state: FormState, event: FormEvent) -> (FormState, Effect) {
    let effect = match event {
        FormEvent::FileSelected(file) => {
            if file.mime_type == PLAIN_TEXT_MIME {
                Effect::ReadFile(file)
            } else {
                state.error = Some(messages::INVALID_FILE.to_string());
                state.file_name.clear();
                state.transcript.clear();
                Effect::None
            }
        }
        FormEvent::FileLoaded(file) => {
            state.transcript = file.content;
            state.file_name = file.name;
            state.error = None;
            Effect::None
        }
        FormEvent::FileReadFailed => {
            state.error = Some(messages::FILE_READ_FAILED.to_string());
            Effect::None
        }
        FormEvent::PromptChanged(prompt) => {
            state.prompt = prompt;
            Effect::None
        }
        FormEvent::SummaryEdited(summary) => {
            state.summary = summary;
            Effect::None
        }
        FormEvent::RecipientsChanged(recipients) => {
            state.recipients = recipients;
            Effect::None
        }
        // The generate button is disabled while a request is in flight.
        FormEvent::GenerateClicked if state.is_loading => Effect::None,
        FormEvent::GenerateClicked => {
            if state.transcript.is_empty() {
                state.error = Some(messages::TRANSCRIPT_MISSING.to_string());
                Effect::None
            } else if state.prompt.is_empty() {
                state.error = Some(messages::PROMPT_MISSING.to_string());
                Effect::None
            } else {
                state.is_loading = true;
                state.error = None;
                state.summary.clear();
                Effect::SendRequest(SummarizeRequest::new(
                    state.transcript.clone(),
                    state.prompt.clone(),
                ))
            }
        }
        FormEvent::GenerateFinished(outcome) => {
            state.is_loading = false;
            match outcome {
                Ok(SummarizeResult::Success { content }) => state.summary = content,
                Ok(SummarizeResult::Failure { message }) => state.error = Some(message),
                Err(ClientError::UnexpectedShape) => {
                    state.error = Some(messages::UNEXPECTED_RESPONSE.to_string())
                }
                Err(ClientError::Transport(err)) => {
                    tracing::warn!("summarize request failed: {}", err);
                    state.error = Some(messages::GENERATE_FAILED.to_string())
                }
            }
            Effect::None
        }
        FormEvent::ShareClicked => {
            if state.summary.is_empty() || state.recipients.is_empty() {
                state.error = Some(messages::SHARE_INPUT_MISSING.to_string());
                Effect::None
            } else {
                Effect::OpenMailLink(mailto::share_link(&state.recipients, &state.summary))
            }
        }
    };
    (state, effect)
}
