use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/**
 * \brief 中继使用的上游 API 配置。
 */
#[derive(Debug)]
pub struct Provider {
    /** \brief API 基地址，不含 `/v1/...` 后缀 */
    pub api_base: String,
    /** \brief Bearer 凭据，不写入日志 */
    pub api_key: SecretString,
    /** \brief 模型名 */
    pub model: String,
}

impl Provider {
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            api_key: SecretString::from(api_key.into()),
            model: model.into(),
        }
    }
}

/**
 * \brief 消息结构，与 OpenAI Chat 消息格式对齐。
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /** \brief 角色：system/user/assistant */
    pub role: String,
    /** \brief 内容 */
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/**
 * \brief `POST /api/summarize` 请求体。
 *
 * 缺失字段按空字符串处理，由中继统一返回缺少字段错误。
 */
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub prompt: String,
}

impl SummarizeRequest {
    pub fn new(transcript: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            prompt: prompt.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.transcript.is_empty() && !self.prompt.is_empty()
    }
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub messages: &'a [Message],
    pub model: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/**
 * \brief 摘要响应，收到后即分类。
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarizeResult {
    Success { content: String },
    Failure { message: String },
}

impl SummarizeResult {
    /**
     * \brief 分类响应体：优先取非空的摘要内容，其次取错误信息；两者皆无时返回 `None`。
     */
    pub fn from_value(v: &Value) -> Option<Self> {
        let content = v
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .filter(|s| !s.is_empty());
        if let Some(content) = content {
            return Some(SummarizeResult::Success {
                content: content.to_string(),
            });
        }
        v.get("error")
            .and_then(|e| e.as_str())
            .filter(|s| !s.is_empty())
            .map(|message| SummarizeResult::Failure {
                message: message.to_string(),
            })
    }
}

/**
 * \brief 已读取的转录文件。
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let req: SummarizeRequest = serde_json::from_value(json!({"prompt": "short"})).unwrap();
        assert_eq!(req.transcript, "");
        assert!(!req.is_complete());
    }

    #[test]
    fn test_from_value_success() {
        let v = json!({"choices": [{"message": {"role": "assistant", "content": "- point"}}]});
        assert_eq!(
            SummarizeResult::from_value(&v),
            Some(SummarizeResult::Success {
                content: "- point".to_string()
            })
        );
    }

    #[test]
    fn test_from_value_error() {
        let v = json!({"error": "Server error"});
        assert_eq!(
            SummarizeResult::from_value(&v),
            Some(SummarizeResult::Failure {
                message: "Server error".to_string()
            })
        );
    }

    #[test]
    fn test_from_value_neither() {
        assert_eq!(SummarizeResult::from_value(&json!({"choices": []})), None);
        assert_eq!(
            SummarizeResult::from_value(&json!({"choices": [{"message": {"content": ""}}]})),
            None
        );
        assert_eq!(SummarizeResult::from_value(&json!({"error": {"message": "x"}})), None);
    }

    #[test]
    fn test_provider_debug_hides_key() {
        let provider = Provider::new("http://localhost", "sk-very-secret", "m");
        assert!(!format!("{:?}", provider).contains("sk-very-secret"));
    }
}
