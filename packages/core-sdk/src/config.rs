use std::{collections::HashMap, path::Path};

use crate::{error::ConfigError, models::Provider};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai";
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

/**
 * \brief 中继配置，启动时读取一次后交给服务端。
 */
#[derive(Debug)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    pub provider: Provider,
}

impl RelayConfig {
    /**
     * \brief 从进程环境与当前目录的 `.env` 加载，进程环境优先。
     */
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_and_file(Path::new(".env"))
    }

    pub fn from_env_and_file(path: &Path) -> Result<Self, ConfigError> {
        let file_vars = read_dotenv(path)?;
        Self::from_lookup(layered(|key| std::env::var(key).ok(), file_vars))
    }

    /**
     * \brief 通过任意键查找函数加载。缺少 `GROQ_API_KEY` 不在本地报错，由上游拒绝调用。
     */
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT").filter(|p| !p.trim().is_empty()) {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };
        let host = lookup("SUMMARIZER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let api_base =
            lookup("SUMMARIZER_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let model = lookup("SUMMARIZER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let api_key = lookup("GROQ_API_KEY").unwrap_or_default();

        Ok(Self {
            host,
            port,
            provider: Provider::new(api_base, api_key, model),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/**
 * \brief 读取 `.env` 文件；文件不存在时返回空表。
 */
pub fn read_dotenv(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let iter = dotenvy::from_path_iter(path).map_err(|source| ConfigError::Dotenv {
        path: path.display().to_string(),
        source,
    })?;
    iter.collect::<Result<HashMap<_, _>, _>>()
        .map_err(|source| ConfigError::Dotenv {
            path: path.display().to_string(),
            source,
        })
}

fn layered<F>(env: F, file_vars: HashMap<String, String>) -> impl Fn(&str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    move |key| env(key).or_else(|| file_vars.get(key).cloned())
}
