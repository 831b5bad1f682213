pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod llm;
pub mod mailto;
pub mod models;
pub mod server;
pub mod telemetry;

/**
 * \brief SDK 预导入集合，方便外部引用常用模块。
 */
pub mod prelude {
    pub use crate::client;
    pub use crate::config;
    pub use crate::error;
    pub use crate::form;
    pub use crate::llm;
    pub use crate::mailto;
    pub use crate::models;
    pub use crate::server;
    pub use crate::telemetry;
}
