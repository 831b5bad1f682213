use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/**
 * \brief 安装全局 tracing 订阅器，`RUST_LOG` 可覆盖默认过滤规则。重复调用无副作用。
 */
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // axum reports extractor rejections under `axum::rejection` at TRACE
        format!(
            "{}=debug,summarizer=info,tower_http=debug,axum::rejection=trace",
            env!("CARGO_CRATE_NAME")
        )
        .into()
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
