use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use summarizer_core_sdk::{
    client::{self, FormSession, RelayClient},
    config::RelayConfig,
    form::{self, FormEvent, SelectedFile},
    server, telemetry,
};

/**
 * \brief CLI 程序入口：启动中继，或在终端中驱动摘要表单。
 */
#[derive(Parser, Debug)]
#[command(name = "summarizer", version, about = "Transcript summarizer relay and client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /**
     * \brief 启动中继服务，命令行参数覆盖环境变量。
     */
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        #[arg(long)]
        api_base: Option<String>,
        #[arg(long)]
        model: Option<String>,
    },

    /**
     * \brief 通过运行中的中继生成转录摘要。
     * \param file       转录文件，须为 .txt
     * \param prompt     给模型的指令
     * \param relay      中继地址
     * \param recipients 设置后输出分享摘要的 mailto 链接
     */
    Summarize {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, default_value = form::DEFAULT_PROMPT)]
        prompt: String,
        #[arg(long, default_value = client::DEFAULT_RELAY_URL)]
        relay: String,
        #[arg(long)]
        recipients: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init();

    match cli.command {
        Commands::Serve {
            host,
            port,
            api_base,
            model,
        } => {
            let mut config = RelayConfig::from_env().context("load relay configuration failed")?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(api_base) = api_base {
                config.provider.api_base = api_base;
            }
            if let Some(model) = model {
                config.provider.model = model;
            }
            tracing::info!(
                "starting relay on {} (model={}, api_base={})",
                config.addr(),
                config.provider.model,
                config.provider.api_base
            );
            server::run(config).await?;
        }
        Commands::Summarize {
            file,
            prompt,
            relay,
            recipients,
        } => {
            let mut session = FormSession::new(RelayClient::new(relay));

            session
                .dispatch(FormEvent::FileSelected(SelectedFile::from_path(file)))
                .await;
            if let Some(err) = &session.state().error {
                bail!("{}", err);
            }
            session.dispatch(FormEvent::PromptChanged(prompt)).await;
            session.dispatch(FormEvent::GenerateClicked).await;
            if let Some(err) = &session.state().error {
                bail!("{}", err);
            }
            tracing::info!(
                "summary generated: {} chars",
                session.state().summary.chars().count()
            );
            println!("{}", session.state().summary);

            if let Some(recipients) = recipients {
                session
                    .dispatch(FormEvent::RecipientsChanged(recipients))
                    .await;
                let link = session.dispatch(FormEvent::ShareClicked).await;
                match link {
                    Some(link) => println!("\n{}", link),
                    None => bail!(
                        "{}",
                        session.state().error.as_deref().unwrap_or("share failed")
                    ),
                }
            }
        }
    }

    Ok(())
}
