//! 终端版单词列表：每行输入提交一个单词，`:retry` 重新加载，`:quit` 退出

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use words_app::client::{Notice, WordsClient, WordsView};

#[derive(Debug, Parser)]
#[command(name = "words-client", about = "Display and add words via the words API")]
struct Args {
    /// API 地址
    #[arg(long, env = "WORDS_API_URL", default_value = "http://localhost:5000")]
    api_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 日志写到 stderr，避免与视图输出混在一起
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let client = WordsClient::new(args.api_url);

    let mut view = WordsView::mount(client);
    view.settle().await;
    print!("{}", view.render().await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        match line.trim() {
            ":quit" => break,
            ":retry" => {
                if matches!(view.snapshot().await.notice, Some(Notice::Error(_))) {
                    view = view.reload();
                    view.settle().await;
                }
            }
            _ => {
                view.set_input(line).await;
                view.submit().await;
            }
        }
        print!("{}", view.render().await);
    }

    view.teardown();
    Ok(())
}
