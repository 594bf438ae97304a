use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use reqcopy::capture::{CaptureController, CaptureSession, RequestFilter};
use reqcopy::config::{Config, ConfigLoader};
use reqcopy::export::ExportFormat;
use reqcopy::har::HarArchive;
use reqcopy::{ReqcopyError, format_query, view};

pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 列出 HAR 文件中捕获到的 API 请求（最新在前）
    List {
        /// DevTools 导出的 HAR 文件
        har: PathBuf,

        /// 按 "METHOD URL" 过滤，支持正则
        #[arg(short, long)]
        filter: Option<String>,

        /// 只显示 GraphQL 请求
        #[arg(short, long)]
        graphql_only: bool,

        /// 最多显示多少条
        #[arg(short, long)]
        limit: Option<usize>,

        /// 关闭颜色输出
        #[arg(long)]
        no_color: bool,
    },

    /// 导出一条请求为 json / curl / markdown / graphql
    Export {
        /// DevTools 导出的 HAR 文件
        har: PathBuf,

        /// list 中显示的索引，不指定时交互式选择
        #[arg(short, long)]
        index: Option<usize>,

        /// 导出格式
        #[arg(short = 'F', long)]
        format: Option<ExportFormat>,

        /// 交互式选择时的过滤条件
        #[arg(short, long)]
        filter: Option<String>,

        /// 交互式选择时只列出 GraphQL 请求
        #[arg(short, long)]
        graphql_only: bool,

        /// 写入文件而不是标准输出
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 重新缩进 GraphQL 查询（不指定文件时读取标准输入）
    FormatQuery { file: Option<PathBuf> },
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = ConfigLoader::find_and_load();

    match cli.command {
        Commands::List {
            har,
            filter,
            graphql_only,
            limit,
            no_color,
        } => {
            let color = config.color && !no_color;
            colored::control::set_override(color);

            let session = load_session(&har).await?;
            let filter = build_filter(filter.as_deref(), graphql_only, &config);
            let limit = limit.unwrap_or(config.limit);

            let rows = session.filtered(&filter);
            let shown: Vec<_> = rows.into_iter().take(limit).collect();
            view::print_requests(&shown, session.len(), color);
            Ok(())
        }
        Commands::Export {
            har,
            index,
            format,
            filter,
            graphql_only,
            output,
        } => {
            colored::control::set_override(config.color);

            let mut session = load_session(&har).await?;
            let format = format.unwrap_or(config.format);

            let index = match index {
                Some(index) => Some(index),
                None => {
                    let filter = build_filter(filter.as_deref(), graphql_only, &config);
                    view::select_interactive(&session.filtered(&filter))?
                }
            };
            if let Some(index) = index
                && !session.select(index)
            {
                return Err(ReqcopyError::IndexOutOfRange(index).into());
            }

            match session.export_selected(format) {
                Ok(text) => write_output(&text, output.as_deref(), format),
                Err(ReqcopyError::NoSelection) => {
                    show_status(&ReqcopyError::NoSelection.to_string(), false);
                    Ok(())
                }
                Err(e) => Err(e.into()),
            }
        }
        Commands::FormatQuery { file } => {
            let text = match file {
                Some(path) => fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            println!("{}", format_query(&text));
            Ok(())
        }
    }
}

/// 按 HAR 中的顺序依次交付，保证每次运行的索引一致
async fn load_session(path: &Path) -> Result<CaptureSession> {
    let archive = HarArchive::from_path(path)?;
    let exchanges = archive.exchanges();
    let total = exchanges.len();

    let mut controller = CaptureController::new(archive);
    for exchange in exchanges {
        controller.on_request_finished(exchange).await;
    }

    let session = controller.into_session();
    info!(
        "Captured {} of {} requests from {}",
        session.len(),
        total,
        path.display()
    );
    Ok(session)
}

fn build_filter(search: Option<&str>, graphql_only: bool, config: &Config) -> RequestFilter {
    let graphql_only = graphql_only || config.graphql_only;
    match search {
        None if !graphql_only => RequestFilter::all(),
        search => RequestFilter::new(search.unwrap_or_default(), graphql_only),
    }
}

fn write_output(text: &str, output: Option<&Path>, format: ExportFormat) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text)?;
            show_status(&format!("Saved to {} ({})", path.display(), format), true);
        }
        None => {
            println!("{}", text);
            show_status(&format!("Copied! ({})", format), true);
        }
    }
    Ok(())
}

/// 状态信息写到 stderr，不干扰 stdout 上的导出内容
fn show_status(message: &str, success: bool) {
    if success {
        eprintln!("{}", message.green());
    } else {
        eprintln!("{}", message.red());
    }
}
