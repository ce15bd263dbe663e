// apps/em_cli/src/main.rs

//! EnviroMap 命令行界面
//!
//! 提供孟加拉环境数据目录的查询、瓦片 URL 构造与外部数据源
//! 拉取工具。
//!
//! # 架构层级
//!
//! 本模块属于 **Layer 5: Application**，只消费下层 crate 的
//! 公开接口，不直接操作地图表面。

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// EnviroMap 环境监测命令行工具
#[derive(Parser)]
#[command(name = "em_cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "EnviroMap Bangladesh environmental data tools", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 显示目录与严重度统计
    Info(commands::info::InfoArgs),
    /// 查找坐标最近的行政区
    Nearest(commands::nearest::NearestArgs),
    /// 按名称搜索行政区
    Search(commands::search::SearchArgs),
    /// 构造数据集瓦片 URL
    Tiles(commands::tiles::TilesArgs),
    /// 拉取外部环境数据（失败时降级为模拟数据）
    Fetch(commands::fetch::FetchArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 执行命令
    match cli.command {
        Commands::Info(args) => commands::info::execute(args),
        Commands::Nearest(args) => commands::nearest::execute(args),
        Commands::Search(args) => commands::search::execute(args),
        Commands::Tiles(args) => commands::tiles::execute(args),
        Commands::Fetch(args) => commands::fetch::execute(args),
    }
}
