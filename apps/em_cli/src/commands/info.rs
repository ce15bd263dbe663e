// apps/em_cli/src/commands/info.rs

//! 目录信息命令
//!
//! 显示行政区目录概况与各数据集的严重度分布。

use anyhow::Result;
use clap::Args;
use em_catalog::{DatasetKey, DistrictCatalog, Division};
use tracing::info;

/// 目录信息参数
#[derive(Args)]
pub struct InfoArgs {
    /// 以 JSON 输出严重度统计
    #[arg(long)]
    pub json: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== EnviroMap 目录信息 ===");
    let catalog = DistrictCatalog::bangladesh();

    if args.json {
        return print_json(&catalog);
    }

    println!("行政区总数: {}", catalog.len());
    println!("\n各区划行政区数:");
    for division in Division::ALL {
        let count = catalog
            .districts()
            .iter()
            .filter(|d| d.division == division)
            .count();
        println!("  {:<12} {count}", division.name());
    }

    println!("\n各数据集严重度分布 (good / warning / alarming):");
    for key in DatasetKey::ALL {
        let counts = catalog.severity_counts(key);
        println!(
            "  {:<14} {} / {} / {}",
            key.as_str(),
            counts.good,
            counts.warning,
            counts.alarming
        );
    }

    Ok(())
}

fn print_json(catalog: &DistrictCatalog) -> Result<()> {
    let mut summary = serde_json::Map::new();
    summary.insert("districts".into(), catalog.len().into());
    for key in DatasetKey::ALL {
        let counts = catalog.severity_counts(key);
        summary.insert(key.as_str().into(), serde_json::to_value(counts)?);
    }
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
