// apps/em_cli/src/commands/search.rs

//! 行政区搜索命令
//!
//! 按名称或区划名的大小写不敏感子串匹配搜索行政区。

use anyhow::Result;
use clap::Args;
use em_catalog::{DatasetKey, DistrictCatalog, Severity};

/// 搜索参数
#[derive(Args)]
pub struct SearchArgs {
    /// 查询文本（空串返回全部）
    #[arg(default_value = "")]
    pub query: String,

    /// 同时显示该数据集的指标与严重度
    #[arg(short, long)]
    pub dataset: Option<DatasetKey>,
}

/// 执行搜索命令
pub fn execute(args: SearchArgs) -> Result<()> {
    let catalog = DistrictCatalog::bangladesh();
    let matches = catalog.filter_by_text(&args.query);

    println!("匹配 {} 个行政区:", matches.len());
    for district in matches {
        match args.dataset {
            Some(key) => {
                let value = district.metric(key);
                let severity = Severity::classify(value);
                println!(
                    "  {:>2}  {:<16} {:<12} {:.2} ({})",
                    district.id,
                    district.name,
                    district.division.name(),
                    value,
                    severity.label()
                );
            }
            None => {
                println!(
                    "  {:>2}  {:<16} {}",
                    district.id,
                    district.name,
                    district.division.name()
                );
            }
        }
    }
    Ok(())
}
