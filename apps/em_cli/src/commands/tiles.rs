// apps/em_cli/src/commands/tiles.rs

//! 瓦片 URL 命令
//!
//! 构造数据集在给定年份的 WMTS 瓦片 URL 模板或 WMS 请求 URL。

use anyhow::Result;
use clap::Args;
use em_geo::BANGLADESH_BOUNDS;
use em_layers::{SelectionState, TileLayerConfig};

/// 瓦片 URL 参数
#[derive(Args)]
pub struct TilesArgs {
    /// 数据集键（如 airQuality、forestCover）
    pub dataset: em_catalog::DatasetKey,

    /// 影像年份
    #[arg(short, long, default_value = "2023")]
    pub year: i32,

    /// 输出 WMS 请求 URL 而非 WMTS 模板
    #[arg(long)]
    pub wms: bool,
}

/// 执行瓦片命令
pub fn execute(args: TilesArgs) -> Result<()> {
    // 年份校验与图层协调器一致
    SelectionState::new(args.dataset, args.year).validate()?;

    let config = TileLayerConfig::for_dataset(args.dataset);
    println!("图层: {}", config.layer);
    println!("不透明度: {}", config.opacity);
    if args.wms {
        let bbox = BANGLADESH_BOUNDS.to_bbox_string();
        println!("{}", config.wms_url(args.year, Some(&bbox)));
    } else {
        println!("{}", config.wmts_url(args.year));
    }
    Ok(())
}
