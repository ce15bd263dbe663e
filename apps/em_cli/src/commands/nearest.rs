// apps/em_cli/src/commands/nearest.rs

//! 最近行政区命令
//!
//! 给定坐标，返回平面欧氏距离最近的行政区。

use anyhow::Result;
use clap::Args;
use em_catalog::DistrictCatalog;
use em_geo::GeoPoint;
use tracing::info;

/// 最近行政区参数
#[derive(Args)]
pub struct NearestArgs {
    /// 纬度（度）
    pub lat: f64,

    /// 经度（度）
    pub lng: f64,
}

/// 执行最近行政区命令
pub fn execute(args: NearestArgs) -> Result<()> {
    let point = GeoPoint::new(args.lat, args.lng);
    if !point.is_finite() {
        anyhow::bail!("coordinates must be finite: ({}, {})", args.lat, args.lng);
    }

    let catalog = DistrictCatalog::bangladesh();
    let district = catalog.find_nearest(&point);
    info!(
        district = district.name.as_str(),
        id = district.id,
        "nearest district resolved"
    );

    println!("最近行政区: {} (id {})", district.name, district.id);
    println!("区划: {}", district.division.name());
    println!(
        "坐标: ({:.4}, {:.4})",
        district.position.lat, district.position.lng
    );
    println!(
        "平面距离: {:.4}°",
        point.distance_to(&district.position)
    );
    Ok(())
}
