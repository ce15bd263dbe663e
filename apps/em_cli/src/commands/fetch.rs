// apps/em_cli/src/commands/fetch.rs

//! 外部数据拉取命令
//!
//! 依次拉取空气质量、气象、温度异常与水储量数据。所有真实源
//! 都包在回退组合器里，网络失败时降级为模拟数据，命令不会
//! 因外部服务不可用而退出。

use anyhow::Result;
use clap::Args;
use em_geo::GeoPoint;
use em_sources::{
    aqi_category, groundwater_status, temperature_trend, water_level_trend, weather_description,
    DataProvider, GistempClient, GraceClient, MockAirQuality, MockTemperature, MockWaterLevel,
    MockWeather, NasaPowerClient, OpenWeatherClient, WithFallback,
};
use tracing::info;

/// 数据拉取参数
#[derive(Args)]
pub struct FetchArgs {
    /// 纬度（度），默认孟加拉中心
    #[arg(long, default_value = "23.685")]
    pub lat: f64,

    /// 经度（度），默认孟加拉中心
    #[arg(long, default_value = "90.3563")]
    pub lng: f64,

    /// 年份（温度异常与水储量查询用）
    #[arg(short, long, default_value = "2023")]
    pub year: i32,

    /// 跳过真实请求，全部使用模拟数据
    #[arg(long)]
    pub offline: bool,
}

/// 执行数据拉取命令
pub fn execute(args: FetchArgs) -> Result<()> {
    let point = GeoPoint::new(args.lat, args.lng);
    if !point.is_finite() {
        anyhow::bail!("coordinates must be finite: ({}, {})", args.lat, args.lng);
    }
    info!(lat = args.lat, lng = args.lng, year = args.year, "fetching environmental data");

    print_air_quality(&point, args.offline)?;
    print_weather(&point, args.offline)?;
    print_temperature(args.year, args.offline)?;
    print_water(args.year, args.offline)?;
    Ok(())
}

fn print_air_quality(point: &GeoPoint, offline: bool) -> Result<()> {
    let sample = if offline {
        MockAirQuality.fetch(point)?
    } else {
        WithFallback::new(OpenWeatherClient::from_env(), MockAirQuality).fetch(point)?
    };
    let category = aqi_category(sample.aqi);

    println!("=== 空气质量 ===");
    println!("AQI: {} ({})", sample.aqi, category.label);
    println!("PM2.5: {:.1} μg/m³  PM10: {:.1} μg/m³", sample.pm2_5, sample.pm10);
    println!(
        "CO: {:.1}  NO₂: {:.1}  O₃: {:.1}  SO₂: {:.1}",
        sample.co, sample.no2, sample.o3, sample.so2
    );
    Ok(())
}

fn print_weather(point: &GeoPoint, offline: bool) -> Result<()> {
    let sample = if offline {
        MockWeather.fetch(point)?
    } else {
        WithFallback::new(NasaPowerClient::new(), MockWeather).fetch(point)?
    };

    println!("\n=== 气象 ({}) ===", sample.date);
    println!("温度: {:.1} ℃  降水: {:.1} mm", sample.temperature, sample.precipitation);
    println!("风速: {:.1} m/s  湿度: {:.0}%", sample.wind_speed, sample.humidity);
    println!("概况: {}", weather_description(&sample));
    Ok(())
}

fn print_temperature(year: i32, offline: bool) -> Result<()> {
    let sample = if offline {
        MockTemperature.fetch(&year)?
    } else {
        WithFallback::new(GistempClient::new(), MockTemperature).fetch(&year)?
    };
    let trend = temperature_trend(sample.anomaly);

    println!("\n=== 温度异常 ({}) ===", sample.year);
    println!("异常: {:+.2} ℃ ({})", sample.anomaly, trend.label);
    println!("来源: {}", sample.source);
    Ok(())
}

fn print_water(year: i32, offline: bool) -> Result<()> {
    let sample = if offline {
        MockWaterLevel.fetch(&year)?
    } else {
        WithFallback::new(GraceClient::new(), MockWaterLevel).fetch(&year)?
    };

    println!("\n=== 水储量 ({}) ===", sample.year);
    println!(
        "水位异常: {:+.1} cm ({})",
        sample.water_level,
        water_level_trend(sample.water_level).label
    );
    println!(
        "地下水: {:+.1} cm ({})",
        sample.groundwater,
        groundwater_status(sample.groundwater)
    );
    println!("来源: {}", sample.source);
    Ok(())
}
