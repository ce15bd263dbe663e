// crates/em_sources/src/lib.rs

//! EnviroMap Sources Layer
//!
//! 外部环境数据源客户端与模拟数据回退。
//!
//! # 模块概览
//!
//! - [`provider`]: `DataProvider` 数据源能力接口与 `WithFallback` 回退组合器
//! - [`air_quality`]: OpenWeather 空气污染数据（AQI 与污染物浓度）
//! - [`weather`]: NASA POWER 气象数据（温度/降水/风速/湿度）
//! - [`temperature`]: NASA GISTEMP 全球温度异常
//! - [`water`]: NASA GRACE 水位与地下水数据
//!
//! # 设计原则
//!
//! 1. **降级优先**: 所有外部请求失败时降级为模拟数据，调用方永不因网络错误中断
//! 2. **能力接口**: 真实客户端与模拟源实现同一 trait，组合与测试均通过接口注入
//! 3. **同步阻塞**: 客户端使用阻塞式 HTTP，由调用方决定线程模型

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod air_quality;
pub mod provider;
pub mod temperature;
pub mod water;
pub mod weather;

pub use air_quality::{aqi_category, AirQualitySample, AqiCategory, MockAirQuality, OpenWeatherClient};
pub use provider::{DataProvider, SourceError, WithFallback};
pub use temperature::{temperature_trend, AnomalySample, GistempClient, MockTemperature, TemperatureTrend};
pub use water::{
    groundwater_status, water_level_trend, GraceClient, MockWaterLevel, WaterSample, WaterTrend,
};
pub use weather::{weather_description, MockWeather, NasaPowerClient, WeatherSample};
