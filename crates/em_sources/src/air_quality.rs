// crates/em_sources/src/air_quality.rs

//! OpenWeather 空气污染数据源。
//!
//! 真实客户端调用 OpenWeather Air Pollution API，返回 1-5 级 AQI
//! 与六种污染物浓度（μg/m³）。模拟源生成同量纲的随机样本。

use chrono::Utc;
use em_geo::GeoPoint;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::provider::{DataProvider, SourceError};

/// OpenWeather Air Pollution API 端点。
pub const OPENWEATHER_AIR_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/air_pollution";

/// 一次空气质量采样。
///
/// 污染物浓度单位均为 μg/m³，`aqi` 为 OpenWeather 的 1（优）到 5（极差）分级。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirQualitySample {
    /// 1-5 级空气质量指数。
    pub aqi: u8,
    /// 一氧化碳浓度。
    pub co: f64,
    /// 二氧化氮浓度。
    pub no2: f64,
    /// 臭氧浓度。
    pub o3: f64,
    /// PM2.5 细颗粒物浓度。
    pub pm2_5: f64,
    /// PM10 可吸入颗粒物浓度。
    pub pm10: f64,
    /// 二氧化硫浓度。
    pub so2: f64,
    /// 采样时刻（Unix 秒）。
    pub timestamp: i64,
}

/// AQI 等级的显示属性。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AqiCategory {
    /// 等级名称。
    pub label: &'static str,
    /// 显示颜色（十六进制）。
    pub color: &'static str,
}

/// 将 1-5 级 AQI 映射为显示等级。
///
/// 超出 5 的输入按最差等级处理。
#[must_use]
pub fn aqi_category(aqi: u8) -> AqiCategory {
    match aqi {
        0 | 1 => AqiCategory {
            label: "Good",
            color: "#00e400",
        },
        2 => AqiCategory {
            label: "Fair",
            color: "#ffff00",
        },
        3 => AqiCategory {
            label: "Moderate",
            color: "#ff7e00",
        },
        4 => AqiCategory {
            label: "Poor",
            color: "#ff0000",
        },
        _ => AqiCategory {
            label: "Very Poor",
            color: "#8f3f97",
        },
    }
}

// === OpenWeather 响应体 ===

#[derive(Debug, Deserialize)]
struct AirPollutionResponse {
    list: Vec<AirPollutionEntry>,
}

#[derive(Debug, Deserialize)]
struct AirPollutionEntry {
    main: AirPollutionMain,
    components: AirPollutionComponents,
    dt: i64,
}

#[derive(Debug, Deserialize)]
struct AirPollutionMain {
    aqi: u8,
}

#[derive(Debug, Deserialize)]
struct AirPollutionComponents {
    co: f64,
    no2: f64,
    o3: f64,
    pm2_5: f64,
    pm10: f64,
    so2: f64,
}

/// OpenWeather 空气污染客户端。
#[derive(Debug)]
pub struct OpenWeatherClient {
    client: reqwest::blocking::Client,
    api_key: String,
}

impl OpenWeatherClient {
    /// 以给定 API key 构造客户端。
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_key: api_key.into(),
        }
    }

    /// 从 `OPENWEATHER_API_KEY` 环境变量读取 key；
    /// 未设置时使用占位 key（请求会失败并触发回退）。
    #[must_use]
    pub fn from_env() -> Self {
        let api_key = std::env::var("OPENWEATHER_API_KEY").unwrap_or_else(|_| "demo_key".into());
        Self::new(api_key)
    }
}

impl DataProvider for OpenWeatherClient {
    type Request = GeoPoint;
    type Sample = AirQualitySample;

    fn name(&self) -> &'static str {
        "OpenWeather Air Pollution"
    }

    fn fetch(&self, point: &GeoPoint) -> Result<AirQualitySample, SourceError> {
        let response: AirPollutionResponse = self
            .client
            .get(OPENWEATHER_AIR_ENDPOINT)
            .query(&[
                ("lat", point.lat.to_string()),
                ("lon", point.lng.to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()?
            .error_for_status()?
            .json()?;

        let entry = response
            .list
            .first()
            .ok_or_else(|| SourceError::payload("OpenWeather Air Pollution", "empty list"))?;

        Ok(AirQualitySample {
            aqi: entry.main.aqi,
            co: entry.components.co,
            no2: entry.components.no2,
            o3: entry.components.o3,
            pm2_5: entry.components.pm2_5,
            pm10: entry.components.pm10,
            so2: entry.components.so2,
            timestamp: entry.dt,
        })
    }
}

/// 模拟空气质量源，按各污染物的典型量纲生成随机样本。
#[derive(Debug, Default)]
pub struct MockAirQuality;

impl DataProvider for MockAirQuality {
    type Request = GeoPoint;
    type Sample = AirQualitySample;

    fn name(&self) -> &'static str {
        "Mock Air Quality"
    }

    fn fetch(&self, _point: &GeoPoint) -> Result<AirQualitySample, SourceError> {
        let mut rng = rand::thread_rng();
        Ok(AirQualitySample {
            aqi: rng.gen_range(1..=5),
            co: rng.gen_range(0.0..1000.0),
            no2: rng.gen_range(0.0..50.0),
            o3: rng.gen_range(0.0..100.0),
            pm2_5: rng.gen_range(0.0..50.0),
            pm10: rng.gen_range(0.0..100.0),
            so2: rng.gen_range(0.0..20.0),
            timestamp: Utc::now().timestamp(),
        })
    }
}
