// crates/em_sources/src/weather.rs

//! NASA POWER 气象数据源。
//!
//! 真实客户端查询 POWER 逐日点位数据（温度、降水、风速、湿度），
//! 取最近一个有效观测日。模拟源生成孟加拉地区量纲的随机样本。

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, Utc};
use em_geo::GeoPoint;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::provider::{DataProvider, SourceError};

/// NASA POWER 逐日点位 API 端点。
pub const NASA_POWER_ENDPOINT: &str = "https://power.larc.nasa.gov/api/temporal/daily/point";

/// POWER 用 -999 标记缺测。
const POWER_FILL_VALUE: f64 = -900.0;

/// 一次气象采样。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    /// 2 米气温（℃）。
    pub temperature: f64,
    /// 日降水量（mm）。
    pub precipitation: f64,
    /// 2 米风速（m/s）。
    pub wind_speed: f64,
    /// 相对湿度（%）。
    pub humidity: f64,
    /// 观测日期。
    pub date: NaiveDate,
}

/// 组合温度、降水、风速的一句话描述。
#[must_use]
pub fn weather_description(sample: &WeatherSample) -> String {
    let temp = if sample.temperature < 0.0 {
        "Freezing"
    } else if sample.temperature < 10.0 {
        "Cold"
    } else if sample.temperature < 20.0 {
        "Cool"
    } else if sample.temperature < 30.0 {
        "Warm"
    } else {
        "Hot"
    };
    let rain = if sample.precipitation < 1.0 {
        "Dry"
    } else if sample.precipitation < 5.0 {
        "Light rain"
    } else {
        "Heavy rain"
    };
    let wind = if sample.wind_speed < 5.0 {
        "Calm"
    } else if sample.wind_speed < 10.0 {
        "Breezy"
    } else {
        "Windy"
    };
    format!("{temp}, {rain}, {wind}")
}

// === POWER 响应体 ===

#[derive(Debug, Deserialize)]
struct PowerResponse {
    properties: PowerProperties,
}

#[derive(Debug, Deserialize)]
struct PowerProperties {
    parameter: PowerParameters,
}

/// 键为 `YYYYMMDD` 日期字符串；BTreeMap 保证按日期升序。
#[derive(Debug, Deserialize)]
struct PowerParameters {
    #[serde(rename = "T2M")]
    t2m: BTreeMap<String, f64>,
    #[serde(rename = "PRECTOTCORR")]
    prectotcorr: BTreeMap<String, f64>,
    #[serde(rename = "WS2M")]
    ws2m: BTreeMap<String, f64>,
    #[serde(rename = "RH2M")]
    rh2m: BTreeMap<String, f64>,
}

/// NASA POWER 客户端。
#[derive(Debug)]
pub struct NasaPowerClient {
    client: reqwest::blocking::Client,
}

impl NasaPowerClient {
    /// 构造客户端。
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }

    /// 取最近一个温度非缺测的日期作为样本。
    fn latest_sample(parameters: &PowerParameters) -> Result<WeatherSample, SourceError> {
        let (date_key, temperature) = parameters
            .t2m
            .iter()
            .rev()
            .find(|(_, value)| **value > POWER_FILL_VALUE)
            .ok_or_else(|| SourceError::payload("NASA POWER", "no valid observation days"))?;

        let date = NaiveDate::parse_from_str(date_key, "%Y%m%d")
            .map_err(|err| SourceError::payload("NASA POWER", format!("bad date key: {err}")))?;

        let at = |map: &BTreeMap<String, f64>| map.get(date_key).copied().unwrap_or(0.0);
        Ok(WeatherSample {
            temperature: *temperature,
            precipitation: at(&parameters.prectotcorr).max(0.0),
            wind_speed: at(&parameters.ws2m).max(0.0),
            humidity: at(&parameters.rh2m).max(0.0),
            date,
        })
    }
}

impl Default for NasaPowerClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DataProvider for NasaPowerClient {
    type Request = GeoPoint;
    type Sample = WeatherSample;

    fn name(&self) -> &'static str {
        "NASA POWER"
    }

    fn fetch(&self, point: &GeoPoint) -> Result<WeatherSample, SourceError> {
        // POWER 数据有数天滞后，取最近一周窗口再挑有效日。
        let end = Utc::now().date_naive() - Duration::days(1);
        let start = end - Duration::days(7);

        let response: PowerResponse = self
            .client
            .get(NASA_POWER_ENDPOINT)
            .query(&[
                ("parameters", "T2M,PRECTOTCORR,WS2M,RH2M".to_string()),
                ("community", "RE".to_string()),
                ("latitude", point.lat.to_string()),
                ("longitude", point.lng.to_string()),
                ("start", start.format("%Y%m%d").to_string()),
                ("end", end.format("%Y%m%d").to_string()),
                ("format", "JSON".to_string()),
            ])
            .send()?
            .error_for_status()?
            .json()?;

        Self::latest_sample(&response.properties.parameter)
    }
}

/// 模拟气象源。
#[derive(Debug, Default)]
pub struct MockWeather;

impl DataProvider for MockWeather {
    type Request = GeoPoint;
    type Sample = WeatherSample;

    fn name(&self) -> &'static str {
        "Mock Weather"
    }

    fn fetch(&self, _point: &GeoPoint) -> Result<WeatherSample, SourceError> {
        let mut rng = rand::thread_rng();
        Ok(WeatherSample {
            temperature: 20.0 + (rng.gen::<f64>() - 0.5) * 20.0,
            precipitation: rng.gen::<f64>() * 10.0,
            wind_speed: rng.gen::<f64>() * 15.0,
            humidity: 40.0 + rng.gen::<f64>() * 40.0,
            date: Utc::now().date_naive(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use em_geo::BANGLADESH_CENTER;

    fn sample(temperature: f64, precipitation: f64, wind_speed: f64) -> WeatherSample {
        WeatherSample {
            temperature,
            precipitation,
            wind_speed,
            humidity: 50.0,
            date: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
        }
    }

    #[test]
    fn test_description_bands() {
        assert_eq!(weather_description(&sample(-5.0, 0.0, 0.0)), "Freezing, Dry, Calm");
        assert_eq!(weather_description(&sample(5.0, 2.0, 7.0)), "Cold, Light rain, Breezy");
        assert_eq!(weather_description(&sample(15.0, 8.0, 12.0)), "Cool, Heavy rain, Windy");
        assert_eq!(weather_description(&sample(25.0, 0.5, 4.9)), "Warm, Dry, Calm");
        assert_eq!(weather_description(&sample(35.0, 0.0, 0.0)), "Hot, Dry, Calm");
    }

    #[test]
    fn test_mock_sample_within_ranges() {
        let sample = MockWeather.fetch(&BANGLADESH_CENTER).unwrap();
        assert!((10.0..30.0).contains(&sample.temperature));
        assert!((0.0..10.0).contains(&sample.precipitation));
        assert!((0.0..15.0).contains(&sample.wind_speed));
        assert!((40.0..80.0).contains(&sample.humidity));
    }

    #[test]
    fn test_latest_sample_skips_fill_values() {
        let day = |d: &str, v: f64| (d.to_string(), v);
        let parameters = PowerParameters {
            t2m: BTreeMap::from([day("20240801", 28.0), day("20240802", -999.0)]),
            prectotcorr: BTreeMap::from([day("20240801", 3.0), day("20240802", -999.0)]),
            ws2m: BTreeMap::from([day("20240801", 2.5), day("20240802", -999.0)]),
            rh2m: BTreeMap::from([day("20240801", 70.0), day("20240802", -999.0)]),
        };
        let sample = NasaPowerClient::latest_sample(&parameters).unwrap();
        assert_eq!(sample.date, NaiveDate::from_ymd_opt(2024, 8, 1).unwrap());
        assert!((sample.temperature - 28.0).abs() < f64::EPSILON);
        assert!((sample.precipitation - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_latest_sample_all_fill_is_error() {
        let parameters = PowerParameters {
            t2m: BTreeMap::from([("20240801".to_string(), -999.0)]),
            prectotcorr: BTreeMap::new(),
            ws2m: BTreeMap::new(),
            rh2m: BTreeMap::new(),
        };
        assert!(NasaPowerClient::latest_sample(&parameters).is_err());
    }
}
