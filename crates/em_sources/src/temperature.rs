// crates/em_sources/src/temperature.rs

//! NASA GISTEMP 全球温度异常数据源。
//!
//! 真实客户端抓取 GISTEMP v4 年度表格（纯文本），取指定年份的
//! 年均异常值（相对 1951-1980 基准，单位 ℃）。模拟源按每年约
//! 0.02℃ 的升温趋势加噪声生成。

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::provider::{DataProvider, SourceError};

/// GISTEMP v4 全球年度表格地址。
pub const GISTEMP_TABLE_URL: &str =
    "https://data.giss.nasa.gov/gistemp/tabledata_v4/GLB.Ts+dSST.txt";

/// 某一年的全球温度异常。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalySample {
    /// 年份。
    pub year: i32,
    /// 相对基准期的异常值（℃）。
    pub anomaly: f64,
    /// 数据来源标注。
    pub source: String,
}

/// 温度异常的趋势分级。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemperatureTrend {
    /// 趋势名称。
    pub label: &'static str,
    /// 显示颜色（十六进制）。
    pub color: &'static str,
    /// 严重程度标识。
    pub severity: &'static str,
}

/// 将异常值映射为趋势分级。
#[must_use]
pub fn temperature_trend(anomaly: f64) -> TemperatureTrend {
    if anomaly < 0.5 {
        TemperatureTrend {
            label: "Cooling",
            color: "#3b82f6",
            severity: "low",
        }
    } else if anomaly < 1.0 {
        TemperatureTrend {
            label: "Moderate Warming",
            color: "#f59e0b",
            severity: "medium",
        }
    } else if anomaly < 1.5 {
        TemperatureTrend {
            label: "Significant Warming",
            color: "#ef4444",
            severity: "high",
        }
    } else {
        TemperatureTrend {
            label: "Extreme Warming",
            color: "#dc2626",
            severity: "critical",
        }
    }
}

/// GISTEMP 表格客户端。
#[derive(Debug)]
pub struct GistempClient {
    client: reqwest::blocking::Client,
}

impl GistempClient {
    /// 构造客户端。
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }

    /// 在表格文本中查找某年份的年均异常值。
    ///
    /// 表格行形如 `2023  0.87 0.98 ... 1.17` ，第 14 列为
    /// 1-12 月均值（J-D），数值以百分之一度给出的旧格式在 v4
    /// 已改为度，这里直接按度读取。
    fn parse_year(table: &str, year: i32) -> Result<f64, SourceError> {
        let year_prefix = year.to_string();
        for line in table.lines() {
            let trimmed = line.trim_start();
            if !trimmed.starts_with(&year_prefix) {
                continue;
            }
            let parts: Vec<&str> = trimmed.split_whitespace().collect();
            if parts.first() != Some(&year_prefix.as_str()) {
                continue;
            }
            let annual = parts.get(13).ok_or_else(|| {
                SourceError::payload("NASA GISTEMP", format!("row for {year} too short"))
            })?;
            return annual.parse::<f64>().map_err(|err| {
                SourceError::payload("NASA GISTEMP", format!("bad annual mean: {err}"))
            });
        }
        Err(SourceError::payload(
            "NASA GISTEMP",
            format!("no row for year {year}"),
        ))
    }
}

impl Default for GistempClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DataProvider for GistempClient {
    type Request = i32;
    type Sample = AnomalySample;

    fn name(&self) -> &'static str {
        "NASA GISTEMP"
    }

    fn fetch(&self, year: &i32) -> Result<AnomalySample, SourceError> {
        let table = self
            .client
            .get(GISTEMP_TABLE_URL)
            .send()?
            .error_for_status()?
            .text()?;
        let anomaly = Self::parse_year(&table, *year)?;
        Ok(AnomalySample {
            year: *year,
            anomaly,
            source: "NASA GISTEMP".to_string(),
        })
    }
}

/// 模拟温度异常源，趋势约 +0.02℃/年。
#[derive(Debug, Default)]
pub struct MockTemperature;

impl MockTemperature {
    /// 生成 2000-2025 的模拟异常序列，趋势约 +0.025℃/年。
    #[must_use]
    pub fn historical_trend(&self) -> Vec<AnomalySample> {
        let mut rng = rand::thread_rng();
        (2000..=2025)
            .map(|year| AnomalySample {
                year,
                anomaly: 0.3
                    + f64::from(year - 2000) * 0.025
                    + (rng.gen::<f64>() - 0.5) * 0.2,
                source: "Mock Data".to_string(),
            })
            .collect()
    }
}

impl DataProvider for MockTemperature {
    type Request = i32;
    type Sample = AnomalySample;

    fn name(&self) -> &'static str {
        "Mock Temperature"
    }

    fn fetch(&self, year: &i32) -> Result<AnomalySample, SourceError> {
        let mut rng = rand::thread_rng();
        Ok(AnomalySample {
            year: *year,
            anomaly: 0.8 + f64::from(year - 2000) * 0.02 + (rng.gen::<f64>() - 0.5) * 0.3,
            source: "Mock Data".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_bands() {
        assert_eq!(temperature_trend(0.2).label, "Cooling");
        assert_eq!(temperature_trend(0.5).label, "Moderate Warming");
        assert_eq!(temperature_trend(1.0).label, "Significant Warming");
        assert_eq!(temperature_trend(1.5).label, "Extreme Warming");
        assert_eq!(temperature_trend(1.5).severity, "critical");
    }

    #[test]
    fn test_parse_year_from_table() {
        let table = "\
Year Jan Feb Mar Apr May Jun Jul Aug Sep Oct Nov Dec J-D D-N DJF MAM JJA SON
2022 .92 .90 1.05 .84 .85 .93 .94 .96 .91 .97 .73 .80 .90 .90 .88 .91 .94 .87
2023 .87 .98 1.21 1.00 .94 1.08 1.19 1.32 1.48 1.34 1.43 1.37 1.17 1.12 .89 1.05 1.20 1.42
";
        let anomaly = GistempClient::parse_year(table, 2023).unwrap();
        assert!((anomaly - 1.17).abs() < 1e-9);
    }

    #[test]
    fn test_parse_year_missing_row() {
        assert!(GistempClient::parse_year("Year Jan\n2022 .92\n", 1999).is_err());
    }

    #[test]
    fn test_mock_anomaly_tracks_year() {
        // 噪声幅度 ±0.15，远年份的基线差应占主导。
        let early = MockTemperature.fetch(&2000).unwrap();
        let late = MockTemperature.fetch(&2025).unwrap();
        assert!(late.anomaly > early.anomaly);
        assert_eq!(early.source, "Mock Data");
    }

    #[test]
    fn test_historical_trend_covers_range() {
        let series = MockTemperature.historical_trend();
        assert_eq!(series.len(), 26);
        assert_eq!(series[0].year, 2000);
        assert_eq!(series[25].year, 2025);
    }
}
