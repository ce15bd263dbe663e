// crates/em_catalog/src/district.rs

//! 行政区数据模型
//!
//! 定义行政区、行政区划、数据集键与指标集合。

use em_geo::GeoPoint;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 缺失指标的统一回退值
///
/// 调用方请求某行政区不存在的指标时返回该值，与上游行为一致。
pub const DEFAULT_METRIC: f64 = 0.5;

/// 行政区划（孟加拉国 8 个一级行政区划）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Division {
    /// 达卡
    Dhaka,
    /// 吉大港
    Chittagong,
    /// 拉杰沙希
    Rajshahi,
    /// 库尔纳
    Khulna,
    /// 巴里萨尔
    Barisal,
    /// 锡尔赫特
    Sylhet,
    /// 朗布尔
    Rangpur,
    /// 迈门辛
    Mymensingh,
}

impl Division {
    /// 全部行政区划
    pub const ALL: [Division; 8] = [
        Self::Dhaka,
        Self::Chittagong,
        Self::Rajshahi,
        Self::Khulna,
        Self::Barisal,
        Self::Sylhet,
        Self::Rangpur,
        Self::Mymensingh,
    ];

    /// 显示名称
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dhaka => "Dhaka",
            Self::Chittagong => "Chittagong",
            Self::Rajshahi => "Rajshahi",
            Self::Khulna => "Khulna",
            Self::Barisal => "Barisal",
            Self::Sylhet => "Sylhet",
            Self::Rangpur => "Rangpur",
            Self::Mymensingh => "Mymensingh",
        }
    }
}

impl std::fmt::Display for Division {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Division {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dhaka" => Ok(Self::Dhaka),
            "chittagong" => Ok(Self::Chittagong),
            "rajshahi" => Ok(Self::Rajshahi),
            "khulna" => Ok(Self::Khulna),
            "barisal" => Ok(Self::Barisal),
            "sylhet" => Ok(Self::Sylhet),
            "rangpur" => Ok(Self::Rangpur),
            "mymensingh" => Ok(Self::Mymensingh),
            other => Err(format!("Unknown division: {}", other)),
        }
    }
}

/// 数据集键（封闭枚举）
///
/// 选择当前可视化的环境指标。新增键需要同时注册瓦片图层配置与
/// 目录指标字段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DatasetKey {
    /// 空气质量（气溶胶光学厚度）
    AirQuality,
    /// 森林覆盖（植被指数）
    ForestCover,
    /// 温度（地表温度）
    Temperature,
    /// 水位（雪水当量/地下水）
    WaterLevel,
    /// 天气（真彩色影像）
    Weather,
}

impl DatasetKey {
    /// 全部数据集键
    pub const ALL: [DatasetKey; 5] = [
        Self::AirQuality,
        Self::ForestCover,
        Self::Temperature,
        Self::WaterLevel,
        Self::Weather,
    ];

    /// 线上键名（与上游 JSON 字段一致）
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AirQuality => "airQuality",
            Self::ForestCover => "forestCover",
            Self::Temperature => "temperature",
            Self::WaterLevel => "waterLevel",
            Self::Weather => "weather",
        }
    }

    /// 展示标题
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::AirQuality => "Air Quality",
            Self::ForestCover => "Forest Cover",
            Self::Temperature => "Temperature",
            Self::WaterLevel => "Water Levels",
            Self::Weather => "Weather",
        }
    }
}

impl std::fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DatasetKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "airQuality" => Ok(Self::AirQuality),
            "forestCover" => Ok(Self::ForestCover),
            "temperature" => Ok(Self::Temperature),
            "waterLevel" => Ok(Self::WaterLevel),
            "weather" => Ok(Self::Weather),
            other => Err(format!("Unknown dataset key: {}", other)),
        }
    }
}

/// 指标集合
///
/// 所有指标统一归一化到闭区间 [0, 1]。各指标"高/低为差"的语义不同，
/// 但存储表示一致。访问统一走 [`MetricSet::get`]，缺失回退走
/// [`MetricSet::value_or_default`]，替代上游的鸭子类型动态索引。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    /// 空气质量
    pub air_quality: f64,
    /// 森林覆盖
    pub forest_cover: f64,
    /// 温度
    pub temperature: f64,
    /// 水位
    pub water_level: f64,
    /// 天气（部分语境使用，可缺失）
    pub weather: Option<f64>,
}

impl MetricSet {
    /// 创建完整指标集合
    #[must_use]
    pub const fn new(
        air_quality: f64,
        forest_cover: f64,
        temperature: f64,
        water_level: f64,
        weather: f64,
    ) -> Self {
        Self {
            air_quality,
            forest_cover,
            temperature,
            water_level,
            weather: Some(weather),
        }
    }

    /// 按键读取指标，缺失返回 None
    #[must_use]
    pub fn get(&self, key: DatasetKey) -> Option<f64> {
        match key {
            DatasetKey::AirQuality => Some(self.air_quality),
            DatasetKey::ForestCover => Some(self.forest_cover),
            DatasetKey::Temperature => Some(self.temperature),
            DatasetKey::WaterLevel => Some(self.water_level),
            DatasetKey::Weather => self.weather,
        }
    }

    /// 按键读取指标，缺失回退为 [`DEFAULT_METRIC`]
    #[must_use]
    pub fn value_or_default(&self, key: DatasetKey) -> f64 {
        self.get(key).unwrap_or(DEFAULT_METRIC)
    }

    /// 全部已有指标是否在 [0, 1] 内
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        in_unit(self.air_quality)
            && in_unit(self.forest_cover)
            && in_unit(self.temperature)
            && in_unit(self.water_level)
            && self.weather.map_or(true, in_unit)
    }
}

/// 行政区
///
/// 静态目录的原子单元。目录加载后只读，运行期不创建、不修改、不销毁。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct District {
    /// 稳定唯一标识（正整数，不要求连续）
    pub id: u32,
    /// 显示名称（目录内唯一性不做强约束，存在同名条目时以 id 区分）
    pub name: String,
    /// 所属行政区划
    pub division: Division,
    /// 经纬度坐标
    pub position: GeoPoint,
    /// 归一化环境指标
    pub metrics: MetricSet,
}

impl District {
    /// 按键读取指标，缺失回退为 [`DEFAULT_METRIC`]
    #[must_use]
    pub fn metric(&self, key: DatasetKey) -> f64 {
        self.metrics.value_or_default(key)
    }

    /// 名称或行政区划是否包含查询串（大小写不敏感）
    #[must_use]
    pub fn matches_text(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.name.to_lowercase().contains(&q) || self.division.name().to_lowercase().contains(&q)
    }
}
