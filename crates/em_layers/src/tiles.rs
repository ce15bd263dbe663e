// crates/em_layers/src/tiles.rs

//! 瓦片图层配置与 URL 构造
//!
//! 每个数据集键对应一个 NASA GIBS 卫星图层配置。影像日期固定为
//! 选定年份的 8 月 1 日，不可配置（上游固定的简化）。
//!
//! 瓦片加载失败（缺失日期 404、网络错误）是渲染侧关注点，对本模块
//! 不可见，瓦片只是渲染为空白。

use em_catalog::DatasetKey;
use serde::Serialize;

/// GIBS 瓦片主机
pub const GIBS_TILE_HOST: &str = "https://gibs.earthdata.nasa.gov";

/// OSM 底图瓦片 URL 模板（任意 OSM 兼容源）
pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// WMS GetMap 端点（api 变体，见 [`TileLayerConfig::wms_url`]）
const GIBS_WMS_ENDPOINT: &str = "https://gibs.earthdata.nasa.gov/wms/epsg4326/best/wms.cgi";

/// 数据集瓦片图层配置
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayerConfig {
    /// 展示名称
    pub name: &'static str,
    /// GIBS 图层标识
    pub layer: &'static str,
    /// 图像格式
    pub format: &'static str,
    /// WMS 版本
    pub version: &'static str,
    /// 叠加不透明度
    pub opacity: f64,
    /// 配色方案标识
    pub color_scale: &'static str,
    /// 数值下限（图层物理量纲）
    pub min: f64,
    /// 数值上限
    pub max: f64,
}

impl TileLayerConfig {
    /// 按数据集键取图层配置
    ///
    /// 键为封闭枚举，每个键都有注册配置，不存在未知键路径。
    #[must_use]
    pub fn for_dataset(key: DatasetKey) -> &'static Self {
        match key {
            DatasetKey::AirQuality => &AIR_QUALITY,
            DatasetKey::ForestCover => &FOREST_COVER,
            DatasetKey::Temperature => &TEMPERATURE,
            DatasetKey::WaterLevel => &WATER_LEVEL,
            DatasetKey::Weather => &WEATHER,
        }
    }

    /// 选定年份的影像日期（固定为 8 月 1 日）
    #[must_use]
    pub fn imagery_date(year: i32) -> String {
        format!("{}-08-01", year)
    }

    /// WMTS 瓦片 URL 模板
    ///
    /// `{z}/{y}/{x}` 占位符由地图渲染侧填充。
    #[must_use]
    pub fn wmts_url(&self, year: i32) -> String {
        format!(
            "{}/wmts/epsg3857/best/{}/default/{}/250m/{{z}}/{{y}}/{{x}}.png",
            GIBS_TILE_HOST,
            self.layer,
            Self::imagery_date(year)
        )
    }

    /// WMS GetMap URL（整年时间范围变体）
    #[must_use]
    pub fn wms_url(&self, year: i32, bbox: Option<&str>) -> String {
        let mut url = format!(
            "{}?service=WMS&version={}&request=GetMap&layers={}&format={}&transparent=true&time={}-01-01/{}-12-31&width=512&height=512",
            GIBS_WMS_ENDPOINT, self.version, self.layer, self.format, year, year
        );
        if let Some(bbox) = bbox {
            url.push_str("&bbox=");
            url.push_str(bbox);
        }
        url
    }
}

/// MODIS 气溶胶光学厚度
static AIR_QUALITY: TileLayerConfig = TileLayerConfig {
    name: "MODIS Aerosol Optical Depth",
    layer: "MODIS_Terra_Aerosol",
    format: "image/png",
    version: "1.3.0",
    opacity: 0.7,
    color_scale: "viridis",
    min: 0.0,
    max: 1.0,
};

/// MODIS 植被指数（16 天合成）
static FOREST_COVER: TileLayerConfig = TileLayerConfig {
    name: "MODIS Vegetation Index",
    layer: "MODIS_Terra_NDVI_16Day",
    format: "image/png",
    version: "1.3.0",
    opacity: 0.6,
    color_scale: "greens",
    min: -0.2,
    max: 1.0,
};

/// MODIS 地表温度（日间）
static TEMPERATURE: TileLayerConfig = TileLayerConfig {
    name: "MODIS Land Surface Temperature",
    layer: "MODIS_Terra_Land_Surface_Temp_Day",
    format: "image/png",
    version: "1.3.0",
    opacity: 0.7,
    color_scale: "plasma",
    min: -50.0,
    max: 50.0,
};

/// AMSR2 雪水当量
static WATER_LEVEL: TileLayerConfig = TileLayerConfig {
    name: "AMSR2 Snow Water Equivalent",
    layer: "AMSR2_Snow_Water_Equivalent",
    format: "image/png",
    version: "1.3.0",
    opacity: 0.6,
    color_scale: "blues",
    min: 0.0,
    max: 100.0,
};

/// MODIS 真彩色影像
static WEATHER: TileLayerConfig = TileLayerConfig {
    name: "MODIS Corrected Reflectance True Color",
    layer: "MODIS_Terra_CorrectedReflectance_TrueColor",
    format: "image/png",
    version: "1.3.0",
    opacity: 0.8,
    color_scale: "natural",
    min: 0.0,
    max: 1.0,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wmts_url_exact() {
        let cfg = TileLayerConfig::for_dataset(DatasetKey::AirQuality);
        assert_eq!(
            cfg.wmts_url(2023),
            "https://gibs.earthdata.nasa.gov/wmts/epsg3857/best/MODIS_Terra_Aerosol/default/2023-08-01/250m/{z}/{y}/{x}.png"
        );
    }

    #[test]
    fn test_date_pinned_to_august() {
        assert_eq!(TileLayerConfig::imagery_date(2005), "2005-08-01");
    }

    #[test]
    fn test_every_dataset_has_config() {
        for key in DatasetKey::ALL {
            let cfg = TileLayerConfig::for_dataset(key);
            assert!(!cfg.layer.is_empty());
            assert!(cfg.opacity > 0.0 && cfg.opacity <= 1.0);
        }
    }

    #[test]
    fn test_layer_ids() {
        assert_eq!(
            TileLayerConfig::for_dataset(DatasetKey::ForestCover).layer,
            "MODIS_Terra_NDVI_16Day"
        );
        assert_eq!(
            TileLayerConfig::for_dataset(DatasetKey::WaterLevel).layer,
            "AMSR2_Snow_Water_Equivalent"
        );
    }

    #[test]
    fn test_wms_url_contains_year_range_and_bbox() {
        let cfg = TileLayerConfig::for_dataset(DatasetKey::Temperature);
        let url = cfg.wms_url(2010, Some("88,20.5,92.7,26.7"));
        assert!(url.contains("time=2010-01-01/2010-12-31"));
        assert!(url.contains("layers=MODIS_Terra_Land_Surface_Temp_Day"));
        assert!(url.ends_with("&bbox=88,20.5,92.7,26.7"));

        let no_bbox = cfg.wms_url(2010, None);
        assert!(!no_bbox.contains("bbox"));
    }
}
