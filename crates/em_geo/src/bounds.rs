// crates/em_geo/src/bounds.rs

//! 边界框与区域常量
//!
//! 提供简单的经纬度边界框，以及孟加拉国的显示中心与边界范围。

use crate::point::GeoPoint;
use serde::{Deserialize, Serialize};

/// 孟加拉国地图显示中心
pub const BANGLADESH_CENTER: GeoPoint = GeoPoint::new(23.685, 90.3563);

/// 孟加拉国边界范围（含少量外扩，覆盖全部 64 个行政区坐标）
pub const BANGLADESH_BOUNDS: GeoBounds = GeoBounds {
    min_lat: 20.5,
    min_lng: 88.0,
    max_lat: 26.7,
    max_lng: 92.7,
};

/// 经纬度边界框
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    /// 最小纬度
    pub min_lat: f64,
    /// 最小经度
    pub min_lng: f64,
    /// 最大纬度
    pub max_lat: f64,
    /// 最大经度
    pub max_lng: f64,
}

impl GeoBounds {
    /// 创建新的边界框（自动规范化角点顺序）
    #[must_use]
    pub fn new(min_lat: f64, min_lng: f64, max_lat: f64, max_lng: f64) -> Self {
        Self {
            min_lat: min_lat.min(max_lat),
            min_lng: min_lng.min(max_lng),
            max_lat: min_lat.max(max_lat),
            max_lng: min_lng.max(max_lng),
        }
    }

    /// 检查点是否在边界框内
    #[must_use]
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lat >= self.min_lat
            && point.lat <= self.max_lat
            && point.lng >= self.min_lng
            && point.lng <= self.max_lng
    }

    /// 计算中心点
    #[must_use]
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// WMS BBOX 参数格式（`min_lng,min_lat,max_lng,max_lat`）
    #[must_use]
    pub fn to_bbox_string(&self) -> String {
        format!(
            "{},{},{},{}",
            self.min_lng, self.min_lat, self.max_lng, self.max_lat
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_contains() {
        let dhaka = GeoPoint::new(23.8103, 90.4125);
        assert!(BANGLADESH_BOUNDS.contains(&dhaka));

        let beijing = GeoPoint::new(39.9, 116.4);
        assert!(!BANGLADESH_BOUNDS.contains(&beijing));
    }

    #[test]
    fn test_bounds_normalization() {
        let b = GeoBounds::new(26.0, 92.0, 21.0, 88.0);
        assert_eq!(b.min_lat, 21.0);
        assert_eq!(b.max_lng, 92.0);
    }

    #[test]
    fn test_center_near_display_center() {
        let c = BANGLADESH_BOUNDS.center();
        assert!((c.lat - BANGLADESH_CENTER.lat).abs() < 1.0);
        assert!((c.lng - BANGLADESH_CENTER.lng).abs() < 1.0);
    }

    #[test]
    fn test_bbox_string() {
        let b = GeoBounds::new(20.5, 88.0, 26.7, 92.7);
        assert_eq!(b.to_bbox_string(), "88,20.5,92.7,26.7");
    }
}
