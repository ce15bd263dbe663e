// crates/em_geo/src/point.rs

//! 地理点类型
//!
//! 提供项目统一的经纬度点类型与距离计算。
//!
//! # 距离计算
//!
//! - `distance_to` / `distance_squared_to`: 平面欧几里得距离（度空间）
//!
//! 注意：度空间距离不是测地线距离。在孟加拉国纬度范围内两者的偏差
//! 很小，且最近邻结果是上游可观测行为，因此刻意保留平面距离。

use serde::{Deserialize, Serialize};

/// 经纬度点
///
/// # 示例
///
/// ```
/// use em_geo::GeoPoint;
///
/// let dhaka = GeoPoint::new(23.8103, 90.4125);
/// let gazipur = GeoPoint::new(24.0023, 90.4264);
/// let d2 = dhaka.distance_squared_to(&gazipur);
/// assert!(d2 > 0.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// 纬度（度，WGS84）
    pub lat: f64,
    /// 经度（度，WGS84）
    pub lng: f64,
}

impl GeoPoint {
    /// 创建新的地理点
    #[inline]
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// 平面欧几里得距离的平方（度空间）
    ///
    /// 仅用于同一坐标系内的相对比较（最近邻查询），无物理单位含义。
    #[inline]
    #[must_use]
    pub fn distance_squared_to(&self, other: &Self) -> f64 {
        let dlat = self.lat - other.lat;
        let dlng = self.lng - other.lng;
        dlat * dlat + dlng * dlng
    }

    /// 平面欧几里得距离（度空间）
    #[inline]
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        self.distance_squared_to(other).sqrt()
    }

    /// 判断坐标是否为有限数（非NaN、非Inf）
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl From<GeoPoint> for (f64, f64) {
    fn from(p: GeoPoint) -> Self {
        (p.lat, p.lng)
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self::new(lat, lng)
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(p: GeoPoint) -> Self {
        [p.lat, p.lng]
    }
}
