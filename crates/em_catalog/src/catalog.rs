// crates/em_catalog/src/catalog.rs

//! 行政区目录
//!
//! 不可变的行政区参考表，含全部 64 个行政区的坐标与归一化环境指标。
//! 目录在构造时加载一次，此后只读；它是参考数据集，不是实时存储。
//!
//! # 查询
//!
//! - [`DistrictCatalog::find_nearest`]: 平面度空间最近邻（线性扫描，
//!   严格小于比较，距离并列时返回目录序靠前者）
//! - [`DistrictCatalog::filter_by_text`]: 名称/行政区划子串过滤
//!
//! # 示例
//!
//! ```
//! use em_catalog::DistrictCatalog;
//! use em_geo::GeoPoint;
//!
//! let catalog = DistrictCatalog::bangladesh();
//! let d = catalog.find_nearest(&GeoPoint::new(23.8103, 90.4125));
//! assert_eq!(d.name, "Dhaka");
//! ```

use crate::district::{DatasetKey, District, Division, MetricSet};
use crate::severity::{Severity, SeverityCounts};
use em_foundation::{EmError, EmResult};
use em_geo::GeoPoint;
use std::collections::HashSet;

/// 行政区目录
///
/// 显式构造、显式注入的不可变表。共享只读，任意数量的地图实例可以
/// 并发读取而无需同步。
#[derive(Debug, Clone)]
pub struct DistrictCatalog {
    districts: Vec<District>,
}

impl DistrictCatalog {
    /// 从行政区列表构造目录
    ///
    /// 目录不能为空，id 必须唯一，指标必须在 [0, 1] 内。
    pub fn new(districts: Vec<District>) -> EmResult<Self> {
        let catalog = Self { districts };
        catalog.validate()?;
        Ok(catalog)
    }

    /// 内置的孟加拉国目录（64 个行政区）
    #[must_use]
    pub fn bangladesh() -> Self {
        Self {
            districts: seed_districts(),
        }
    }

    /// 验证目录不变量
    pub fn validate(&self) -> EmResult<()> {
        if self.districts.is_empty() {
            return Err(EmError::validation("catalog must not be empty"));
        }

        let mut seen = HashSet::new();
        for d in &self.districts {
            if !seen.insert(d.id) {
                return Err(EmError::validation(format!("duplicate district id: {}", d.id)));
            }
            if !d.position.is_finite() {
                return Err(EmError::validation(format!(
                    "district '{}' has non-finite coordinates",
                    d.name
                )));
            }
            if !d.metrics.is_normalized() {
                return Err(EmError::validation(format!(
                    "district '{}' has metrics outside [0, 1]",
                    d.name
                )));
            }
        }
        Ok(())
    }

    /// 全部行政区（作者顺序，跨调用稳定）
    #[must_use]
    pub fn districts(&self) -> &[District] {
        &self.districts
    }

    /// 目录条目数
    #[must_use]
    pub fn len(&self) -> usize {
        self.districts.len()
    }

    /// 目录是否为空（构造约束下恒为 false）
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }

    /// 按 id 查找
    #[must_use]
    pub fn by_id(&self, id: u32) -> Option<&District> {
        self.districts.iter().find(|d| d.id == id)
    }

    /// 最近邻查询（平面度空间欧几里得距离）
    ///
    /// 线性扫描全表；严格小于比较保证并列时返回目录序靠前的行政区。
    /// 目录非空，因此永不失败。
    #[must_use]
    pub fn find_nearest(&self, point: &GeoPoint) -> &District {
        let mut nearest = &self.districts[0];
        let mut min_d2 = f64::INFINITY;

        for d in &self.districts {
            let d2 = point.distance_squared_to(&d.position);
            if d2 < min_d2 {
                min_d2 = d2;
                nearest = d;
            }
        }
        nearest
    }

    /// 文本过滤（大小写不敏感子串匹配，名称或行政区划）
    ///
    /// 空查询返回全表；查询串不做 trim，与上游一致。
    #[must_use]
    pub fn filter_by_text(&self, query: &str) -> Vec<&District> {
        if query.is_empty() {
            return self.districts.iter().collect();
        }
        self.districts
            .iter()
            .filter(|d| d.matches_text(query))
            .collect()
    }

    /// 按数据集统计各严重度的行政区数量
    #[must_use]
    pub fn severity_counts(&self, key: DatasetKey) -> SeverityCounts {
        let mut counts = SeverityCounts::default();
        for d in &self.districts {
            match Severity::classify(d.metric(key)) {
                Severity::Good => counts.good += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Alarming => counts.alarming += 1,
            }
        }
        counts
    }
}

/// 构造一个行政区条目（内部种子数据辅助）
fn row(
    id: u32,
    name: &str,
    division: Division,
    lat: f64,
    lng: f64,
    air_quality: f64,
    forest_cover: f64,
    temperature: f64,
    water_level: f64,
    weather: f64,
) -> District {
    District {
        id,
        name: name.to_string(),
        division,
        position: GeoPoint::new(lat, lng),
        metrics: MetricSet::new(air_quality, forest_cover, temperature, water_level, weather),
    }
}

/// 全部 64 个行政区的种子数据
///
/// 数值为归一化指标，与上游数据集逐项一致。顺序即 id 顺序。
#[rustfmt::skip]
fn seed_districts() -> Vec<District> {
    use Division::*;
    vec![
        // 达卡区划
        row(1,  "Dhaka",           Dhaka,      23.8103, 90.4125, 0.85, 0.15, 0.90, 0.7, 0.6),
        row(2,  "Gazipur",         Dhaka,      24.0023, 90.4264, 0.75, 0.25, 0.80, 0.6, 0.5),
        row(3,  "Narayanganj",     Dhaka,      23.6237, 90.4999, 0.80, 0.20, 0.85, 0.8, 0.7),
        row(4,  "Tangail",         Dhaka,      24.2513, 89.9167, 0.60, 0.40, 0.70, 0.5, 0.4),
        row(5,  "Narsingdi",       Dhaka,      23.9225, 90.7177, 0.70, 0.30, 0.75, 0.6, 0.5),
        row(6,  "Kishoreganj",     Dhaka,      24.4449, 90.7761, 0.65, 0.35, 0.80, 0.7, 0.6),
        row(7,  "Manikganj",       Dhaka,      23.8617, 90.0018, 0.55, 0.45, 0.70, 0.5, 0.4),
        row(8,  "Munshiganj",      Dhaka,      23.4607, 90.3372, 0.70, 0.30, 0.75, 0.8, 0.6),
        row(9,  "Rajbari",         Dhaka,      23.7574, 89.6445, 0.60, 0.40, 0.80, 0.7, 0.5),
        row(10, "Madaripur",       Dhaka,      23.1644, 90.1896, 0.50, 0.50, 0.70, 0.8, 0.6),
        row(11, "Gopalganj",       Dhaka,      23.0051, 89.8266, 0.55, 0.45, 0.75, 0.7, 0.5),
        row(12, "Faridpur",        Dhaka,      23.6061, 89.8405, 0.65, 0.35, 0.80, 0.6, 0.5),
        row(13, "Shariatpur",      Dhaka,      23.2423, 90.4348, 0.60, 0.40, 0.75, 0.8, 0.6),
        // 吉大港区划
        row(14, "Chittagong",      Chittagong, 22.3419, 91.8132, 0.80, 0.20, 0.85, 0.8, 0.7),
        row(15, "Cox's Bazar",     Chittagong, 21.4272, 92.0058, 0.45, 0.55, 0.60, 0.4, 0.3),
        row(16, "Rangamati",       Chittagong, 22.7324, 92.2985, 0.30, 0.70, 0.50, 0.3, 0.2),
        row(17, "Bandarban",       Chittagong, 22.1953, 92.2194, 0.25, 0.75, 0.40, 0.2, 0.1),
        row(18, "Khagrachari",     Chittagong, 23.1193, 91.9847, 0.35, 0.65, 0.60, 0.4, 0.3),
        row(19, "Feni",            Chittagong, 23.0159, 91.3976, 0.55, 0.45, 0.70, 0.5, 0.4),
        row(20, "Lakshmipur",      Chittagong, 22.9447, 90.8281, 0.50, 0.50, 0.75, 0.8, 0.6),
        row(21, "Chandpur",        Chittagong, 23.2333, 90.6500, 0.60, 0.40, 0.80, 0.7, 0.5),
        row(22, "Comilla",         Chittagong, 23.4607, 91.1809, 0.70, 0.30, 0.80, 0.6, 0.5),
        row(23, "Noakhali",        Chittagong, 22.8696, 91.0993, 0.55, 0.45, 0.75, 0.8, 0.6),
        // 拉杰沙希区划
        row(24, "Rajshahi",        Rajshahi,   24.3745, 88.6042, 0.75, 0.25, 0.85, 0.4, 0.6),
        row(25, "Natore",          Rajshahi,   24.4206, 88.9414, 0.65, 0.35, 0.80, 0.5, 0.5),
        row(26, "Naogaon",         Rajshahi,   24.8036, 88.9487, 0.60, 0.40, 0.80, 0.4, 0.5),
        row(27, "Chapainawabganj", Rajshahi,   24.5963, 88.2774, 0.55, 0.45, 0.75, 0.3, 0.4),
        row(28, "Pabna",           Rajshahi,   24.0023, 89.2374, 0.70, 0.30, 0.80, 0.5, 0.5),
        row(29, "Sirajganj",       Rajshahi,   24.4539, 89.7008, 0.65, 0.35, 0.80, 0.6, 0.5),
        row(30, "Bogura",          Rajshahi,   24.8466, 89.3778, 0.60, 0.40, 0.75, 0.4, 0.4),
        // 库尔纳区划
        row(31, "Khulna",          Khulna,     22.8456, 89.5403, 0.75, 0.25, 0.85, 0.8, 0.7),
        row(32, "Bagerhat",        Khulna,     22.6516, 89.7853, 0.55, 0.45, 0.70, 0.8, 0.6),
        row(33, "Satkhira",        Khulna,     22.7185, 89.0705, 0.50, 0.50, 0.70, 0.8, 0.6),
        row(34, "Jessore",         Khulna,     23.1707, 89.2097, 0.65, 0.35, 0.80, 0.6, 0.5),
        row(35, "Magura",          Khulna,     23.4873, 89.4197, 0.60, 0.40, 0.75, 0.5, 0.4),
        row(36, "Jhenaidah",       Khulna,     23.5448, 89.1722, 0.55, 0.45, 0.70, 0.5, 0.4),
        row(37, "Narail",          Khulna,     23.1729, 89.5122, 0.50, 0.50, 0.70, 0.6, 0.5),
        row(38, "Kushtia",         Khulna,     23.9011, 89.1222, 0.65, 0.35, 0.80, 0.5, 0.5),
        row(39, "Chuadanga",       Khulna,     23.6402, 88.8411, 0.60, 0.40, 0.75, 0.4, 0.4),
        row(40, "Meherpur",        Khulna,     23.7622, 88.6318, 0.55, 0.45, 0.70, 0.3, 0.4),
        // 巴里萨尔区划
        row(41, "Barisal",         Barisal,    22.7010, 90.3535, 0.65, 0.35, 0.80, 0.8, 0.7),
        row(42, "Bhola",           Barisal,    22.6859, 90.6483, 0.50, 0.50, 0.70, 0.9, 0.7),
        row(43, "Patuakhali",      Barisal,    22.3596, 90.3299, 0.45, 0.55, 0.70, 0.8, 0.6),
        row(44, "Pirojpur",        Barisal,    22.5791, 89.9759, 0.50, 0.50, 0.75, 0.8, 0.6),
        row(45, "Barguna",         Barisal,    22.0953, 90.1121, 0.40, 0.60, 0.60, 0.8, 0.5),
        row(46, "Jhalokati",       Barisal,    22.6446, 90.1985, 0.55, 0.45, 0.75, 0.8, 0.6),
        // 锡尔赫特区划
        row(47, "Sylhet",          Sylhet,     24.8949, 91.8687, 0.60, 0.40, 0.70, 0.6, 0.5),
        row(48, "Moulvibazar",     Sylhet,     24.4829, 91.7774, 0.45, 0.55, 0.60, 0.5, 0.4),
        row(49, "Habiganj",        Sylhet,     24.3745, 91.4151, 0.50, 0.50, 0.65, 0.5, 0.4),
        row(50, "Sunamganj",       Sylhet,     25.0656, 91.3951, 0.40, 0.60, 0.60, 0.6, 0.5),
        // 朗布尔区划
        row(51, "Rangpur",         Rangpur,    25.7466, 89.2517, 0.65, 0.35, 0.80, 0.3, 0.5),
        row(52, "Dinajpur",        Rangpur,    25.6279, 88.6332, 0.60, 0.40, 0.75, 0.2, 0.4),
        row(53, "Kurigram",        Rangpur,    25.8054, 89.6362, 0.55, 0.45, 0.70, 0.4, 0.4),
        row(54, "Lalmonirhat",     Rangpur,    25.9923, 89.2847, 0.50, 0.50, 0.65, 0.2, 0.3),
        row(55, "Nilphamari",      Rangpur,    25.9317, 88.8563, 0.55, 0.45, 0.70, 0.2, 0.4),
        row(56, "Panchagarh",      Rangpur,    26.3314, 88.5548, 0.45, 0.55, 0.60, 0.1, 0.3),
        row(57, "Thakurgaon",      Rangpur,    26.0330, 88.4668, 0.50, 0.50, 0.65, 0.2, 0.3),
        row(58, "Gaibandha",       Rangpur,    25.3285, 89.5287, 0.60, 0.40, 0.75, 0.3, 0.4),
        // 迈门辛区划
        row(59, "Mymensingh",      Mymensingh, 24.7471, 90.4203, 0.70, 0.30, 0.80, 0.5, 0.5),
        row(60, "Jamalpur",        Mymensingh, 24.9375, 89.9373, 0.65, 0.35, 0.75, 0.4, 0.4),
        row(61, "Sherpur",         Mymensingh, 25.0205, 90.0153, 0.60, 0.40, 0.70, 0.3, 0.4),
        row(62, "Netrokona",       Mymensingh, 24.8709, 90.7279, 0.55, 0.45, 0.70, 0.4, 0.4),
        // 补足 64 个（上游如此：id 64 与 id 50 为重复条目）
        row(63, "Brahmanbaria",    Chittagong, 23.9577, 91.1113, 0.65, 0.35, 0.80, 0.6, 0.5),
        row(64, "Sunamganj",       Sylhet,     25.0656, 91.3951, 0.40, 0.60, 0.60, 0.6, 0.5),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_catalog_valid() {
        let catalog = DistrictCatalog::bangladesh();
        assert_eq!(catalog.len(), 64);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_ids_unique_and_ordered() {
        let catalog = DistrictCatalog::bangladesh();
        let ids: Vec<u32> = catalog.districts().iter().map(|d| d.id).collect();
        let expected: Vec<u32> = (1..=64).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_find_nearest_dhaka_exact() {
        let catalog = DistrictCatalog::bangladesh();
        let d = catalog.find_nearest(&GeoPoint::new(23.8103, 90.4125));
        assert_eq!(d.id, 1);
        assert_eq!(d.name, "Dhaka");
    }

    #[test]
    fn test_find_nearest_deterministic() {
        let catalog = DistrictCatalog::bangladesh();
        let p = GeoPoint::new(24.5, 90.0);
        let a = catalog.find_nearest(&p).id;
        let b = catalog.find_nearest(&p).id;
        assert_eq!(a, b);
    }

    #[test]
    fn test_find_nearest_tie_break_first_in_catalog() {
        // id 50 与 id 64 坐标完全相同，严格小于比较应返回 id 50
        let catalog = DistrictCatalog::bangladesh();
        let d = catalog.find_nearest(&GeoPoint::new(25.0656, 91.3951));
        assert_eq!(d.id, 50);
    }

    #[test]
    fn test_filter_by_text_sylhet() {
        let catalog = DistrictCatalog::bangladesh();
        let hits = catalog.filter_by_text("sylhet");
        // 锡尔赫特区划共 5 条（含重复的 Sunamganj）
        assert_eq!(hits.len(), 5);
        assert!(hits.iter().all(|d| d.division == Division::Sylhet));
    }

    #[test]
    fn test_filter_by_text_empty_returns_all() {
        let catalog = DistrictCatalog::bangladesh();
        assert_eq!(catalog.filter_by_text("").len(), 64);
    }

    #[test]
    fn test_filter_by_text_case_insensitive_name() {
        let catalog = DistrictCatalog::bangladesh();
        let hits = catalog.filter_by_text("COX");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Cox's Bazar");
    }

    #[test]
    fn test_filter_no_trim() {
        // 带空格的查询不做 trim，匹配不到任何名称
        let catalog = DistrictCatalog::bangladesh();
        assert!(catalog.filter_by_text(" dhaka ").is_empty());
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let mut districts = seed_districts();
        districts[1].id = 1;
        assert!(DistrictCatalog::new(districts).is_err());
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(DistrictCatalog::new(Vec::new()).is_err());
    }

    #[test]
    fn test_all_metrics_classifiable() {
        let catalog = DistrictCatalog::bangladesh();
        for d in catalog.districts() {
            for key in DatasetKey::ALL {
                // classify 对任意目录值都有定义
                let _ = Severity::classify(d.metric(key));
            }
        }
    }

    #[test]
    fn test_severity_counts_sum() {
        let catalog = DistrictCatalog::bangladesh();
        let counts = catalog.severity_counts(DatasetKey::AirQuality);
        assert_eq!(counts.total(), 64);
    }
}
