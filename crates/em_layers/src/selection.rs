// crates/em_layers/src/selection.rs

//! 用户选择状态
//!
//! 每个地图实例持有一份可变的 `SelectionState`，由宿主视图拥有。

use em_catalog::{DatasetKey, District, Division, MetricSet};
use em_foundation::{EmError, EmResult};
use em_geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// 可选年份下限
pub const YEAR_MIN: i32 = 2000;

/// 可选年份上限
pub const YEAR_MAX: i32 = 2025;

/// 用户选择状态
///
/// UI 滑块约束了年份范围，但程序化调用必须显式校验，越界年份在
/// 进入同步器之前被拒绝。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    /// 选定数据集
    pub dataset: DatasetKey,
    /// 选定年份（2000..=2025）
    pub year: i32,
    /// 搜索文本（大小写不敏感子串过滤，不做 trim）
    pub search: String,
}

impl SelectionState {
    /// 创建新的选择状态
    #[must_use]
    pub fn new(dataset: DatasetKey, year: i32) -> Self {
        Self {
            dataset,
            year,
            search: String::new(),
        }
    }

    /// 设置数据集
    #[must_use]
    pub fn with_dataset(mut self, dataset: DatasetKey) -> Self {
        self.dataset = dataset;
        self
    }

    /// 设置年份
    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    /// 设置搜索文本
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// 校验年份范围
    pub fn validate(&self) -> EmResult<()> {
        if !(YEAR_MIN..=YEAR_MAX).contains(&self.year) {
            return Err(EmError::out_of_range(
                "year",
                f64::from(self.year),
                f64::from(YEAR_MIN),
                f64::from(YEAR_MAX),
            ));
        }
        Ok(())
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(DatasetKey::AirQuality, 2023)
    }
}

/// 选中行政区的展示快照
///
/// 按值拷贝展示所需字段，不持有目录内部引用。断开链接是有意的：
/// 展示内容不依赖目录存活（尽管目录实际上从不变化）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedDistrict {
    /// 行政区 id
    pub id: u32,
    /// 名称
    pub name: String,
    /// 行政区划
    pub division: Division,
    /// 坐标
    pub position: GeoPoint,
    /// 指标快照
    pub metrics: MetricSet,
}

impl From<&District> for SelectedDistrict {
    fn from(d: &District) -> Self {
        Self {
            id: d.id,
            name: d.name.clone(),
            division: d.division,
            position: d.position,
            metrics: d.metrics,
        }
    }
}

/// 对比模式的行政区选择
///
/// 零或一个当前选中项；对比模式下最多两个对比项。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistrictSelection {
    /// 当前选中项
    pub selected: Option<SelectedDistrict>,
    /// 对比项（最多 2 个）
    pub comparison: Vec<SelectedDistrict>,
}

impl DistrictSelection {
    /// 选中一个行政区
    pub fn select(&mut self, district: &District) {
        self.selected = Some(district.into());
    }

    /// 加入对比；超过 2 个时淘汰最早加入者
    pub fn add_comparison(&mut self, district: &District) {
        self.comparison.push(district.into());
        if self.comparison.len() > 2 {
            self.comparison.remove(0);
        }
    }

    /// 清空选择
    pub fn clear(&mut self) {
        self.selected = None;
        self.comparison.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let s = SelectionState::default()
            .with_dataset(DatasetKey::ForestCover)
            .with_year(2010)
            .with_search("syl");
        assert_eq!(s.dataset, DatasetKey::ForestCover);
        assert_eq!(s.year, 2010);
        assert_eq!(s.search, "syl");
    }

    #[test]
    fn test_validate_year_range() {
        assert!(SelectionState::default().with_year(2000).validate().is_ok());
        assert!(SelectionState::default().with_year(2025).validate().is_ok());
        assert!(SelectionState::default().with_year(1999).validate().is_err());
        assert!(SelectionState::default().with_year(2026).validate().is_err());
    }

    #[test]
    fn test_comparison_cap_two() {
        use em_catalog::DistrictCatalog;

        let catalog = DistrictCatalog::bangladesh();
        let mut sel = DistrictSelection::default();
        let districts = catalog.districts();

        sel.add_comparison(&districts[0]);
        sel.add_comparison(&districts[1]);
        sel.add_comparison(&districts[2]);

        assert_eq!(sel.comparison.len(), 2);
        // 最早加入的 id=1 被淘汰
        assert_eq!(sel.comparison[0].id, 2);
        assert_eq!(sel.comparison[1].id, 3);
    }

    #[test]
    fn test_selected_is_value_copy() {
        use em_catalog::DistrictCatalog;

        let catalog = DistrictCatalog::bangladesh();
        let mut sel = DistrictSelection::default();
        sel.select(&catalog.districts()[0]);

        drop(catalog);
        // 快照不依赖目录存活
        assert_eq!(sel.selected.unwrap().name, "Dhaka");
    }
}
