// crates/em_catalog/src/lib.rs

//! EnviroMap Catalog Layer
//!
//! 行政区目录、严重度分级与地图投影数据。
//!
//! # 模块概览
//!
//! - [`district`]: 行政区数据模型（`District`、`Division`、`DatasetKey`、`MetricSet`）
//! - [`catalog`]: 不可变行政区目录，支持最近邻与文本过滤查询
//! - [`severity`]: 三级严重度分级与显示颜色
//! - [`project`]: 标记点与热力图投影（视图就绪数据）
//!
//! # 设计原则
//!
//! 1. **显式注入**: 目录是显式构造的不可变表，不使用模块级全局状态
//! 2. **封闭枚举**: 数据集键与行政区划均为封闭枚举，未知键在类型边界被拒绝
//! 3. **显式回退**: 缺失指标统一回退为 0.5，回退分支显式可见、可测试

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod district;
pub mod project;
pub mod severity;

pub use catalog::DistrictCatalog;
pub use district::{DatasetKey, District, Division, MetricSet, DEFAULT_METRIC};
pub use project::{project_heatmap, project_markers, HeatGradient, HeatPoint, MarkerPoint};
pub use severity::{Severity, SeverityCounts, FALLBACK_COLOR};
