// crates/em_geo/src/lib.rs

//! EnviroMap Geo Layer
//!
//! 地理坐标类型与孟加拉国边界范围。
//!
//! # 模块概览
//!
//! - [`point`]: `GeoPoint` 经纬度点，平面度空间距离
//! - [`bounds`]: `GeoBounds` 边界框与孟加拉国常量
//!
//! # 距离计算
//!
//! 本项目的最近邻查询统一使用**平面欧几里得距离**（度空间），不使用
//! 大圆距离。这是从上游行为继承的简化：点击到行政区的映射是可观测
//! 行为，改用测地线距离会改变映射结果。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bounds;
pub mod point;

pub use bounds::{GeoBounds, BANGLADESH_BOUNDS, BANGLADESH_CENTER};
pub use point::GeoPoint;
