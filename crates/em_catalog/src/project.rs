// crates/em_catalog/src/project.rs

//! 地图投影数据
//!
//! 从目录与选定数据集派生地图需要的两类视图就绪数据：
//!
//! - 标记点列表（位置 + 颜色 + 严重度）
//! - 热力图点列表（位置 + 强度）
//!
//! 两个投影函数均为纯函数，输出顺序与输入顺序一致。

use crate::district::{DatasetKey, District};
use crate::severity::Severity;
use em_geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// 标记点描述
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerPoint {
    /// 行政区 id
    pub id: u32,
    /// 位置
    pub position: GeoPoint,
    /// 回退修正后的指标值
    pub value: f64,
    /// 严重度
    pub severity: Severity,
    /// 显示颜色（十六进制）
    pub color: &'static str,
}

/// 热力图点
///
/// 强度为回退修正后的原始指标值，不是分级结果。梯度渲染由地图
/// 渲染侧按 [`HeatGradient`] 的固定三段配色完成。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatPoint {
    /// 位置
    pub position: GeoPoint,
    /// 强度 [0, 1]
    pub intensity: f64,
}

/// 热力图固定三段梯度
///
/// 梯度节点与严重度阈值对齐（0.4 / 0.7），保证热力图与标记颜色
/// 视觉一致。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatGradient {
    /// 低段节点（绿）
    pub low: (f64, &'static str),
    /// 中段节点（琥珀）
    pub mid: (f64, &'static str),
    /// 高段节点（红）
    pub high: (f64, &'static str),
}

impl Default for HeatGradient {
    fn default() -> Self {
        Self {
            low: (0.4, Severity::Good.color()),
            mid: (0.7, Severity::Warning.color()),
            high: (1.0, Severity::Alarming.color()),
        }
    }
}

/// 投影标记点列表
///
/// 每个输入行政区产生一个标记，顺序保持；缺失指标回退为 0.5 后分级。
#[must_use]
pub fn project_markers(districts: &[&District], key: DatasetKey) -> Vec<MarkerPoint> {
    districts
        .iter()
        .map(|d| {
            let value = d.metric(key);
            let severity = Severity::classify(value);
            MarkerPoint {
                id: d.id,
                position: d.position,
                value,
                severity,
                color: severity.color(),
            }
        })
        .collect()
}

/// 投影热力图点列表
///
/// 强度为回退修正后的原始指标值。
#[must_use]
pub fn project_heatmap(districts: &[&District], key: DatasetKey) -> Vec<HeatPoint> {
    districts
        .iter()
        .map(|d| HeatPoint {
            position: d.position,
            intensity: d.metric(key),
        })
        .collect()
}
