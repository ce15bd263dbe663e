// crates/em_catalog/src/severity.rs

//! 严重度分级
//!
//! 将归一化指标值映射为三级严重度与显示颜色。
//!
//! # 阈值
//!
//! - `value < 0.4` → Good
//! - `0.4 <= value < 0.7` → Warning
//! - `value >= 0.7` → Alarming
//!
//! 所有数据集使用同一套"值越高越差"阈值，包括森林覆盖与水位这类
//! 直觉上"值越高越好"的指标。这是从上游继承的统一行为；是否按指标
//! 反转属于产品决策，未经确认不做更改（见 DESIGN.md）。

use serde::{Deserialize, Serialize};

/// 未知严重度的回退颜色（灰色）
///
/// 渲染边界遇到无法识别的严重度时使用，永不报错。
pub const FALLBACK_COLOR: &str = "#6b7280";

/// 三级严重度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// 良好
    Good,
    /// 预警
    Warning,
    /// 严重
    Alarming,
}

impl Severity {
    /// 按归一化指标值分级
    ///
    /// 输入先被钳制到 [0, 1]（上游未对越界值做校验，这里选择钳制
    /// 以避免未定义行为），再按固定阈值分级。
    #[must_use]
    pub fn classify(value: f64) -> Self {
        let v = value.clamp(0.0, 1.0);
        if v < 0.4 {
            Self::Good
        } else if v < 0.7 {
            Self::Warning
        } else {
            Self::Alarming
        }
    }

    /// 显示颜色（十六进制）
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Self::Good => "#10b981",
            Self::Warning => "#f59e0b",
            Self::Alarming => "#ef4444",
        }
    }

    /// 显示标签
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Alarming => "alarming",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 各严重度的行政区数量统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    /// 良好数量
    pub good: usize,
    /// 预警数量
    pub warning: usize,
    /// 严重数量
    pub alarming: usize,
}

impl SeverityCounts {
    /// 总数
    #[must_use]
    pub fn total(&self) -> usize {
        self.good + self.warning + self.alarming
    }
}
