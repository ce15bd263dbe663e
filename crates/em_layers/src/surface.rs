// crates/em_layers/src/surface.rs

//! 地图表面抽象
//!
//! `MapSurface` 是注入式能力接口：同步器只依赖"增删图层"的能力，
//! 不依赖具体渲染引擎，图层协调逻辑因此可以脱离真实地图做单元测试。
//!
//! 句柄是不透明标识，由表面实现分配；同步器持有句柄并负责在替换与
//! 销毁时归还。

use em_catalog::{HeatGradient, HeatPoint, MarkerPoint};
use serde::{Deserialize, Serialize};

/// 不透明图层句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerHandle(pub u64);

/// 信息浮层内容
///
/// 持久浮层，内容随选择状态原地更新，不参与图层的增删循环。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoOverlay {
    /// 当前图层展示名称
    pub layer_name: String,
    /// 当前年份
    pub year: i32,
    /// 图例条目（标签 + 颜色）
    pub legend: Vec<(String, String)>,
}

impl InfoOverlay {
    /// 构造标准三级图例的信息浮层
    #[must_use]
    pub fn new(layer_name: impl Into<String>, year: i32) -> Self {
        use em_catalog::Severity;
        Self {
            layer_name: layer_name.into(),
            year,
            legend: [Severity::Good, Severity::Warning, Severity::Alarming]
                .iter()
                .map(|s| (s.label().to_string(), s.color().to_string()))
                .collect(),
        }
    }
}

/// 地图表面能力接口
///
/// 实现方是具体渲染引擎的适配层；测试用双实现记录全部调用。
/// 所有方法同步执行至完成，无内部挂起点。
pub trait MapSurface {
    /// 添加底图瓦片层
    fn add_base_layer(&mut self, url_template: &str) -> LayerHandle;

    /// 添加数据集瓦片叠加层
    fn add_tile_overlay(&mut self, url_template: &str, opacity: f64) -> LayerHandle;

    /// 添加一个行政区标记
    fn add_marker(&mut self, marker: &MarkerPoint) -> LayerHandle;

    /// 添加热力图层
    fn add_heat_layer(&mut self, points: &[HeatPoint], gradient: &HeatGradient) -> LayerHandle;

    /// 添加信息浮层
    fn add_info_overlay(&mut self, info: &InfoOverlay) -> LayerHandle;

    /// 原地更新信息浮层内容
    fn update_info_overlay(&mut self, handle: LayerHandle, info: &InfoOverlay);

    /// 移除任意图层
    fn remove_layer(&mut self, handle: LayerHandle);
}
