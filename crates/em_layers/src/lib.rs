// crates/em_layers/src/lib.rs

//! EnviroMap Layers Layer
//!
//! 地图图层同步：瓦片配置、地图表面抽象与图层状态机。
//!
//! # 模块概览
//!
//! - [`selection`]: `SelectionState` 用户选择状态（数据集/年份/搜索）
//! - [`tiles`]: 数据集瓦片图层配置与 WMTS/WMS URL 构造
//! - [`surface`]: `MapSurface` 注入式地图表面能力接口
//! - [`sync`]: `LayerSync` 图层协调状态机
//! - [`events`]: 地图事件与监听器分发
//!
//! # 并发模型
//!
//! 单线程事件驱动：`initialize` / `update` / `dispose` / 点击处理均
//! 同步执行至完成。同一实例的连续 `update` 由宿主事件循环严格串行，
//! 不存在图层增删交错。跨实例各自持有不相交的图层集合。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod events;
pub mod selection;
pub mod surface;
pub mod sync;
pub mod tiles;

pub use events::{EventDispatcher, EventListener, LoggingListener, MapEvent};
pub use selection::{DistrictSelection, SelectedDistrict, SelectionState, YEAR_MAX, YEAR_MIN};
pub use surface::{InfoOverlay, LayerHandle, MapSurface};
pub use sync::{LayerSync, MapLayerSet, SyncError, SyncState};
pub use tiles::{TileLayerConfig, GIBS_TILE_HOST, OSM_TILE_URL};
