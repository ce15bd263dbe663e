// crates/em_layers/src/sync.rs

//! 图层协调状态机
//!
//! `LayerSync` 拥有一个地图表面的全部可变图层（底图、数据集瓦片
//! 叠加、标记集合、热力图层、信息浮层），并在数据集/年份/搜索变化
//! 时完成协调：同类图层先移除旧的、再添加新的，绝不累积。
//!
//! # 状态机
//!
//! ```text
//! Uninitialized --initialize--> Ready --dispose--> Disposed
//! ```
//!
//! 顺序错误（重复 initialize、dispose 后 update）是调用方逻辑缺陷，
//! 一律以错误显式拒绝，不做静默处理。
//!
//! # 图层不变量
//!
//! 每次 `update` 结束后，表面上的单例图层（瓦片叠加、热力图、信息
//! 浮层）各至多一个。同一类型先删后增；单次同步内的短暂双挂载可以
//! 接受，因为不存在并发读取。

use crate::events::{EventDispatcher, MapEvent};
use crate::selection::{SelectedDistrict, SelectionState};
use crate::surface::{InfoOverlay, LayerHandle, MapSurface};
use crate::tiles::{TileLayerConfig, OSM_TILE_URL};
use em_catalog::{project_heatmap, project_markers, DistrictCatalog, HeatGradient};
use em_foundation::EmError;
use em_geo::GeoPoint;
use std::sync::Arc;
use thiserror::Error;

/// 图层同步错误
#[derive(Debug, Error)]
pub enum SyncError {
    /// 重复初始化
    #[error("Map already initialized")]
    AlreadyInitialized,
    /// 尚未初始化
    #[error("Map not initialized")]
    NotInitialized,
    /// 已销毁
    #[error("Map disposed")]
    Disposed,
    /// 选择状态非法（年份越界等）
    #[error(transparent)]
    InvalidSelection(#[from] EmError),
}

/// 同步器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// 未初始化
    Uninitialized,
    /// 就绪
    Ready,
    /// 已销毁（终止态）
    Disposed,
}

/// 一个地图实例拥有的图层集合
///
/// 单例图层（底图、叠加、热力、信息浮层）各至多一个；标记句柄
/// 每个可见行政区一个。集合由同步器独占，跨实例不共享。
#[derive(Debug, Default)]
pub struct MapLayerSet {
    /// 底图（初始化后恒存在，从不替换）
    pub base: Option<LayerHandle>,
    /// 数据集瓦片叠加
    pub overlay: Option<LayerHandle>,
    /// 行政区标记
    pub markers: Vec<LayerHandle>,
    /// 热力图层
    pub heat: Option<LayerHandle>,
    /// 信息浮层（初始化后恒存在，内容原地更新）
    pub info: Option<LayerHandle>,
}

/// 图层协调状态机
pub struct LayerSync<S: MapSurface> {
    surface: S,
    catalog: Arc<DistrictCatalog>,
    state: SyncState,
    layers: MapLayerSet,
    selection: SelectionState,
    dispatcher: EventDispatcher,
}

impl<S: MapSurface> LayerSync<S> {
    /// 创建未初始化的同步器
    ///
    /// 目录显式注入，便于测试时替换。
    #[must_use]
    pub fn new(surface: S, catalog: Arc<DistrictCatalog>) -> Self {
        Self {
            surface,
            catalog,
            state: SyncState::Uninitialized,
            layers: MapLayerSet::default(),
            selection: SelectionState::default(),
            dispatcher: EventDispatcher::new(),
        }
    }

    /// 当前状态
    #[must_use]
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// 当前选择状态
    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// 图层集合（只读视图）
    #[must_use]
    pub fn layers(&self) -> &MapLayerSet {
        &self.layers
    }

    /// 事件分发器
    #[must_use]
    pub fn events(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    /// 初始化：挂载底图、瓦片叠加、标记、热力与信息浮层
    ///
    /// `Uninitialized -> Ready`。重复初始化返回
    /// [`SyncError::AlreadyInitialized`]，绝不双挂载。
    pub fn initialize(&mut self, selection: SelectionState) -> Result<(), SyncError> {
        match self.state {
            SyncState::Ready => return Err(SyncError::AlreadyInitialized),
            SyncState::Disposed => return Err(SyncError::Disposed),
            SyncState::Uninitialized => {}
        }
        selection.validate()?;

        self.layers.base = Some(self.surface.add_base_layer(OSM_TILE_URL));
        self.selection = selection;
        self.attach_dataset_layers();
        self.attach_info_overlay();
        self.state = SyncState::Ready;

        tracing::info!(
            "Map initialized: {} / {}",
            self.selection.dataset,
            self.selection.year
        );
        self.emit_synced();
        Ok(())
    }

    /// 按新的选择状态协调图层
    ///
    /// 仅在 Ready 有效。同类图层先删后增；底图与信息浮层持久存在，
    /// 信息浮层内容原地更新。
    pub fn update(&mut self, selection: SelectionState) -> Result<(), SyncError> {
        match self.state {
            SyncState::Uninitialized => return Err(SyncError::NotInitialized),
            SyncState::Disposed => return Err(SyncError::Disposed),
            SyncState::Ready => {}
        }
        selection.validate()?;

        self.detach_dataset_layers();
        self.selection = selection;
        self.attach_dataset_layers();
        self.refresh_info_overlay();

        tracing::debug!(
            "Map updated: {} / {} (search: '{}')",
            self.selection.dataset,
            self.selection.year,
            self.selection.search
        );
        self.emit_synced();
        Ok(())
    }

    /// 处理地图/标记点击：最近邻查询并发出选中事件
    ///
    /// 返回选中行政区的展示快照。
    pub fn handle_click(&self, lat: f64, lng: f64) -> Result<SelectedDistrict, SyncError> {
        match self.state {
            SyncState::Uninitialized => return Err(SyncError::NotInitialized),
            SyncState::Disposed => return Err(SyncError::Disposed),
            SyncState::Ready => {}
        }

        let district = self.catalog.find_nearest(&GeoPoint::new(lat, lng));
        self.dispatcher.emit(MapEvent::LocationSelected {
            lat: district.position.lat,
            lng: district.position.lng,
            name: district.name.clone(),
            district: district.name.clone(),
        });
        Ok(district.into())
    }

    /// 销毁：卸载全部图层并进入终止态
    ///
    /// 之后任何 `update` / `handle_click` 返回 [`SyncError::Disposed`]。
    pub fn dispose(&mut self) -> Result<(), SyncError> {
        match self.state {
            SyncState::Uninitialized => return Err(SyncError::NotInitialized),
            SyncState::Disposed => return Err(SyncError::Disposed),
            SyncState::Ready => {}
        }

        self.detach_dataset_layers();
        if let Some(h) = self.layers.info.take() {
            self.surface.remove_layer(h);
        }
        if let Some(h) = self.layers.base.take() {
            self.surface.remove_layer(h);
        }
        self.state = SyncState::Disposed;

        tracing::info!("Map disposed");
        self.dispatcher.emit(MapEvent::Disposed);
        Ok(())
    }

    /// 挂载随选择变化的图层（瓦片叠加、标记、热力）
    fn attach_dataset_layers(&mut self) {
        let config = TileLayerConfig::for_dataset(self.selection.dataset);
        let url = config.wmts_url(self.selection.year);
        self.layers.overlay = Some(self.surface.add_tile_overlay(&url, config.opacity));

        let districts = self.catalog.filter_by_text(&self.selection.search);
        let markers = project_markers(&districts, self.selection.dataset);
        self.layers.markers = markers
            .iter()
            .map(|m| self.surface.add_marker(m))
            .collect();

        let heat = project_heatmap(&districts, self.selection.dataset);
        self.layers.heat = Some(
            self.surface
                .add_heat_layer(&heat, &HeatGradient::default()),
        );
    }

    /// 卸载随选择变化的图层（先删后增的"删"半边）
    fn detach_dataset_layers(&mut self) {
        if let Some(h) = self.layers.overlay.take() {
            self.surface.remove_layer(h);
        }
        for h in self.layers.markers.drain(..) {
            self.surface.remove_layer(h);
        }
        if let Some(h) = self.layers.heat.take() {
            self.surface.remove_layer(h);
        }
    }

    /// 首次挂载信息浮层
    fn attach_info_overlay(&mut self) {
        let info = self.current_info();
        self.layers.info = Some(self.surface.add_info_overlay(&info));
    }

    /// 原地刷新信息浮层内容
    fn refresh_info_overlay(&mut self) {
        if let Some(handle) = self.layers.info {
            let info = self.current_info();
            self.surface.update_info_overlay(handle, &info);
        }
    }

    fn current_info(&self) -> InfoOverlay {
        let config = TileLayerConfig::for_dataset(self.selection.dataset);
        InfoOverlay::new(config.name, self.selection.year)
    }

    fn emit_synced(&self) {
        self.dispatcher.emit(MapEvent::LayersSynced {
            dataset: self.selection.dataset,
            year: self.selection.year,
            marker_count: self.layers.markers.len(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use em_catalog::{DatasetKey, HeatPoint, MarkerPoint};
    use std::collections::HashMap;

    /// 记录型测试表面：跟踪每类已挂载图层
    #[derive(Default)]
    struct RecordingSurface {
        next_handle: u64,
        /// handle -> 图层类别
        attached: HashMap<u64, &'static str>,
        /// 各类别累计添加次数
        adds: HashMap<&'static str, usize>,
        last_overlay_url: Option<String>,
        last_heat_len: usize,
        last_markers: Vec<MarkerPoint>,
        info_updates: usize,
    }

    impl RecordingSurface {
        fn alloc(&mut self, kind: &'static str) -> LayerHandle {
            self.next_handle += 1;
            self.attached.insert(self.next_handle, kind);
            *self.adds.entry(kind).or_default() += 1;
            LayerHandle(self.next_handle)
        }

        fn attached_count(&self, kind: &str) -> usize {
            self.attached.values().filter(|k| **k == kind).count()
        }
    }

    impl MapSurface for RecordingSurface {
        fn add_base_layer(&mut self, _url_template: &str) -> LayerHandle {
            self.alloc("base")
        }

        fn add_tile_overlay(&mut self, url_template: &str, _opacity: f64) -> LayerHandle {
            self.last_overlay_url = Some(url_template.to_string());
            self.alloc("overlay")
        }

        fn add_marker(&mut self, marker: &MarkerPoint) -> LayerHandle {
            self.last_markers.push(marker.clone());
            self.alloc("marker")
        }

        fn add_heat_layer(&mut self, points: &[HeatPoint], _gradient: &HeatGradient) -> LayerHandle {
            self.last_heat_len = points.len();
            self.alloc("heat")
        }

        fn add_info_overlay(&mut self, _info: &InfoOverlay) -> LayerHandle {
            self.alloc("info")
        }

        fn update_info_overlay(&mut self, handle: LayerHandle, _info: &InfoOverlay) {
            assert!(self.attached.contains_key(&handle.0));
            self.info_updates += 1;
        }

        fn remove_layer(&mut self, handle: LayerHandle) {
            let removed = self.attached.remove(&handle.0);
            assert!(removed.is_some(), "removing unknown layer handle");
        }
    }

    fn new_sync() -> LayerSync<RecordingSurface> {
        LayerSync::new(
            RecordingSurface::default(),
            Arc::new(DistrictCatalog::bangladesh()),
        )
    }

    #[test]
    fn test_initialize_attaches_all_layers() {
        let mut sync = new_sync();
        sync.initialize(SelectionState::default()).unwrap();

        assert_eq!(sync.state(), SyncState::Ready);
        assert_eq!(sync.surface.attached_count("base"), 1);
        assert_eq!(sync.surface.attached_count("overlay"), 1);
        assert_eq!(sync.surface.attached_count("heat"), 1);
        assert_eq!(sync.surface.attached_count("info"), 1);
        assert_eq!(sync.surface.attached_count("marker"), 64);
        assert_eq!(sync.surface.last_heat_len, 64);
    }

    #[test]
    fn test_double_initialize_rejected() {
        let mut sync = new_sync();
        sync.initialize(SelectionState::default()).unwrap();
        let err = sync.initialize(SelectionState::default()).unwrap_err();
        assert!(matches!(err, SyncError::AlreadyInitialized));
        // 没有发生双挂载
        assert_eq!(sync.surface.attached_count("base"), 1);
        assert_eq!(sync.surface.attached_count("overlay"), 1);
    }

    #[test]
    fn test_update_before_initialize_rejected() {
        let mut sync = new_sync();
        let err = sync.update(SelectionState::default()).unwrap_err();
        assert!(matches!(err, SyncError::NotInitialized));
    }

    #[test]
    fn test_updates_never_accumulate_layers() {
        let mut sync = new_sync();
        sync.initialize(SelectionState::default()).unwrap();

        for dataset in [
            DatasetKey::ForestCover,
            DatasetKey::Temperature,
            DatasetKey::WaterLevel,
        ] {
            sync.update(SelectionState::new(dataset, 2023)).unwrap();
            // 每次 update 结束后各单例图层至多一个
            assert_eq!(sync.surface.attached_count("overlay"), 1);
            assert!(sync.surface.attached_count("heat") <= 1);
            assert_eq!(sync.surface.attached_count("base"), 1);
            assert_eq!(sync.surface.attached_count("info"), 1);
        }
        // 底图与信息浮层从未被替换
        assert_eq!(sync.surface.adds["base"], 1);
        assert_eq!(sync.surface.adds["info"], 1);
        // 信息浮层内容随每次 update 原地刷新
        assert_eq!(sync.surface.info_updates, 3);
    }

    #[test]
    fn test_update_changes_tile_url() {
        let mut sync = new_sync();
        sync.initialize(SelectionState::new(DatasetKey::AirQuality, 2023))
            .unwrap();
        sync.update(SelectionState::new(DatasetKey::Temperature, 2010))
            .unwrap();

        let url = sync.surface.last_overlay_url.clone().unwrap();
        assert!(url.contains("MODIS_Terra_Land_Surface_Temp_Day"));
        assert!(url.contains("2010-08-01"));
    }

    #[test]
    fn test_search_filters_markers() {
        let mut sync = new_sync();
        sync.initialize(
            SelectionState::new(DatasetKey::AirQuality, 2023).with_search("sylhet"),
        )
        .unwrap();
        // 锡尔赫特区划 5 条（含重复条目）
        assert_eq!(sync.surface.attached_count("marker"), 5);
        assert_eq!(sync.surface.last_heat_len, 5);
    }

    #[test]
    fn test_update_rejects_invalid_year() {
        let mut sync = new_sync();
        sync.initialize(SelectionState::default()).unwrap();
        let err = sync
            .update(SelectionState::new(DatasetKey::AirQuality, 1999))
            .unwrap_err();
        assert!(matches!(err, SyncError::InvalidSelection(_)));
    }

    #[test]
    fn test_handle_click_nearest_district() {
        let mut sync = new_sync();
        sync.initialize(SelectionState::default()).unwrap();

        let selected = sync.handle_click(23.8103, 90.4125).unwrap();
        assert_eq!(selected.id, 1);
        assert_eq!(selected.name, "Dhaka");
    }

    #[test]
    fn test_handle_click_emits_event() {
        use parking_lot::RwLock;
        use std::sync::Arc as StdArc;

        let mut sync = new_sync();
        sync.initialize(SelectionState::default()).unwrap();

        let seen: StdArc<RwLock<Option<(String, String)>>> = StdArc::default();
        let seen_clone = StdArc::clone(&seen);
        sync.events().add_fn_listener("capture", move |e| {
            if let MapEvent::LocationSelected { name, district, .. } = e {
                *seen_clone.write() = Some((name.clone(), district.clone()));
            }
        });

        sync.handle_click(24.37, 88.60).unwrap();
        let got = seen.read().clone().unwrap();
        assert_eq!(got.0, "Rajshahi");
        assert_eq!(got.0, got.1);
    }

    #[test]
    fn test_dispose_detaches_everything() {
        let mut sync = new_sync();
        sync.initialize(SelectionState::default()).unwrap();
        sync.dispose().unwrap();

        assert_eq!(sync.state(), SyncState::Disposed);
        assert!(sync.surface.attached.is_empty());
    }

    #[test]
    fn test_update_after_dispose_fails() {
        let mut sync = new_sync();
        sync.initialize(SelectionState::default()).unwrap();
        sync.dispose().unwrap();

        let err = sync.update(SelectionState::default()).unwrap_err();
        assert!(matches!(err, SyncError::Disposed));

        let err = sync.handle_click(23.8, 90.4).unwrap_err();
        assert!(matches!(err, SyncError::Disposed));

        let err = sync.dispose().unwrap_err();
        assert!(matches!(err, SyncError::Disposed));
    }
}
