// crates/em_layers/src/events.rs

//! 地图事件与分发
//!
//! 提供地图交互事件的定义和监听器分发机制。

use em_catalog::DatasetKey;
use parking_lot::RwLock;
use std::sync::Arc;

/// 地图事件
#[derive(Debug, Clone)]
pub enum MapEvent {
    /// 用户点击选中位置（标记点击或地图点击的最近邻结果）
    ///
    /// 四元组语义与上游回调一致：第四项重复行政区名称。
    LocationSelected {
        /// 纬度（选中行政区的坐标）
        lat: f64,
        /// 经度
        lng: f64,
        /// 行政区名称
        name: String,
        /// 行政区名称（上游回调的第四参数即名称本身）
        district: String,
    },
    /// 图层已同步（一次 initialize 或 update 完成）
    LayersSynced {
        /// 数据集
        dataset: DatasetKey,
        /// 年份
        year: i32,
        /// 可见标记数
        marker_count: usize,
    },
    /// 地图实例已销毁
    Disposed,
}

impl MapEvent {
    /// 事件名称
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LocationSelected { .. } => "LocationSelected",
            Self::LayersSynced { .. } => "LayersSynced",
            Self::Disposed => "Disposed",
        }
    }
}

/// 事件监听器
pub trait EventListener: Send + Sync {
    /// 处理事件
    fn on_event(&self, event: &MapEvent);

    /// 监听器名称
    fn name(&self) -> &str;
}

/// 函数式监听器
struct FnListener<F> {
    name: String,
    handler: F,
}

impl<F> FnListener<F> {
    fn new(name: impl Into<String>, handler: F) -> Self {
        Self {
            name: name.into(),
            handler,
        }
    }
}

impl<F> EventListener for FnListener<F>
where
    F: Fn(&MapEvent) + Send + Sync,
{
    fn on_event(&self, event: &MapEvent) {
        (self.handler)(event);
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// 日志监听器
///
/// 把地图事件写入 tracing 日志。
pub struct LoggingListener {
    prefix: String,
}

impl LoggingListener {
    /// 创建新的日志监听器
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl EventListener for LoggingListener {
    fn on_event(&self, event: &MapEvent) {
        let msg = match event {
            MapEvent::LocationSelected { name, lat, lng, .. } => {
                format!("Selected '{}' at ({:.4}, {:.4})", name, lat, lng)
            }
            MapEvent::LayersSynced {
                dataset,
                year,
                marker_count,
            } => {
                format!(
                    "Layers synced: {} / {} ({} markers)",
                    dataset, year, marker_count
                )
            }
            MapEvent::Disposed => "Map disposed".to_string(),
        };
        tracing::info!("{}: {}", self.prefix, msg);
    }

    fn name(&self) -> &str {
        "LoggingListener"
    }
}

/// 事件分发器
#[derive(Default)]
pub struct EventDispatcher {
    listeners: RwLock<Vec<Arc<dyn EventListener>>>,
}

impl EventDispatcher {
    /// 创建新的事件分发器
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// 添加监听器
    pub fn add_listener(&self, listener: Arc<dyn EventListener>) {
        let name = listener.name().to_string();
        self.listeners.write().push(listener);
        tracing::debug!("Added event listener: {}", name);
    }

    /// 添加函数式监听器
    pub fn add_fn_listener<F>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.add_listener(Arc::new(FnListener::new(name, handler)));
    }

    /// 清除所有监听器
    pub fn clear(&self) {
        self.listeners.write().clear();
    }

    /// 分发事件
    pub fn emit(&self, event: MapEvent) {
        let listeners = self.listeners.read();
        tracing::trace!("Emitting event: {}", event.name());
        for listener in listeners.iter() {
            listener.on_event(&event);
        }
    }

    /// 监听器数量
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listener_count", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_fn_listener_receives_events() {
        let dispatcher = EventDispatcher::new();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);

        dispatcher.add_fn_listener("counter", move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        dispatcher.emit(MapEvent::Disposed);
        dispatcher.emit(MapEvent::Disposed);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_location_selected_carries_name_twice() {
        let dispatcher = EventDispatcher::new();
        let seen = Arc::new(RwLock::new(None));
        let seen_clone = Arc::clone(&seen);

        dispatcher.add_fn_listener("capture", move |e| {
            if let MapEvent::LocationSelected { name, district, .. } = e {
                *seen_clone.write() = Some((name.clone(), district.clone()));
            }
        });

        dispatcher.emit(MapEvent::LocationSelected {
            lat: 23.8103,
            lng: 90.4125,
            name: "Dhaka".into(),
            district: "Dhaka".into(),
        });

        let got = seen.read().clone().unwrap();
        assert_eq!(got.0, got.1);
    }

    #[test]
    fn test_clear_listeners() {
        let dispatcher = EventDispatcher::new();
        dispatcher.add_fn_listener("noop", |_| {});
        assert_eq!(dispatcher.listener_count(), 1);
        dispatcher.clear();
        assert_eq!(dispatcher.listener_count(), 0);
    }
}
