// crates/em_foundation/src/lib.rs

//! EnviroMap Foundation Layer
//!
//! 基础层，提供整个项目的统一错误类型。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型 `EmError` 和结果别名 `EmResult`
//!
//! # 设计原则
//!
//! 1. **最小依赖**: 仅依赖 serde 和 thiserror
//! 2. **层次化**: 基础层只定义核心错误，各领域错误在对应 crate 中扩展
//! 3. **可追溯**: 错误信息携带来源名称，便于日志定位

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;

pub use error::{EmError, EmResult};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{EmError, EmResult};
}
