// crates/em_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `EmError` 枚举和 `EmResult` 类型别名，用于整个项目的错误处理。
//!
//! # 示例
//!
//! ```
//! use em_foundation::error::{EmError, EmResult};
//!
//! fn load_catalog() -> EmResult<()> {
//!     Err(EmError::validation("catalog must not be empty"))
//! }
//! ```

use thiserror::Error;

/// 统一结果类型
pub type EmResult<T> = Result<T, EmError>;

/// EnviroMap 错误类型
///
/// 核心错误类型，用于整个项目。图层同步相关的错误在 `em_layers` 中扩展，
/// 外部数据源错误在 `em_sources` 中扩展。
#[derive(Error, Debug)]
pub enum EmError {
    /// 配置错误
    #[error("Config error: {message}")]
    Config {
        /// 错误描述
        message: String,
    },

    /// 数据验证错误
    #[error("Validation error: {message}")]
    Validation {
        /// 错误描述
        message: String,
    },

    /// 外部数据源错误
    #[error("Source '{name}' failed: {message}")]
    Source {
        /// 数据源名称
        name: String,
        /// 错误描述
        message: String,
    },

    /// 数值超出允许范围
    #[error("{name} out of range: {value} (expected {min}..={max})")]
    OutOfRange {
        /// 字段名称
        name: String,
        /// 实际值
        value: f64,
        /// 最小允许值
        min: f64,
        /// 最大允许值
        max: f64,
    },
}

impl EmError {
    /// 创建配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// 创建数据源错误
    pub fn source(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Source {
            name: name.into(),
            message: message.into(),
        }
    }

    /// 创建范围错误
    pub fn out_of_range(name: impl Into<String>, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            name: name.into(),
            value,
            min,
            max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EmError::config("missing api key");
        assert_eq!(err.to_string(), "Config error: missing api key");

        let err = EmError::source("openweather", "HTTP 503");
        assert_eq!(err.to_string(), "Source 'openweather' failed: HTTP 503");
    }

    #[test]
    fn test_out_of_range_display() {
        let err = EmError::out_of_range("year", 1999.0, 2000.0, 2025.0);
        let msg = err.to_string();
        assert!(msg.contains("year"));
        assert!(msg.contains("1999"));
    }
}
