// crates/em_sources/src/provider.rs

//! 数据源能力接口与回退组合器。
//!
//! 真实 HTTP 客户端与模拟数据源共同实现 [`DataProvider`]，
//! [`WithFallback`] 将两者组合成一个永不失败的数据源。

use std::fmt;

use thiserror::Error;

/// 数据源错误。
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP 请求失败（连接、超时、非 2xx 状态码）。
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// 响应体结构与预期不符。
    #[error("unexpected payload from {provider}: {message}")]
    Payload {
        /// 数据源名称。
        provider: &'static str,
        /// 具体原因。
        message: String,
    },
}

impl SourceError {
    /// 构造响应体错误。
    pub fn payload(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Payload {
            provider,
            message: message.into(),
        }
    }
}

/// 数据源能力接口。
///
/// `Request` 是一次查询所需的全部输入（坐标、年份等），
/// `Sample` 是归一化后的样本类型。实现方不做缓存。
pub trait DataProvider {
    /// 查询输入。
    type Request;
    /// 样本输出。
    type Sample;

    /// 数据源名称，用于日志与样本标注。
    fn name(&self) -> &'static str;

    /// 执行一次查询。
    fn fetch(&self, request: &Self::Request) -> Result<Self::Sample, SourceError>;
}

/// 回退组合器：主源失败时记录警告并改用模拟源。
///
/// 模拟源约定永不失败，因此组合后的 `fetch` 仅在模拟源
/// 也失败时返回错误（正常情况下不会发生）。
pub struct WithFallback<P, M> {
    primary: P,
    mock: M,
}

impl<P, M> WithFallback<P, M> {
    /// 组合主源与模拟源。
    pub fn new(primary: P, mock: M) -> Self {
        Self { primary, mock }
    }
}

impl<P, M> DataProvider for WithFallback<P, M>
where
    P: DataProvider,
    M: DataProvider<Request = P::Request, Sample = P::Sample>,
{
    type Request = P::Request;
    type Sample = P::Sample;

    fn name(&self) -> &'static str {
        self.primary.name()
    }

    fn fetch(&self, request: &Self::Request) -> Result<Self::Sample, SourceError> {
        match self.primary.fetch(request) {
            Ok(sample) => Ok(sample),
            Err(err) => {
                tracing::warn!(
                    source = self.primary.name(),
                    error = %err,
                    "data source failed, falling back to mock data"
                );
                self.mock.fetch(request)
            }
        }
    }
}

impl<P: fmt::Debug, M: fmt::Debug> fmt::Debug for WithFallback<P, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WithFallback")
            .field("primary", &self.primary)
            .field("mock", &self.mock)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FailingProvider;

    impl DataProvider for FailingProvider {
        type Request = ();
        type Sample = u32;

        fn name(&self) -> &'static str {
            "failing"
        }

        fn fetch(&self, _request: &()) -> Result<u32, SourceError> {
            Err(SourceError::payload("failing", "always down"))
        }
    }

    #[derive(Debug)]
    struct ConstProvider(u32);

    impl DataProvider for ConstProvider {
        type Request = ();
        type Sample = u32;

        fn name(&self) -> &'static str {
            "const"
        }

        fn fetch(&self, _request: &()) -> Result<u32, SourceError> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_fallback_uses_primary_on_success() {
        let combined = WithFallback::new(ConstProvider(7), ConstProvider(99));
        assert_eq!(combined.fetch(&()).ok(), Some(7));
    }

    #[test]
    fn test_fallback_substitutes_mock_on_failure() {
        let combined = WithFallback::new(FailingProvider, ConstProvider(42));
        assert_eq!(combined.fetch(&()).ok(), Some(42));
    }

    #[test]
    fn test_fallback_reports_primary_name() {
        let combined = WithFallback::new(FailingProvider, ConstProvider(0));
        assert_eq!(combined.name(), "failing");
    }
}
