use std::time::Duration;
use thiserror::Error;

/// 默认关闭等待时间
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// 刷新或关闭失败
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// 刷新失败
    #[error("flush failed: {0}")]
    Flush(String),

    /// 关闭失败
    #[error("shutdown failed: {0}")]
    Shutdown(String),

    /// 关闭未在时限内完成
    #[error("shutdown did not complete within {0:?}")]
    Timeout(Duration),
}

/// 下游发布组件的刷新与关闭入口
pub trait LifecycleFacade: Send + Sync {
    /// 刷新所有跟踪器中尚未发布的数据
    fn flush_all(&self) -> Result<(), LifecycleError>;

    /// 排空并关闭，最多等待 `timeout`
    fn shut_down(&self, timeout: Duration) -> Result<(), LifecycleError>;
}

/// 不做任何事的生命周期入口，注册中心未配置下游时使用
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLifecycle;

impl LifecycleFacade for NoopLifecycle {
    fn flush_all(&self) -> Result<(), LifecycleError> {
        Ok(())
    }

    fn shut_down(&self, _timeout: Duration) -> Result<(), LifecycleError> {
        Ok(())
    }
}
