//! lifecycle 模块 - 刷新与关闭
//!
//! 注册中心只负责把刷新、关闭请求转发给 [`LifecycleFacade`]，并把失败收敛为
//! 布尔值或日志；真正的排空工作由下游的发布组件完成。

pub mod facade;
pub mod tracker;

pub use facade::{LifecycleError, LifecycleFacade, NoopLifecycle, DEFAULT_SHUTDOWN_TIMEOUT};
pub use tracker::{Tracker, TrackerGroup};
