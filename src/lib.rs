//! MetricX - 指标库的进程级配置注册中心
//!
//! 为指标库的其他组件提供一份统一的运行设置：日期汇总的时区偏移、时间段取整方式、
//! 是否启用分桶、默认报表数据源等。初始化之前读取配置源，初始化之后读取已发布的设置。
//!
//! ## 模块
//!
//! - **cfg**: 键值配置源与类型化查找
//! - **settings**: 运行设置及其枚举
//! - **registry**: 配置注册中心（初始化、访问器、全局单例）
//! - **lifecycle**: 刷新、关闭的下游入口
//! - **log**: 诊断日志
//!
//! ## 快速开始
//!
//! ```rust
//! use std::sync::Arc;
//! use metricx::cfg::MapSource;
//! use metricx::registry::ConfigurationRegistry;
//! use metricx::settings::{Persist, Settings, TimespanRoundingMethod};
//!
//! struct NullPersister;
//! impl Persist for NullPersister {}
//!
//! let source = MapSource::new().with("RoundingMethod", "Start");
//! let registry = ConfigurationRegistry::new(Arc::new(source));
//!
//! let settings = registry
//!     .initialize(Settings::new().with_persister(Arc::new(NullPersister)))
//!     .unwrap();
//! assert_eq!(settings.rounding_method(), TimespanRoundingMethod::Start);
//! assert!(registry.flush_trackers());
//! ```

// 派生宏生成的代码使用 `::metricx::` 路径
extern crate self as metricx;

pub mod cfg;
pub mod lifecycle;
pub mod log;
pub mod registry;
pub mod settings;

// 重新导出主要的公共 API
pub use cfg::{ConfigEnum, ConversionError, KeyValueSource, ParseValue};
pub use lifecycle::{LifecycleFacade, Tracker, TrackerGroup};
pub use log::{DiagnosticLogger, LogLevel, LogRecord};
pub use registry::{ConfigurationRegistry, RegistryError};
pub use settings::{ReportSourceType, Settings, TimespanRoundingMethod};

// 派生宏与 trait 同名，分别位于宏和类型命名空间
pub use metricx_macros::ConfigEnum;
