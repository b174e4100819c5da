//! registry 模块 - 配置注册中心
//!
//! [`ConfigurationRegistry`] 可以作为普通对象持有和传递；[`global`] 提供一个受保护的
//! 进程级实例以及同名的便捷函数。

pub mod error;
pub mod global;
pub mod registry;
pub mod resolve;

pub use error::RegistryError;
pub use global::{
    current_settings, day_total_tz_offset, default_report_source, flush_trackers,
    global_registry, initialize, install, is_initialized, logger, now, rounding_method,
    shut_down, shut_down_with_timeout, use_buckets,
};
pub use registry::ConfigurationRegistry;
pub use resolve::keys;
