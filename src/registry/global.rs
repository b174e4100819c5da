//! 全局注册中心单例
//!
//! 为不方便传递注册中心引用的组件提供进程级入口。默认实例以环境变量为配置源、
//! 不转发刷新和关闭；需要其他配置源或下游入口时，在初始化之前调用 [`install`]。

use chrono::{DateTime, TimeDelta, Utc};
use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use arc_swap::ArcSwap;

use super::error::RegistryError;
use super::registry::ConfigurationRegistry;
use crate::log::DiagnosticLogger;
use crate::settings::{ReportSourceType, Settings, TimespanRoundingMethod};

/// 全局 ConfigurationRegistry 单例
static GLOBAL_REGISTRY: Lazy<ArcSwap<ConfigurationRegistry>> =
    Lazy::new(|| ArcSwap::from_pointee(ConfigurationRegistry::from_env()));

// install 与 initialize 互斥，保证检查和替换之间不会有初始化落在旧实例上
static WRITE_LOCK: Mutex<()> = Mutex::new(());

fn write_lock() -> MutexGuard<'static, ()> {
    WRITE_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// 获取全局注册中心
pub fn global_registry() -> Arc<ConfigurationRegistry> {
    GLOBAL_REGISTRY.load_full()
}

/// 替换全局注册中心
///
/// 只能在全局注册中心初始化之前调用，否则返回 [`RegistryError::AlreadyInitialized`]，
/// 已初始化的状态不会被回退。与 [`initialize`] 并发调用时两者串行执行；
/// 绕过本模块直接对 [`global_registry`] 返回的实例初始化不在此保证之内。
///
/// # 示例
///
/// ```no_run
/// use std::sync::Arc;
/// use metricx::cfg::EnvSource;
/// use metricx::lifecycle::TrackerGroup;
/// use metricx::registry::{self, ConfigurationRegistry};
///
/// let trackers = TrackerGroup::new();
/// registry::install(
///     ConfigurationRegistry::new(Arc::new(EnvSource::with_prefix("METRICX_")))
///         .with_lifecycle(Arc::new(trackers.clone())),
/// )
/// .unwrap();
/// ```
pub fn install(registry: ConfigurationRegistry) -> Result<(), RegistryError> {
    let _guard = write_lock();
    if GLOBAL_REGISTRY.load().is_initialized() {
        return Err(RegistryError::AlreadyInitialized);
    }
    GLOBAL_REGISTRY.store(Arc::new(registry));
    Ok(())
}

/// 初始化全局注册中心，见 [`ConfigurationRegistry::initialize`]
pub fn initialize(settings: impl Into<Option<Settings>>) -> Result<Arc<Settings>, RegistryError> {
    let _guard = write_lock();
    GLOBAL_REGISTRY.load().initialize(settings)
}

pub fn is_initialized() -> bool {
    GLOBAL_REGISTRY.load().is_initialized()
}

pub fn current_settings() -> Option<Arc<Settings>> {
    GLOBAL_REGISTRY.load().current_settings()
}

pub fn day_total_tz_offset() -> TimeDelta {
    GLOBAL_REGISTRY.load().day_total_tz_offset()
}

pub fn use_buckets() -> bool {
    GLOBAL_REGISTRY.load().use_buckets()
}

pub fn default_report_source() -> ReportSourceType {
    GLOBAL_REGISTRY.load().default_report_source()
}

pub fn rounding_method() -> TimespanRoundingMethod {
    GLOBAL_REGISTRY.load().rounding_method()
}

pub fn now() -> DateTime<Utc> {
    GLOBAL_REGISTRY.load().now()
}

pub fn logger() -> Arc<dyn DiagnosticLogger> {
    GLOBAL_REGISTRY.load().logger()
}

pub fn flush_trackers() -> bool {
    GLOBAL_REGISTRY.load().flush_trackers()
}

pub fn shut_down() {
    GLOBAL_REGISTRY.load().shut_down()
}

pub fn shut_down_with_timeout(timeout: Duration) {
    GLOBAL_REGISTRY.load().shut_down_with_timeout(timeout)
}

#[cfg(test)]
fn reset(registry: ConfigurationRegistry) {
    let _guard = write_lock();
    GLOBAL_REGISTRY.store(Arc::new(registry));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::MapSource;
    use crate::lifecycle::{LifecycleFacade, Tracker, TrackerGroup};
    use crate::settings::Persist;
    use serial_test::serial;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NullPersister;
    impl Persist for NullPersister {}

    #[derive(Default)]
    struct CountingTracker(AtomicUsize);

    impl Tracker for CountingTracker {
        fn flush(&self) -> anyhow::Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn fresh(source: MapSource) {
        reset(ConfigurationRegistry::new(Arc::new(source)));
    }

    #[test]
    #[serial]
    fn test_global_registry_is_shared() {
        fresh(MapSource::new());
        assert!(Arc::ptr_eq(&global_registry(), &global_registry()));
    }

    #[test]
    #[serial]
    fn test_global_accessors_before_initialize() {
        fresh(
            MapSource::new()
                .with("UseBuckets", "true")
                .with("MidnightOffsetForTotals", "-3")
                .with("DefaultReportSource", "Live"),
        );

        assert!(!is_initialized());
        assert!(current_settings().is_none());
        assert!(use_buckets());
        assert_eq!(day_total_tz_offset(), TimeDelta::hours(-3));
        assert_eq!(default_report_source(), ReportSourceType::Live);
        assert_eq!(rounding_method(), TimespanRoundingMethod::MidPoint);
    }

    #[test]
    #[serial]
    fn test_global_initialize() {
        fresh(MapSource::new().with("RoundingMethod", "end"));

        assert!(initialize(None).is_err());
        assert!(!is_initialized());

        initialize(Settings::new().with_persister(Arc::new(NullPersister))).unwrap();
        assert!(is_initialized());
        assert!(current_settings().unwrap().is_initialized());
        assert_eq!(rounding_method(), TimespanRoundingMethod::End);
        assert!(now() <= Utc::now());
        logger().debug("global logger reachable");
    }

    #[test]
    #[serial]
    fn test_install_before_initialize() {
        fresh(MapSource::new());

        let trackers = TrackerGroup::new();
        let tracker = Arc::new(CountingTracker::default());
        trackers.register("requests", tracker.clone());

        install(
            ConfigurationRegistry::new(Arc::new(MapSource::new().with("UseBuckets", "true")))
                .with_lifecycle(Arc::new(trackers.clone())),
        )
        .unwrap();

        assert!(use_buckets());
        assert!(flush_trackers());
        assert_eq!(tracker.0.load(Ordering::SeqCst), 1);

        shut_down_with_timeout(Duration::from_secs(5));
        assert!(trackers.is_empty());
        shut_down();
        assert!(trackers.flush_all().is_ok());
    }

    #[test]
    #[serial]
    fn test_install_after_initialize_is_rejected() {
        fresh(MapSource::new());
        initialize(Settings::new().with_persister(Arc::new(NullPersister))).unwrap();

        let err = install(ConfigurationRegistry::new(Arc::new(MapSource::new()))).unwrap_err();
        assert_eq!(err, RegistryError::AlreadyInitialized);
        assert!(is_initialized());
    }

    #[test]
    #[serial]
    fn test_concurrent_install_and_initialize_stay_initialized() {
        for _ in 0..50 {
            fresh(MapSource::new());
            let barrier = Arc::new(std::sync::Barrier::new(2));

            let installer = {
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    install(ConfigurationRegistry::new(Arc::new(MapSource::new()))).is_ok()
                })
            };
            let initializer = {
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    initialize(Settings::new().with_persister(Arc::new(NullPersister))).is_ok()
                })
            };

            let installed = installer.join().unwrap();
            assert!(initializer.join().unwrap());
            // 初始化成功后全局注册中心不会回退到未初始化
            assert!(is_initialized(), "installed = {installed}");
        }
    }
}
