use arc_swap::ArcSwapOption;
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;
use std::time::Duration;

use super::error::RegistryError;
use super::resolve;
use crate::cfg::{EnvSource, KeyValueSource};
use crate::lifecycle::{LifecycleFacade, NoopLifecycle, DEFAULT_SHUTDOWN_TIMEOUT};
use crate::log::{default_logger, DiagnosticLogger};
use crate::settings::{EvaluateDateTime, ReportSourceType, Settings, TimespanRoundingMethod};

/// 配置注册中心
///
/// 持有至多一份生效的 [`Settings`]。未初始化时，类型化访问器直接从配置源重新计算，
/// 因此在应用完成启动之前读取配置也是安全的。
///
/// 设置以原子快照的方式发布：读者看到的要么是旧快照，要么是完整的新快照。
/// 重复初始化以最后一次为准。
///
/// # 示例
/// ```
/// use std::sync::Arc;
/// use metricx::cfg::MapSource;
/// use metricx::registry::ConfigurationRegistry;
/// use metricx::settings::{Persist, Settings};
///
/// struct NullPersister;
/// impl Persist for NullPersister {}
///
/// let source = MapSource::new().with("UseBuckets", "true");
/// let registry = ConfigurationRegistry::new(Arc::new(source));
///
/// // 未初始化时直接读配置源
/// assert!(registry.use_buckets());
///
/// registry
///     .initialize(Settings::new().with_persister(Arc::new(NullPersister)))
///     .unwrap();
/// assert!(registry.is_initialized());
/// ```
pub struct ConfigurationRegistry {
    source: Arc<dyn KeyValueSource>,
    lifecycle: Arc<dyn LifecycleFacade>,
    settings: ArcSwapOption<Settings>,
}

impl ConfigurationRegistry {
    /// 基于指定配置源创建，未配置下游生命周期入口
    pub fn new(source: Arc<dyn KeyValueSource>) -> Self {
        Self {
            source,
            lifecycle: Arc::new(NoopLifecycle),
            settings: ArcSwapOption::empty(),
        }
    }

    /// 基于进程环境变量创建
    pub fn from_env() -> Self {
        Self::new(Arc::new(EnvSource::default()))
    }

    /// 指定刷新、关闭操作转发的目标
    pub fn with_lifecycle(mut self, lifecycle: Arc<dyn LifecycleFacade>) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    pub fn source(&self) -> &dyn KeyValueSource {
        self.source.as_ref()
    }

    /// 初始化注册中心
    ///
    /// 校验设置，补齐未显式指定的字段，然后把设置发布为唯一生效的实例。
    /// 字段的取值顺序：调用方显式设置 > 配置源 > 内置默认值。
    ///
    /// # 错误
    ///
    /// 设置缺失或没有持久化后端时返回 [`RegistryError::InvalidConfiguration`]，
    /// 此时之前的状态保持不变。
    pub fn initialize(
        &self,
        settings: impl Into<Option<Settings>>,
    ) -> Result<Arc<Settings>, RegistryError> {
        let mut settings = settings.into().ok_or_else(|| {
            RegistryError::InvalidConfiguration("settings are required".to_string())
        })?;
        if settings.persister.is_none() {
            return Err(RegistryError::InvalidConfiguration(
                "settings.persister is required".to_string(),
            ));
        }

        let source = self.source.as_ref();
        settings.initialized = true;
        let logger = Arc::clone(settings.logger.get_or_insert_with(default_logger));
        if settings.rounding_method.is_none() {
            settings.rounding_method = Some(resolve::rounding_method(
                source,
                TimespanRoundingMethod::default(),
            ));
        }
        if settings.day_total_tz_offset.is_none() {
            settings.day_total_tz_offset = Some(resolve::day_total_tz_offset(source));
        }
        if settings.use_buckets.is_none() {
            settings.use_buckets = Some(resolve::use_buckets(source));
        }
        if settings.default_report_source.is_none() {
            settings.default_report_source = Some(resolve::default_report_source(source));
        }
        if settings.evaluate_date_time.is_none() {
            settings.evaluate_date_time = Some(utc_clock());
        }

        let settings = Arc::new(settings);
        self.settings.store(Some(Arc::clone(&settings)));
        logger.debug("configuration registry initialized");

        Ok(settings)
    }

    /// 是否已成功初始化过
    pub fn is_initialized(&self) -> bool {
        self.settings
            .load()
            .as_deref()
            .map_or(false, Settings::is_initialized)
    }

    /// 当前生效的设置，未初始化时为 None
    pub fn current_settings(&self) -> Option<Arc<Settings>> {
        self.settings.load_full()
    }

    // 已初始化时从快照取值，否则按同样的规则从配置源计算
    fn read<T>(
        &self,
        cached: impl FnOnce(&Settings) -> T,
        fresh: impl FnOnce(&dyn KeyValueSource) -> T,
    ) -> T {
        let guard = self.settings.load();
        match guard.as_deref() {
            Some(settings) if settings.is_initialized() => cached(settings),
            _ => fresh(self.source.as_ref()),
        }
    }

    /// 按天汇总的时区偏移
    pub fn day_total_tz_offset(&self) -> TimeDelta {
        self.read(Settings::day_total_tz_offset, resolve::day_total_tz_offset)
    }

    pub fn use_buckets(&self) -> bool {
        self.read(Settings::use_buckets, resolve::use_buckets)
    }

    pub fn default_report_source(&self) -> ReportSourceType {
        self.read(Settings::default_report_source, resolve::default_report_source)
    }

    pub fn rounding_method(&self) -> TimespanRoundingMethod {
        self.read(Settings::rounding_method, |source| {
            resolve::rounding_method(source, TimespanRoundingMethod::default())
        })
    }

    /// 当前时刻，未初始化时为当前 UTC 时间
    pub fn now(&self) -> DateTime<Utc> {
        self.read(Settings::now, |_| Utc::now())
    }

    /// 当前使用的诊断日志器，未初始化时为内置日志器
    pub fn logger(&self) -> Arc<dyn DiagnosticLogger> {
        self.read(
            |settings| settings.logger().cloned().unwrap_or_else(default_logger),
            |_| default_logger(),
        )
    }

    /// 刷新所有跟踪器
    ///
    /// 失败不会向调用方传播：记录一条 error 日志并返回 false
    pub fn flush_trackers(&self) -> bool {
        match self.lifecycle.flush_all() {
            Ok(()) => true,
            Err(e) => {
                self.logger().error("failed to flush trackers", &e);
                false
            }
        }
    }

    /// 关闭下游组件，最多等待 30 秒
    pub fn shut_down(&self) {
        self.shut_down_with_timeout(DEFAULT_SHUTDOWN_TIMEOUT)
    }

    /// 关闭下游组件
    ///
    /// 等待时限由下游负责执行；失败（包括超时）只记录日志，不会传播
    pub fn shut_down_with_timeout(&self, timeout: Duration) {
        if let Err(e) = self.lifecycle.shut_down(timeout) {
            self.logger().error("failed to shut down trackers", &e);
        }
    }
}

fn utc_clock() -> EvaluateDateTime {
    Arc::new(Utc::now)
}

impl Default for ConfigurationRegistry {
    fn default() -> Self {
        Self::from_env()
    }
}
