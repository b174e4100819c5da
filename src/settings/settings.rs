use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;
use std::sync::Arc;

use super::report_source::ReportSourceType;
use super::rounding::TimespanRoundingMethod;
use crate::log::DiagnosticLogger;

/// 持久化后端能力
///
/// 注册中心只校验它存在，原样交给下游发布组件使用
pub trait Persist: Send + Sync {}

/// 报表生成能力，可选，原样透传
pub trait ReportGenerator: Send + Sync {}

/// 产生当前时刻的函数
pub type EvaluateDateTime = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// 指标库的运行设置
///
/// 调用方构造并填写需要显式指定的字段，然后交给
/// [`ConfigurationRegistry::initialize`](crate::registry::ConfigurationRegistry::initialize)。
/// 未填写的字段在初始化时依次从配置源和内置默认值补齐：
///
/// | 字段 | 配置源 key | 默认值 |
/// |------|-----------|--------|
/// | rounding_method | `RoundingMethod` | `MidPoint` |
/// | day_total_tz_offset | `MidnightOffsetForTotals` | 0 小时 |
/// | use_buckets | `UseBuckets` | `false` |
/// | default_report_source | `DefaultReportSource` | `Persisted` |
///
/// # 示例
/// ```
/// use std::sync::Arc;
/// use metricx::settings::{Persist, Settings, TimespanRoundingMethod};
///
/// struct NullPersister;
/// impl Persist for NullPersister {}
///
/// let settings = Settings::new()
///     .with_persister(Arc::new(NullPersister))
///     .with_rounding_method(TimespanRoundingMethod::Start);
///
/// assert!(!settings.is_initialized());
/// assert_eq!(settings.rounding_method(), TimespanRoundingMethod::Start);
/// ```
#[derive(Clone, Default)]
pub struct Settings {
    pub(crate) initialized: bool,
    pub(crate) persister: Option<Arc<dyn Persist>>,
    pub(crate) logger: Option<Arc<dyn DiagnosticLogger>>,
    pub(crate) report_generator: Option<Arc<dyn ReportGenerator>>,
    pub(crate) evaluate_date_time: Option<EvaluateDateTime>,
    pub(crate) rounding_method: Option<TimespanRoundingMethod>,
    pub(crate) day_total_tz_offset: Option<TimeDelta>,
    pub(crate) use_buckets: Option<bool>,
    pub(crate) default_report_source: Option<ReportSourceType>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置持久化后端（必填）
    pub fn with_persister(mut self, persister: Arc<dyn Persist>) -> Self {
        self.persister = Some(persister);
        self
    }

    /// 设置诊断日志器，不设置时使用内置日志器
    pub fn with_logger(mut self, logger: Arc<dyn DiagnosticLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_report_generator(mut self, report_generator: Arc<dyn ReportGenerator>) -> Self {
        self.report_generator = Some(report_generator);
        self
    }

    /// 设置时钟，不设置时每次返回当前 UTC 时间
    pub fn with_evaluate_date_time<F>(mut self, evaluate: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.evaluate_date_time = Some(Arc::new(evaluate));
        self
    }

    pub fn with_rounding_method(mut self, rounding_method: TimespanRoundingMethod) -> Self {
        self.rounding_method = Some(rounding_method);
        self
    }

    pub fn with_day_total_tz_offset(mut self, offset: TimeDelta) -> Self {
        self.day_total_tz_offset = Some(offset);
        self
    }

    pub fn with_use_buckets(mut self, use_buckets: bool) -> Self {
        self.use_buckets = Some(use_buckets);
        self
    }

    pub fn with_default_report_source(mut self, source: ReportSourceType) -> Self {
        self.default_report_source = Some(source);
        self
    }

    /// 是否已经过注册中心初始化，只有注册中心能设置
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn persister(&self) -> Option<&Arc<dyn Persist>> {
        self.persister.as_ref()
    }

    pub fn logger(&self) -> Option<&Arc<dyn DiagnosticLogger>> {
        self.logger.as_ref()
    }

    pub fn report_generator(&self) -> Option<&Arc<dyn ReportGenerator>> {
        self.report_generator.as_ref()
    }

    /// 通过配置的时钟获取当前时刻
    pub fn now(&self) -> DateTime<Utc> {
        match &self.evaluate_date_time {
            Some(evaluate) => evaluate(),
            None => Utc::now(),
        }
    }

    pub fn rounding_method(&self) -> TimespanRoundingMethod {
        self.rounding_method.unwrap_or_default()
    }

    /// 按天汇总时相对 UTC 零点的偏移
    pub fn day_total_tz_offset(&self) -> TimeDelta {
        self.day_total_tz_offset.unwrap_or_else(TimeDelta::zero)
    }

    pub fn use_buckets(&self) -> bool {
        self.use_buckets.unwrap_or_default()
    }

    pub fn default_report_source(&self) -> ReportSourceType {
        self.default_report_source.unwrap_or_default()
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("initialized", &self.initialized)
            .field("persister", &self.persister.is_some())
            .field("logger", &self.logger.is_some())
            .field("report_generator", &self.report_generator.is_some())
            .field("evaluate_date_time", &self.evaluate_date_time.is_some())
            .field("rounding_method", &self.rounding_method)
            .field("day_total_tz_offset", &self.day_total_tz_offset)
            .field("use_buckets", &self.use_buckets)
            .field("default_report_source", &self.default_report_source)
            .finish()
    }
}
