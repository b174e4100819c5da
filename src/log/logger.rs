use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use std::io::Write;
use std::sync::Arc;

use super::formatter::{create_formatter, FormatterKind, LogFormatter};
use super::level::LogLevel;
use super::record::LogRecord;

/// 诊断日志能力
///
/// 注册中心只使用这两个操作：初始化完成时记录 debug，刷新或关闭失败时记录 error。
/// 实现不应向调用方返回错误，写入失败由实现自行吞掉。
pub trait DiagnosticLogger: Send + Sync {
    /// 记录 DEBUG 级别日志
    fn debug(&self, message: &str);

    /// 记录 ERROR 级别日志，附带错误原因
    fn error(&self, message: &str, cause: &(dyn std::error::Error + 'static));
}

/// 内置的诊断日志器
///
/// 通过 `tracing` 输出，target 为 `metricx`，由应用安装的 subscriber 决定去向
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl DiagnosticLogger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "metricx", "{}", message);
    }

    fn error(&self, message: &str, cause: &(dyn std::error::Error + 'static)) {
        tracing::error!(target: "metricx", error = %cause, "{}", message);
    }
}

static DEFAULT_LOGGER: Lazy<Arc<dyn DiagnosticLogger>> = Lazy::new(|| Arc::new(TracingLogger));

/// 获取内置的默认诊断日志器（全局共享）
pub fn default_logger() -> Arc<dyn DiagnosticLogger> {
    Arc::clone(&DEFAULT_LOGGER)
}

/// 输出目标
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Stdout,
    #[default]
    Stderr,
}

/// ConsoleLogger 配置
#[derive(Debug, Clone, Deserialize, Serialize, SmartDefault, PartialEq)]
#[serde(default)]
pub struct ConsoleLoggerConfig {
    /// 日志级别，无法识别时使用 debug
    #[default = "debug"]
    pub level: String,

    /// 格式化器
    pub formatter: FormatterKind,

    /// 文本格式是否启用颜色
    #[default = false]
    pub colored: bool,

    /// 输出目标
    pub target: Target,
}

/// 终端诊断日志器
///
/// # 示例
///
/// ```
/// use metricx::log::{ConsoleLogger, ConsoleLoggerConfig, DiagnosticLogger};
///
/// let config: ConsoleLoggerConfig = json5::from_str(r#"{
///     level: "debug",
///     formatter: "json",
///     target: "stdout",
/// }"#).unwrap();
///
/// let logger = ConsoleLogger::new(config);
/// logger.debug("configuration registry initialized");
/// ```
pub struct ConsoleLogger {
    level: LogLevel,
    formatter: Box<dyn LogFormatter>,
    target: Target,
}

impl ConsoleLogger {
    pub fn new(config: ConsoleLoggerConfig) -> Self {
        Self {
            level: config.level.parse().unwrap_or(LogLevel::Debug),
            formatter: create_formatter(config.formatter, config.colored),
            target: config.target,
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// 格式化一条记录，低于当前级别或格式化失败时返回 None
    pub fn render(&self, record: &LogRecord) -> Option<String> {
        if record.level < self.level {
            return None;
        }
        self.formatter.format(record).ok()
    }

    /// 记录日志
    pub fn log(&self, record: LogRecord) {
        let Some(line) = self.render(&record) else {
            return;
        };
        let _ = match self.target {
            Target::Stdout => writeln!(std::io::stdout().lock(), "{}", line),
            Target::Stderr => writeln!(std::io::stderr().lock(), "{}", line),
        };
    }
}

crate::impl_from!(ConsoleLoggerConfig => ConsoleLogger);
crate::impl_box_from!(ConsoleLogger => dyn DiagnosticLogger);

impl DiagnosticLogger for ConsoleLogger {
    fn debug(&self, message: &str) {
        self.log(LogRecord::new(LogLevel::Debug, message));
    }

    fn error(&self, message: &str, cause: &(dyn std::error::Error + 'static)) {
        self.log(LogRecord::new(LogLevel::Error, message).with_cause(cause));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture<F: FnOnce()>(f: F) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        captured.contents()
    }

    #[test]
    fn test_tracing_logger_debug() {
        let output = capture(|| TracingLogger.debug("registry ready"));
        assert!(output.contains("DEBUG"));
        assert!(output.contains("metricx"));
        assert!(output.contains("registry ready"));
    }

    #[test]
    fn test_tracing_logger_error_includes_cause() {
        let cause = io::Error::new(io::ErrorKind::TimedOut, "drain timed out");
        let output = capture(|| TracingLogger.error("shutdown failed", &cause));
        assert!(output.contains("ERROR"));
        assert!(output.contains("shutdown failed"));
        assert!(output.contains("drain timed out"));
    }

    #[test]
    fn test_default_logger_is_shared() {
        assert!(Arc::ptr_eq(&default_logger(), &default_logger()));
    }

    #[test]
    fn test_console_logger_config_default() {
        let config = ConsoleLoggerConfig::default();
        assert_eq!(config.level, "debug");
        assert_eq!(config.formatter, FormatterKind::Text);
        assert!(!config.colored);
        assert_eq!(config.target, Target::Stderr);
    }

    #[test]
    fn test_console_logger_level_filter() {
        let logger = ConsoleLogger::new(ConsoleLoggerConfig {
            level: "error".to_string(),
            ..Default::default()
        });

        assert_eq!(logger.level(), LogLevel::Error);
        assert!(logger.render(&LogRecord::new(LogLevel::Debug, "hidden")).is_none());
        let line = logger
            .render(&LogRecord::new(LogLevel::Error, "shown").with_cause("boom"))
            .unwrap();
        assert!(line.contains("shown"));
        assert!(line.contains("cause=boom"));
    }

    #[test]
    fn test_console_logger_invalid_level_falls_back_to_debug() {
        let logger = ConsoleLogger::from(ConsoleLoggerConfig {
            level: "chatty".to_string(),
            ..Default::default()
        });
        assert_eq!(logger.level(), LogLevel::Debug);
    }

    #[test]
    fn test_console_logger_json() {
        let config: ConsoleLoggerConfig =
            json5::from_str(r#"{ formatter: "json", target: "stdout" }"#).unwrap();
        let logger = ConsoleLogger::new(config);
        let line = logger.render(&LogRecord::new(LogLevel::Debug, "hello")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["message"], "hello");
    }

    #[test]
    fn test_console_logger_as_trait_object() {
        let logger: Box<dyn DiagnosticLogger> =
            Box::new(ConsoleLogger::new(ConsoleLoggerConfig::default())).into();
        logger.debug("written to stderr");
    }
}
