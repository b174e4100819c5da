//! 日志模块
//!
//! 注册中心通过 [`DiagnosticLogger`] 能力输出诊断信息。调用方未提供日志器时使用
//! 内置的 [`TracingLogger`]，它把日志交给 `tracing`，由应用自行安装 subscriber。
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use metricx::log::*;
//!
//! let config: ConsoleLoggerConfig = json5::from_str(r#"
//!     {
//!         level: "debug",
//!         formatter: "text",
//!         colored: true,
//!     }
//! "#).unwrap();
//!
//! let logger = ConsoleLogger::new(config);
//! logger.debug("configuration registry initialized");
//! ```

pub mod formatter;
pub mod level;
pub mod logger;
pub mod record;

pub use formatter::{create_formatter, FormatterKind, JsonFormatter, LogFormatter, TextFormatter};
pub use level::LogLevel;
pub use logger::{
    default_logger, ConsoleLogger, ConsoleLoggerConfig, DiagnosticLogger, Target, TracingLogger,
};
pub use record::LogRecord;
