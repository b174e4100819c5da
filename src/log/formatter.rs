use anyhow::Result;
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use super::level::LogLevel;
use super::record::LogRecord;

/// 日志格式化器 trait
///
/// 负责将 LogRecord 格式化为一行字符串
pub trait LogFormatter: Send + Sync {
    fn format(&self, record: &LogRecord) -> Result<String>;
}

/// 格式化器类型，用于配置
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterKind {
    #[default]
    Text,
    Json,
}

/// 文本格式化器
///
/// 格式: `[2025-01-19T12:34:56.789Z] [ThreadId(1)] DEBUG message | key=value cause=...`
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    colored: bool,
}

impl TextFormatter {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }
}

impl LogFormatter for TextFormatter {
    fn format(&self, record: &LogRecord) -> Result<String> {
        let mut result = String::with_capacity(64 + record.message.len());

        write!(
            result,
            "[{}] [{}] ",
            record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            record.thread_id
        )?;

        if self.colored {
            write!(result, "{} ", colored_level(record.level))?;
        } else {
            write!(result, "{:<5} ", record.level)?;
        }

        result.push_str(&record.message);

        if !record.metadata.is_empty() || record.cause.is_some() {
            result.push_str(" |");
            for (key, value) in &record.metadata {
                write!(result, " {}={}", key, value)?;
            }
            if let Some(cause) = &record.cause {
                write!(result, " cause={}", cause)?;
            }
        }

        Ok(result)
    }
}

fn colored_level(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "\u{1b}[31mERROR\u{1b}[0m",
        LogLevel::Warn => "\u{1b}[33mWARN \u{1b}[0m",
        LogLevel::Info => "\u{1b}[32mINFO \u{1b}[0m",
        LogLevel::Debug => "\u{1b}[36mDEBUG\u{1b}[0m",
        LogLevel::Trace => "\u{1b}[37;2mTRACE\u{1b}[0m",
    }
}

/// JSON 格式化器
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter;

impl LogFormatter for JsonFormatter {
    fn format(&self, record: &LogRecord) -> Result<String> {
        Ok(serde_json::to_string(record)?)
    }
}

/// 根据配置创建格式化器
pub fn create_formatter(kind: FormatterKind, colored: bool) -> Box<dyn LogFormatter> {
    match kind {
        FormatterKind::Text => Box::new(TextFormatter::new(colored)),
        FormatterKind::Json => Box::new(JsonFormatter),
    }
}
