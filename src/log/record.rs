use chrono::{DateTime, Utc};
use serde::Serialize;

use super::level::LogLevel;

/// 日志记录
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    /// 时间戳
    pub timestamp: DateTime<Utc>,
    /// 日志级别
    pub level: LogLevel,
    /// 线程 ID
    pub thread_id: String,
    /// 日志消息
    pub message: String,
    /// 错误原因（通常来自 `Error::to_string`）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    /// 自定义元数据
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<(String, String)>,
}

impl LogRecord {
    /// 创建新的日志记录
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            thread_id: format!("{:?}", std::thread::current().id()),
            message: message.into(),
            cause: None,
            metadata: Vec::new(),
        }
    }

    /// 设置错误原因
    pub fn with_cause(mut self, cause: impl ToString) -> Self {
        self.cause = Some(cause.to_string());
        self
    }

    /// 添加元数据
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.metadata.push((key.into(), value.to_string()));
        self
    }

    /// 指定时间戳
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
