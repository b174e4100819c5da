//! 环境变量配置源

use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

use super::source::KeyValueSource;

/// 环境变量配置源的配置
#[derive(Debug, Clone, Deserialize, Serialize, SmartDefault, PartialEq)]
#[serde(default)]
pub struct EnvSourceConfig {
    /// 变量名前缀，例如 `METRICX_`，查找 `UseBuckets` 时读取 `METRICX_UseBuckets`
    #[default = ""]
    pub prefix: String,
}

/// 环境变量配置源
///
/// 未设置或不是合法 UTF-8 的变量都视为不存在
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    prefix: String,
}

impl EnvSource {
    pub fn new(config: EnvSourceConfig) -> Self {
        Self {
            prefix: config.prefix,
        }
    }

    /// 使用指定前缀创建
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn variable_name(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

crate::impl_from!(EnvSourceConfig => EnvSource);
crate::impl_box_from!(EnvSource => dyn KeyValueSource);

impl KeyValueSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(self.variable_name(key)).ok()
    }
}
