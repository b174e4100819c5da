//! 文件配置源
//!
//! 从本地文件加载键值配置，支持 JSON/JSON5/YAML/TOML 格式。
//! 嵌套表会被展开成 `a.b.c` 形式的 key，非字符串标量转换为字符串。

use anyhow::{anyhow, Result};
use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::source::KeyValueSource;

/// 文件配置源的配置
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FileSourceConfig {
    /// 配置文件路径，格式由扩展名决定
    pub path: String,
}

/// 文件配置源
///
/// 创建时一次性读取文件，之后的查找不再访问文件系统；
/// 调用 [`FileSource::reload`] 可以原子地替换为文件的最新内容。
///
/// # 示例
/// ```no_run
/// use metricx::cfg::{FileSource, FileSourceConfig, KeyValueSource};
///
/// let source = FileSource::new(FileSourceConfig {
///     path: "config/metrics.yaml".to_string(),
/// }).unwrap();
///
/// let use_buckets = source.get("UseBuckets");
/// ```
pub struct FileSource {
    path: PathBuf,
    values: ArcSwap<HashMap<String, String>>,
}

impl FileSource {
    /// 创建文件配置源并立即加载
    pub fn new(config: FileSourceConfig) -> Result<Self> {
        let path = PathBuf::from(config.path);
        let values = Self::load_file(&path)?;
        Ok(Self {
            path,
            values: ArcSwap::from_pointee(values),
        })
    }

    /// 重新加载文件
    ///
    /// 加载失败时保留旧内容并返回错误
    pub fn reload(&self) -> Result<()> {
        let values = Self::load_file(&self.path)?;
        self.values.store(Arc::new(values));
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 当前快照中的 key 数量
    pub fn len(&self) -> usize {
        self.values.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.load().is_empty()
    }

    fn load_file(path: &Path) -> Result<HashMap<String, String>> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| anyhow!("无法识别配置文件格式: {}", path.display()))?;
        let content = std::fs::read_to_string(path)?;
        let value = Self::parse_config(&content, ext)?;

        let mut values = HashMap::new();
        match value {
            JsonValue::Object(_) => flatten_into(&mut values, None, &value),
            JsonValue::Null => {}
            _ => return Err(anyhow!("配置文件顶层必须是键值表: {}", path.display())),
        }
        Ok(values)
    }

    /// 根据扩展名解析配置
    fn parse_config(content: &str, ext: &str) -> Result<JsonValue> {
        match ext {
            "json" => Ok(serde_json::from_str(content)?),
            "json5" => Ok(json5::from_str(content)?),
            "yaml" | "yml" => Ok(serde_yaml::from_str(content)?),
            "toml" => Ok(toml::from_str(content)?),
            _ => Err(anyhow!("不支持的文件格式: {}", ext)),
        }
    }
}

fn flatten_into(values: &mut HashMap<String, String>, prefix: Option<&str>, value: &JsonValue) {
    let JsonValue::Object(map) = value else {
        return;
    };
    for (key, child) in map {
        let full_key = match prefix {
            Some(prefix) => format!("{}.{}", prefix, key),
            None => key.clone(),
        };
        match child {
            JsonValue::Null => {}
            JsonValue::String(s) => {
                values.insert(full_key, s.clone());
            }
            JsonValue::Bool(_) | JsonValue::Number(_) | JsonValue::Array(_) => {
                values.insert(full_key, child.to_string());
            }
            JsonValue::Object(_) => flatten_into(values, Some(&full_key), child),
        }
    }
}

crate::impl_box_from!(FileSource => dyn KeyValueSource);

impl KeyValueSource for FileSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.load().get(key).cloned()
    }
}
