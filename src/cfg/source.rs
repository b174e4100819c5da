//! 键值配置源抽象
//!
//! 配置源只负责按 key 提供原始字符串，类型转换由 [`ParseValue`](super::ParseValue) 完成。
//! key 不存在不是错误，返回 `None` 即可。

use std::collections::HashMap;
use std::sync::Arc;

/// 键值配置源
///
/// 所有配置来源（环境变量、文件、内存等）都实现此 trait
pub trait KeyValueSource: Send + Sync {
    /// 读取 key 对应的原始字符串
    fn get(&self, key: &str) -> Option<String>;
}

/// 内存配置源
///
/// # 示例
/// ```
/// use metricx::cfg::{KeyValueSource, MapSource};
///
/// let source = MapSource::new()
///     .with("UseBuckets", "true")
///     .with("MidnightOffsetForTotals", "-5");
///
/// assert_eq!(source.get("UseBuckets").as_deref(), Some("true"));
/// assert_eq!(source.get("RoundingMethod"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加一个键值对（构建器风格）
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MapSource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<HashMap<String, String>> for MapSource {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

impl KeyValueSource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// 分层配置源
///
/// 按添加顺序依次查找，第一个命中的值生效
#[derive(Clone, Default)]
pub struct ChainSource {
    sources: Vec<Arc<dyn KeyValueSource>>,
}

impl ChainSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个优先级更低的配置源
    pub fn with(mut self, source: Arc<dyn KeyValueSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl KeyValueSource for ChainSource {
    fn get(&self, key: &str) -> Option<String> {
        self.sources.iter().find_map(|source| source.get(key))
    }
}

crate::impl_box_from!(MapSource => dyn KeyValueSource);
crate::impl_box_from!(ChainSource => dyn KeyValueSource);
