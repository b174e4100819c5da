//! 类型化配置查找
//!
//! 配置缺失或格式错误都不应该让指标链路失败：[`get_configuration`] 在任何
//! 转换失败时返回类型的默认值。需要区分“缺失”和“格式错误”的调用方使用
//! [`lookup`]。

use super::parse_value::{ConversionError, ParseValue};
use super::source::KeyValueSource;

/// 一次类型化查找的结果
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// key 存在且转换成功
    Found(T),
    /// key 不存在
    Missing,
    /// key 存在但无法转换
    Malformed {
        raw: String,
        error: ConversionError,
    },
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Lookup::Missing)
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Lookup::Malformed { .. })
    }

    /// 转换为 Option，缺失和格式错误都返回 None
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn value_or(self, default: T) -> T {
        self.found().unwrap_or(default)
    }

    pub fn value_or_else(self, default: impl FnOnce() -> T) -> T {
        self.found().unwrap_or_else(default)
    }
}

impl<T: Default> Lookup<T> {
    pub fn value_or_default(self) -> T {
        self.found().unwrap_or_default()
    }
}

/// 查找并转换配置值，保留失败原因
pub fn lookup<T: ParseValue>(source: &dyn KeyValueSource, key: &str) -> Lookup<T> {
    match source.get(key) {
        None => Lookup::Missing,
        Some(raw) => match T::parse_value(&raw) {
            Ok(value) => Lookup::Found(value),
            Err(error) => Lookup::Malformed { raw, error },
        },
    }
}

/// 查找并转换配置值，任何失败都返回 `T::default()`
///
/// # 示例
/// ```
/// use metricx::cfg::{get_configuration, MapSource};
///
/// let source = MapSource::new().with("MidnightOffsetForTotals", "abc");
/// let hours: i32 = get_configuration(&source, "MidnightOffsetForTotals");
/// assert_eq!(hours, 0);
/// ```
pub fn get_configuration<T: ParseValue + Default>(source: &dyn KeyValueSource, key: &str) -> T {
    lookup(source, key).value_or_default()
}

/// 可以从配置字符串解析的无字段枚举
///
/// 一般通过 `#[derive(ConfigEnum)]` 实现
pub trait ConfigEnum: Copy + 'static {
    /// 所有已定义的变体及其名称
    fn variants() -> &'static [(&'static str, Self)];

    /// 变体的判别值
    fn discriminant(self) -> i64;

    /// 变体名称
    fn name(self) -> &'static str {
        let discriminant = self.discriminant();
        Self::variants()
            .iter()
            .find(|(_, variant)| variant.discriminant() == discriminant)
            .map(|(name, _)| *name)
            .unwrap_or("")
    }

    /// 按名称（大小写不敏感）或已定义的判别值解析
    fn parse_name(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Some((_, variant)) = Self::variants()
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(raw))
        {
            return Some(*variant);
        }

        let number = raw.parse::<i64>().ok()?;
        Self::variants()
            .iter()
            .map(|(_, variant)| *variant)
            .find(|variant| variant.discriminant() == number)
    }
}

/// 解析枚举，缺失、无法解析或不是已定义的变体时返回 `default`
///
/// 解析失败永远不会覆盖 `default`
pub fn parse_enum_or_default<E: ConfigEnum>(raw: Option<&str>, default: E) -> E {
    raw.and_then(E::parse_name).unwrap_or(default)
}
