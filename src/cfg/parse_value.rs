use thiserror::Error;

/// 字符串到目标类型的转换失败
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// 原始值无法转换为目标类型
    #[error("failed to parse {ty} from '{raw}': {reason}")]
    Invalid {
        ty: &'static str,
        raw: String,
        reason: String,
    },
}

impl ConversionError {
    /// 构造一个针对类型 `T` 的转换错误
    pub fn invalid<T>(raw: &str, reason: impl ToString) -> Self {
        ConversionError::Invalid {
            ty: std::any::type_name::<T>(),
            raw: raw.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// 从字符串解析值的 trait
///
/// 配置源中的值统一以字符串形式保存，由该 trait 按类型完成转换。
/// 数值、布尔和枚举在转换前忽略首尾空白；`String` 原样保留。
pub trait ParseValue: Sized {
    /// 从字符串解析值
    ///
    /// # 返回
    /// - Ok(T): 解析成功
    /// - Err(ConversionError): 解析失败
    fn parse_value(s: &str) -> Result<Self, ConversionError>;
}

impl ParseValue for String {
    fn parse_value(s: &str) -> Result<Self, ConversionError> {
        Ok(s.to_string())
    }
}

macro_rules! impl_parse_value_numeric {
    ($($ty:ty),*) => {
        $(
            impl ParseValue for $ty {
                fn parse_value(s: &str) -> Result<Self, ConversionError> {
                    s.trim()
                        .parse()
                        .map_err(|e| ConversionError::invalid::<$ty>(s, e))
                }
            }
        )*
    };
}

impl_parse_value_numeric!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, f32, f64);

// "True"、"FALSE" 等写法同样有效
impl ParseValue for bool {
    fn parse_value(s: &str) -> Result<Self, ConversionError> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ConversionError::invalid::<bool>(s, "expected 'true' or 'false'"))
        }
    }
}

impl ParseValue for serde_json::Value {
    fn parse_value(s: &str) -> Result<Self, ConversionError> {
        serde_json::from_str(s).map_err(|e| ConversionError::invalid::<serde_json::Value>(s, e))
    }
}
