//! cfg 模块 - 键值配置
//!
//! 提供键值配置源抽象以及类型化查找。所有查找都不会失败：缺失或格式错误的配置
//! 会回退到类型的默认值。

pub mod env_source;
pub mod file_source;
pub mod macros;
pub mod parse_value;
pub mod resolver;
pub mod source;

// 重新导出公共 API
pub use env_source::{EnvSource, EnvSourceConfig};
pub use file_source::{FileSource, FileSourceConfig};
pub use parse_value::{ConversionError, ParseValue};
pub use resolver::{get_configuration, lookup, parse_enum_or_default, ConfigEnum, Lookup};
pub use source::{ChainSource, KeyValueSource, MapSource};
