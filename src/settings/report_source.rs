use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::cfg::ConfigEnum;

/// 报表数据来源
///
/// 判别值为 0 的 `Persisted` 是无法解析配置时的回退值
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, crate::ConfigEnum)]
pub enum ReportSourceType {
    /// 从持久化后端读取
    #[default]
    Persisted = 0,
    /// 从进程内尚未落盘的跟踪器读取
    Live = 1,
}

impl FromStr for ReportSourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_name(s).ok_or_else(|| format!("invalid report source: {}", s))
    }
}

impl fmt::Display for ReportSourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_member_is_default() {
        assert_eq!(ReportSourceType::default(), ReportSourceType::Persisted);
        assert_eq!(ReportSourceType::Persisted.discriminant(), 0);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("live".parse::<ReportSourceType>().unwrap(), ReportSourceType::Live);
        assert_eq!("Persisted".parse::<ReportSourceType>().unwrap(), ReportSourceType::Persisted);
        assert!("remote".parse::<ReportSourceType>().is_err());
    }
}
