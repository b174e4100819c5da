use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::cfg::ConfigEnum;

/// 时间桶边界的取整方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, crate::ConfigEnum)]
pub enum TimespanRoundingMethod {
    /// 取区间中点
    #[default]
    MidPoint = 0,
    /// 取区间起点
    Start = 1,
    /// 取区间终点
    End = 2,
}

impl FromStr for TimespanRoundingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_name(s).ok_or_else(|| format!("invalid rounding method: {}", s))
    }
}

impl fmt::Display for TimespanRoundingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
