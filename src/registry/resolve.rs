//! 派生字段的解析规则
//!
//! 初始化和未初始化时的访问器共用这些规则，保证两条路径得到相同的值。

use chrono::TimeDelta;

use crate::cfg::{get_configuration, parse_enum_or_default, KeyValueSource};
use crate::settings::{ReportSourceType, TimespanRoundingMethod};

/// 配置源中识别的 key
pub mod keys {
    pub const ROUNDING_METHOD: &str = "RoundingMethod";
    pub const USE_BUCKETS: &str = "UseBuckets";
    pub const MIDNIGHT_OFFSET_FOR_TOTALS: &str = "MidnightOffsetForTotals";
    pub const DEFAULT_REPORT_SOURCE: &str = "DefaultReportSource";
}

/// 合法的按天汇总偏移小时数（真实世界的 UTC 偏移范围）
pub const MIN_DAY_OFFSET_HOURS: i32 = -11;
pub const MAX_DAY_OFFSET_HOURS: i32 = 14;

/// 按天汇总的时区偏移
///
/// 读取 `MidnightOffsetForTotals`，在 [-11, 14] 内时按整小时解释，否则为 0
pub fn day_total_tz_offset(source: &dyn KeyValueSource) -> TimeDelta {
    let hours: i32 = get_configuration(source, keys::MIDNIGHT_OFFSET_FOR_TOTALS);
    if (MIN_DAY_OFFSET_HOURS..=MAX_DAY_OFFSET_HOURS).contains(&hours) {
        TimeDelta::hours(i64::from(hours))
    } else {
        TimeDelta::zero()
    }
}

pub fn use_buckets(source: &dyn KeyValueSource) -> bool {
    get_configuration(source, keys::USE_BUCKETS)
}

/// 取整方式，配置无效时保留 `current`
pub fn rounding_method(
    source: &dyn KeyValueSource,
    current: TimespanRoundingMethod,
) -> TimespanRoundingMethod {
    parse_enum_or_default(source.get(keys::ROUNDING_METHOD).as_deref(), current)
}

/// 默认报表来源，配置无效时为判别值 0 的变体
pub fn default_report_source(source: &dyn KeyValueSource) -> ReportSourceType {
    parse_enum_or_default(
        source.get(keys::DEFAULT_REPORT_SOURCE).as_deref(),
        ReportSourceType::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::MapSource;

    fn offset_for(raw: &str) -> TimeDelta {
        day_total_tz_offset(&MapSource::new().with(keys::MIDNIGHT_OFFSET_FOR_TOTALS, raw))
    }

    #[test]
    fn test_day_offset_in_range() {
        for hours in MIN_DAY_OFFSET_HOURS..=MAX_DAY_OFFSET_HOURS {
            assert_eq!(
                offset_for(&hours.to_string()),
                TimeDelta::hours(i64::from(hours)),
                "offset {}",
                hours
            );
        }
    }

    #[test]
    fn test_day_offset_out_of_range() {
        assert_eq!(offset_for("-12"), TimeDelta::zero());
        assert_eq!(offset_for("15"), TimeDelta::zero());
        assert_eq!(offset_for("2147483647"), TimeDelta::zero());
    }

    #[test]
    fn test_day_offset_malformed_or_missing() {
        assert_eq!(offset_for("five"), TimeDelta::zero());
        assert_eq!(offset_for("5.5"), TimeDelta::zero());
        assert_eq!(offset_for(""), TimeDelta::zero());
        assert_eq!(day_total_tz_offset(&MapSource::new()), TimeDelta::zero());
    }

    #[test]
    fn test_use_buckets() {
        assert!(use_buckets(&MapSource::new().with(keys::USE_BUCKETS, "true")));
        assert!(use_buckets(&MapSource::new().with(keys::USE_BUCKETS, "TRUE")));
        assert!(!use_buckets(&MapSource::new().with(keys::USE_BUCKETS, "yes")));
        assert!(!use_buckets(&MapSource::new()));
    }

    #[test]
    fn test_rounding_method() {
        let start = MapSource::new().with(keys::ROUNDING_METHOD, "sTaRt");
        let bogus = MapSource::new().with(keys::ROUNDING_METHOD, "bogus");
        let undefined = MapSource::new().with(keys::ROUNDING_METHOD, "7");

        let midpoint = TimespanRoundingMethod::MidPoint;
        assert_eq!(rounding_method(&start, midpoint), TimespanRoundingMethod::Start);
        assert_eq!(rounding_method(&bogus, midpoint), midpoint);
        assert_eq!(rounding_method(&undefined, midpoint), midpoint);
        assert_eq!(rounding_method(&MapSource::new(), midpoint), midpoint);
        assert_eq!(
            rounding_method(&bogus, TimespanRoundingMethod::End),
            TimespanRoundingMethod::End
        );
    }

    #[test]
    fn test_default_report_source() {
        let live = MapSource::new().with(keys::DEFAULT_REPORT_SOURCE, "Live");
        let bogus = MapSource::new().with(keys::DEFAULT_REPORT_SOURCE, "Remote");

        assert_eq!(default_report_source(&live), ReportSourceType::Live);
        assert_eq!(default_report_source(&bogus), ReportSourceType::Persisted);
        assert_eq!(default_report_source(&MapSource::new()), ReportSourceType::Persisted);
    }
}
