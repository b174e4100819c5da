//! settings 模块 - 指标库运行设置

pub mod report_source;
pub mod rounding;
pub mod settings;

pub use report_source::ReportSourceType;
pub use rounding::TimespanRoundingMethod;
pub use settings::{EvaluateDateTime, Persist, ReportGenerator, Settings};
