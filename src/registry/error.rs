use thiserror::Error;

/// 注册中心错误
///
/// 只有初始化前置条件会以错误形式返回，其余失败都在注册中心内部收敛
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// 设置缺失或缺少必填的持久化后端
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// 全局注册中心已初始化，不能再替换
    #[error("configuration registry is already initialized")]
    AlreadyInitialized,
}
