//! 容器统计信息

/// 容器统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerStats {
    /// 已注册服务数量
    pub registered_services: usize,
    /// 成功解析次数（包含依赖解析）
    pub resolutions: u64,
    /// 解析错误次数
    pub resolution_errors: u64,
    /// 已缓存实例的服务数量
    pub active_singletons: usize,
}
