//! 服务解析器抽象接口

use infrastructure_common::{DependencyError, Instance, Token};
use std::any::{type_name, Any};
use std::sync::Arc;

/// 服务解析器 trait
///
/// 负责按令牌定位服务并产生实例
pub trait ServiceResolver: Send + Sync {
    /// 解析令牌对应的实例
    fn resolve_instance(&self, token: &Token) -> Result<Instance, DependencyError>;

    /// 检查令牌是否已绑定
    fn can_resolve(&self, token: &Token) -> bool;

    /// 解析并转换为指定类型
    fn resolve_as<T>(&self, token: &Token) -> Result<Arc<T>, DependencyError>
    where
        T: Any + Send + Sync,
        Self: Sized,
    {
        let instance = self.resolve_instance(token)?;
        downcast_instance(token, instance)
    }
}

/// 将类型擦除的实例转换为具体类型
pub fn downcast_instance<T>(token: &Token, instance: Instance) -> Result<Arc<T>, DependencyError>
where
    T: Any + Send + Sync,
{
    instance
        .downcast::<T>()
        .map_err(|_| DependencyError::TypeMismatch {
            token: token.clone(),
            expected: type_name::<T>(),
        })
}
