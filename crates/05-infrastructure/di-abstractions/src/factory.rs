//! 可注入类型与构造参数
//!
//! Rust 没有运行时构造函数反射，类提供者通过 [`Injectable`] 显式声明构造参数个数。

use infrastructure_common::{DependencyError, Instance};
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// 可注入类型 trait
///
/// 相当于带构造函数的类：`ARITY` 是构造函数必需参数的个数，
/// 声明的依赖令牌少于该值时解析会失败并返回 [`DependencyError::MissingDependencies`]。
pub trait Injectable: Any + Send + Sync + Sized {
    /// 构造函数必需参数个数
    const ARITY: usize = 0;

    /// 使用按位置排列的已解析依赖构造实例
    fn construct(args: &Arguments) -> Result<Self, DependencyError>;
}

/// 构造参数
///
/// 与依赖令牌按位置一一对应的已解析实例。
#[derive(Clone, Default)]
pub struct Arguments {
    values: Vec<Instance>,
}

impl Arguments {
    /// 创建构造参数
    pub fn new(values: Vec<Instance>) -> Self {
        Self { values }
    }

    /// 参数个数
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否没有参数
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 按位置取出指定类型的参数
    pub fn get<T>(&self, index: usize) -> Result<Arc<T>, DependencyError>
    where
        T: Any + Send + Sync,
    {
        let value = self
            .values
            .get(index)
            .ok_or(DependencyError::ArgumentMissing {
                index,
                expected: type_name::<T>(),
            })?;

        value
            .clone()
            .downcast::<T>()
            .map_err(|_| DependencyError::ArgumentTypeMismatch {
                index,
                expected: type_name::<T>(),
            })
    }

    /// 按位置取出未经类型转换的参数
    pub fn get_instance(&self, index: usize) -> Option<&Instance> {
        self.values.get(index)
    }

    /// 遍历所有参数
    pub fn iter(&self) -> impl Iterator<Item = &Instance> {
        self.values.iter()
    }
}

impl fmt::Debug for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arguments")
            .field("len", &self.values.len())
            .finish()
    }
}
