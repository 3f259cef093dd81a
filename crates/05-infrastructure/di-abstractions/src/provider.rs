//! 提供者配置
//!
//! [`ProvideOpts`] 是绑定时传入的可选字段集合，绑定时折叠为带标签的 [`Provider`]，
//! 多个字段同时设置时按 类 > 值 > 函数 的优先级取其一。

use crate::factory::{Arguments, Injectable};
use infrastructure_common::{DependencyError, Instance, Token};
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// 无参工厂函数
pub type FactoryFn = Arc<dyn Fn() -> Instance + Send + Sync>;

/// 构造函数
pub type ConstructorFn = Arc<dyn Fn(&Arguments) -> Result<Instance, DependencyError> + Send + Sync>;

/// 类提供者
#[derive(Clone)]
pub struct ClassProvider {
    type_name: &'static str,
    arity: usize,
    constructor: ConstructorFn,
}

impl ClassProvider {
    /// 从可注入类型创建
    pub fn of<T: Injectable>() -> Self {
        Self {
            type_name: type_name::<T>(),
            arity: T::ARITY,
            constructor: Arc::new(|args: &Arguments| -> Result<Instance, DependencyError> {
                let instance: Instance = Arc::new(T::construct(args)?);
                Ok(instance)
            }),
        }
    }

    /// 从构造闭包创建，`arity` 为必需参数个数
    pub fn from_fn<T, F>(type_name: &'static str, arity: usize, constructor: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&Arguments) -> Result<T, DependencyError> + Send + Sync + 'static,
    {
        Self {
            type_name,
            arity,
            constructor: Arc::new(move |args: &Arguments| -> Result<Instance, DependencyError> {
                let instance: Instance = Arc::new(constructor(args)?);
                Ok(instance)
            }),
        }
    }

    /// 类型名称
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// 构造函数必需参数个数
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// 构造新实例
    pub fn construct(&self, args: &Arguments) -> Result<Instance, DependencyError> {
        (*self.constructor)(args)
    }
}

impl fmt::Debug for ClassProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassProvider")
            .field("type_name", &self.type_name)
            .field("arity", &self.arity)
            .finish()
    }
}

/// 提供者种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// 类提供者
    Class,
    /// 常量值提供者
    Value,
    /// 函数提供者
    Function,
}

/// 提供者
#[derive(Clone)]
pub enum Provider {
    /// 构造类型实例，依赖令牌按位置注入
    Class {
        class: ClassProvider,
        dependencies: Vec<Token>,
    },
    /// 返回同一个预先计算的实例
    Value(Instance),
    /// 每次调用无参工厂
    Function(FactoryFn),
}

impl Provider {
    /// 提供者种类
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::Class { .. } => ProviderKind::Class,
            Self::Value(_) => ProviderKind::Value,
            Self::Function(_) => ProviderKind::Function,
        }
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class {
                class,
                dependencies,
            } => f
                .debug_struct("Class")
                .field("class", class)
                .field("dependencies", dependencies)
                .finish(),
            Self::Value(_) => f.write_str("Value(<instance>)"),
            Self::Function(_) => f.write_str("Function(<function>)"),
        }
    }
}

/// 提供者选项
///
/// ```
/// use di_abstractions::{ProvideOpts, ProviderKind};
///
/// let opts = ProvideOpts::value(String::from("hello"));
/// assert_eq!(opts.into_provider().map(|p| p.kind()), Some(ProviderKind::Value));
///
/// assert!(ProvideOpts::new().into_provider().is_none());
/// ```
#[derive(Clone, Default)]
pub struct ProvideOpts {
    use_class: Option<ClassProvider>,
    use_value: Option<Instance>,
    use_function: Option<FactoryFn>,
    dependencies: Vec<Token>,
}

impl ProvideOpts {
    /// 空选项，解析时会返回 [`DependencyError::NoProvider`]
    pub fn new() -> Self {
        Self::default()
    }

    /// 类提供者
    pub fn class<T: Injectable>() -> Self {
        Self::new().use_class::<T>()
    }

    /// 常量值提供者
    pub fn value<T>(value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self::new().use_value(value)
    }

    /// 共享已有句柄的常量值提供者，解析结果与 `value` 指向同一个对象
    pub fn shared<T>(value: Arc<T>) -> Self
    where
        T: Any + Send + Sync,
    {
        Self::new().use_instance(value)
    }

    /// 函数提供者
    pub fn function<T, F>(factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::new().use_function(factory)
    }

    /// 设置类提供者
    pub fn use_class<T: Injectable>(self) -> Self {
        self.use_class_provider(ClassProvider::of::<T>())
    }

    /// 设置自定义类提供者
    pub fn use_class_provider(mut self, class: ClassProvider) -> Self {
        self.use_class = Some(class);
        self
    }

    /// 设置常量值
    pub fn use_value<T>(self, value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        self.use_instance(Arc::new(value))
    }

    /// 设置已擦除类型的常量实例
    pub fn use_instance(mut self, instance: Instance) -> Self {
        self.use_value = Some(instance);
        self
    }

    /// 设置工厂函数
    pub fn use_function<T, F>(mut self, factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.use_function = Some(Arc::new(move || {
            let instance: Instance = Arc::new(factory());
            instance
        }));
        self
    }

    /// 设置依赖令牌列表（仅类提供者使用）
    pub fn dependencies<I, K>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Token>,
    {
        self.dependencies = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// 追加一个依赖令牌
    pub fn dependency(mut self, token: impl Into<Token>) -> Self {
        self.dependencies.push(token.into());
        self
    }

    /// 是否未设置任何提供者
    pub fn is_empty(&self) -> bool {
        self.use_class.is_none() && self.use_value.is_none() && self.use_function.is_none()
    }

    /// 折叠为提供者，按 类 > 值 > 函数 的优先级
    pub fn into_provider(self) -> Option<Provider> {
        if let Some(class) = self.use_class {
            return Some(Provider::Class {
                class,
                dependencies: self.dependencies,
            });
        }

        if let Some(value) = self.use_value {
            return Some(Provider::Value(value));
        }

        self.use_function.map(Provider::Function)
    }
}

impl fmt::Debug for ProvideOpts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvideOpts")
            .field("use_class", &self.use_class)
            .field("use_value", &self.use_value.is_some())
            .field("use_function", &self.use_function.is_some())
            .field("dependencies", &self.dependencies)
            .finish()
    }
}
