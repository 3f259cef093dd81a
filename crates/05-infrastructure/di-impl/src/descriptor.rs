//! 服务描述符

use crate::container::ContainerInner;
use di_abstractions::{Arguments, ClassProvider, Provider, ProviderKind};
use infrastructure_common::{DependencyError, Instance, Scope, Token};
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::{debug, trace};

/// 描述符的可变状态
#[derive(Default)]
struct DescriptorState {
    scope: Scope,
    instance: Option<Instance>,
}

/// 服务描述符
///
/// 由 [`Container::bind`](crate::Container::bind) 创建，独占持有提供者配置、作用域和缓存实例。
pub struct ServiceDescriptor {
    token: Token,
    provider: Option<Provider>,
    state: Mutex<DescriptorState>,
    /// 所属容器，依赖总是相对它解析
    container: Weak<ContainerInner>,
}

impl ServiceDescriptor {
    pub(crate) fn new(
        token: Token,
        provider: Option<Provider>,
        container: Weak<ContainerInner>,
    ) -> Self {
        Self {
            token,
            provider,
            state: Mutex::new(DescriptorState::default()),
            container,
        }
    }

    /// 绑定时使用的令牌
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// 提供者种类，未设置提供者时为 `None`
    pub fn provider_kind(&self) -> Option<ProviderKind> {
        self.provider.as_ref().map(Provider::kind)
    }

    /// 更新作用域
    ///
    /// 切换为单例时立即解析并缓存实例；解析失败时作用域仍为单例，缓存保持为空。
    pub fn set_scope(self: &Arc<Self>, scope: Scope) -> Result<Arc<Self>, DependencyError> {
        self.state.lock().scope = scope;
        debug!("服务 {} 作用域设置为 {}", self.token, scope);

        if scope.is_singleton() {
            self.get_instance()?;
        }

        Ok(Arc::clone(self))
    }

    /// 当前作用域
    pub fn get_scope(&self) -> Scope {
        self.state.lock().scope
    }

    /// 是否已缓存实例
    pub fn is_cached(&self) -> bool {
        self.state.lock().instance.is_some()
    }

    /// 获取服务实例
    ///
    /// 已缓存时直接返回缓存；否则执行提供者。单例作用域下结果会被缓存。
    pub fn get_instance(&self) -> Result<Instance, DependencyError> {
        if let Some(instance) = self.state.lock().instance.clone() {
            trace!("服务 {} 命中缓存实例", self.token);
            return Ok(instance);
        }

        let instance = self.provide()?;

        let mut state = self.state.lock();
        if state.scope.is_singleton() {
            // 并发解析时保留先写入的实例
            return Ok(state.instance.get_or_insert(instance).clone());
        }

        Ok(instance)
    }

    fn provide(&self) -> Result<Instance, DependencyError> {
        let Some(provider) = &self.provider else {
            return Err(DependencyError::NoProvider {
                token: self.token.clone(),
            });
        };

        match provider {
            Provider::Class {
                class,
                dependencies,
            } => self.construct(class, dependencies),
            Provider::Value(value) => Ok(Arc::clone(value)),
            Provider::Function(factory) => Ok((**factory)()),
        }
    }

    fn construct(
        &self,
        class: &ClassProvider,
        dependencies: &[Token],
    ) -> Result<Instance, DependencyError> {
        let mut values = Vec::with_capacity(dependencies.len());

        if !dependencies.is_empty() {
            let container = self
                .container
                .upgrade()
                .ok_or_else(|| DependencyError::ContainerDropped {
                    token: self.token.clone(),
                })?;

            for token in dependencies {
                values.push(container.resolve_instance(token)?);
            }
        }

        let expected = class.arity();
        if values.len() < expected {
            return Err(DependencyError::MissingDependencies {
                token: self.token.clone(),
                actual: values.len(),
                expected,
            });
        }

        trace!("构造服务 {} ({})", self.token, class.type_name());
        class.construct(&Arguments::new(values))
    }
}

impl fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ServiceDescriptor")
            .field("token", &self.token)
            .field("provider", &self.provider)
            .field("scope", &state.scope)
            .field("cached", &state.instance.is_some())
            .finish()
    }
}
