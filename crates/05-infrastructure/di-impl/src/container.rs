//! IoC 容器

use crate::descriptor::ServiceDescriptor;
use crate::registry::Registry;
use di_abstractions::{downcast_instance, ContainerStats, ProvideOpts, ServiceResolver};
use infrastructure_common::{ContainerConfig, DependencyError, Instance, Token};
use parking_lot::RwLock;
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// 容器内部状态，描述符通过弱引用回到这里解析依赖
pub(crate) struct ContainerInner {
    config: ContainerConfig,
    registry: RwLock<Registry>,
    resolutions: AtomicU64,
    resolution_errors: AtomicU64,
}

impl ContainerInner {
    fn lookup(&self, token: &Token) -> Result<Arc<ServiceDescriptor>, DependencyError> {
        let descriptor = self.registry.read().get(token).cloned();
        descriptor.ok_or_else(|| DependencyError::NoSuchService {
            token: token.clone(),
        })
    }

    /// 解析令牌并记录结果
    pub(crate) fn resolve_instance(&self, token: &Token) -> Result<Instance, DependencyError> {
        let started = Instant::now();
        let result = self.produce(token);
        self.record(token, &result, started);
        result
    }

    /// 执行提供者期间不持有注册表锁
    fn produce(&self, token: &Token) -> Result<Instance, DependencyError> {
        self.lookup(token).and_then(|descriptor| descriptor.get_instance())
    }

    fn record<T>(&self, token: &Token, result: &Result<T, DependencyError>, started: Instant) {
        match result {
            Ok(_) => {
                self.resolutions.fetch_add(1, Ordering::Relaxed);
            }
            Err(error) => {
                self.resolution_errors.fetch_add(1, Ordering::Relaxed);
                debug!("[{}] 解析 {} 失败: {}", self.config.name, token, error);
            }
        }

        if self.config.enable_performance_monitoring {
            debug!(
                "[{}] 解析 {} 耗时 {} µs",
                self.config.name,
                token,
                started.elapsed().as_micros()
            );
        }
    }
}

/// IoC 容器
///
/// 持有 令牌 → 服务描述符 的注册表，负责绑定与解析。
///
/// 解析是递归的：类提供者的每个依赖令牌都在同一个容器中解析。
/// 容器不做循环依赖检测，依赖链（直接或间接）包含自身的令牌会无限递归直至栈溢出。
///
/// ```
/// use di_impl::{Container, ProvideOpts, Scope};
///
/// let container = Container::new();
/// container.bind("Greeting", ProvideOpts::value(String::from("hello")));
/// container
///     .bind("Counter", ProvideOpts::function(|| 0u64))
///     .set_scope(Scope::Singleton)
///     .unwrap();
///
/// let greeting = container.resolve::<String>("Greeting").unwrap();
/// assert_eq!(greeting.as_str(), "hello");
/// ```
pub struct Container {
    inner: Arc<ContainerInner>,
}

impl Container {
    /// 使用默认配置创建容器
    pub fn new() -> Self {
        Self::with_config(ContainerConfig::default())
    }

    /// 使用指定配置创建容器
    pub fn with_config(config: ContainerConfig) -> Self {
        Self {
            inner: Arc::new(ContainerInner {
                config,
                registry: RwLock::new(Registry::default()),
                resolutions: AtomicU64::new(0),
                resolution_errors: AtomicU64::new(0),
            }),
        }
    }

    /// 容器配置
    pub fn config(&self) -> &ContainerConfig {
        &self.inner.config
    }

    /// 绑定服务
    ///
    /// 新描述符的作用域为瞬时，覆盖令牌上已有的绑定，返回描述符以便链式设置作用域。
    pub fn bind(&self, token: impl Into<Token>, provide: ProvideOpts) -> Arc<ServiceDescriptor> {
        let token = token.into();
        let provider = provide.into_provider();
        if provider.is_none() {
            warn!("[{}] 服务 {} 未设置提供者", self.inner.config.name, token);
        }

        let descriptor = Arc::new(ServiceDescriptor::new(
            token.clone(),
            provider,
            Arc::downgrade(&self.inner),
        ));

        let previous = self
            .inner
            .registry
            .write()
            .insert(token.clone(), Arc::clone(&descriptor));

        if previous.is_some() {
            warn!("[{}] 覆盖已绑定的服务: {}", self.inner.config.name, token);
        } else {
            debug!("[{}] 绑定服务: {}", self.inner.config.name, token);
        }

        descriptor
    }

    /// 同时绑定多个服务
    ///
    /// 回调同步执行并收到绑定器；不做回滚，回调中途失败时已绑定的服务保留。
    /// 回调的返回值原样返回，回调可以返回 `Result` 并使用 `?`。
    pub fn bind_many<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Binder<'_>) -> R,
    {
        f(&Binder { container: self })
    }

    /// 解析服务并转换为指定类型
    pub fn resolve<T>(&self, token: impl Into<Token>) -> Result<Arc<T>, DependencyError>
    where
        T: Any + Send + Sync,
    {
        let token = token.into();
        let started = Instant::now();
        // 类型转换失败同样计为一次解析错误
        let result = self
            .inner
            .produce(&token)
            .and_then(|instance| downcast_instance(&token, instance));
        self.inner.record(&token, &result, started);
        result
    }

    /// 解析服务，返回类型擦除的实例
    pub fn resolve_instance(&self, token: impl Into<Token>) -> Result<Instance, DependencyError> {
        self.inner.resolve_instance(&token.into())
    }

    /// 注册表的只读快照
    pub fn get_registry(&self) -> Registry {
        self.inner.registry.read().clone()
    }

    /// 清空注册表
    pub fn clear_registry(&self) {
        let mut registry = self.inner.registry.write();
        let removed = registry.len();
        registry.clear();
        info!("[{}] 清空注册表，移除 {} 个服务", self.inner.config.name, removed);
    }

    /// 容器统计信息
    pub fn stats(&self) -> ContainerStats {
        let registry = self.inner.registry.read();
        ContainerStats {
            registered_services: registry.len(),
            resolutions: self.inner.resolutions.load(Ordering::Relaxed),
            resolution_errors: self.inner.resolution_errors.load(Ordering::Relaxed),
            active_singletons: registry
                .values()
                .filter(|descriptor| descriptor.is_cached())
                .count(),
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("name", &self.inner.config.name)
            .field("registered", &self.inner.registry.read().len())
            .finish()
    }
}

impl ServiceResolver for Container {
    fn resolve_instance(&self, token: &Token) -> Result<Instance, DependencyError> {
        self.inner.resolve_instance(token)
    }

    fn can_resolve(&self, token: &Token) -> bool {
        self.inner.registry.read().contains_key(token)
    }
}

/// 绑定器
///
/// [`Container::bind_many`] 传给回调的句柄，只暴露所属容器的 `bind`。
pub struct Binder<'a> {
    container: &'a Container,
}

impl Binder<'_> {
    /// 绑定服务，等同于 [`Container::bind`]
    pub fn bind(&self, token: impl Into<Token>, provide: ProvideOpts) -> Arc<ServiceDescriptor> {
        self.container.bind(token, provide)
    }
}
