//! # 依赖注入具体实现
//!
//! 提供服务描述符、注册表、IoC 容器以及进程级默认容器。
//!
//! ```
//! use di_impl::{Arguments, Container, DependencyError, Injectable, ProvideOpts};
//! use std::sync::Arc;
//!
//! struct Greeter {
//!     greeting: Arc<String>,
//! }
//!
//! impl Injectable for Greeter {
//!     const ARITY: usize = 1;
//!
//!     fn construct(args: &Arguments) -> Result<Self, DependencyError> {
//!         Ok(Self { greeting: args.get(0)? })
//!     }
//! }
//!
//! let container = Container::new();
//! container.bind_many(|binder| {
//!     binder.bind("Greeting", ProvideOpts::value(String::from("hello")));
//!     binder.bind("Greeter", ProvideOpts::class::<Greeter>().dependency("Greeting"));
//! });
//!
//! let greeter = container.resolve::<Greeter>("Greeter").unwrap();
//! assert_eq!(greeter.greeting.as_str(), "hello");
//! ```

mod container;
mod descriptor;
mod registry;

pub use container::{Binder, Container};
pub use descriptor::ServiceDescriptor;
pub use registry::Registry;

pub use di_abstractions::{
    Arguments, ClassProvider, ContainerStats, Injectable, ProvideOpts, Provider, ProviderKind,
    ServiceResolver,
};
pub use infrastructure_common::{
    ContainerConfig, DependencyError, Instance, Scope, Token,
};

use once_cell::sync::Lazy;

/// 进程级默认容器
///
/// 首次访问时创建，此后在整个进程生命周期内存在；只能通过
/// [`Container::clear_registry`] 重置。
static DEFAULT_CONTAINER: Lazy<Container> =
    Lazy::new(|| Container::with_config(ContainerConfig::named("global")));

/// 获取进程级默认容器
pub fn container() -> &'static Container {
    &DEFAULT_CONTAINER
}
