//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义提供者模型和服务解析接口。
//!
//! ## 核心接口
//!
//! - [`ProvideOpts`] / [`Provider`] - 提供者配置
//! - [`Injectable`] - 可注入类型（带构造参数个数的“类”）
//! - [`ServiceResolver`] - 服务解析器接口
//! - [`ContainerStats`] - 容器统计信息

pub mod container;
pub mod factory;
pub mod provider;
pub mod resolver;

pub use container::*;
pub use factory::*;
pub use provider::*;
pub use resolver::*;
