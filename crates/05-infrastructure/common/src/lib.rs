//! # Infrastructure Common
//!
//! 依赖注入容器的公共基础类型。
//!
//! ## 核心类型
//!
//! - [`Token`] - 服务令牌
//! - [`Scope`] - 服务作用域
//! - [`Instance`] - 类型擦除的服务实例
//! - [`DependencyError`] - 解析错误
//! - [`ContainerConfig`] - 容器配置

pub mod configuration;
pub mod errors;
pub mod lifecycle;
pub mod token;

pub use configuration::*;
pub use errors::*;
pub use lifecycle::*;
pub use token::*;

use std::any::Any;
use std::sync::Arc;

/// 类型擦除的服务实例
///
/// 解析结果以共享句柄返回，值提供者每次都返回同一个句柄。
pub type Instance = Arc<dyn Any + Send + Sync>;
