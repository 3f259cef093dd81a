//! 错误类型定义

use crate::token::Token;
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置解析失败: {source}")]
    ParseError {
        #[from]
        source: serde_json::Error,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

/// 依赖注入错误类型
///
/// 所有错误在检测点产生，沿递归解析链原样向上传播。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DependencyError {
    #[error("令牌 '{token}' 未在注册表中找到")]
    NoSuchService { token: Token },

    #[error("服务 '{token}' 没有提供者")]
    NoProvider { token: Token },

    #[error("服务 '{token}' 缺少依赖 (实际 {actual}, 期望 {expected})")]
    MissingDependencies {
        token: Token,
        actual: usize,
        expected: usize,
    },

    #[error("服务 '{token}' 的实例类型不是 {expected}")]
    TypeMismatch { token: Token, expected: &'static str },

    #[error("构造参数 #{index} 缺失, 期望类型 {expected}")]
    ArgumentMissing { index: usize, expected: &'static str },

    #[error("构造参数 #{index} 类型不匹配, 期望类型 {expected}")]
    ArgumentTypeMismatch { index: usize, expected: &'static str },

    #[error("服务 '{token}' 所属的容器已被释放")]
    ContainerDropped { token: Token },
}

impl DependencyError {
    /// 出错服务的令牌（构造参数错误没有令牌）
    pub fn token(&self) -> Option<&Token> {
        match self {
            Self::NoSuchService { token }
            | Self::NoProvider { token }
            | Self::MissingDependencies { token, .. }
            | Self::TypeMismatch { token, .. }
            | Self::ContainerDropped { token } => Some(token),
            Self::ArgumentMissing { .. } | Self::ArgumentTypeMismatch { .. } => None,
        }
    }
}
