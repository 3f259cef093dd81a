//! 服务生命周期（作用域）

use serde::{Deserialize, Serialize};
use std::fmt;

/// 服务作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Scope {
    /// 瞬时模式 - 每次解析都重新执行提供者
    #[default]
    Transient,
    /// 单例模式 - 提供者最多执行一次，之后返回缓存的实例
    Singleton,
}

impl Scope {
    /// 是否为单例
    pub fn is_singleton(self) -> bool {
        self == Self::Singleton
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transient => f.write_str("transient"),
            Self::Singleton => f.write_str("singleton"),
        }
    }
}
