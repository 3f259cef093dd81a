//! 服务令牌
//!
//! 令牌是注册表的键，可以是字符串名称，也可以是进程内唯一的符号。

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// 符号序号分配器
static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);

/// 服务令牌
///
/// 名称令牌按字符串比较；符号令牌只与自身（及其克隆）相等，与描述无关。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// 字符串名称
    Name(String),
    /// 唯一符号
    Symbol(Symbol),
}

/// 唯一符号
#[derive(Debug, Clone)]
pub struct Symbol {
    id: u64,
    description: Arc<str>,
}

impl Symbol {
    /// 符号描述，仅用于诊断
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl std::hash::Hash for Symbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Token {
    /// 创建名称令牌
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// 创建新的唯一符号令牌
    pub fn symbol(description: impl AsRef<str>) -> Self {
        Self::Symbol(Symbol {
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
            description: Arc::from(description.as_ref()),
        })
    }

    /// 是否为符号令牌
    pub fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Symbol(symbol) => write!(f, "Symbol({})", symbol.description),
        }
    }
}

impl From<&str> for Token {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Token {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&String> for Token {
    fn from(name: &String) -> Self {
        Self::Name(name.clone())
    }
}

impl From<&Token> for Token {
    fn from(token: &Token) -> Self {
        token.clone()
    }
}
