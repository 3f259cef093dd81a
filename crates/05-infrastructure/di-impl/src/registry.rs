//! 服务注册表

use crate::descriptor::ServiceDescriptor;
use infrastructure_common::Token;
use std::collections::HashMap;
use std::sync::Arc;

/// 服务注册表
///
/// 按插入顺序保存 令牌 → 描述符 映射，每个令牌至多一个描述符。
/// [`Container::get_registry`](crate::Container::get_registry) 返回的是快照，
/// 外部只能读取，修改操作仅在容器内部可用。
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<(Token, Arc<ServiceDescriptor>)>,
    index: HashMap<Token, usize>,
}

impl Registry {
    /// 插入描述符，已存在时原位覆盖并返回旧描述符
    pub(crate) fn insert(
        &mut self,
        token: Token,
        descriptor: Arc<ServiceDescriptor>,
    ) -> Option<Arc<ServiceDescriptor>> {
        if let Some(&position) = self.index.get(&token) {
            let previous = std::mem::replace(&mut self.entries[position].1, descriptor);
            return Some(previous);
        }

        self.index.insert(token.clone(), self.entries.len());
        self.entries.push((token, descriptor));
        None
    }

    /// 清空注册表
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// 按令牌查找描述符
    pub fn get(&self, token: &Token) -> Option<&Arc<ServiceDescriptor>> {
        self.index
            .get(token)
            .map(|&position| &self.entries[position].1)
    }

    /// 令牌是否已绑定
    pub fn contains_key(&self, token: &Token) -> bool {
        self.index.contains_key(token)
    }

    /// 已绑定的服务数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按插入顺序遍历令牌
    pub fn keys(&self) -> impl Iterator<Item = &Token> {
        self.entries.iter().map(|(token, _)| token)
    }

    /// 按插入顺序遍历描述符
    pub fn values(&self) -> impl Iterator<Item = &Arc<ServiceDescriptor>> {
        self.entries.iter().map(|(_, descriptor)| descriptor)
    }

    /// 按插入顺序遍历条目
    pub fn iter(&self) -> impl Iterator<Item = (&Token, &Arc<ServiceDescriptor>)> {
        self.entries
            .iter()
            .map(|(token, descriptor)| (token, descriptor))
    }
}
