//! 容器配置

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// 容器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// 容器名称，出现在日志与调试输出中
    pub name: String,
    /// 是否记录每次解析耗时
    pub enable_performance_monitoring: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            enable_performance_monitoring: false,
        }
    }
}

impl ContainerConfig {
    /// 创建指定名称的配置
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// 设置是否启用性能监控
    pub fn with_performance_monitoring(mut self, enabled: bool) -> Self {
        self.enable_performance_monitoring = enabled;
        self
    }

    /// 从 JSON 文本加载配置，缺省字段取默认值
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "容器名称不能为空".to_string(),
            });
        }
        Ok(())
    }
}
