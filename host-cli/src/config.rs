//! # Config 模块
//!
//! 宿主配置管理，集中管理所有配置项。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (slide-host.json)
//! 3. 默认值（最低）

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use slide_runtime::{DEFAULT_DURATION_MS, Easing, Size, Timing};

/// 宿主配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    /// 视口配置
    #[serde(default)]
    pub viewport: ViewportConfig,

    /// 动画默认值
    #[serde(default)]
    pub animation: AnimationConfig,

    /// 日志级别（trace/debug/info/warn/error）
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// 每条命令执行后是否把所有过渡推到终态
    ///
    /// 关闭时需要用 `tick` 命令推进时间。
    #[serde(default)]
    pub settle_after_step: bool,
}

/// 视口配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// 视口宽度
    #[serde(default = "default_viewport_width")]
    pub width: f32,

    /// 视口高度
    #[serde(default = "default_viewport_height")]
    pub height: f32,
}

/// 动画默认值（幻灯片文件未指定时使用）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// 默认时长（毫秒）
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u32,

    /// 默认缓动函数名
    #[serde(default = "default_easing")]
    pub easing: String,
}

// 默认值函数
fn default_log_level() -> String {
    "info".to_string()
}

fn default_viewport_width() -> f32 {
    1280.0
}

fn default_viewport_height() -> f32 {
    720.0
}

fn default_duration_ms() -> u32 {
    DEFAULT_DURATION_MS
}

fn default_easing() -> String {
    Easing::default().name().to_string()
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            animation: AnimationConfig::default(),
            log_level: default_log_level(),
            settle_after_step: false,
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_viewport_width(),
            height: default_viewport_height(),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            easing: default_easing(),
        }
    }
}

impl HostConfig {
    /// 读取配置文件
    ///
    /// 不记录日志：调用方通常在日志初始化之前读取配置，
    /// 由调用方决定失败时是否回退到默认配置。
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        fs::write(path, json).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.viewport.width > 0.0 && self.viewport.height > 0.0) {
            return Err(ConfigError::ValidationFailed(format!(
                "视口尺寸必须为正数: {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }

        self.timing()?;
        self.log_level()?;

        Ok(())
    }

    /// 视口尺寸
    pub fn viewport_size(&self) -> Size {
        Size::new(self.viewport.width, self.viewport.height)
    }

    /// 默认时长与缓动
    pub fn timing(&self) -> Result<Timing, ConfigError> {
        let easing = self
            .animation
            .easing
            .parse::<Easing>()
            .map_err(|e| ConfigError::ValidationFailed(e.to_string()))?;
        Ok(Timing::new(self.animation.duration_ms, easing))
    }

    /// 日志级别
    pub fn log_level(&self) -> Result<tracing::Level, ConfigError> {
        self.log_level.parse().map_err(|_| {
            ConfigError::ValidationFailed(format!("无效的日志级别: {}", self.log_level))
        })
    }
}

/// 配置错误
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 配置文件不存在
    NotFound(String),
    /// 解析失败
    ParseFailed(String),
    /// 序列化失败
    SerializationFailed(String),
    /// IO 错误
    IoError(String),
    /// 验证失败
    ValidationFailed(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(path) => write!(f, "配置文件不存在: {}", path),
            ConfigError::ParseFailed(e) => write!(f, "配置文件解析失败: {}", e),
            ConfigError::SerializationFailed(e) => write!(f, "配置序列化失败: {}", e),
            ConfigError::IoError(e) => write!(f, "配置 IO 错误: {}", e),
            ConfigError::ValidationFailed(e) => write!(f, "配置验证失败: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
