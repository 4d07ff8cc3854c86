//! # Host CLI
//!
//! 无界面的放映宿主：加载幻灯片文件，把文本命令转换为步骤导航，
//! 并在边界步骤上切换页面。
//!
//! ## 模块结构
//!
//! - [`config`]：宿主配置（视口、动画默认值、日志级别）
//! - [`command`]：文本命令解析
//! - [`session`]：放映会话与页面切换

pub mod command;
pub mod config;
pub mod session;

pub use command::{CommandError, HostCommand};
pub use config::{ConfigError, HostConfig};
pub use session::{ExecuteResult, Session};
