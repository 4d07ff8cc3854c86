//! # Command 模块
//!
//! 宿主的文本命令。每行一条，从脚本文件或标准输入读取。
//!
//! | 命令 | 别名 | 作用 |
//! |------|------|------|
//! | `next` | `n` | 前进一步 |
//! | `prev` | `p` | 后退一步 |
//! | `tick <ms>` | `t` | 推进场景时钟 |
//! | `settle` | `s` | 把所有过渡推到终态 |
//! | `dump` | `d` | 打印当前页面状态 |
//! | `quit` | `q` | 退出 |
//!
//! 空行和以 `#` 开头的行被忽略。

use std::str::FromStr;

/// 宿主命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    Next,
    Previous,
    /// 推进时钟（毫秒）
    Tick(u32),
    Settle,
    Dump,
    Quit,
}

impl HostCommand {
    /// 解析一行输入，空行和注释返回 `None`
    pub fn parse_line(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        line.parse().map(Some)
    }
}

impl FromStr for HostCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let name = parts.next().unwrap_or_default();

        let command = match name {
            "next" | "n" => HostCommand::Next,
            "prev" | "p" => HostCommand::Previous,
            "tick" | "t" => {
                let arg = parts
                    .next()
                    .ok_or_else(|| CommandError::MissingArgument(name.to_string()))?;
                let ms = arg
                    .parse()
                    .map_err(|_| CommandError::InvalidArgument(arg.to_string()))?;
                HostCommand::Tick(ms)
            }
            "settle" | "s" => HostCommand::Settle,
            "dump" | "d" => HostCommand::Dump,
            "quit" | "q" | "exit" => HostCommand::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        if let Some(extra) = parts.next() {
            return Err(CommandError::InvalidArgument(extra.to_string()));
        }

        Ok(command)
    }
}

/// 命令解析错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// 未知命令
    Unknown(String),
    /// 缺少参数
    MissingArgument(String),
    /// 参数无效
    InvalidArgument(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Unknown(name) => write!(f, "未知命令: {}", name),
            CommandError::MissingArgument(name) => write!(f, "命令 {} 缺少参数", name),
            CommandError::InvalidArgument(arg) => write!(f, "无效参数: {}", arg),
        }
    }
}

impl std::error::Error for CommandError {}
