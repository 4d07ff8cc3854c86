//! # Error 模块
//!
//! 定义 slide-runtime 中使用的错误类型。
//!
//! 导航过程中出现的错误都是编写错误而非瞬时故障：
//! 只记录日志并继续，绝不中断步骤序列。

use thiserror::Error;

use crate::step::{Boundary, NavDirection};

/// 动画错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// 不支持的动画类型（播放时报告，不产生视觉变化）
    #[error("不支持的动画类型 '{kind}'")]
    UnsupportedKind { kind: String },
}

/// 步骤导航错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StepError {
    /// 不支持的步骤类型
    #[error("第 {index} 步：不支持的步骤类型 '{kind}'")]
    UnsupportedStep { index: usize, kind: String },

    /// 不可达的边界步骤被执行（向后到达下一页边界，或向前到达上一页边界）
    #[error("第 {index} 步：{direction}导航不应执行{boundary}边界")]
    UnreachableBoundary {
        index: usize,
        boundary: Boundary,
        direction: NavDirection,
    },

    /// 步骤序列为空
    #[error("步骤序列为空，至少需要一个步骤")]
    EmptySequence,
}

/// 幻灯片文件错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeckError {
    /// JSON 解析失败
    #[error("幻灯片文件解析失败: {0}")]
    Parse(String),

    /// 文件中没有任何幻灯片
    #[error("幻灯片文件中没有任何页面")]
    NoSlides,

    /// 缺少必需字段
    #[error("第 {slide} 页第 {step} 步：缺少字段 '{field}'")]
    MissingField {
        slide: usize,
        step: usize,
        field: &'static str,
    },

    /// 未知的缓动函数名
    #[error("未知的缓动函数 '{name}'")]
    UnknownEasing { name: String },
}

/// slide-runtime 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlideError {
    /// 动画错误
    #[error("动画错误: {0}")]
    Animation(#[from] AnimationError),

    /// 步骤错误
    #[error("步骤错误: {0}")]
    Step(#[from] StepError),

    /// 幻灯片文件错误
    #[error("幻灯片文件错误: {0}")]
    Deck(#[from] DeckError),
}

/// Result 类型别名
pub type SlideResult<T> = Result<T, SlideError>;
