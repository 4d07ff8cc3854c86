//! # Step 定义
//!
//! 序列约定：第 0 步是上一页边界，最后一步是下一页边界，中间是任意动画步骤。

use std::fmt;

use crate::animation::Animation;

/// 步骤
#[derive(Debug)]
pub enum Step {
    /// 上一页边界（后退时委托给宿主翻页）
    PreviousPage,
    /// 下一页边界（前进时委托给宿主翻页）
    NextPage,
    /// 动画步骤
    Animate(Animation),
    /// 无法识别的步骤类型
    Unsupported(String),
}

impl Step {
    pub fn animation(animation: Animation) -> Self {
        Self::Animate(animation)
    }

    /// 步骤类型名
    pub fn kind_name(&self) -> &str {
        match self {
            Self::PreviousPage => "prevPage",
            Self::NextPage => "nextPage",
            Self::Animate(_) => "animation",
            Self::Unsupported(name) => name,
        }
    }

    /// 是否是翻页边界
    pub fn boundary(&self) -> Option<Boundary> {
        match self {
            Self::PreviousPage => Some(Boundary::PreviousPage),
            Self::NextPage => Some(Boundary::NextPage),
            _ => None,
        }
    }

    pub fn as_animation(&self) -> Option<&Animation> {
        match self {
            Self::Animate(animation) => Some(animation),
            _ => None,
        }
    }

    pub fn as_animation_mut(&mut self) -> Option<&mut Animation> {
        match self {
            Self::Animate(animation) => Some(animation),
            _ => None,
        }
    }
}

/// 翻页边界
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    PreviousPage,
    NextPage,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreviousPage => write!(f, "上一页"),
            Self::NextPage => write!(f, "下一页"),
        }
    }
}

/// 导航方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Forward,
    Backward,
}

impl fmt::Display for NavDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "向前"),
            Self::Backward => write!(f, "向后"),
        }
    }
}
