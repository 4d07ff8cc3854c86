//! # Stage 模块
//!
//! 动画所操作的外部协作者接口。
//!
//! ## 核心概念
//!
//! - [`Stage`]：类 DOM 的选择与动画引擎（按选择器取元素、设置可见性/透明度/偏移/文本、
//!   启动与停止属性动画、完成回调）
//! - [`SvgStage`]：SVG 专用句柄（属性设置、动画、枚举并停止进行中的动画）
//! - [`Highlighter`]：代码块重新高亮触发器
//! - [`Scene`]：以上三者的组合，`Animation` 只依赖它
//!
//! 这些调用都是同步的：启动过渡后立即返回，过渡在宿主的时间轴上异步完成。
//! [`MemoryStage`] 是一个完整的内存实现，用 [`MemoryStage::update`] 推进时间。

pub mod memory;
mod tween;

pub use memory::{Element, ElementSpec, MemoryStage, TweenEvent};
pub use tween::{Tween, TweenState};

use crate::animation::{DEFAULT_DURATION_MS, Easing};

/// 元素句柄
///
/// 由 `Stage` 在选择时返回，只在同一个 stage 内有效。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

/// 过渡动画 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(pub u64);

/// 二维向量
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// 创建新的向量
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// 零向量
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// 线性插值
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

/// 视口尺寸
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// 过渡的时长与缓动
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    /// 时长（毫秒）
    pub duration_ms: u32,
    /// 缓动函数
    pub easing: Easing,
}

impl Timing {
    pub const fn new(duration_ms: u32, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
        }
    }

    /// 时长（秒）
    pub fn seconds(&self) -> f32 {
        self.duration_ms as f32 / 1000.0
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_MS, Easing::Swing)
    }
}

/// HTML 元素的动画目标属性
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleTarget {
    /// 透明度
    Opacity(f32),
    /// 相对于静止位置的偏移
    Offset(Vec2),
}

/// SVG 属性
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SvgAttr {
    /// `opacity` 属性
    Opacity(f32),
    /// `transform` 中的平移部分
    Translate(Vec2),
}

/// 过渡完成后执行的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// 标记为不可见
    Hide,
}

/// 类 DOM 的选择与动画引擎
pub trait Stage {
    /// 按选择器选择元素（可能为空）
    fn select(&self, selector: &str) -> Vec<ElementId>;

    /// 视口尺寸（用于计算屏幕外位置）
    fn viewport(&self) -> Size;

    /// 设置可见性
    fn set_visible(&mut self, element: ElementId, visible: bool);

    /// 立即设置透明度
    fn set_opacity(&mut self, element: ElementId, opacity: f32);

    /// 立即设置偏移
    fn set_offset(&mut self, element: ElementId, offset: Vec2);

    /// 读取元素内容
    fn text(&self, element: ElementId) -> Option<String>;

    /// 替换元素内容
    fn set_text(&mut self, element: ElementId, text: &str);

    /// 启动属性动画，完成时执行 `then`
    fn animate(
        &mut self,
        element: ElementId,
        target: StyleTarget,
        timing: Timing,
        then: Option<Completion>,
    );

    /// 停止元素上正在进行的动画，直接跳到终态（会执行完成动作）
    fn stop(&mut self, element: ElementId);
}

/// SVG 专用的选择与动画句柄
pub trait SvgStage {
    /// 按选择器选择 SVG 元素
    fn select_svg(&self, selector: &str) -> Vec<ElementId>;

    /// 立即设置属性
    fn set_svg_attr(&mut self, element: ElementId, attr: SvgAttr);

    /// 从当前值动画到 `target`
    fn animate_svg(&mut self, element: ElementId, target: SvgAttr, timing: Timing) -> TweenId;

    /// 枚举元素上正在进行的动画
    fn svg_in_flight(&self, element: ElementId) -> Vec<TweenId>;

    /// 强制完成指定动画
    fn stop_svg(&mut self, element: ElementId, tween: TweenId);
}

/// 代码高亮触发器
pub trait Highlighter {
    /// 标记元素中的代码块需要重新高亮
    fn rehighlight(&mut self, element: ElementId);
}

/// 动画可见的完整场景
pub trait Scene: Stage + SvgStage + Highlighter {}

impl<T: Stage + SvgStage + Highlighter + ?Sized> Scene for T {}
