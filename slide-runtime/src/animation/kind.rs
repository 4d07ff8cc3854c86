//! # Kind 模块
//!
//! 动画类型与各类型的参数。

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Animation;
use crate::stage::{Size, Vec2};

/// 动画类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationKind {
    /// 淡入
    FadeIn,
    /// 淡出，结束后隐藏
    FadeOut,
    /// 从屏幕外（`from` 方向）移入
    MoveIn,
    /// 向屏幕外（`to` 方向）移出，结束后隐藏
    MoveOut,
    /// SVG 淡入
    SvgFadeIn,
    /// SVG 平移，从 `(from_x, from_y)` 到 `(to_x, to_y)`
    SvgMove,
    /// 替换文本内容
    ChangeText,
    /// 组合：按顺序驱动 `animations` 中的子动画
    Set,
    /// 自定义：交给 [`AnimationHooks`](super::AnimationHooks)
    Custom,
    /// 无法识别的类型名，播放时报错
    Unsupported(String),
}

impl AnimationKind {
    /// 从类型名解析，未知名称保留为 `Unsupported`
    pub fn from_name(name: &str) -> Self {
        match name {
            "fadeIn" => Self::FadeIn,
            "fadeOut" => Self::FadeOut,
            "moveIn" => Self::MoveIn,
            "moveOut" => Self::MoveOut,
            "svgFadeIn" => Self::SvgFadeIn,
            "svgMove" => Self::SvgMove,
            "changeText" => Self::ChangeText,
            "set" => Self::Set,
            "custom" => Self::Custom,
            other => Self::Unsupported(other.to_string()),
        }
    }

    /// 类型名
    pub fn name(&self) -> &str {
        match self {
            Self::FadeIn => "fadeIn",
            Self::FadeOut => "fadeOut",
            Self::MoveIn => "moveIn",
            Self::MoveOut => "moveOut",
            Self::SvgFadeIn => "svgFadeIn",
            Self::SvgMove => "svgMove",
            Self::ChangeText => "changeText",
            Self::Set => "set",
            Self::Custom => "custom",
            Self::Unsupported(name) => name,
        }
    }

    /// 是否作用于 SVG 句柄
    pub fn is_svg(&self) -> bool {
        matches!(self, Self::SvgFadeIn | Self::SvgMove)
    }
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 屏幕边缘方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Left,
    Right,
    Top,
    Bottom,
}

impl Direction {
    /// 该方向上刚好位于视口外的偏移
    pub fn offscreen_offset(self, viewport: Size) -> Vec2 {
        match self {
            Self::Left => Vec2::new(-viewport.width, 0.0),
            Self::Right => Vec2::new(viewport.width, 0.0),
            Self::Top => Vec2::new(0.0, -viewport.height),
            Self::Bottom => Vec2::new(0.0, viewport.height),
        }
    }
}

/// 动画参数
///
/// 只包含可识别的字段；各类型只读取与自己相关的部分。
#[derive(Debug, Default)]
pub struct AnimationOptions {
    /// `moveIn` 的起始方向
    pub from: Option<Direction>,
    /// `moveOut` 的目标方向
    pub to: Option<Direction>,
    /// `svgMove` 起点
    pub from_x: f32,
    pub from_y: f32,
    /// `svgMove` 终点
    pub to_x: f32,
    pub to_y: f32,
    /// `changeText` 的新内容
    pub text: Option<String>,
    /// 延迟准备：`init` 时不准备，直到第一次 `play` 才就绪
    pub late_prepare: bool,
    /// 不可逆：播放后不再被 `prepare` 还原
    pub no_reverse: bool,
    /// `set` 的子动画
    pub animations: Vec<Animation>,
}

impl AnimationOptions {
    /// `svgMove` 起点
    pub fn svg_from(&self) -> Vec2 {
        Vec2::new(self.from_x, self.from_y)
    }

    /// `svgMove` 终点
    pub fn svg_to(&self) -> Vec2 {
        Vec2::new(self.to_x, self.to_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        for name in [
            "fadeIn",
            "fadeOut",
            "moveIn",
            "moveOut",
            "svgFadeIn",
            "svgMove",
            "changeText",
            "set",
            "custom",
        ] {
            let kind = AnimationKind::from_name(name);
            assert!(!matches!(kind, AnimationKind::Unsupported(_)), "{name}");
            assert_eq!(kind.name(), name);
        }

        let unknown = AnimationKind::from_name("spin");
        assert_eq!(unknown, AnimationKind::Unsupported("spin".to_string()));
        assert_eq!(unknown.to_string(), "spin");
    }

    #[test]
    fn test_offscreen_offset() {
        let viewport = Size::new(800.0, 600.0);
        assert_eq!(Direction::Left.offscreen_offset(viewport), Vec2::new(-800.0, 0.0));
        assert_eq!(Direction::Right.offscreen_offset(viewport), Vec2::new(800.0, 0.0));
        assert_eq!(Direction::Top.offscreen_offset(viewport), Vec2::new(0.0, -600.0));
        assert_eq!(Direction::Bottom.offscreen_offset(viewport), Vec2::new(0.0, 600.0));
    }

    #[test]
    fn test_direction_serde() {
        let dir: Direction = serde_json::from_str("\"bottom\"").unwrap();
        assert_eq!(dir, Direction::Bottom);
    }
}
