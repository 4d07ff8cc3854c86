//! # Animation 模块
//!
//! 单个视觉过渡的实例与生命周期。

use std::fmt;

use tracing::{debug, error};

use super::{AnimationHooks, AnimationKind, AnimationOptions, Direction, Easing, NoopHooks};
use crate::error::AnimationError;
use crate::stage::{Completion, Scene, StyleTarget, SvgAttr, Timing, Vec2};

/// 默认时长（毫秒）
pub const DEFAULT_DURATION_MS: u32 = 500;

/// 动画状态（由 ready/played 标记推导）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    /// 尚未准备
    #[default]
    Unprepared,
    /// 已处于过渡前的视觉状态
    Ready,
    /// 已触发过渡，尚未被重新准备
    Played,
}

/// 单个视觉过渡
///
/// 每个步骤在编写时构造一次，整个放映期间不销毁，
/// 只在 `Ready` 与 `Played` 之间往返。
pub struct Animation {
    /// 动画类型
    kind: AnimationKind,
    /// 目标选择器（可匹配零个或多个元素）
    target: String,
    /// 时长与缓动
    timing: Timing,
    /// 类型相关参数
    options: AnimationOptions,
    /// 目标是否已处于过渡前状态
    ready: bool,
    /// 过渡是否已触发
    played: bool,
    /// `changeText` 捕获的原始内容
    saved_text: Option<String>,
    /// 扩展钩子
    hooks: Box<dyn AnimationHooks>,
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("kind", &self.kind)
            .field("target", &self.target)
            .field("timing", &self.timing)
            .field("options", &self.options)
            .field("ready", &self.ready)
            .field("played", &self.played)
            .field("saved_text", &self.saved_text)
            .finish_non_exhaustive()
    }
}

impl Animation {
    /// 创建动画（时长 500ms，缓动 `swing`）
    pub fn new(kind: AnimationKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
            timing: Timing::default(),
            options: AnimationOptions::default(),
            ready: false,
            played: false,
            saved_text: None,
            hooks: Box::new(NoopHooks),
        }
    }

    pub fn fade_in(target: impl Into<String>) -> Self {
        Self::new(AnimationKind::FadeIn, target)
    }

    pub fn fade_out(target: impl Into<String>) -> Self {
        Self::new(AnimationKind::FadeOut, target)
    }

    pub fn move_in(target: impl Into<String>, from: Direction) -> Self {
        let mut anim = Self::new(AnimationKind::MoveIn, target);
        anim.options.from = Some(from);
        anim
    }

    pub fn move_out(target: impl Into<String>, to: Direction) -> Self {
        let mut anim = Self::new(AnimationKind::MoveOut, target);
        anim.options.to = Some(to);
        anim
    }

    pub fn svg_fade_in(target: impl Into<String>) -> Self {
        Self::new(AnimationKind::SvgFadeIn, target)
    }

    pub fn svg_move(target: impl Into<String>, from: Vec2, to: Vec2) -> Self {
        let mut anim = Self::new(AnimationKind::SvgMove, target);
        anim.options.from_x = from.x;
        anim.options.from_y = from.y;
        anim.options.to_x = to.x;
        anim.options.to_y = to.y;
        anim
    }

    pub fn change_text(target: impl Into<String>, text: impl Into<String>) -> Self {
        let mut anim = Self::new(AnimationKind::ChangeText, target);
        anim.options.text = Some(text.into());
        anim
    }

    /// 组合动画，子动画按列表顺序驱动
    pub fn set(animations: Vec<Animation>) -> Self {
        let mut anim = Self::new(AnimationKind::Set, "");
        anim.options.animations = animations;
        anim
    }

    /// 自定义动画，过渡由钩子实现
    pub fn custom(target: impl Into<String>, hooks: impl AnimationHooks + 'static) -> Self {
        Self::new(AnimationKind::Custom, target).with_hooks(hooks)
    }

    /// 设置时长（毫秒）
    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.timing.duration_ms = duration_ms;
        self
    }

    /// 设置缓动函数
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.timing.easing = easing;
        self
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_options(mut self, options: AnimationOptions) -> Self {
        self.options = options;
        self
    }

    /// 替换钩子
    pub fn with_hooks(mut self, hooks: impl AnimationHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// 开启延迟准备
    pub fn late_prepare(mut self) -> Self {
        self.options.late_prepare = true;
        self
    }

    /// 开启不可逆
    pub fn no_reverse(mut self) -> Self {
        self.options.no_reverse = true;
        self
    }

    pub fn kind(&self) -> &AnimationKind {
        &self.kind
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn options(&self) -> &AnimationOptions {
        &self.options
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_played(&self) -> bool {
        self.played
    }

    /// `changeText` 捕获的原始内容
    pub fn saved_text(&self) -> Option<&str> {
        self.saved_text.as_deref()
    }

    /// 当前状态
    pub fn state(&self) -> AnimationState {
        match (self.ready, self.played) {
            (false, _) => AnimationState::Unprepared,
            (true, false) => AnimationState::Ready,
            (true, true) => AnimationState::Played,
        }
    }

    /// 把目标置于过渡前的视觉状态
    ///
    /// - `late_prepare` 且尚未就绪：跳过，等待 `play` 武装
    /// - `no_reverse` 且已播放：跳过，不还原单向过渡
    /// - 否则先 `finish` 取消进行中的过渡，再应用前置状态
    pub fn prepare(&mut self, scene: &mut dyn Scene) {
        if self.options.late_prepare && !self.ready {
            debug!(kind = %self.kind, target = %self.target, "延迟准备，尚未武装");
            return;
        }
        if self.options.no_reverse && self.ready && self.played {
            debug!(kind = %self.kind, target = %self.target, "不可逆动画已播放，跳过准备");
            return;
        }

        self.finish(scene);
        self.apply_preconditions(scene);
        self.played = false;
        self.ready = true;
    }

    /// 触发过渡
    ///
    /// 不支持的类型只记录错误，不产生视觉变化，仍然标记为已播放。
    pub fn play(&mut self, scene: &mut dyn Scene) {
        self.hooks.before_play(&self.target, scene);

        if self.options.late_prepare {
            self.ready = true;
            self.prepare(scene);
        }

        if let Err(e) = self.run_transition(scene) {
            error!(error = %e, target = %self.target, "动画播放失败");
        }

        self.played = true;
        debug!(kind = %self.kind, target = %self.target, "动画已播放");
        self.hooks.after_play(&self.target, scene);
    }

    /// 取消进行中的过渡，直接跳到终态
    ///
    /// 没有进行中的过渡时什么也不做。
    pub fn finish(&mut self, scene: &mut dyn Scene) {
        match &self.kind {
            AnimationKind::SvgFadeIn | AnimationKind::SvgMove => {
                for element in scene.select_svg(&self.target) {
                    for tween in scene.svg_in_flight(element) {
                        scene.stop_svg(element, tween);
                    }
                }
            }
            AnimationKind::Set => {
                for child in &mut self.options.animations {
                    child.finish(scene);
                }
            }
            AnimationKind::Custom => self.hooks.finish_custom(&self.target, scene),
            _ => {
                for element in scene.select(&self.target) {
                    scene.stop(element);
                }
            }
        }
    }

    fn apply_preconditions(&mut self, scene: &mut dyn Scene) {
        match &self.kind {
            AnimationKind::FadeIn => {
                for element in scene.select(&self.target) {
                    scene.set_visible(element, false);
                }
            }
            AnimationKind::FadeOut => {
                for element in scene.select(&self.target) {
                    scene.set_opacity(element, 1.0);
                    scene.set_visible(element, true);
                }
            }
            AnimationKind::MoveIn => {
                let offset = self
                    .options
                    .from
                    .unwrap_or_default()
                    .offscreen_offset(scene.viewport());
                for element in scene.select(&self.target) {
                    scene.set_offset(element, offset);
                }
            }
            AnimationKind::MoveOut => {
                for element in scene.select(&self.target) {
                    scene.set_offset(element, Vec2::zero());
                    scene.set_visible(element, true);
                }
            }
            AnimationKind::SvgFadeIn => {
                for element in scene.select_svg(&self.target) {
                    scene.set_svg_attr(element, SvgAttr::Opacity(0.0));
                }
            }
            AnimationKind::SvgMove => {
                let from = self.options.svg_from();
                for element in scene.select_svg(&self.target) {
                    scene.set_svg_attr(element, SvgAttr::Translate(from));
                }
            }
            AnimationKind::ChangeText => {
                let elements = scene.select(&self.target);
                if let Some(saved) = self.saved_text.clone() {
                    for &element in &elements {
                        scene.set_text(element, &saved);
                        scene.rehighlight(element);
                    }
                } else {
                    self.saved_text = elements.first().and_then(|&element| scene.text(element));
                }
            }
            AnimationKind::Set => {
                for child in &mut self.options.animations {
                    child.prepare(scene);
                }
            }
            AnimationKind::Custom => self.hooks.prepare_custom(&self.target, scene),
            AnimationKind::Unsupported(_) => {}
        }
    }

    fn run_transition(&mut self, scene: &mut dyn Scene) -> Result<(), AnimationError> {
        let timing = self.timing;

        match &self.kind {
            AnimationKind::FadeIn => {
                for element in scene.select(&self.target) {
                    scene.set_opacity(element, 0.0);
                    scene.set_visible(element, true);
                    scene.animate(element, StyleTarget::Opacity(1.0), timing, None);
                }
            }
            AnimationKind::FadeOut => {
                for element in scene.select(&self.target) {
                    scene.animate(
                        element,
                        StyleTarget::Opacity(0.0),
                        timing,
                        Some(Completion::Hide),
                    );
                }
            }
            AnimationKind::MoveIn => {
                for element in scene.select(&self.target) {
                    scene.animate(element, StyleTarget::Offset(Vec2::zero()), timing, None);
                }
            }
            AnimationKind::MoveOut => {
                let offset = self
                    .options
                    .to
                    .unwrap_or_default()
                    .offscreen_offset(scene.viewport());
                for element in scene.select(&self.target) {
                    scene.animate(
                        element,
                        StyleTarget::Offset(offset),
                        timing,
                        Some(Completion::Hide),
                    );
                }
            }
            AnimationKind::SvgFadeIn => {
                for element in scene.select_svg(&self.target) {
                    scene.animate_svg(element, SvgAttr::Opacity(1.0), timing);
                }
            }
            AnimationKind::SvgMove => {
                let to = self.options.svg_to();
                for element in scene.select_svg(&self.target) {
                    scene.animate_svg(element, SvgAttr::Translate(to), timing);
                }
            }
            AnimationKind::Set => {
                for child in &mut self.options.animations {
                    child.play(scene);
                }
            }
            AnimationKind::ChangeText => {
                let elements = scene.select(&self.target);
                if self.saved_text.is_none() {
                    self.saved_text = elements.first().and_then(|&element| scene.text(element));
                }
                let text = self.options.text.as_deref().unwrap_or_default();
                for &element in &elements {
                    scene.set_text(element, text);
                    scene.rehighlight(element);
                }
            }
            AnimationKind::Custom => self.hooks.play_custom(&self.target, scene),
            AnimationKind::Unsupported(name) => {
                return Err(AnimationError::UnsupportedKind { kind: name.clone() });
            }
        }

        Ok(())
    }
}
