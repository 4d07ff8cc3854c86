//! # Hooks 模块
//!
//! 动画的扩展点。每个 [`Animation`](super::Animation) 实例持有一组钩子，
//! 默认全部为空操作；`custom` 类型的动画通过替换钩子实现自己的过渡。

use crate::stage::Scene;

/// 动画钩子
///
/// 所有方法都有空的默认实现，只需覆盖关心的部分。
///
/// ## 实现示例
///
/// ```rust,ignore
/// struct Spin;
///
/// impl AnimationHooks for Spin {
///     fn play_custom(&mut self, target: &str, scene: &mut dyn Scene) {
///         for element in scene.select(target) {
///             scene.set_offset(element, Vec2::new(0.0, 0.0));
///         }
///     }
/// }
///
/// let anim = Animation::custom("#logo", Spin);
/// ```
pub trait AnimationHooks {
    /// `play` 开始前调用
    fn before_play(&mut self, _target: &str, _scene: &mut dyn Scene) {}

    /// `play` 结束后调用
    fn after_play(&mut self, _target: &str, _scene: &mut dyn Scene) {}

    /// `custom` 类型的准备
    fn prepare_custom(&mut self, _target: &str, _scene: &mut dyn Scene) {}

    /// `custom` 类型的播放
    fn play_custom(&mut self, _target: &str, _scene: &mut dyn Scene) {}

    /// `custom` 类型的取消
    fn finish_custom(&mut self, _target: &str, _scene: &mut dyn Scene) {}
}

/// 空钩子
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl AnimationHooks for NoopHooks {}
