//! # Tween 模块
//!
//! 单条过渡的时间轴。只负责把经过的时间换算成 0.0 - 1.0 的进度，
//! 具体改变哪个属性由 stage 决定。

use crate::animation::Easing;

/// 时间轴状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenState {
    /// 正在播放
    #[default]
    Running,
    /// 自然结束
    Completed,
    /// 被强制跳到终态
    Stopped,
}

impl TweenState {
    /// 是否已结束
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Stopped)
    }
}

/// 过渡时间轴
#[derive(Debug, Clone)]
pub struct Tween {
    /// 时长（秒）
    duration: f32,
    /// 缓动函数
    easing: Easing,
    /// 已经过的时间
    elapsed: f32,
    /// 当前进度（已应用缓动）
    progress: f32,
    /// 当前状态
    state: TweenState,
}

impl Tween {
    /// 创建时间轴，时长不大于 0 时立即完成
    pub fn new(duration: f32, easing: Easing) -> Self {
        let (state, progress) = if duration <= 0.0 {
            (TweenState::Completed, 1.0)
        } else {
            (TweenState::Running, 0.0)
        };

        Self {
            duration: duration.max(0.0),
            easing,
            elapsed: 0.0,
            progress,
            state,
        }
    }

    /// 推进时间
    ///
    /// # 返回
    /// - `true`: 仍在进行中
    /// - `false`: 已结束
    pub fn update(&mut self, dt: f32) -> bool {
        if self.state.is_finished() {
            return false;
        }

        self.elapsed += dt;
        let raw_progress = self.elapsed / self.duration;
        if raw_progress >= 1.0 {
            self.progress = 1.0;
            self.state = TweenState::Completed;
            false
        } else {
            self.progress = self.easing.apply(raw_progress);
            true
        }
    }

    /// 强制跳到终态
    pub fn stop(&mut self) {
        if !self.state.is_finished() {
            self.progress = 1.0;
            self.state = TweenState::Stopped;
        }
    }

    /// 当前进度
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// 当前状态
    pub fn state(&self) -> TweenState {
        self.state
    }

    /// 是否已结束
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_update() {
        let mut tween = Tween::new(1.0, Easing::Linear);
        assert_eq!(tween.state(), TweenState::Running);

        assert!(tween.update(0.4));
        assert!((tween.progress() - 0.4).abs() < 1e-6);

        assert!(!tween.update(0.6));
        assert_eq!(tween.state(), TweenState::Completed);
        assert_eq!(tween.progress(), 1.0);

        // 结束后不再变化
        assert!(!tween.update(1.0));
        assert_eq!(tween.progress(), 1.0);
    }

    #[test]
    fn test_tween_stop() {
        let mut tween = Tween::new(1.0, Easing::Swing);
        tween.update(0.1);

        tween.stop();
        assert_eq!(tween.state(), TweenState::Stopped);
        assert_eq!(tween.progress(), 1.0);
    }

    #[test]
    fn test_zero_duration() {
        let tween = Tween::new(0.0, Easing::Swing);
        assert!(tween.is_finished());
        assert_eq!(tween.progress(), 1.0);
    }
}
