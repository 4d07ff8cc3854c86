//! # Easing 模块
//!
//! 缓动函数库，名称沿用网页动画的惯例（`swing`、`linear`、`easeInQuad`……）。

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::DeckError;

/// 缓动函数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// 摆动（默认，余弦缓入缓出）
    #[default]
    Swing,
    /// 线性（匀速）
    Linear,
    /// 二次缓入
    EaseInQuad,
    /// 二次缓出
    EaseOutQuad,
    /// 二次缓入缓出
    EaseInOutQuad,
    /// 三次缓入
    EaseInCubic,
    /// 三次缓出
    EaseOutCubic,
    /// 三次缓入缓出
    EaseInOutCubic,
    /// 正弦缓入
    EaseInSine,
    /// 正弦缓出
    EaseOutSine,
    /// 正弦缓入缓出
    EaseInOutSine,
}

impl Easing {
    /// 所有已知缓动函数（名称与变体对应）
    const NAMED: [(&'static str, Easing); 11] = [
        ("swing", Easing::Swing),
        ("linear", Easing::Linear),
        ("easeInQuad", Easing::EaseInQuad),
        ("easeOutQuad", Easing::EaseOutQuad),
        ("easeInOutQuad", Easing::EaseInOutQuad),
        ("easeInCubic", Easing::EaseInCubic),
        ("easeOutCubic", Easing::EaseOutCubic),
        ("easeInOutCubic", Easing::EaseInOutCubic),
        ("easeInSine", Easing::EaseInSine),
        ("easeOutSine", Easing::EaseOutSine),
        ("easeInOutSine", Easing::EaseInOutSine),
    ];

    /// 计算缓动值
    ///
    /// # 参数
    /// - `t`: 时间进度 (0.0 - 1.0)，超出范围会被截断
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Easing::Swing => 0.5 - (t * PI).cos() / 2.0,
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInSine => 1.0 - (t * PI / 2.0).cos(),
            Easing::EaseOutSine => (t * PI / 2.0).sin(),
            Easing::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
        }
    }

    /// 缓动函数标识符
    pub fn name(&self) -> &'static str {
        Self::NAMED
            .iter()
            .find(|(_, easing)| easing == self)
            .map(|(name, _)| *name)
            .unwrap_or("swing")
    }
}

impl FromStr for Easing {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::NAMED
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, easing)| *easing)
            .ok_or_else(|| DeckError::UnknownEasing {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        let easing = Easing::Linear;
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(0.5), 0.5);
        assert_eq!(easing.apply(1.0), 1.0);
    }

    #[test]
    fn test_swing_endpoints() {
        let easing = Easing::Swing;
        assert!(easing.apply(0.0).abs() < 1e-6);
        assert!((easing.apply(1.0) - 1.0).abs() < 1e-6);
        assert!((easing.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_clamp() {
        let easing = Easing::Linear;
        assert_eq!(easing.apply(-0.5), 0.0);
        assert_eq!(easing.apply(1.5), 1.0);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("swing".parse::<Easing>(), Ok(Easing::Swing));
        assert_eq!("easeInOutCubic".parse::<Easing>(), Ok(Easing::EaseInOutCubic));
        assert_eq!(Easing::EaseOutSine.to_string(), "easeOutSine");

        let err = "bounce".parse::<Easing>().unwrap_err();
        assert_eq!(
            err,
            DeckError::UnknownEasing {
                name: "bounce".to_string()
            }
        );
    }
}
