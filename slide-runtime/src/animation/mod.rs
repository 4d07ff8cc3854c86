//! # Animation 模块
//!
//! 单个视觉过渡的生命周期：`prepare` → `play` → `finish`。
//!
//! ## 状态机
//!
//! ```text
//!              prepare                play
//! Unprepared ──────────► Ready ──────────────► Played
//!                          ▲                      │
//!                          └──────── prepare ─────┘   （no_reverse 时被拦截）
//! ```
//!
//! `finish` 只取消进行中的过渡，不改变状态标记。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! let mut fade = Animation::fade_in("#title").with_duration(300);
//! fade.prepare(&mut stage); // 隐藏 #title
//! fade.play(&mut stage);    // 淡入
//! ```

mod animation;
mod easing;
mod hooks;
mod kind;

pub use animation::{Animation, AnimationState, DEFAULT_DURATION_MS};
pub use easing::Easing;
pub use hooks::{AnimationHooks, NoopHooks};
pub use kind::{AnimationKind, AnimationOptions, Direction};
