//! # Slide Runtime
//!
//! 演示文稿的分步动画核心库。
//!
//! ## 架构概述
//!
//! `slide-runtime` 是纯逻辑核心，不做任何 IO。
//! 一页幻灯片由若干 **步骤** 组成，宿主层把翻页按键转换为
//! `next_step` / `previous_step` 调用：
//!
//! ```text
//! Host                         StepController              Animation
//!   │                               │                          │
//!   │── next_step / previous_step ─►│── prepare/play/finish ──►│
//!   │                               │                          │── Scene（DOM/SVG）
//!   │◄──── advance/retreat page ────│                          │
//! ```
//!
//! 控制方向是单向的：控制器只调用动画，动画只修改 [`Scene`]。
//!
//! ## 核心类型
//!
//! - [`Animation`]：单个视觉过渡（淡入、移动、替换文本……）的生命周期
//! - [`Step`] / [`StepController`]：步骤序列与游标
//! - [`Scene`]：宿主提供的 DOM/SVG/高亮协作者
//! - [`MemoryStage`]：内存中的参考实现，测试与 headless 宿主使用
//! - [`DeckSpec`]：JSON 编写格式
//!
//! ## 使用示例
//!
//! ```ignore
//! let mut slide = deck.slides[0].instantiate(0, viewport, Timing::default())?;
//! slide.controller.init(&mut slide.stage);
//!
//! let mut pages = PageLog::default();
//! let outcome = slide.next(&mut pages);
//! ```

pub mod animation;
pub mod deck;
pub mod diagnostic;
pub mod error;
pub mod stage;
pub mod step;

// 重导出核心类型
pub use animation::{
    Animation, AnimationHooks, AnimationKind, AnimationOptions, AnimationState, DEFAULT_DURATION_MS,
    Direction, Easing, NoopHooks,
};
pub use deck::{AnimationSpec, DeckSpec, OptionsSpec, Slide, SlideSpec, StepSpec};
pub use diagnostic::{Diagnostic, DiagnosticLevel, DiagnosticResult, analyze_steps};
pub use error::{AnimationError, DeckError, SlideError, SlideResult, StepError};
pub use stage::{
    Completion, ElementId, ElementSpec, Highlighter, MemoryStage, Scene, Size, Stage, StyleTarget,
    SvgAttr, SvgStage, Timing, TweenId, Vec2,
};
pub use step::{
    Boundary, NavDirection, PageLog, PageNavigator, PageRequest, Step, StepController, StepOutcome,
};
