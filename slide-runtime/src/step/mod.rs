//! # Step 模块
//!
//! 步骤序列与导航。
//!
//! ## 模块结构
//!
//! - [`step`]：步骤定义（上一页边界、下一页边界、动画步骤）
//! - [`navigator`]：宿主提供的翻页接口
//! - [`controller`]：游标与前进/后退逻辑

pub mod controller;
pub mod navigator;
pub mod step;

pub use controller::{StepController, StepOutcome};
pub use navigator::{PageLog, PageNavigator, PageRequest};
pub use step::{Boundary, NavDirection, Step};
