//! # Controller 模块
//!
//! 步骤控制器：持有不可变的步骤列表与游标，把前进/后退翻译为
//! 动画生命周期调用或翻页请求。
//!
//! ## 导航模型
//!
//! ```text
//! next_step:     finish(当前) → 游标 +1（截断到末尾）→ 执行新的当前步骤
//! previous_step: 反向执行当前步骤 → 游标 -1（截断到 0）
//! ```
//!
//! 前进作用于递增后的步骤，后退作用于递减前的步骤，
//! 这样翻页边界始终停留在 0 和 `len - 1`。

use tracing::{debug, error, warn};

use super::navigator::PageNavigator;
use super::step::{Boundary, NavDirection, Step};
use crate::error::StepError;
use crate::stage::Scene;

/// 单次导航的结果
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// 播放了动画步骤
    Played { index: usize },
    /// 重新准备了动画步骤（后退）
    Prepared { index: usize },
    /// 请求了下一页
    AdvancedPage,
    /// 请求了上一页
    RetreatedPage,
    /// 步骤被拒绝执行（已记录日志）
    Rejected(StepError),
}

/// 步骤控制器
///
/// 不变量：`0 <= current < steps.len()`。
#[derive(Debug)]
pub struct StepController {
    /// 步骤列表
    steps: Vec<Step>,
    /// 当前游标
    current: usize,
    /// 是否已执行过 `init`
    initialized: bool,
}

impl StepController {
    /// 创建控制器
    ///
    /// 步骤列表不能为空。
    pub fn new(steps: Vec<Step>) -> Result<Self, StepError> {
        if steps.is_empty() {
            return Err(StepError::EmptySequence);
        }

        if !matches!(steps.first(), Some(Step::PreviousPage)) {
            warn!(first = %steps[0].kind_name(), "步骤序列的第 0 步不是上一页边界");
        }
        if !matches!(steps.last(), Some(Step::NextPage)) {
            warn!(
                last = %steps[steps.len() - 1].kind_name(),
                "步骤序列的最后一步不是下一页边界"
            );
        }

        Ok(Self {
            steps,
            current: 0,
            initialized: false,
        })
    }

    /// 准备所有动画步骤
    ///
    /// 必须在任何导航之前调用一次；边界步骤不受影响。
    pub fn init(&mut self, scene: &mut dyn Scene) {
        let mut prepared = 0;
        for step in &mut self.steps {
            if let Step::Animate(animation) = step {
                animation.prepare(scene);
                prepared += 1;
            }
        }
        self.initialized = true;
        debug!(steps = self.steps.len(), prepared, "步骤控制器初始化完成");
    }

    /// 前进一步
    pub fn next_step(
        &mut self,
        scene: &mut dyn Scene,
        pages: &mut dyn PageNavigator,
    ) -> StepOutcome {
        self.ensure_initialized(scene);

        if let Step::Animate(animation) = &mut self.steps[self.current] {
            animation.finish(scene);
        }

        self.current = (self.current + 1).min(self.last_index());
        let index = self.current;

        let outcome = match &mut self.steps[index] {
            Step::PreviousPage => StepOutcome::Rejected(StepError::UnreachableBoundary {
                index,
                boundary: Boundary::PreviousPage,
                direction: NavDirection::Forward,
            }),
            Step::NextPage => {
                pages.advance_page();
                StepOutcome::AdvancedPage
            }
            Step::Animate(animation) => {
                animation.play(scene);
                StepOutcome::Played { index }
            }
            Step::Unsupported(kind) => StepOutcome::Rejected(StepError::UnsupportedStep {
                index,
                kind: kind.clone(),
            }),
        };

        debug!(index, outcome = ?outcome, "前进");
        Self::report(outcome)
    }

    /// 后退一步
    pub fn previous_step(
        &mut self,
        scene: &mut dyn Scene,
        pages: &mut dyn PageNavigator,
    ) -> StepOutcome {
        self.ensure_initialized(scene);

        let index = self.current;
        let outcome = match &mut self.steps[index] {
            Step::PreviousPage => {
                pages.retreat_page();
                StepOutcome::RetreatedPage
            }
            Step::NextPage => StepOutcome::Rejected(StepError::UnreachableBoundary {
                index,
                boundary: Boundary::NextPage,
                direction: NavDirection::Backward,
            }),
            Step::Animate(animation) => {
                animation.prepare(scene);
                StepOutcome::Prepared { index }
            }
            Step::Unsupported(kind) => StepOutcome::Rejected(StepError::UnsupportedStep {
                index,
                kind: kind.clone(),
            }),
        };

        self.current = self.current.saturating_sub(1);
        debug!(index, outcome = ?outcome, "后退");
        Self::report(outcome)
    }

    /// 当前游标
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// 当前步骤
    pub fn current(&self) -> &Step {
        &self.steps[self.current]
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// 始终为 `false`（构造时已拒绝空序列）
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    fn ensure_initialized(&mut self, scene: &mut dyn Scene) {
        if !self.initialized {
            warn!("导航前未调用 init，立即初始化");
            self.init(scene);
        }
    }

    fn report(outcome: StepOutcome) -> StepOutcome {
        if let StepOutcome::Rejected(e) = &outcome {
            error!(error = %e, "步骤被拒绝执行");
        }
        outcome
    }
}
