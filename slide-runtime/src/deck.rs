//! # Deck 模块
//!
//! 幻灯片文件（JSON）的编写格式，以及把它转换为运行时步骤的逻辑。
//!
//! ## 格式
//!
//! ```json
//! {
//!   "title": "示例",
//!   "slides": [{
//!     "elements": [{ "id": "title", "text": "Hello" }],
//!     "steps": [
//!       { "type": "prevPage" },
//!       { "type": "animation", "kind": "fadeIn", "target": "#title", "duration": 300 },
//!       { "type": "nextPage" }
//!     ]
//!   }]
//! }
//! ```
//!
//! 未知的步骤类型和动画类型不会导致加载失败，而是在导航时报告；
//! 未知的缓动函数名是加载错误。

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::animation::{Animation, AnimationKind, AnimationOptions, Direction, Easing};
use crate::error::{DeckError, SlideResult};
use crate::stage::{ElementSpec, MemoryStage, Size, Timing};
use crate::step::{PageNavigator, Step, StepController, StepOutcome};

/// 幻灯片文件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckSpec {
    /// 标题
    #[serde(default)]
    pub title: String,
    /// 页面列表
    pub slides: Vec<SlideSpec>,
}

impl DeckSpec {
    /// 从 JSON 文本解析
    pub fn from_json(source: &str) -> Result<Self, DeckError> {
        let deck: DeckSpec =
            serde_json::from_str(source).map_err(|e| DeckError::Parse(e.to_string()))?;
        if deck.slides.is_empty() {
            return Err(DeckError::NoSlides);
        }
        debug!(title = %deck.title, slides = deck.slides.len(), "幻灯片文件解析完成");
        Ok(deck)
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slide(&self, index: usize) -> Option<&SlideSpec> {
        self.slides.get(index)
    }
}

/// 单页定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideSpec {
    /// 页面上的元素
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
    /// 步骤列表
    pub steps: Vec<StepSpec>,
}

impl SlideSpec {
    /// 按元素定义构建新的场景
    pub fn build_stage(&self, viewport: Size) -> MemoryStage {
        MemoryStage::with_elements(viewport, self.elements.iter().cloned())
    }

    /// 构建步骤列表
    ///
    /// # 参数
    /// - `slide`: 页面序号（用于错误定位）
    /// - `defaults`: 未指定时长/缓动时使用的默认值
    pub fn build_steps(&self, slide: usize, defaults: Timing) -> Result<Vec<Step>, DeckError> {
        self.steps
            .iter()
            .enumerate()
            .map(|(index, step)| step.build(slide, index, defaults))
            .collect()
    }

    /// 实例化为可导航的页面（新的场景 + 未初始化的控制器）
    pub fn instantiate(&self, slide: usize, viewport: Size, defaults: Timing) -> SlideResult<Slide> {
        let steps = self.build_steps(slide, defaults)?;
        let controller = StepController::new(steps)?;
        Ok(Slide {
            stage: self.build_stage(viewport),
            controller,
        })
    }
}

/// 步骤定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSpec {
    /// 步骤类型：`prevPage` / `nextPage` / `animation`
    #[serde(rename = "type")]
    pub step_type: String,
    /// 动画类型（仅 `animation`）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub target: String,
    /// 时长（毫秒）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<String>,
    #[serde(default)]
    pub options: OptionsSpec,
}

impl StepSpec {
    fn build(&self, slide: usize, index: usize, defaults: Timing) -> Result<Step, DeckError> {
        match self.step_type.as_str() {
            "prevPage" => Ok(Step::PreviousPage),
            "nextPage" => Ok(Step::NextPage),
            "animation" => {
                let kind = self.kind.as_deref().ok_or(DeckError::MissingField {
                    slide,
                    step: index,
                    field: "kind",
                })?;
                let animation = build_animation(
                    kind,
                    &self.target,
                    self.duration,
                    self.easing.as_deref(),
                    &self.options,
                    defaults,
                )?;
                Ok(Step::animation(animation))
            }
            other => Ok(Step::Unsupported(other.to_string())),
        }
    }
}

/// 组合动画中的子动画定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationSpec {
    pub kind: String,
    #[serde(default)]
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<String>,
    #[serde(default)]
    pub options: OptionsSpec,
}

impl AnimationSpec {
    fn build(&self, defaults: Timing) -> Result<Animation, DeckError> {
        build_animation(
            &self.kind,
            &self.target,
            self.duration,
            self.easing.as_deref(),
            &self.options,
            defaults,
        )
    }
}

/// 动画参数定义
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Direction>,
    #[serde(alias = "fromX")]
    pub from_x: f32,
    #[serde(alias = "fromY")]
    pub from_y: f32,
    #[serde(alias = "toX")]
    pub to_x: f32,
    #[serde(alias = "toY")]
    pub to_y: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(alias = "lateprepare", alias = "latePrepare")]
    pub late_prepare: bool,
    #[serde(alias = "noreverse", alias = "noReverse")]
    pub no_reverse: bool,
    /// `set` 的子动画
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub animations: Vec<AnimationSpec>,
}

impl OptionsSpec {
    fn build(&self, defaults: Timing) -> Result<AnimationOptions, DeckError> {
        let animations = self
            .animations
            .iter()
            .map(|child| child.build(defaults))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AnimationOptions {
            from: self.from,
            to: self.to,
            from_x: self.from_x,
            from_y: self.from_y,
            to_x: self.to_x,
            to_y: self.to_y,
            text: self.text.clone(),
            late_prepare: self.late_prepare,
            no_reverse: self.no_reverse,
            animations,
        })
    }
}

fn build_animation(
    kind: &str,
    target: &str,
    duration: Option<u32>,
    easing: Option<&str>,
    options: &OptionsSpec,
    defaults: Timing,
) -> Result<Animation, DeckError> {
    let easing = match easing {
        Some(name) => name.parse::<Easing>()?,
        None => defaults.easing,
    };
    let timing = Timing::new(duration.unwrap_or(defaults.duration_ms), easing);

    Ok(Animation::new(AnimationKind::from_name(kind), target)
        .with_timing(timing)
        .with_options(options.build(defaults)?))
}

/// 已实例化的页面
#[derive(Debug)]
pub struct Slide {
    pub stage: MemoryStage,
    pub controller: StepController,
}

impl Slide {
    /// 初始化控制器（准备所有动画）
    pub fn init(&mut self) {
        self.controller.init(&mut self.stage);
    }

    /// 前进一步
    pub fn next(&mut self, pages: &mut dyn PageNavigator) -> StepOutcome {
        self.controller.next_step(&mut self.stage, pages)
    }

    /// 后退一步
    pub fn previous(&mut self, pages: &mut dyn PageNavigator) -> StepOutcome {
        self.controller.previous_step(&mut self.stage, pages)
    }
}
