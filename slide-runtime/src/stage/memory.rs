//! # MemoryStage
//!
//! 内存中的 [`Scene`](super::Scene) 实现。
//!
//! 元素用扁平列表保存，选择器支持 `#id`、`.class`、`*` 以及逗号分隔的组合。
//! 所有过渡都登记在时间轴上，由宿主调用 [`MemoryStage::update`] 推进；
//! `stop` 会把过渡直接推到终态并执行完成动作（例如淡出结束后隐藏元素）。

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tween::Tween;
use super::{
    Completion, ElementId, Highlighter, Size, Stage, StyleTarget, SvgAttr, SvgStage, Timing,
    TweenId, Vec2,
};

/// 元素定义（幻灯片文件中的 `elements` 条目）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    /// 元素 ID（`#id` 选择）
    pub id: String,
    /// 类名（`.class` 选择）
    #[serde(default)]
    pub classes: Vec<String>,
    /// 初始内容
    #[serde(default)]
    pub text: String,
    /// 是否是 SVG 元素
    #[serde(default)]
    pub svg: bool,
    /// 是否包含需要语法高亮的代码块
    #[serde(default)]
    pub code: bool,
}

impl ElementSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            classes: Vec::new(),
            text: String::new(),
            svg: false,
            code: false,
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// 标记为 SVG 元素
    pub fn svg(mut self) -> Self {
        self.svg = true;
        self
    }

    /// 标记为代码块
    pub fn code(mut self) -> Self {
        self.code = true;
        self
    }
}

/// 元素的当前视觉状态
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: String,
    pub classes: Vec<String>,
    pub is_svg: bool,
    pub is_code: bool,
    pub visible: bool,
    pub opacity: f32,
    /// 相对于静止位置的偏移
    pub offset: Vec2,
    pub text: String,
    pub svg_opacity: f32,
    pub svg_translate: Vec2,
    /// 收到的重新高亮请求次数
    pub highlight_requests: u32,
}

impl Element {
    fn from_spec(spec: ElementSpec) -> Self {
        Self {
            id: spec.id,
            classes: spec.classes,
            is_svg: spec.svg,
            is_code: spec.code,
            visible: true,
            opacity: 1.0,
            offset: Vec2::zero(),
            text: spec.text,
            svg_opacity: 1.0,
            svg_translate: Vec2::zero(),
            highlight_requests: 0,
        }
    }

    /// 单个简单选择器是否匹配
    fn matches(&self, selector: &str) -> bool {
        if selector == "*" {
            true
        } else if let Some(id) = selector.strip_prefix('#') {
            self.id == id
        } else if let Some(class) = selector.strip_prefix('.') {
            self.classes.iter().any(|c| c == class)
        } else {
            false
        }
    }
}

/// 被动画的属性及其起止值
#[derive(Debug, Clone, Copy)]
enum Channel {
    Opacity { from: f32, to: f32 },
    Offset { from: Vec2, to: Vec2 },
    SvgOpacity { from: f32, to: f32 },
    SvgTranslate { from: Vec2, to: Vec2 },
}

impl Channel {
    fn is_svg(&self) -> bool {
        matches!(self, Self::SvgOpacity { .. } | Self::SvgTranslate { .. })
    }

    /// 是否作用于同一属性
    fn same_property(&self, other: &Channel) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    fn apply(&self, element: &mut Element, t: f32) {
        match *self {
            Self::Opacity { from, to } => element.opacity = from + (to - from) * t,
            Self::Offset { from, to } => element.offset = from.lerp(to, t),
            Self::SvgOpacity { from, to } => element.svg_opacity = from + (to - from) * t,
            Self::SvgTranslate { from, to } => element.svg_translate = from.lerp(to, t),
        }
    }
}

/// 正在进行的过渡
#[derive(Debug)]
struct ActiveTween {
    id: TweenId,
    element: ElementId,
    channel: Channel,
    tween: Tween,
    then: Option<Completion>,
}

/// 过渡事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenEvent {
    /// 过渡结束（自然结束或被强制结束）
    Completed { tween: TweenId, element: ElementId },
}

/// 内存中的场景
#[derive(Debug)]
pub struct MemoryStage {
    viewport: Size,
    elements: Vec<Element>,
    tweens: Vec<ActiveTween>,
    next_tween_id: u64,
}

impl MemoryStage {
    /// 创建空场景
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            elements: Vec::new(),
            tweens: Vec::new(),
            next_tween_id: 1,
        }
    }

    /// 从元素定义创建场景
    pub fn with_elements(viewport: Size, specs: impl IntoIterator<Item = ElementSpec>) -> Self {
        let mut stage = Self::new(viewport);
        for spec in specs {
            stage.add(spec);
        }
        stage
    }

    /// 添加元素
    pub fn add(&mut self, spec: ElementSpec) -> ElementId {
        self.elements.push(Element::from_spec(spec));
        ElementId(self.elements.len() - 1)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    /// 第一个匹配选择器的元素
    pub fn find(&self, selector: &str) -> Option<&Element> {
        self.select(selector)
            .first()
            .and_then(|&id| self.element(id))
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// 是否还有进行中的过渡
    pub fn has_active_tweens(&self) -> bool {
        !self.tweens.is_empty()
    }

    pub fn active_tween_count(&self) -> usize {
        self.tweens.len()
    }

    /// 推进所有过渡
    ///
    /// # 返回
    /// 本次结束的过渡
    pub fn update(&mut self, dt: f32) -> Vec<TweenEvent> {
        for active in &mut self.tweens {
            active.tween.update(dt);
            if let Some(element) = self.elements.get_mut(active.element.0) {
                active.channel.apply(element, active.tween.progress());
            }
        }

        let (finished, running): (Vec<_>, Vec<_>) = std::mem::take(&mut self.tweens)
            .into_iter()
            .partition(|active| active.tween.is_finished());
        self.tweens = running;

        finished
            .into_iter()
            .map(|active| self.complete(active))
            .collect()
    }

    /// 把所有过渡推到终态
    pub fn settle(&mut self) -> Vec<TweenEvent> {
        let pending = std::mem::take(&mut self.tweens);
        pending
            .into_iter()
            .map(|mut active| {
                active.tween.stop();
                self.complete(active)
            })
            .collect()
    }

    fn select_where(&self, selector: &str, svg_only: bool) -> Vec<ElementId> {
        let parts: Vec<&str> = selector
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        self.elements
            .iter()
            .enumerate()
            .filter(|(_, element)| !svg_only || element.is_svg)
            .filter(|(_, element)| parts.iter().any(|part| element.matches(part)))
            .map(|(index, _)| ElementId(index))
            .collect()
    }

    fn next_id(&mut self) -> TweenId {
        let id = TweenId(self.next_tween_id);
        self.next_tween_id += 1;
        id
    }

    /// 登记过渡；同一元素同一属性上的旧过渡被取消
    fn start(
        &mut self,
        element: ElementId,
        channel: Channel,
        timing: Timing,
        then: Option<Completion>,
    ) -> TweenId {
        self.tweens
            .retain(|active| !(active.element == element && active.channel.same_property(&channel)));

        let id = self.next_id();
        let active = ActiveTween {
            id,
            element,
            channel,
            tween: Tween::new(timing.seconds(), timing.easing),
            then,
        };

        if active.tween.is_finished() {
            self.complete(active);
        } else {
            self.tweens.push(active);
        }
        id
    }

    /// 应用终值并执行完成动作
    fn complete(&mut self, active: ActiveTween) -> TweenEvent {
        if let Some(element) = self.elements.get_mut(active.element.0) {
            active.channel.apply(element, 1.0);
            match active.then {
                Some(Completion::Hide) => element.visible = false,
                None => {}
            }
        }
        TweenEvent::Completed {
            tween: active.id,
            element: active.element,
        }
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        let element = self.elements.get_mut(id.0);
        if element.is_none() {
            debug!(element = id.0, "元素句柄无效");
        }
        element
    }
}

impl Stage for MemoryStage {
    fn select(&self, selector: &str) -> Vec<ElementId> {
        self.select_where(selector, false)
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn set_visible(&mut self, element: ElementId, visible: bool) {
        if let Some(el) = self.element_mut(element) {
            el.visible = visible;
        }
    }

    fn set_opacity(&mut self, element: ElementId, opacity: f32) {
        if let Some(el) = self.element_mut(element) {
            el.opacity = opacity;
        }
    }

    fn set_offset(&mut self, element: ElementId, offset: Vec2) {
        if let Some(el) = self.element_mut(element) {
            el.offset = offset;
        }
    }

    fn text(&self, element: ElementId) -> Option<String> {
        self.element(element).map(|el| el.text.clone())
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(el) = self.element_mut(element) {
            el.text = text.to_string();
        }
    }

    fn animate(
        &mut self,
        element: ElementId,
        target: StyleTarget,
        timing: Timing,
        then: Option<Completion>,
    ) {
        let Some(el) = self.element(element) else {
            return;
        };
        let channel = match target {
            StyleTarget::Opacity(to) => Channel::Opacity {
                from: el.opacity,
                to,
            },
            StyleTarget::Offset(to) => Channel::Offset {
                from: el.offset,
                to,
            },
        };
        self.start(element, channel, timing, then);
    }

    fn stop(&mut self, element: ElementId) {
        let (stopped, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.tweens)
            .into_iter()
            .partition(|active| active.element == element && !active.channel.is_svg());
        self.tweens = kept;

        for mut active in stopped {
            active.tween.stop();
            self.complete(active);
        }
    }
}

impl SvgStage for MemoryStage {
    fn select_svg(&self, selector: &str) -> Vec<ElementId> {
        self.select_where(selector, true)
    }

    fn set_svg_attr(&mut self, element: ElementId, attr: SvgAttr) {
        if let Some(el) = self.element_mut(element) {
            match attr {
                SvgAttr::Opacity(opacity) => el.svg_opacity = opacity,
                SvgAttr::Translate(translate) => el.svg_translate = translate,
            }
        }
    }

    fn animate_svg(&mut self, element: ElementId, target: SvgAttr, timing: Timing) -> TweenId {
        let Some(el) = self.element(element) else {
            return self.next_id();
        };
        let channel = match target {
            SvgAttr::Opacity(to) => Channel::SvgOpacity {
                from: el.svg_opacity,
                to,
            },
            SvgAttr::Translate(to) => Channel::SvgTranslate {
                from: el.svg_translate,
                to,
            },
        };
        self.start(element, channel, timing, None)
    }

    fn svg_in_flight(&self, element: ElementId) -> Vec<TweenId> {
        self.tweens
            .iter()
            .filter(|active| active.element == element && active.channel.is_svg())
            .map(|active| active.id)
            .collect()
    }

    fn stop_svg(&mut self, element: ElementId, tween: TweenId) {
        let Some(position) = self
            .tweens
            .iter()
            .position(|active| active.id == tween && active.element == element)
        else {
            return;
        };

        let mut active = self.tweens.remove(position);
        active.tween.stop();
        self.complete(active);
    }
}

impl Highlighter for MemoryStage {
    fn rehighlight(&mut self, element: ElementId) {
        if let Some(el) = self.element_mut(element) {
            if el.is_code {
                el.highlight_requests += 1;
            }
        }
    }
}
