//! # Session 模块
//!
//! 放映会话：持有幻灯片文件和当前页面，执行宿主命令。
//!
//! 控制器在边界步骤上只记录翻页请求（[`PageLog`]），
//! 会话在命令返回后再真正切换页面：目标页面按定义重新构建并初始化，
//! 相当于一次页面加载。

use std::fmt::Write as _;

use tracing::{debug, error, info};

use slide_runtime::{
    DeckError, DeckSpec, PageLog, PageRequest, Size, Slide, SlideResult, StepOutcome, Timing,
};

use crate::command::HostCommand;

/// 命令执行结果
#[derive(Debug, Clone, PartialEq)]
pub enum ExecuteResult {
    /// 导航结果
    Step(StepOutcome),
    /// 时钟推进，返回本次结束的过渡数量
    Ticked { completed: usize },
    /// 页面状态文本
    Dump(String),
    /// 退出
    Quit,
}

/// 放映会话
#[derive(Debug)]
pub struct Session {
    deck: DeckSpec,
    viewport: Size,
    defaults: Timing,
    /// 每条导航命令后是否把过渡推到终态
    settle_after_step: bool,
    /// 当前页序号
    index: usize,
    slide: Slide,
    pages: PageLog,
}

impl Session {
    /// 创建会话并加载第 0 页
    pub fn new(
        deck: DeckSpec,
        viewport: Size,
        defaults: Timing,
        settle_after_step: bool,
    ) -> SlideResult<Self> {
        let slide = load_slide(&deck, 0, viewport, defaults)?;
        info!(title = %deck.title, slides = deck.slide_count(), "放映开始");

        Ok(Self {
            deck,
            viewport,
            defaults,
            settle_after_step,
            index: 0,
            slide,
            pages: PageLog::default(),
        })
    }

    /// 执行命令
    pub fn execute(&mut self, command: HostCommand) -> ExecuteResult {
        match command {
            HostCommand::Next => {
                let outcome = self.slide.next(&mut self.pages);
                self.after_step();
                ExecuteResult::Step(outcome)
            }
            HostCommand::Previous => {
                let outcome = self.slide.previous(&mut self.pages);
                self.after_step();
                ExecuteResult::Step(outcome)
            }
            HostCommand::Tick(ms) => {
                let completed = self.slide.stage.update(ms as f32 / 1000.0).len();
                ExecuteResult::Ticked { completed }
            }
            HostCommand::Settle => {
                let completed = self.slide.stage.settle().len();
                ExecuteResult::Ticked { completed }
            }
            HostCommand::Dump => ExecuteResult::Dump(self.dump()),
            HostCommand::Quit => ExecuteResult::Quit,
        }
    }

    /// 当前页序号
    pub fn slide_index(&self) -> usize {
        self.index
    }

    pub fn slide(&self) -> &Slide {
        &self.slide
    }

    /// 当前页面状态
    pub fn dump(&self) -> String {
        let controller = &self.slide.controller;
        let mut out = format!(
            "slide {}/{} step {}/{} ({})\n",
            self.index + 1,
            self.deck.slide_count(),
            controller.current_index(),
            controller.len() - 1,
            controller.current().kind_name(),
        );

        for element in self.slide.stage.elements() {
            let _ = write!(
                out,
                "  #{} visible={} opacity={:.2} offset=({:.1}, {:.1})",
                element.id,
                element.visible,
                element.opacity,
                element.offset.x,
                element.offset.y,
            );
            if element.is_svg {
                let _ = write!(
                    out,
                    " svg_opacity={:.2} svg_translate=({:.1}, {:.1})",
                    element.svg_opacity, element.svg_translate.x, element.svg_translate.y,
                );
            }
            if !element.text.is_empty() {
                let _ = write!(out, " text={:?}", element.text);
            }
            out.push('\n');
        }

        let tweens = self.slide.stage.active_tween_count();
        if tweens > 0 {
            let _ = writeln!(out, "  ({} 个过渡进行中)", tweens);
        }
        out
    }

    fn after_step(&mut self) {
        if self.settle_after_step {
            self.slide.stage.settle();
        }
        for request in self.pages.take() {
            self.turn_page(request);
        }
    }

    /// 切换页面（在第一页/最后一页时保持不动）
    fn turn_page(&mut self, request: PageRequest) {
        let target = match request {
            PageRequest::Next => (self.index + 1).min(self.deck.slide_count() - 1),
            PageRequest::Previous => self.index.saturating_sub(1),
        };

        if target == self.index {
            info!(index = self.index, request = ?request, "已到达幻灯片边缘");
            return;
        }

        match load_slide(&self.deck, target, self.viewport, self.defaults) {
            Ok(slide) => {
                info!(from = self.index, to = target, "切换页面");
                self.index = target;
                self.slide = slide;
            }
            Err(e) => {
                error!(error = %e, index = target, "页面加载失败，保持当前页面");
            }
        }
    }
}

fn load_slide(deck: &DeckSpec, index: usize, viewport: Size, defaults: Timing) -> SlideResult<Slide> {
    let spec = deck.slide(index).ok_or(DeckError::NoSlides)?;
    let mut slide = spec.instantiate(index, viewport, defaults)?;
    slide.init();
    debug!(index, steps = slide.controller.len(), "页面已加载");
    Ok(slide)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECK: &str = r##"{
        "title": "test",
        "slides": [
            { "elements": [{ "id": "a", "text": "one" }],
              "steps": [
                { "type": "prevPage" },
                { "type": "animation", "kind": "fadeIn", "target": "#a" },
                { "type": "nextPage" }
              ] },
            { "elements": [{ "id": "b" }],
              "steps": [{ "type": "prevPage" }, { "type": "nextPage" }] }
        ]
    }"##;

    fn session(settle: bool) -> Session {
        let deck = DeckSpec::from_json(DECK).unwrap();
        Session::new(deck, Size::new(640.0, 480.0), Timing::default(), settle).unwrap()
    }

    #[test]
    fn test_next_plays_and_tick_advances() {
        let mut session = session(false);
        assert_eq!(
            session.execute(HostCommand::Next),
            ExecuteResult::Step(StepOutcome::Played { index: 1 })
        );
        assert_eq!(session.slide().stage.find("#a").unwrap().opacity, 0.0);

        assert_eq!(
            session.execute(HostCommand::Tick(600)),
            ExecuteResult::Ticked { completed: 1 }
        );
        assert_eq!(session.slide().stage.find("#a").unwrap().opacity, 1.0);
    }

    #[test]
    fn test_settle_after_step() {
        let mut session = session(true);
        session.execute(HostCommand::Next);
        assert!(!session.slide().stage.has_active_tweens());
        assert_eq!(session.slide().stage.find("#a").unwrap().opacity, 1.0);
    }

    #[test]
    fn test_page_switching() {
        let mut session = session(false);
        session.execute(HostCommand::Next);
        assert_eq!(
            session.execute(HostCommand::Next),
            ExecuteResult::Step(StepOutcome::AdvancedPage)
        );
        assert_eq!(session.slide_index(), 1);
        assert_eq!(session.slide().controller.current_index(), 0);

        // 最后一页：保持不动
        session.execute(HostCommand::Next);
        assert_eq!(session.slide_index(), 1);

        // 返回第 0 页：重新加载，#a 再次被隐藏
        session.execute(HostCommand::Previous);
        session.execute(HostCommand::Previous);
        assert_eq!(session.slide_index(), 0);
        assert!(!session.slide().stage.find("#a").unwrap().visible);

        // 第一页：保持不动
        assert_eq!(
            session.execute(HostCommand::Previous),
            ExecuteResult::Step(StepOutcome::RetreatedPage)
        );
        assert_eq!(session.slide_index(), 0);
    }

    #[test]
    fn test_dump() {
        let mut session = session(false);
        let ExecuteResult::Dump(text) = session.execute(HostCommand::Dump) else {
            panic!("应返回页面状态");
        };
        assert!(text.starts_with("slide 1/2 step 0/2 (prevPage)"));
        assert!(text.contains("#a visible=false"));
        assert!(text.contains("text=\"one\""));
    }

    #[test]
    fn test_broken_slide_keeps_current() {
        let deck = DeckSpec::from_json(
            r#"{ "slides": [
                { "steps": [{ "type": "prevPage" }, { "type": "nextPage" }] },
                { "steps": [] }
            ] }"#,
        )
        .unwrap();
        let mut session = Session::new(deck, Size::new(640.0, 480.0), Timing::default(), false).unwrap();

        session.execute(HostCommand::Next);
        assert_eq!(session.slide_index(), 0);
    }
}
