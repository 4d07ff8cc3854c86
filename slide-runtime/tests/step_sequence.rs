//! # 步骤导航集成测试
//!
//! 测试 DeckSpec → StepController → Animation → MemoryStage 的执行链路。
//! 这些测试不依赖真实的 DOM。

use slide_runtime::{
    Animation, DeckSpec, Direction, ElementSpec, MemoryStage, PageLog, PageRequest, Size, Step,
    StepController, StepOutcome, Timing, Vec2,
};

fn viewport() -> Size {
    Size::new(1280.0, 720.0)
}

/// 创建测试场景：#a 普通元素，#b 代码块
fn test_stage() -> MemoryStage {
    MemoryStage::with_elements(
        viewport(),
        [
            ElementSpec::new("a").with_text("alpha"),
            ElementSpec::new("b").with_text("original").code(),
            ElementSpec::new("chart").svg(),
        ],
    )
}

fn scenario_steps() -> Vec<Step> {
    vec![
        Step::PreviousPage,
        Step::animation(Animation::fade_in("#a")),
        Step::animation(Animation::change_text("#b", "hi")),
        Step::NextPage,
    ]
}

/// 完整的前进/后退流程
#[test]
fn test_scenario_forward_and_back() {
    let mut stage = test_stage();
    let mut pages = PageLog::default();
    let mut controller = StepController::new(scenario_steps()).unwrap();

    // 1. 初始化：隐藏 #a，捕获 #b 的原始内容
    controller.init(&mut stage);
    assert!(!stage.find("#a").unwrap().visible);
    assert_eq!(stage.find("#b").unwrap().text, "original");
    assert_eq!(controller.current_index(), 0);

    let mut outcomes = Vec::new();

    // 2. 前进：淡入 #a
    outcomes.push(controller.next_step(&mut stage, &mut pages));
    let a = stage.find("#a").unwrap();
    assert!(a.visible);
    assert_eq!(a.opacity, 0.0);
    stage.update(0.25);
    assert!(stage.find("#a").unwrap().opacity > 0.0);

    // 3. 前进：替换 #b 的内容
    outcomes.push(controller.next_step(&mut stage, &mut pages));
    assert_eq!(stage.find("#a").unwrap().opacity, 1.0);
    let b = stage.find("#b").unwrap();
    assert_eq!(b.text, "hi");
    assert_eq!(b.highlight_requests, 1);

    // 4. 前进：进入下一页
    outcomes.push(controller.next_step(&mut stage, &mut pages));
    assert_eq!(controller.current_index(), 3);
    assert_eq!(pages.take(), vec![PageRequest::Next]);

    // 5. 后退：在下一页边界上被拒绝，游标仍然递减
    outcomes.push(controller.previous_step(&mut stage, &mut pages));
    assert_eq!(controller.current_index(), 2);
    assert!(pages.requests().is_empty());

    // 6. 后退：还原 #b
    outcomes.push(controller.previous_step(&mut stage, &mut pages));
    assert_eq!(stage.find("#b").unwrap().text, "original");

    // 7. 后退：重新隐藏 #a
    outcomes.push(controller.previous_step(&mut stage, &mut pages));
    assert!(!stage.find("#a").unwrap().visible);
    assert_eq!(controller.current_index(), 0);

    // 8. 后退：返回上一页
    outcomes.push(controller.previous_step(&mut stage, &mut pages));
    assert_eq!(pages.take(), vec![PageRequest::Previous]);

    insta::assert_debug_snapshot!(outcomes, @r"
    [
        Played {
            index: 1,
        },
        Played {
            index: 2,
        },
        AdvancedPage,
        Rejected(
            UnreachableBoundary {
                index: 3,
                boundary: NextPage,
                direction: Backward,
            },
        ),
        Prepared {
            index: 2,
        },
        Prepared {
            index: 1,
        },
        RetreatedPage,
    ]
    ");
}

/// 任意次数的导航后游标都在范围内
#[test]
fn test_cursor_bounds() {
    let patterns: [&[bool]; 4] = [
        &[true; 10],
        &[false; 10],
        &[true, true, false, true, false, false, false, true, true, true, true],
        &[false, true, false, true, true, false, true, true, true, false, false],
    ];

    for pattern in patterns {
        let mut stage = test_stage();
        let mut pages = PageLog::default();
        let mut controller = StepController::new(scenario_steps()).unwrap();
        controller.init(&mut stage);

        for &forward in pattern {
            if forward {
                controller.next_step(&mut stage, &mut pages);
            } else {
                controller.previous_step(&mut stage, &mut pages);
            }
            assert!(controller.current_index() < controller.len());
        }
    }
}

/// 在最后一步反复前进：重复执行最后一步，游标不再移动
#[test]
fn test_idempotent_at_end() {
    let mut stage = test_stage();
    let mut pages = PageLog::default();
    let mut controller = StepController::new(scenario_steps()).unwrap();
    controller.init(&mut stage);

    for _ in 0..3 {
        controller.next_step(&mut stage, &mut pages);
    }
    pages.take();

    for _ in 0..4 {
        assert_eq!(
            controller.next_step(&mut stage, &mut pages),
            StepOutcome::AdvancedPage
        );
        assert_eq!(controller.current_index(), 3);
    }
    assert_eq!(pages.requests(), &[PageRequest::Next; 4]);
}

/// 在第 0 步反复后退：重复执行上一页，游标不低于 0
#[test]
fn test_idempotent_at_start() {
    let mut stage = test_stage();
    let mut pages = PageLog::default();
    let mut controller = StepController::new(scenario_steps()).unwrap();
    controller.init(&mut stage);

    for _ in 0..4 {
        assert_eq!(
            controller.previous_step(&mut stage, &mut pages),
            StepOutcome::RetreatedPage
        );
        assert_eq!(controller.current_index(), 0);
    }
    assert_eq!(pages.requests(), &[PageRequest::Previous; 4]);
}

/// 不可逆动画：播放后连续 prepare 不改变视觉状态
#[test]
fn test_no_reverse_step_survives_back_navigation() {
    let mut stage = test_stage();
    let mut pages = PageLog::default();
    let mut controller = StepController::new(vec![
        Step::PreviousPage,
        Step::animation(Animation::move_in("#a", Direction::Right).no_reverse()),
        Step::NextPage,
    ])
    .unwrap();
    controller.init(&mut stage);
    assert_eq!(stage.find("#a").unwrap().offset, Vec2::new(1280.0, 0.0));

    controller.next_step(&mut stage, &mut pages);
    stage.settle();
    assert_eq!(stage.find("#a").unwrap().offset, Vec2::zero());

    controller.next_step(&mut stage, &mut pages);
    controller.previous_step(&mut stage, &mut pages);
    controller.previous_step(&mut stage, &mut pages);
    controller.previous_step(&mut stage, &mut pages);

    assert_eq!(stage.find("#a").unwrap().offset, Vec2::zero());
}

/// 延迟准备：init 不改变目标，第一次播放时才武装
#[test]
fn test_late_prepare_step() {
    let mut stage = test_stage();
    let mut pages = PageLog::default();
    let mut controller = StepController::new(vec![
        Step::PreviousPage,
        Step::animation(Animation::fade_in("#a").late_prepare().with_duration(0)),
        Step::NextPage,
    ])
    .unwrap();
    controller.init(&mut stage);

    let a = stage.find("#a").unwrap();
    assert!(a.visible);
    assert!(!controller.steps()[1].as_animation().unwrap().is_ready());

    controller.next_step(&mut stage, &mut pages);
    assert!(stage.find("#a").unwrap().visible);
    assert_eq!(stage.find("#a").unwrap().opacity, 1.0);

    // 已武装：后退会完整地重新准备
    controller.previous_step(&mut stage, &mut pages);
    assert!(!stage.find("#a").unwrap().visible);
}

/// SVG 动画：离开步骤时强制完成进行中的动画
#[test]
fn test_svg_move_finished_on_leave() {
    let mut stage = test_stage();
    let mut pages = PageLog::default();
    let mut controller = StepController::new(vec![
        Step::PreviousPage,
        Step::animation(Animation::svg_move(
            "#chart",
            Vec2::new(0.0, 100.0),
            Vec2::new(50.0, 0.0),
        )),
        Step::animation(Animation::svg_fade_in("#chart").with_duration(1000)),
        Step::NextPage,
    ])
    .unwrap();
    controller.init(&mut stage);

    let chart = stage.find("#chart").unwrap();
    assert_eq!(chart.svg_translate, Vec2::new(0.0, 100.0));
    assert_eq!(chart.svg_opacity, 0.0);

    controller.next_step(&mut stage, &mut pages);
    stage.update(0.1);
    assert_ne!(stage.find("#chart").unwrap().svg_translate, Vec2::new(50.0, 0.0));

    controller.next_step(&mut stage, &mut pages);
    assert_eq!(
        stage.find("#chart").unwrap().svg_translate,
        Vec2::new(50.0, 0.0)
    );
    assert_eq!(stage.active_tween_count(), 1);
}

/// 从幻灯片文件加载并导航
#[test]
fn test_deck_driven_navigation() {
    let json = r##"{
        "slides": [{
            "elements": [
                { "id": "a" },
                { "id": "b", "classes": ["bullet"] },
                { "id": "c", "classes": ["bullet"] }
            ],
            "steps": [
                { "type": "prevPage" },
                { "type": "animation", "kind": "fadeOut", "target": ".bullet", "duration": 200 },
                { "type": "animation", "kind": "moveOut", "target": "#a",
                  "options": { "to": "bottom" } },
                { "type": "nextPage" }
            ]
        }]
    }"##;
    let deck = DeckSpec::from_json(json).unwrap();
    let mut slide = deck.slides[0]
        .instantiate(0, viewport(), Timing::default())
        .unwrap();
    slide.init();

    let mut pages = PageLog::default();
    slide.next(&mut pages);
    stage_settled(&mut slide.stage);
    assert!(!slide.stage.find("#b").unwrap().visible);
    assert!(!slide.stage.find("#c").unwrap().visible);
    assert!(slide.stage.find("#a").unwrap().visible);

    slide.next(&mut pages);
    stage_settled(&mut slide.stage);
    let a = slide.stage.find("#a").unwrap();
    assert!(!a.visible);
    assert_eq!(a.offset, Vec2::new(0.0, 720.0));

    // 后退：moveOut 把 #a 放回原位并显示
    slide.previous(&mut pages);
    let a = slide.stage.find("#a").unwrap();
    assert!(a.visible);
    assert_eq!(a.offset, Vec2::zero());

    // 后退：fadeOut 重新显示两个条目
    slide.previous(&mut pages);
    assert!(slide.stage.elements().iter().all(|el| el.visible));
    assert!(pages.requests().is_empty());
}

fn stage_settled(stage: &mut MemoryStage) {
    while stage.has_active_tweens() {
        stage.update(0.05);
    }
}
