//! # 诊断模块
//!
//! 提供步骤序列的静态检查，不依赖场景或宿主。
//!
//! ## 设计原则
//!
//! - 纯函数 API，可在无 IO 环境下运行
//! - 诊断分级：Error（必须修复）、Warn（建议修复）、Info（信息提示）
//! - 检查的都是编写问题；运行时同样的问题只会被记录并跳过

use crate::animation::{Animation, AnimationKind};
use crate::step::Step;

/// 诊断级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticLevel {
    /// 信息提示
    Info,
    /// 警告（建议修复）
    Warn,
    /// 错误（必须修复）
    Error,
}

impl std::fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// 诊断条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 诊断级别
    pub level: DiagnosticLevel,
    /// 页面序号
    pub slide: usize,
    /// 步骤序号（如果可定位）
    pub step: Option<usize>,
    /// 诊断消息
    pub message: String,
    /// 诊断详情（可选）
    pub detail: Option<String>,
}

impl Diagnostic {
    fn new(level: DiagnosticLevel, slide: usize, message: impl Into<String>) -> Self {
        Self {
            level,
            slide,
            step: None,
            message: message.into(),
            detail: None,
        }
    }

    /// 创建错误诊断
    pub fn error(slide: usize, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, slide, message)
    }

    /// 创建警告诊断
    pub fn warn(slide: usize, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warn, slide, message)
    }

    /// 创建信息诊断
    pub fn info(slide: usize, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Info, slide, message)
    }

    /// 设置步骤序号
    pub fn with_step(mut self, step: usize) -> Self {
        self.step = Some(step);
        self
    }

    /// 设置详情
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] 第 {} 页", self.level, self.slide)?;
        if let Some(step) = self.step {
            write!(f, "第 {} 步", step)?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, "\n  | {}", detail)?;
        }
        Ok(())
    }
}

/// 诊断结果
#[derive(Debug, Clone, Default)]
pub struct DiagnosticResult {
    /// 诊断条目列表
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticResult {
    /// 创建空结果
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加诊断
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// 合并另一个结果
    pub fn merge(&mut self, other: DiagnosticResult) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// 获取错误数量
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Error)
            .count()
    }

    /// 获取警告数量
    pub fn warn_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warn)
            .count()
    }

    /// 是否有错误
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// 按级别过滤
    pub fn filter_by_level(&self, min_level: DiagnosticLevel) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.level >= min_level)
            .collect()
    }
}

//=============================================================================
// 步骤分析 API
//=============================================================================

/// 分析一页的步骤序列，返回诊断结果
///
/// 执行以下检查：
/// - 空序列（Error）
/// - 第 0 步不是上一页边界、最后一步不是下一页边界（Warn）
/// - 中间出现翻页边界：向前到达上一页边界或向后到达下一页边界时会被拒绝（Warn）
/// - 不支持的步骤类型或动画类型（Warn）
/// - 各动画类型缺少参数（Warn）
/// - 自定义动画需要宿主挂接钩子（Info）
pub fn analyze_steps(slide: usize, steps: &[Step]) -> DiagnosticResult {
    let mut result = DiagnosticResult::new();

    let Some(last) = steps.len().checked_sub(1) else {
        result.push(Diagnostic::error(slide, "步骤序列为空"));
        return result;
    };

    if !matches!(steps[0], Step::PreviousPage) {
        result.push(
            Diagnostic::warn(slide, "第一步不是上一页边界")
                .with_step(0)
                .with_detail("在第 0 步后退不会返回上一页"),
        );
    }
    if !matches!(steps[last], Step::NextPage) {
        result.push(
            Diagnostic::warn(slide, "最后一步不是下一页边界")
                .with_step(last)
                .with_detail("在最后一步前进不会进入下一页"),
        );
    }

    for (index, step) in steps.iter().enumerate() {
        match step {
            Step::PreviousPage if index != 0 => {
                result.push(
                    Diagnostic::warn(slide, "上一页边界位于序列中间")
                        .with_step(index)
                        .with_detail("向前导航到达该步骤时会被拒绝"),
                );
            }
            Step::NextPage if index != last => {
                result.push(
                    Diagnostic::warn(slide, "下一页边界位于序列中间")
                        .with_step(index)
                        .with_detail("向后导航到达该步骤时会被拒绝"),
                );
            }
            Step::Unsupported(kind) => {
                result.push(
                    Diagnostic::warn(slide, format!("不支持的步骤类型: **{}**", kind))
                        .with_step(index),
                );
            }
            Step::Animate(animation) => {
                analyze_animation(slide, index, animation, &mut result);
            }
            _ => {}
        }
    }

    result
}

fn analyze_animation(
    slide: usize,
    index: usize,
    animation: &Animation,
    result: &mut DiagnosticResult,
) {
    let options = animation.options();
    match animation.kind() {
        AnimationKind::Unsupported(kind) => {
            result.push(
                Diagnostic::warn(slide, format!("不支持的动画类型: **{}**", kind))
                    .with_step(index)
                    .with_detail("播放时不会产生任何视觉变化"),
            );
        }
        AnimationKind::ChangeText if options.text.is_none() => {
            result.push(
                Diagnostic::warn(slide, "changeText 缺少 text 参数")
                    .with_step(index)
                    .with_detail("目标内容会被替换为空字符串"),
            );
        }
        AnimationKind::MoveIn if options.from.is_none() => {
            result.push(
                Diagnostic::warn(slide, "moveIn 缺少 from 方向，默认从左侧移入").with_step(index),
            );
        }
        AnimationKind::MoveOut if options.to.is_none() => {
            result.push(
                Diagnostic::warn(slide, "moveOut 缺少 to 方向，默认向左侧移出").with_step(index),
            );
        }
        AnimationKind::Set => {
            if options.animations.is_empty() {
                result.push(Diagnostic::warn(slide, "组合动画不包含任何子动画").with_step(index));
            }
            for child in &options.animations {
                analyze_animation(slide, index, child, result);
            }
        }
        AnimationKind::Custom => {
            result.push(
                Diagnostic::info(slide, "自定义动画")
                    .with_step(index)
                    .with_detail(format!("目标 '{}' 的过渡需要由宿主挂接钩子", animation.target())),
            );
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Direction, NoopHooks};

    fn steps_with(middle: Vec<Step>) -> Vec<Step> {
        let mut steps = vec![Step::PreviousPage];
        steps.extend(middle);
        steps.push(Step::NextPage);
        steps
    }

    #[test]
    fn test_well_formed_sequence() {
        let steps = steps_with(vec![
            Step::animation(Animation::fade_in("#a")),
            Step::animation(Animation::move_in("#b", Direction::Top)),
            Step::animation(Animation::change_text("#c", "new")),
        ]);
        let result = analyze_steps(0, &steps);
        assert!(result.is_empty(), "{:?}", result.diagnostics);
    }

    #[test]
    fn test_empty_sequence() {
        let result = analyze_steps(2, &[]);
        assert!(result.has_errors());
        assert_eq!(result.diagnostics[0].slide, 2);
        assert_eq!(result.diagnostics[0].to_string(), "[ERROR] 第 2 页: 步骤序列为空");
    }

    #[test]
    fn test_missing_boundaries() {
        let steps = vec![Step::animation(Animation::fade_in("#a"))];
        let result = analyze_steps(0, &steps);

        assert_eq!(result.warn_count(), 2);
        assert!(result.diagnostics.iter().all(|d| d.step == Some(0)));
    }

    #[test]
    fn test_interior_boundary() {
        let steps = steps_with(vec![Step::NextPage, Step::PreviousPage]);
        let result = analyze_steps(1, &steps);

        assert_eq!(result.warn_count(), 2);
        assert_eq!(result.diagnostics[0].step, Some(1));
        assert_eq!(result.diagnostics[1].step, Some(2));
    }

    #[test]
    fn test_unsupported_names() {
        let steps = steps_with(vec![
            Step::Unsupported("video".to_string()),
            Step::animation(Animation::new(AnimationKind::from_name("spin"), "#a")),
        ]);
        let result = analyze_steps(0, &steps);

        assert_eq!(result.warn_count(), 2);
        assert!(result.diagnostics[0].message.contains("video"));
        assert!(result.diagnostics[1].message.contains("spin"));
    }

    #[test]
    fn test_missing_options() {
        let steps = steps_with(vec![
            Step::animation(Animation::new(AnimationKind::ChangeText, "#a")),
            Step::animation(Animation::new(AnimationKind::MoveIn, "#b")),
            Step::animation(Animation::new(AnimationKind::MoveOut, "#c")),
            Step::animation(Animation::set(Vec::new())),
        ]);
        let result = analyze_steps(0, &steps);

        assert_eq!(result.warn_count(), 4);
        let steps: Vec<_> = result.diagnostics.iter().filter_map(|d| d.step).collect();
        assert_eq!(steps, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_set_children_checked() {
        let steps = steps_with(vec![Step::animation(Animation::set(vec![
            Animation::fade_in("#a"),
            Animation::new(AnimationKind::from_name("spin"), "#b"),
        ]))]);
        let result = analyze_steps(0, &steps);

        assert_eq!(result.warn_count(), 1);
        assert_eq!(result.diagnostics[0].step, Some(1));
    }

    #[test]
    fn test_custom_is_info() {
        let steps = steps_with(vec![Step::animation(Animation::custom("#a", NoopHooks))]);
        let result = analyze_steps(0, &steps);

        assert!(!result.has_errors());
        assert_eq!(result.warn_count(), 0);
        assert_eq!(result.filter_by_level(DiagnosticLevel::Info).len(), 1);
        assert!(result.filter_by_level(DiagnosticLevel::Warn).is_empty());
    }

    #[test]
    fn test_merge_and_display() {
        let mut result = DiagnosticResult::new();
        result.push(Diagnostic::warn(0, "a").with_step(3).with_detail("b"));
        let mut other = DiagnosticResult::new();
        other.push(Diagnostic::info(1, "c"));
        result.merge(other);

        assert_eq!(result.diagnostics.len(), 2);
        assert_eq!(result.diagnostics[0].to_string(), "[WARN] 第 0 页第 3 步: a\n  | b");
        assert_eq!(result.diagnostics[1].to_string(), "[INFO] 第 1 页: c");
    }
}
