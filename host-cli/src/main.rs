//! # slide-host
//!
//! 无界面的放映宿主。
//!
//! ## 用法
//!
//! ```bash
//! # 交互式放映（从标准输入读取命令）
//! slide-host run deck.json
//! # 执行命令脚本
//! slide-host run deck.json --script commands.txt --settle
//! # 静态检查幻灯片文件
//! slide-host check deck.json
//! ```

use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use host_cli::{ConfigError, ExecuteResult, HostCommand, HostConfig, Session};
use slide_runtime::{Diagnostic, DiagnosticResult, DeckSpec, analyze_steps};

#[derive(Parser)]
#[command(name = "slide-host")]
#[command(about = "无界面的分步动画放映宿主")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 配置文件（默认：slide-host.json）
    #[arg(short, long, default_value = "slide-host.json", global = true)]
    config: PathBuf,

    /// 日志级别（覆盖配置文件）
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// 放映幻灯片文件
    Run {
        /// 幻灯片文件路径
        deck: PathBuf,

        /// 命令脚本（默认从标准输入读取）
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// 视口宽度
        #[arg(long)]
        width: Option<f32>,

        /// 视口高度
        #[arg(long)]
        height: Option<f32>,

        /// 每条导航命令后把过渡推到终态
        #[arg(long)]
        settle: bool,
    },

    /// 检查幻灯片文件
    Check {
        /// 幻灯片文件路径
        deck: PathBuf,
    },
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("slide-host error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 配置文件在日志初始化之前读取，读取失败的原因稍后再记录
    let (mut config, load_error) = match HostConfig::try_load(&cli.config) {
        Ok(config) => (config, None),
        Err(e) => (HostConfig::default(), Some(e)),
    };
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Commands::Run {
        width,
        height,
        settle,
        ..
    } = &cli.command
    {
        if let Some(width) = width {
            config.viewport.width = *width;
        }
        if let Some(height) = height {
            config.viewport.height = *height;
        }
        config.settle_after_step |= *settle;
    }
    config.validate()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level()?)
        .with_writer(io::stderr)
        .init();

    match load_error {
        None => info!(path = %cli.config.display(), "配置文件加载成功"),
        Some(ConfigError::NotFound(_)) => {
            info!(path = %cli.config.display(), "配置文件不存在，使用默认配置");
        }
        Some(e) => warn!(error = %e, "配置文件加载失败，使用默认配置"),
    }

    match cli.command {
        Commands::Run { deck, script, .. } => run(&deck, script.as_deref(), &config),
        Commands::Check { deck } => check(&deck, &config),
    }
}

fn load_deck(path: &Path) -> anyhow::Result<DeckSpec> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("无法读取幻灯片文件: {}", path.display()))?;
    DeckSpec::from_json(&source).with_context(|| format!("无法加载幻灯片文件: {}", path.display()))
}

//=============================================================================
// run 命令实现
//=============================================================================

fn run(deck_path: &Path, script: Option<&Path>, config: &HostConfig) -> anyhow::Result<()> {
    let deck = load_deck(deck_path)?;
    let mut session = Session::new(
        deck,
        config.viewport_size(),
        config.timing()?,
        config.settle_after_step,
    )?;

    let input: Box<dyn BufRead> = match script {
        Some(path) => Box::new(BufReader::new(
            fs::File::open(path)
                .with_context(|| format!("无法打开命令脚本: {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    for (line_no, line) in input.lines().enumerate() {
        let line = line?;
        let command = match HostCommand::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                error!(line = line_no + 1, error = %e, "命令解析失败");
                continue;
            }
        };

        match session.execute(command) {
            ExecuteResult::Step(outcome) => {
                println!(
                    "[slide {} step {}] {:?}",
                    session.slide_index() + 1,
                    session.slide().controller.current_index(),
                    outcome
                );
            }
            ExecuteResult::Ticked { completed } => println!("{} 个过渡结束", completed),
            ExecuteResult::Dump(text) => print!("{}", text),
            ExecuteResult::Quit => break,
        }
    }

    Ok(())
}

//=============================================================================
// check 命令实现
//=============================================================================

fn check(deck_path: &Path, config: &HostConfig) -> anyhow::Result<()> {
    let deck = load_deck(deck_path)?;
    let defaults = config.timing()?;

    let mut result = DiagnosticResult::new();
    for (index, slide) in deck.slides.iter().enumerate() {
        match slide.build_steps(index, defaults) {
            Ok(steps) => result.merge(analyze_steps(index, &steps)),
            Err(e) => result.push(Diagnostic::error(index, e.to_string())),
        }
    }

    for diagnostic in &result.diagnostics {
        eprintln!("{}", diagnostic);
    }
    eprintln!(
        "\n==> 检查 {} 页：{} 个错误，{} 个警告",
        deck.slide_count(),
        result.error_count(),
        result.warn_count()
    );

    if result.has_errors() {
        anyhow::bail!("幻灯片文件检查发现错误");
    }

    Ok(())
}
