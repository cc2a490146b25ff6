mod config;
mod error;
mod game;
mod models;
mod ui;

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{default_config_path, load_config};
use crate::error::Result;
use crate::game::GameController;
use crate::ui::{App, handle_event, render};

/// 没有待复位时的轮询间隔
const IDLE_POLL: Duration = Duration::from_millis(250);

/// 终端记忆翻牌游戏
#[derive(Parser, Debug)]
#[command(name = "mnemo", version, about = "翻开两张相同的牌即可配对")]
struct Cli {
    /// 洗牌随机种子（默认随机）
    #[arg(long)]
    seed: Option<u64>,

    /// 不匹配时翻回前的等待毫秒数
    #[arg(long)]
    delay_ms: Option<u64>,

    /// 配置文件路径
    #[arg(long)]
    config: Option<PathBuf>,

    /// 日志文件路径
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// 获取数据目录路径 (~/.local/share/mnemo/)
fn get_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "无法获取用户数据目录"))?
        .join("mnemo");

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// 终端处于 raw 模式，日志写入文件
fn init_logging(path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => get_data_dir()?.join("mnemo.log"),
    };
    let file = File::create(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file)?;

    let mut config = match cli.config.or_else(default_config_path) {
        Some(path) => load_config(&path)?,
        None => Default::default(),
    };
    if let Some(delay_ms) = cli.delay_ms {
        config.mismatch_delay_ms = delay_ms;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.validate()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    let game = GameController::new(config.images.clone(), config.mismatch_delay(), seed);
    let mut app = App::new(game, config.columns);

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!(error = %e, "游戏异常退出");
    }
    info!("退出");
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        // 有待复位时只等到它到期
        let timeout = app
            .game
            .time_until_pending(Instant::now())
            .map_or(IDLE_POLL, |left| left.min(IDLE_POLL));

        if event::poll(timeout)? {
            let event = event::read()?;
            if handle_event(app, &event, Instant::now()) {
                break;
            }
        }

        app.tick(Instant::now());
    }
    Ok(())
}
