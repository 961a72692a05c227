use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

mod config;
mod error;
mod events;
pub mod geometry;
mod services;
mod utils;

use config::Config;
use services::{
    create_display_enumerator, create_geometry_probe, create_surface_factory, FocusTracker,
    OverlayCompositor,
};

#[derive(Parser, Debug)]
#[command(name = "focusview-rust")]
#[command(about = "Подсветка активного окна рамкой с размытием остального экрана")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "focusview.toml")]
    config: String,

    /// Режим сухого запуска (эмуляция зонда и поверхностей, без реальных действий)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Инициализация системы логирования
    init_tracing(&args.log_level)?;

    info!("Запуск FocusView Rust v{}", env!("CARGO_PKG_VERSION"));

    // Загрузка конфигурации
    let config = Arc::new(Config::load(&args.config)?);
    info!("Конфигурация загружена из: {}", args.config);

    if args.dry_run {
        warn!("Режим сухого запуска - реальные действия отключены");
    }

    // Проверка наличия хост-инструментов (рекомендательная)
    if !args.dry_run {
        utils::environment::check_environment();
    }

    // Снимок топологии дисплеев делается один раз на старте:
    // горячее подключение дисплеев не поддерживается
    let display_enumerator = create_display_enumerator(args.dry_run);
    let topology = display_enumerator.snapshot().await?;
    if topology.displays.is_empty() {
        warn!("Дисплеи не обнаружены - маппер координат работает тождественно");
    }

    // Инициализация компонентов
    let probe = create_geometry_probe(config.clone(), args.dry_run).await?;
    let surface_factory = create_surface_factory(&config, args.dry_run)?;
    let compositor = Arc::new(OverlayCompositor::new(
        config.clone(),
        topology,
        surface_factory.as_ref(),
    )?);
    let tracker = FocusTracker::new(config.clone(), probe, compositor.clone());

    info!("Все компоненты инициализированы");

    // Запуск цикла отслеживания фокуса
    let tracker_handle = tokio::spawn(async move {
        if let Err(e) = tracker.run().await {
            error!("Ошибка в FocusTracker: {}", e);
        }
    });

    info!("Сервис запущен");

    // Ожидание сигнала завершения
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Получен сигнал завершения (Ctrl+C)");
        }
        Err(err) => {
            error!("Ошибка при ожидании сигнала завершения: {}", err);
        }
    }

    info!("Завершение работы...");

    // Прерываем цикл отслеживания, затем скрываем и закрываем поверхности
    tracker_handle.abort();
    compositor.shutdown();

    // Ожидаем завершения задачи (с таймаутом)
    let shutdown_timeout = tokio::time::Duration::from_secs(5);
    let shutdown_result = tokio::time::timeout(shutdown_timeout, async {
        let _ = tracker_handle.await;
    })
    .await;

    match shutdown_result {
        Ok(_) => info!("Сервис завершил работу корректно"),
        Err(_) => warn!("Таймаут при завершении сервиса"),
    }

    info!("FocusView Rust завершил работу");
    Ok(())
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    Ok(())
}
