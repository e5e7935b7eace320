mod settings;

use std::sync::Arc;

use tickerboard_api::server::{AppState, start_server};
use tickerboard_core::common::time::SystemClock;
use tickerboard_core::config::LogConfig;
use tickerboard_market::dashboard::Dashboard;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化数据源、看板服务并注入到 HTTP 网关。
///
/// # Logic
/// 1. 加载配置 (首个命令行参数可覆盖配置文件路径)。
/// 2. 初始化全局日志。
/// 3. 打开工作簿并构建数据集 (一次性加载与规范化)。
/// 4. 构造看板服务并启动 HTTP 服务，直到收到退出信号。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载配置
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| settings::DEFAULT_CONFIG_PATH.to_string());
    let config = settings::load(&config_path)?;

    // 2. 初始化日志，guard 需存活至进程结束以保证文件日志落盘
    let _guard = init_tracing(&config.log);
    info!("Tickerboard starting with config {}", config_path);

    // 3. 实例化基础设施层，数据集在进程内只构建一次
    let source = tickerboard_source::open_workbook(&config.workbook.path)?;
    let dashboard = Dashboard::load(
        source.as_ref(),
        &config.workbook.metadata_sheet,
        Arc::new(SystemClock),
    )?;
    info!(
        "Workbook {} loaded: {} tickers, {} histories rejected",
        config.workbook.path,
        dashboard.overview().len(),
        dashboard.dataset().rejected.len()
    );

    // 4. 构造网关
    let state = AppState {
        dashboard: Arc::new(dashboard),
    };
    start_server(state, &config.server.bind_addr()).await?;

    info!("Tickerboard stopped");
    Ok(())
}

/// # Summary
/// 安装全局日志订阅者：控制台输出，以及可选的按日滚动文件输出。
///
/// # Logic
/// 1. `RUST_LOG` 存在时优先，否则使用配置中的级别。
/// 2. 配置了日志目录时追加非阻塞文件层。
///
/// # Returns
/// 文件层的后台写入 guard，未启用文件日志时为 None。
fn init_tracing(log: &LogConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));

    let (file_layer, guard) = match &log.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "tickerboard.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();
    guard
}
