use config::{Config, ConfigError, Environment, File};
use tickerboard_core::config::AppConfig;

/// 默认配置文件路径 (不含扩展名，由 `config` 按已知格式探测)
pub const DEFAULT_CONFIG_PATH: &str = "config/tickerboard";

/// 环境变量前缀，嵌套层级以双下划线分隔，例如 `TICKERBOARD__SERVER__PORT`
const ENV_PREFIX: &str = "TICKERBOARD";
const ENV_SEPARATOR: &str = "__";

/// # Summary
/// 加载应用配置。
///
/// # Logic
/// 1. 读取可选的配置文件，文件不存在时跳过。
/// 2. 叠加环境变量，环境变量优先。
/// 3. 未出现的字段取 `AppConfig` 默认值。
///
/// # Arguments
/// * `path`: 配置文件路径，可省略扩展名。
pub fn load(path: &str) -> Result<AppConfig, ConfigError> {
    Config::builder()
        .add_source(File::with_name(path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}
