//! # `tickerboard-market` - 行情看板数据管道
//!
//! 加载 -> 类型规范化 -> 周期过滤 -> 聚合，以及面向展示层的格式化工具。
//! 加载与规范化在进程生命周期内只需执行一次，过滤与聚合随每次选择重新计算。

pub mod aggregate;
pub mod cache;
pub mod coerce;
pub mod dashboard;
pub mod filter;
pub mod format;
pub mod loader;
pub mod normalize;

use tickerboard_core::market::entity::Dataset;
use tickerboard_core::market::error::DashboardError;
use tickerboard_core::workbook::port::WorkbookSource;

/// # Summary
/// 执行完整的加载与规范化流程。
///
/// # Arguments
/// * `source`: 工作簿数据源。
/// * `metadata_sheet`: 元数据工作表名称。
///
/// # Returns
/// 成功返回类型化数据集。
pub fn build_dataset(
    source: &dyn WorkbookSource,
    metadata_sheet: &str,
) -> Result<Dataset, DashboardError> {
    let raw = loader::load(source, metadata_sheet)?;
    Ok(normalize::normalize(&raw)?)
}
