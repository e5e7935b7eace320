use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tickerboard_core::common::PeriodWindow;
use tickerboard_core::common::time::Clock;
use tickerboard_core::market::entity::{
    Bar, Dataset, HistorySeries, SummaryMetrics, TickerRecord,
};
use tickerboard_core::market::error::DashboardError;
use tickerboard_core::workbook::port::WorkbookSource;
use tracing::debug;

use crate::{aggregate, build_dataset, filter};

/// # Summary
/// 单次 (代码, 周期) 选择的完整读模型：图表数据与汇总指标。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolView {
    // 证券代码
    pub symbol: String,
    // 选择的周期
    pub period: PeriodWindow,
    // 计算所用的参考日期
    pub today: NaiveDate,
    // 窗口内的 Bar，保持源顺序
    pub bars: Vec<Bar>,
    // 窗口上的汇总指标
    pub metrics: SummaryMetrics,
}

/// # Summary
/// 看板领域服务，对外提供三个读模型：概览表、图表序列与汇总指标。
///
/// # Invariants
/// - 数据集在加载后只读，可在并发请求间共享。
/// - 每次调用都从时钟读取参考日期，过滤与聚合结果不跨请求缓存。
pub struct Dashboard {
    // 只读数据集
    dataset: Arc<Dataset>,
    // 参考日期来源
    clock: Arc<dyn Clock>,
}

impl Dashboard {
    /// 基于已构建的数据集创建看板
    pub fn new(dataset: Arc<Dataset>, clock: Arc<dyn Clock>) -> Self {
        Self { dataset, clock }
    }

    /// # Summary
    /// 从工作簿数据源加载并规范化后创建看板。
    ///
    /// # Arguments
    /// * `source`: 工作簿数据源。
    /// * `metadata_sheet`: 元数据工作表名称。
    /// * `clock`: 参考日期来源。
    ///
    /// # Returns
    /// 加载失败或元数据表缺少必需列时返回 `DashboardError`，此时整个看板无法渲染；
    /// 单个历史表转换失败只在访问该代码时报告。
    pub fn load(
        source: &dyn WorkbookSource,
        metadata_sheet: &str,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, DashboardError> {
        let dataset = build_dataset(source, metadata_sheet)?;
        Ok(Self::new(Arc::new(dataset), clock))
    }

    /// 当前参考日期
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// 共享的数据集
    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// 概览表：按元数据行序的全部记录
    pub fn overview(&self) -> &[TickerRecord] {
        &self.dataset.tickers
    }

    /// 可选择的代码列表
    pub fn symbols(&self) -> Vec<&str> {
        self.dataset.symbols()
    }

    /// 按代码查找记录
    pub fn record(&self, symbol: &str) -> Result<&TickerRecord, DashboardError> {
        self.dataset
            .record(symbol)
            .ok_or_else(|| DashboardError::UnknownTicker(symbol.to_string()))
    }

    /// # Summary
    /// 获取代码在周期窗口内的 Bar，供图表使用。
    ///
    /// # Returns
    /// 代码不在数据集中时返回 `DashboardError::UnknownTicker`；
    /// 该代码的历史表转换失败时返回 `DashboardError::Normalize`。
    pub fn history(&self, symbol: &str, period: PeriodWindow) -> Result<Vec<Bar>, DashboardError> {
        let series = self.series(symbol)?;
        Ok(filter::filter_bars(&series.bars, self.today(), period))
    }

    /// 计算代码在周期窗口内的汇总指标
    pub fn metrics(
        &self,
        symbol: &str,
        period: PeriodWindow,
    ) -> Result<SummaryMetrics, DashboardError> {
        Ok(self.view(symbol, period)?.metrics)
    }

    /// # Summary
    /// 一次计算同时得到图表数据与汇总指标。
    ///
    /// # Logic
    /// 1. 读取一次参考日期，保证两者基于同一窗口。
    /// 2. 过滤历史序列，再在结果上聚合。
    pub fn view(&self, symbol: &str, period: PeriodWindow) -> Result<SymbolView, DashboardError> {
        let record = self.record(symbol)?;
        let series = self.series(symbol)?;
        let today = self.today();
        let bars = filter::filter_bars(&series.bars, today, period);
        let metrics = aggregate::summarize(&bars, record);
        debug!(
            "View {} over {} as of {}: {} bars",
            symbol,
            period,
            today,
            bars.len()
        );
        Ok(SymbolView {
            symbol: record.symbol.clone(),
            period,
            today,
            bars,
            metrics,
        })
    }

    // 被拒绝的历史表只影响本代码
    fn series(&self, symbol: &str) -> Result<&HistorySeries, DashboardError> {
        if let Some(e) = self.dataset.rejection(symbol) {
            return Err(DashboardError::Normalize(e.clone()));
        }
        self.dataset
            .history(symbol)
            .ok_or_else(|| DashboardError::UnknownTicker(symbol.to_string()))
    }
}
