use crate::market::error::NormalizeError;
use crate::workbook::entity::RawTable;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 工作簿中约定的列名
pub mod columns {
    pub const TICKER: &str = "Ticker";
    pub const LAST_TRADE_TIME: &str = "Last Trade time";
    pub const LAST_PRICE: &str = "Last Price";
    pub const PREVIOUS_DAY_PRICE: &str = "Previous Day Price";
    pub const CHANGE: &str = "Change";
    pub const CHANGE_PCT: &str = "Change Pct";
    pub const VOLUME: &str = "Volume";
    pub const VOLUME_AVG: &str = "Volume Avg";
    pub const SHARES: &str = "Shares";
    pub const DAY_HIGH: &str = "Day High";
    pub const DAY_LOW: &str = "Day Low";
    pub const MARKET_CAP: &str = "Market Cap";
    pub const PE_RATIO: &str = "P/E Ratio";
    pub const EPS: &str = "EPS";

    pub const DATE: &str = "Date";
    pub const OPEN: &str = "Open";
    pub const HIGH: &str = "High";
    pub const LOW: &str = "Low";
    pub const CLOSE: &str = "Close";

    /// 元数据表中按宽松策略转换为数值的列，顺序即 `TickerRecord` 字段顺序
    pub const METADATA_NUMERIC: [&str; 12] = [
        LAST_PRICE,
        PREVIOUS_DAY_PRICE,
        CHANGE,
        CHANGE_PCT,
        VOLUME,
        VOLUME_AVG,
        SHARES,
        DAY_HIGH,
        DAY_LOW,
        MARKET_CAP,
        PE_RATIO,
        EPS,
    ];

    /// 历史表中按严格策略转换为数值的列
    pub const HISTORY_NUMERIC: [&str; 5] = [OPEN, HIGH, LOW, CLOSE, VOLUME];
}

/// # Summary
/// 单根日线数据 (OHLCV)。
///
/// # Invariants
/// - 数值字段来自严格转换，空单元格记为 NaN，其余无法解析的内容不会生成 Bar。
/// - 不校验取值范围，负成交量或零价格原样保留。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    // 交易日 (按日在前解析)
    pub date: NaiveDateTime,
    // 开盘价
    pub open: f64,
    // 最高价
    pub high: f64,
    // 最低价
    pub low: f64,
    // 收盘价
    pub close: f64,
    // 成交量
    pub volume: f64,
}

/// # Summary
/// 历史序列的时间顺序检查结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOrder {
    // 严格递增
    Chronological,
    // 出现重复日期，携带第一个重复位置
    Duplicated(usize),
    // 出现倒序，携带第一个倒序位置
    Unsorted(usize),
}

/// # Summary
/// 单个证券的完整历史序列。
///
/// # Invariants
/// - `bars` 保持数据源提供的顺序，既不排序也不去重。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySeries {
    // 证券代码
    pub symbol: String,
    // 日线列表
    pub bars: Vec<Bar>,
}

impl HistorySeries {
    /// 按序提取全部开盘价
    pub fn opens(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.open).collect()
    }

    /// # Summary
    /// 检查序列是否按日期严格递增。
    ///
    /// # Logic
    /// 1. 逐对比较相邻 Bar 的日期。
    /// 2. 倒序优先于重复报告：遇到倒序立即返回，重复只记录第一次出现的位置。
    ///
    /// # Returns
    /// 返回 `SeriesOrder`。
    pub fn order(&self) -> SeriesOrder {
        let mut duplicated = None;
        for (i, pair) in self.bars.windows(2).enumerate() {
            if pair[1].date < pair[0].date {
                return SeriesOrder::Unsorted(i + 1);
            }
            if pair[1].date == pair[0].date && duplicated.is_none() {
                duplicated = Some(i + 1);
            }
        }
        duplicated.map_or(SeriesOrder::Chronological, SeriesOrder::Duplicated)
    }
}

/// # Summary
/// 元数据表中的一行，代表一个被跟踪的证券。
///
/// # Invariants
/// - `symbol` 在整张元数据表中唯一，是历史序列映射的连接键。
/// - `trajectory` 与同代码 `HistorySeries` 的开盘价一一对应、顺序一致。
/// - 除 `symbol` 外的字段均按宽松策略转换，无法解析时为 None。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerRecord {
    // 证券代码
    pub symbol: String,
    // 最后成交时间
    pub last_trade_time: Option<NaiveDateTime>,
    // 最新价
    pub last_price: Option<f64>,
    // 前一交易日价格
    pub previous_day_price: Option<f64>,
    // 涨跌额
    pub change: Option<f64>,
    // 涨跌幅 (百分比数值)
    pub change_pct: Option<f64>,
    // 成交量
    pub volume: Option<f64>,
    // 平均成交量
    pub volume_avg: Option<f64>,
    // 总股本
    pub shares: Option<f64>,
    // 日内最高价
    pub day_high: Option<f64>,
    // 日内最低价
    pub day_low: Option<f64>,
    // 市值
    pub market_cap: Option<f64>,
    // 市盈率
    pub pe_ratio: Option<f64>,
    // 每股收益
    pub eps: Option<f64>,
    // 历史开盘价轨迹，用于迷你走势图
    pub trajectory: Vec<f64>,
}

/// # Summary
/// 加载器输出的原始数据集：元数据表与按代码索引的历史表。
///
/// # Invariants
/// - `symbols` 为元数据表 `Ticker` 列的取值，按行序排列且互不重复。
/// - `histories` 的键集合与 `symbols` 完全一致。
#[derive(Debug, Clone, PartialEq)]
pub struct RawDataset {
    // 元数据表
    pub tickers: RawTable,
    // 元数据表中声明的代码 (行序)
    pub symbols: Vec<String>,
    // 代码 -> 历史表
    pub histories: HashMap<String, RawTable>,
}

/// # Summary
/// 类型化后的完整数据集，加载后作为只读共享状态。
///
/// # Invariants
/// - `tickers` 保持元数据表的行序。
/// - 每个 `TickerRecord` 的代码恰好出现在 `histories` 或 `rejected` 之一中。
/// - 被拒绝的代码仍保留在概览中，其 `trajectory` 为空。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    // 元数据记录
    pub tickers: Vec<TickerRecord>,
    // 代码 -> 历史序列
    pub histories: HashMap<String, HistorySeries>,
    // 代码 -> 历史表转换失败的原因
    #[serde(default)]
    pub rejected: HashMap<String, NormalizeError>,
}

impl Dataset {
    /// 按代码查找元数据记录
    pub fn record(&self, symbol: &str) -> Option<&TickerRecord> {
        self.tickers.iter().find(|t| t.symbol == symbol)
    }

    /// 按代码查找历史序列
    pub fn history(&self, symbol: &str) -> Option<&HistorySeries> {
        self.histories.get(symbol)
    }

    /// 历史表转换失败时的原因
    pub fn rejection(&self, symbol: &str) -> Option<&NormalizeError> {
        self.rejected.get(symbol)
    }

    /// 按元数据行序列出全部代码
    pub fn symbols(&self) -> Vec<&str> {
        self.tickers.iter().map(|t| t.symbol.as_str()).collect()
    }
}

/// # Summary
/// 一次 (代码, 周期) 请求的汇总指标。
///
/// # Invariants
/// - 窗口为空或某列全部为 NaN 时，对应统计量为 None。
/// - `market_cap` 直接取自元数据记录，与窗口无关。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    // 窗口内 Bar 数量
    pub bar_count: usize,
    // 最低成交量
    pub min_volume: Option<f64>,
    // 最高成交量
    pub max_volume: Option<f64>,
    // 最低收盘价
    pub min_close: Option<f64>,
    // 最高收盘价
    pub max_close: Option<f64>,
    // 平均成交量
    pub mean_volume: Option<f64>,
    // 当前市值
    pub market_cap: Option<f64>,
}

impl SummaryMetrics {
    /// 向零截断后的平均成交量，供展示使用
    #[allow(clippy::cast_possible_truncation)]
    pub fn mean_volume_truncated(&self) -> Option<i64> {
        self.mean_volume
            .filter(|m| m.is_finite())
            .map(|m| m.trunc() as i64)
    }
}
