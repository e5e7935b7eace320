//! # DTO (Data Transfer Object) 层
//!
//! 将内部领域模型转化为面向前端 JSON 输出的轻量结构体。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。
//! 数值字段同时给出原始值与展示文本，缺失值的展示文本为 `—`。

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tickerboard_core::common::PeriodWindow;
use tickerboard_core::market::entity::{Bar, TickerRecord};
use tickerboard_market::dashboard::SymbolView;
use tickerboard_market::format::{
    ChangeClass, RowBand, format_currency, format_grouped, format_percentage,
};
use utoipa::ToSchema;

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn iso(date: &NaiveDateTime) -> String {
    date.format(DATE_TIME_FORMAT).to_string()
}

// ============================================================
//  概览表 DTO
// ============================================================

/// 概览表的一行 - 对应 UI 中的 Stocks Preview 表格
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TickerRowResponse {
    /// 证券代码
    #[schema(example = "AAPL")]
    pub symbol: String,
    /// 最后成交时间 (ISO 8601，无时区)
    #[schema(example = "2026-10-16T15:30:00")]
    pub last_trade_time: Option<String>,
    /// 最新价
    pub last_price: Option<f64>,
    /// 最新价展示文本
    #[schema(example = "$ 1,234.57")]
    pub last_price_display: String,
    pub previous_day_price: Option<f64>,
    pub change: Option<f64>,
    /// 涨跌幅 (百分比数值)
    pub change_pct: Option<f64>,
    /// 涨跌幅展示文本
    #[schema(example = "-1.25 %")]
    pub change_pct_display: String,
    /// 涨跌着色分类 (positive / negative)，涨跌幅缺失时为 null
    #[schema(example = "negative")]
    pub change_class: Option<String>,
    /// 斑马纹分组 (even / odd)，按行位置计算
    #[schema(example = "odd")]
    pub row_band: String,
    pub volume: Option<f64>,
    pub volume_avg: Option<f64>,
    pub shares: Option<f64>,
    pub day_high: Option<f64>,
    pub day_low: Option<f64>,
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub eps: Option<f64>,
    /// 历史开盘价轨迹，用于迷你走势图
    pub trajectory: Vec<f64>,
}

impl TickerRowResponse {
    /// 由记录及其在表格中的位置 (从零开始) 构建
    pub fn from_record(index: usize, record: &TickerRecord) -> Self {
        Self {
            symbol: record.symbol.clone(),
            last_trade_time: record.last_trade_time.as_ref().map(iso),
            last_price: record.last_price,
            last_price_display: format_currency(record.last_price),
            previous_day_price: record.previous_day_price,
            change: record.change,
            change_pct: record.change_pct,
            change_pct_display: format_percentage(record.change_pct),
            change_class: ChangeClass::of(record.change_pct).map(|c| class_name(c).to_string()),
            row_band: band_name(RowBand::of(index)).to_string(),
            volume: record.volume,
            volume_avg: record.volume_avg,
            shares: record.shares,
            day_high: record.day_high,
            day_low: record.day_low,
            market_cap: record.market_cap,
            pe_ratio: record.pe_ratio,
            eps: record.eps,
            trajectory: record.trajectory.clone(),
        }
    }
}

fn class_name(class: ChangeClass) -> &'static str {
    match class {
        ChangeClass::Positive => "positive",
        ChangeClass::Negative => "negative",
    }
}

fn band_name(band: RowBand) -> &'static str {
    match band {
        RowBand::Even => "even",
        RowBand::Odd => "odd",
    }
}

// ============================================================
//  周期与图表 DTO
// ============================================================

/// 可选周期
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PeriodResponse {
    /// 周期名称
    #[schema(example = "Trimester")]
    pub name: String,
    /// 回看天数
    #[schema(example = 90)]
    pub days: u32,
    /// 是否为默认选择
    pub default: bool,
}

impl From<PeriodWindow> for PeriodResponse {
    fn from(period: PeriodWindow) -> Self {
        Self {
            name: period.name().to_string(),
            days: period.days(),
            default: period == PeriodWindow::default(),
        }
    }
}

/// 单根日线 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BarResponse {
    /// 交易日 (ISO 8601，无时区)
    #[schema(example = "2026-10-16T00:00:00")]
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl From<&Bar> for BarResponse {
    fn from(bar: &Bar) -> Self {
        Self {
            date: iso(&bar.date),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        }
    }
}

/// 双面板图表读模型：上方 K 线 (OHLC)，下方成交量柱
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChartResponse {
    #[schema(example = "AAPL")]
    pub symbol: String,
    #[schema(example = "Trimester")]
    pub period: String,
    /// 窗口上界 (参考日期)
    #[schema(example = "2026-10-16")]
    pub today: String,
    /// 图表标题
    #[schema(example = "Stock Price Trends")]
    pub title: String,
    /// K 线序列名称
    #[schema(example = "Dollars")]
    pub price_label: String,
    /// 成交量序列名称
    #[schema(example = "Volume Traded")]
    pub volume_label: String,
    /// 窗口内的日线，保持源顺序
    pub bars: Vec<BarResponse>,
}

impl From<&SymbolView> for ChartResponse {
    fn from(view: &SymbolView) -> Self {
        Self {
            symbol: view.symbol.clone(),
            period: view.period.name().to_string(),
            today: view.today.to_string(),
            title: "Stock Price Trends".to_string(),
            price_label: "Dollars".to_string(),
            volume_label: "Volume Traded".to_string(),
            bars: view.bars.iter().map(BarResponse::from).collect(),
        }
    }
}

// ============================================================
//  指标 DTO
// ============================================================

/// 单个带标签的指标
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MetricItem {
    /// 指标标签
    #[schema(example = "Average Daily Volume")]
    pub label: String,
    /// 原始值，窗口为空时为 null
    pub value: Option<f64>,
    /// 展示文本
    #[schema(example = "1,234,567")]
    pub display: String,
}

impl MetricItem {
    fn new(label: &str, value: Option<f64>, display: String) -> Self {
        Self {
            label: label.to_string(),
            value,
            display,
        }
    }
}

/// 周期指标读模型 - 对应 UI 中的 Period Metrics 区域
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MetricsResponse {
    #[schema(example = "AAPL")]
    pub symbol: String,
    #[schema(example = "Trimester")]
    pub period: String,
    /// 窗口内 Bar 数量
    #[schema(example = 63)]
    pub bar_count: usize,
    /// 向零截断的平均成交量
    pub mean_volume_truncated: Option<i64>,
    /// 按展示顺序排列的指标
    pub metrics: Vec<MetricItem>,
}

impl From<&SymbolView> for MetricsResponse {
    fn from(view: &SymbolView) -> Self {
        let m = &view.metrics;
        let mean_truncated = m.mean_volume_truncated();
        Self {
            symbol: view.symbol.clone(),
            period: view.period.name().to_string(),
            bar_count: m.bar_count,
            mean_volume_truncated: mean_truncated,
            metrics: vec![
                MetricItem::new(
                    "Lowest Volume Day Trade",
                    m.min_volume,
                    format_grouped(m.min_volume),
                ),
                MetricItem::new(
                    "Lowest Close Price",
                    m.min_close,
                    format_currency(m.min_close),
                ),
                MetricItem::new(
                    "Highest Volume Day Trade",
                    m.max_volume,
                    format_grouped(m.max_volume),
                ),
                MetricItem::new(
                    "Highest Close Price",
                    m.max_close,
                    format_currency(m.max_close),
                ),
                MetricItem::new(
                    "Average Daily Volume",
                    m.mean_volume,
                    format_grouped(m.mean_volume),
                ),
                MetricItem::new(
                    "Current Market Cap",
                    m.market_cap,
                    format_currency(m.market_cap),
                ),
            ],
        }
    }
}

// ============================================================
//  通用响应 DTO
// ============================================================

/// 统一 API 响应包装器
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T: Serialize + ToSchema> {
    /// 是否成功
    pub success: bool,
    /// 数据载荷 (成功时)
    pub data: Option<T>,
    /// 错误信息 (失败时)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize + ToSchema> ApiResponse<T> {
    /// 构建成功响应
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// 构建失败响应 (不含泛型载荷)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 固定为 false
    pub success: bool,
    /// 错误描述信息
    pub error: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}
