use tickerboard_core::market::entity::{Bar, SummaryMetrics, TickerRecord};

// 单列的最小值、最大值与均值累加器，NaN 视为缺失
#[derive(Debug, Default)]
struct Extent {
    min: Option<f64>,
    max: Option<f64>,
    sum: f64,
    count: usize,
}

impl Extent {
    fn push(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
        self.sum += value;
        self.count += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    fn mean(&self) -> Option<f64> {
        let (min, max) = (self.min?, self.max?);
        let mean = self.sum / self.count as f64;
        // 浮点累加误差可能让均值略微越界
        if mean.is_nan() {
            Some(mean)
        } else {
            Some(mean.clamp(min, max))
        }
    }
}

/// # Summary
/// 计算过滤窗口上的汇总指标。
///
/// # Logic
/// 1. 成交量与收盘价分别求最小值和最大值，成交量额外求算术平均。
/// 2. NaN 观测值按列跳过；窗口为空或整列为 NaN 时对应统计量为 None。
/// 3. 市值直接取自元数据记录，与窗口无关。
///
/// # Arguments
/// * `bars`: 已按周期过滤的 Bar 序列。
/// * `record`: 所属证券的元数据记录。
pub fn summarize(bars: &[Bar], record: &TickerRecord) -> SummaryMetrics {
    let mut volume = Extent::default();
    let mut close = Extent::default();
    for bar in bars {
        volume.push(bar.volume);
        close.push(bar.close);
    }

    SummaryMetrics {
        bar_count: bars.len(),
        min_volume: volume.min,
        max_volume: volume.max,
        min_close: close.min,
        max_close: close.max,
        mean_volume: volume.mean(),
        market_cap: record.market_cap,
    }
}
