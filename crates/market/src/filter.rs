use chrono::{Days, NaiveDate};
use tickerboard_core::common::PeriodWindow;
use tickerboard_core::market::entity::Bar;

/// # Summary
/// 周期窗口解析后的闭区间日期范围 `[today - days, today]`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PeriodRange {
    /// # Summary
    /// 以给定日期为上界解析周期窗口。
    ///
    /// # Logic
    /// 下界溢出日期范围时退化为最早可表示的日期。
    pub fn new(today: NaiveDate, period: PeriodWindow) -> Self {
        let start = today
            .checked_sub_days(Days::new(u64::from(period.days())))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    /// 按日历日判断 Bar 是否落在区间内 (两端均包含)
    pub fn contains(&self, bar: &Bar) -> bool {
        let day = bar.date.date();
        self.start <= day && day <= self.end
    }
}

/// # Summary
/// 截取落在周期窗口内的 Bar。
///
/// # Logic
/// 1. 以 `today` 为上界，无论当天是否有交易数据。
/// 2. 窗口外的 Bar 无论位于序列何处都被丢弃，窗口内的保持原有顺序。
///
/// # Arguments
/// * `bars`: 历史序列。
/// * `today`: 参考日期，由调用方显式传入。
/// * `period`: 周期窗口。
///
/// # Returns
/// 窗口内 Bar 的副本，可能为空。
pub fn filter_bars(bars: &[Bar], today: NaiveDate, period: PeriodWindow) -> Vec<Bar> {
    let range = PeriodRange::new(today, period);
    bars.iter().filter(|b| range.contains(b)).cloned().collect()
}
