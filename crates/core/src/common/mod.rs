use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub mod time;

/// # Summary
/// 回看周期枚举，定义看板可选的历史时间窗口。
///
/// # Invariants
/// - 每个周期对应固定的自然日数，与“今天”组合成闭区间 `[today - days, today]`。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum PeriodWindow {
    // 7 天
    Week,
    // 31 天
    Month,
    // 90 天
    #[default]
    Trimester,
    // 365 天
    Year,
}

impl PeriodWindow {
    /// 按界面展示顺序排列的全部周期
    pub const ALL: [PeriodWindow; 4] = [
        PeriodWindow::Week,
        PeriodWindow::Month,
        PeriodWindow::Trimester,
        PeriodWindow::Year,
    ];

    /// 周期对应的回看自然日数
    pub const fn days(self) -> u32 {
        match self {
            PeriodWindow::Week => 7,
            PeriodWindow::Month => 31,
            PeriodWindow::Trimester => 90,
            PeriodWindow::Year => 365,
        }
    }

    /// 周期的展示名称
    pub const fn name(self) -> &'static str {
        match self {
            PeriodWindow::Week => "Week",
            PeriodWindow::Month => "Month",
            PeriodWindow::Trimester => "Trimester",
            PeriodWindow::Year => "Year",
        }
    }
}

impl FromStr for PeriodWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(PeriodWindow::Week),
            "month" => Ok(PeriodWindow::Month),
            "trimester" => Ok(PeriodWindow::Trimester),
            "year" => Ok(PeriodWindow::Year),
            _ => Err(format!("Unknown period: {}", s)),
        }
    }
}

impl std::fmt::Display for PeriodWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
