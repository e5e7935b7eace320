#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use tickerboard_core::market::entity::columns;
use tickerboard_core::workbook::entity::{Cell, RawTable};
use tickerboard_source::memory::MemoryWorkbook;

pub const TODAY: (i32, u32, u32) = (2026, 10, 16);

pub fn today() -> NaiveDate {
    let (y, m, d) = TODAY;
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn metadata_header() -> Vec<String> {
    let mut header = vec![
        columns::TICKER.to_string(),
        columns::LAST_TRADE_TIME.to_string(),
    ];
    header.extend(columns::METADATA_NUMERIC.iter().map(|c| c.to_string()));
    header
}

pub fn history_header() -> Vec<String> {
    let mut header = vec![columns::DATE.to_string()];
    header.extend(columns::HISTORY_NUMERIC.iter().map(|c| c.to_string()));
    header
}

/// 构造一行元数据，数值均以文本形式给出，模拟 CSV 输入
pub fn metadata_row(symbol: &str, market_cap: &str, change_pct: &str) -> Vec<Cell> {
    let mut row = vec![Cell::text(symbol), Cell::text("16/10/2026 15:30")];
    for column in columns::METADATA_NUMERIC {
        let value = match column {
            columns::MARKET_CAP => market_cap,
            columns::CHANGE_PCT => change_pct,
            columns::LAST_PRICE => "1234.5",
            _ => "1",
        };
        row.push(Cell::text(value));
    }
    row
}

pub fn metadata_sheet(symbols: &[&str]) -> RawTable {
    let mut table = RawTable::new("ticker", metadata_header());
    for symbol in symbols {
        table.push_row(metadata_row(symbol, "1500000", "-0.5"));
    }
    table
}

/// # Summary
/// 构造以 `end` 结束、逐日递增的历史表。
///
/// # Logic
/// 第 i 根 Bar: open = i，close = 100 + i，volume = 1000 + 10 * i，日期以日在前文本给出。
pub fn history_sheet(symbol: &str, end: NaiveDate, count: u32) -> RawTable {
    let mut table = RawTable::new(symbol, history_header());
    for i in 0..count {
        let date = end - Days::new(u64::from(count - 1 - i));
        let i = f64::from(i);
        table.push_row(vec![
            Cell::text(date.format("%d/%m/%Y").to_string()),
            Cell::Number(i),
            Cell::Number(i + 110.0),
            Cell::Number(i + 90.0),
            Cell::Number(i + 100.0),
            Cell::Number(1000.0 + 10.0 * i),
        ]);
    }
    table
}

/// AAA 有 400 根 Bar、BBB 有 10 根，均以 `today()` 结束
pub fn sample_workbook() -> MemoryWorkbook {
    MemoryWorkbook::new("memory://sample")
        .with_sheet(metadata_sheet(&["AAA", "BBB"]))
        .with_sheet(history_sheet("AAA", today(), 400))
        .with_sheet(history_sheet("BBB", today(), 10))
}
