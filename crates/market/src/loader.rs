use std::collections::{HashMap, HashSet};

use tickerboard_core::market::entity::{RawDataset, columns};
use tickerboard_core::market::error::LoadError;
use tickerboard_core::workbook::entity::Cell;
use tickerboard_core::workbook::port::WorkbookSource;
use tracing::{debug, info};

/// # Summary
/// 从工作簿读取元数据表，并为其中声明的每个代码建立历史表映射。
///
/// # Logic
/// 1. 定位元数据表及其 `Ticker` 列。
/// 2. 逐行读取代码，拒绝空代码与重复代码。
/// 3. 对全部代码一次性校验同名历史表存在，缺失即失败。
///
/// # Arguments
/// * `source`: 工作簿数据源。
/// * `metadata_sheet`: 元数据工作表名称。
///
/// # Returns
/// 成功返回原始数据集，数据源本身不被修改。
pub fn load(source: &dyn WorkbookSource, metadata_sheet: &str) -> Result<RawDataset, LoadError> {
    let tickers = source
        .sheet(metadata_sheet)
        .ok_or_else(|| LoadError::MissingSheet(metadata_sheet.to_string()))?;
    let ticker_col =
        tickers
            .column_index(columns::TICKER)
            .ok_or_else(|| LoadError::MissingColumn {
                sheet: tickers.name.clone(),
                column: columns::TICKER.to_string(),
            })?;

    let mut symbols = Vec::with_capacity(tickers.len());
    let mut seen = HashSet::with_capacity(tickers.len());
    for row in 0..tickers.len() {
        let symbol = symbol_of(tickers.cell(row, ticker_col))
            .ok_or(LoadError::BlankSymbol { row: row + 1 })?;
        if !seen.insert(symbol.clone()) {
            return Err(LoadError::DuplicateSymbol(symbol));
        }
        symbols.push(symbol);
    }

    let mut histories = HashMap::with_capacity(symbols.len());
    for symbol in &symbols {
        let table = source
            .sheet(symbol)
            .ok_or_else(|| LoadError::MissingHistory {
                symbol: symbol.clone(),
            })?;
        debug!("History sheet '{}' has {} rows", symbol, table.len());
        histories.insert(symbol.clone(), table.clone());
    }

    info!(
        "Loaded {} tickers from workbook {}",
        symbols.len(),
        source.key()
    );
    Ok(RawDataset {
        tickers: tickers.clone(),
        symbols,
        histories,
    })
}

// 代码单元格转文本；空白与错误单元格视为空代码
fn symbol_of(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Text(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Cell::Number(n) => Some(n.to_string()),
        Cell::Bool(b) => Some(b.to_string()),
        Cell::DateTime(d) => Some(d.to_string()),
        Cell::Empty | Cell::Error(_) => None,
    }
}
