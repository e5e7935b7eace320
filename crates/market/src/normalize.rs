use std::collections::HashMap;

use tickerboard_core::market::entity::{
    Bar, Dataset, HistorySeries, RawDataset, SeriesOrder, TickerRecord, columns,
};
use tickerboard_core::market::error::{CellKind, NormalizeError};
use tickerboard_core::workbook::entity::{Cell, RawTable};
use tracing::{debug, warn};

use crate::coerce::{self, CellRef};

/// # Summary
/// 将原始数据集转换为类型化数据集。
///
/// # Logic
/// 1. 历史表按严格策略逐表转换：日期列按日在前解析，OHLCV 空单元格记为 NaN，
///    任一单元格无法解析时整张表被拒绝，只影响该代码。
/// 2. 元数据表按宽松策略转换，无法解析的单元格变为 None。
/// 3. 由同一轮构建出的历史序列提取开盘价轨迹，挂载到对应记录。
///
/// # Arguments
/// * `raw`: 加载器输出的原始数据集，不会被修改。
///
/// # Returns
/// 成功返回 `Dataset`，被拒绝的历史表记录在 `Dataset::rejected` 中；
/// 仅元数据表缺少必需列时返回错误。
pub fn normalize(raw: &RawDataset) -> Result<Dataset, NormalizeError> {
    let mut histories = HashMap::with_capacity(raw.symbols.len());
    let mut rejected = HashMap::new();
    for symbol in &raw.symbols {
        let outcome = raw
            .histories
            .get(symbol)
            .ok_or_else(|| NormalizeError::MissingHistory(symbol.clone()))
            .and_then(|table| history_series(symbol, table));
        match outcome {
            Ok(series) => {
                report_order(&series);
                histories.insert(symbol.clone(), series);
            }
            Err(e) => {
                warn!("History of {} rejected: {}", symbol, e);
                rejected.insert(symbol.clone(), e);
            }
        }
    }

    let tickers = ticker_records(&raw.tickers, &raw.symbols, &histories)?;
    debug!(
        "Normalized {} tickers, {} bars in total, {} histories rejected",
        tickers.len(),
        histories.values().map(|h| h.bars.len()).sum::<usize>(),
        rejected.len()
    );
    Ok(Dataset {
        tickers,
        histories,
        rejected,
    })
}

/// # Summary
/// 将类型化数据集还原为原始单元格形式，使规范化可以再次执行。
///
/// # Arguments
/// * `dataset`: 类型化数据集。
/// * `metadata_sheet`: 还原后元数据表的名称。
///
/// # Returns
/// 列名与加载器约定一致的 `RawDataset`；缺失值还原为空单元格。
/// 被拒绝的代码原始内容已不可得，还原为仅含表头的空历史表。
pub fn to_raw(dataset: &Dataset, metadata_sheet: &str) -> RawDataset {
    let mut header = vec![
        columns::TICKER.to_string(),
        columns::LAST_TRADE_TIME.to_string(),
    ];
    header.extend(columns::METADATA_NUMERIC.iter().map(|c| c.to_string()));
    let mut tickers = RawTable::new(metadata_sheet, header);
    for record in &dataset.tickers {
        let mut row = vec![
            Cell::text(record.symbol.clone()),
            record.last_trade_time.map_or(Cell::Empty, Cell::DateTime),
        ];
        row.extend(
            metadata_values(record)
                .into_iter()
                .map(|v| v.map_or(Cell::Empty, Cell::Number)),
        );
        tickers.push_row(row);
    }

    let mut histories = HashMap::with_capacity(dataset.histories.len());
    for (symbol, series) in &dataset.histories {
        let mut table = RawTable::new(symbol.clone(), history_header());
        for bar in &series.bars {
            table.push_row(vec![
                Cell::DateTime(bar.date),
                Cell::Number(bar.open),
                Cell::Number(bar.high),
                Cell::Number(bar.low),
                Cell::Number(bar.close),
                Cell::Number(bar.volume),
            ]);
        }
        histories.insert(symbol.clone(), table);
    }
    for symbol in dataset.rejected.keys() {
        histories.insert(symbol.clone(), RawTable::new(symbol.clone(), history_header()));
    }

    RawDataset {
        tickers,
        symbols: dataset.symbols().into_iter().map(str::to_string).collect(),
        histories,
    }
}

fn history_series(symbol: &str, table: &RawTable) -> Result<HistorySeries, NormalizeError> {
    let date_col = require_column(table, columns::DATE)?;
    let mut value_cols = [0usize; 5];
    for (slot, name) in value_cols.iter_mut().zip(columns::HISTORY_NUMERIC) {
        *slot = require_column(table, name)?;
    }

    let mut bars = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let cell = table.cell(row, date_col);
        let date = coerce::strict(
            coerce::date_time(cell),
            cell,
            CellRef {
                sheet: &table.name,
                row: row + 1,
                column: columns::DATE,
            },
            CellKind::DateTime,
        )?;

        let mut values = [0.0f64; 5];
        for ((value, col), name) in values
            .iter_mut()
            .zip(value_cols)
            .zip(columns::HISTORY_NUMERIC)
        {
            let cell = table.cell(row, col);
            *value = coerce::strict(
                coerce::gap_as_nan(coerce::number(cell)),
                cell,
                CellRef {
                    sheet: &table.name,
                    row: row + 1,
                    column: name,
                },
                CellKind::Number,
            )?;
        }
        let [open, high, low, close, volume] = values;
        bars.push(Bar {
            date,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    Ok(HistorySeries {
        symbol: symbol.to_string(),
        bars,
    })
}

fn ticker_records(
    table: &RawTable,
    symbols: &[String],
    histories: &HashMap<String, HistorySeries>,
) -> Result<Vec<TickerRecord>, NormalizeError> {
    let time_col = require_column(table, columns::LAST_TRADE_TIME)?;
    let mut value_cols = [0usize; 12];
    for (slot, name) in value_cols.iter_mut().zip(columns::METADATA_NUMERIC) {
        *slot = require_column(table, name)?;
    }

    let mut records = Vec::with_capacity(symbols.len());
    for (row, symbol) in symbols.iter().enumerate() {
        let values = value_cols.map(|col| coerce::permissive(coerce::number(table.cell(row, col))));
        let [
            last_price,
            previous_day_price,
            change,
            change_pct,
            volume,
            volume_avg,
            shares,
            day_high,
            day_low,
            market_cap,
            pe_ratio,
            eps,
        ] = values;

        records.push(TickerRecord {
            symbol: symbol.clone(),
            last_trade_time: coerce::permissive(coerce::date_time(table.cell(row, time_col))),
            last_price,
            previous_day_price,
            change,
            change_pct,
            volume,
            volume_avg,
            shares,
            day_high,
            day_low,
            market_cap,
            pe_ratio,
            eps,
            trajectory: histories.get(symbol).map(HistorySeries::opens).unwrap_or_default(),
        });
    }
    Ok(records)
}

fn history_header() -> Vec<String> {
    let mut header = vec![columns::DATE.to_string()];
    header.extend(columns::HISTORY_NUMERIC.iter().map(|c| c.to_string()));
    header
}

// 与 columns::METADATA_NUMERIC 同序
fn metadata_values(record: &TickerRecord) -> [Option<f64>; 12] {
    [
        record.last_price,
        record.previous_day_price,
        record.change,
        record.change_pct,
        record.volume,
        record.volume_avg,
        record.shares,
        record.day_high,
        record.day_low,
        record.market_cap,
        record.pe_ratio,
        record.eps,
    ]
}

fn require_column(table: &RawTable, column: &str) -> Result<usize, NormalizeError> {
    table
        .column_index(column)
        .ok_or_else(|| NormalizeError::MissingColumn {
            sheet: table.name.clone(),
            column: column.to_string(),
        })
}

// 不排序也不去重，只记录
fn report_order(series: &HistorySeries) {
    match series.order() {
        SeriesOrder::Chronological => {}
        SeriesOrder::Duplicated(at) => warn!(
            "History of {} has a duplicated date at bar {}, kept as provided",
            series.symbol, at
        ),
        SeriesOrder::Unsorted(at) => warn!(
            "History of {} goes back in time at bar {}, kept as provided",
            series.symbol, at
        ),
    }
}
