use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use tickerboard_core::workbook::entity::{Cell, RawTable};
use tickerboard_core::workbook::error::SourceError;
use tickerboard_core::workbook::port::WorkbookSource;
use tracing::{debug, info};

use crate::memory::MemoryWorkbook;

/// # Summary
/// 表格文件数据源，打开时一次性读取全部工作表。
///
/// # Invariants
/// - 每张表的首行作为表头。
/// - 全部为空的数据行被丢弃。
pub struct SpreadsheetWorkbook {
    inner: MemoryWorkbook,
}

impl SpreadsheetWorkbook {
    /// # Summary
    /// 打开并读取表格文件。
    ///
    /// # Logic
    /// 1. 由 calamine 按扩展名识别 xlsx/xls/ods 格式。
    /// 2. 逐张读取工作表区域并转换为 `RawTable`。
    ///
    /// # Arguments
    /// * `path`: 文件路径。
    ///
    /// # Returns
    /// 成功返回数据源实例，文件不可读或格式不支持时返回 `SourceError`。
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let key = path.display().to_string();
        let mut workbook = open_workbook_auto(path).map_err(|e| SourceError::Open {
            path: key.clone(),
            message: e.to_string(),
        })?;

        let mut inner = MemoryWorkbook::new(key.clone());
        for name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| SourceError::Sheet {
                    sheet: name.clone(),
                    message: e.to_string(),
                })?;
            let table = range_to_table(&name, &range);
            debug!("Read sheet '{}' with {} rows", name, table.len());
            inner.insert(table);
        }

        info!("Workbook {} opened", key);
        Ok(Self { inner })
    }
}

impl WorkbookSource for SpreadsheetWorkbook {
    fn key(&self) -> &str {
        self.inner.key()
    }

    fn sheet_names(&self) -> Vec<&str> {
        self.inner.sheet_names()
    }

    fn sheet(&self, name: &str) -> Option<&RawTable> {
        self.inner.sheet(name)
    }
}

fn range_to_table(name: &str, range: &Range<Data>) -> RawTable {
    let mut rows = range.rows();
    let header = rows
        .next()
        .map(|r| r.iter().map(|d| d.to_string()).collect())
        .unwrap_or_default();

    let mut table = RawTable::new(name, header);
    for row in rows {
        let cells: Vec<Cell> = row.iter().map(to_cell).collect();
        if cells.iter().all(Cell::is_empty) {
            continue;
        }
        table.push_row(cells);
    }
    table
}

/// 原生日期转为 `DateTime`，超出 chrono 表示范围时退回序列号
#[allow(clippy::cast_precision_loss)]
fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map_or(Cell::Number(dt.as_f64()), Cell::DateTime),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::text(s.clone()),
        Data::Error(e) => Cell::Error(e.to_string()),
    }
}
