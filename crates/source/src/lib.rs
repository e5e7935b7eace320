//! # `tickerboard-source` - 工作簿数据源
//!
//! `WorkbookSource` 端口的具体实现：
//! - [`spreadsheet::SpreadsheetWorkbook`]: `.xlsx` / `.xlsm` / `.xls` / `.ods` 文件
//! - [`csv_dir::CsvDirectory`]: 每个 `.csv` 文件即一张工作表的目录
//! - [`memory::MemoryWorkbook`]: 纯内存工作簿

use std::path::Path;

use tickerboard_core::workbook::error::SourceError;
use tickerboard_core::workbook::port::WorkbookSource;

pub mod csv_dir;
pub mod memory;
pub mod spreadsheet;

/// # Summary
/// 按路径类型自动选择数据源实现并完成读取。
///
/// # Logic
/// 1. 路径为目录时按 CSV 目录读取。
/// 2. 否则按表格文件读取，由 calamine 根据扩展名识别格式。
///
/// # Arguments
/// * `path`: 工作簿文件或目录。
///
/// # Returns
/// 成功返回装箱的数据源。
pub fn open_workbook(path: impl AsRef<Path>) -> Result<Box<dyn WorkbookSource>, SourceError> {
    let path = path.as_ref();
    if path.is_dir() {
        Ok(Box::new(csv_dir::CsvDirectory::open(path)?))
    } else {
        Ok(Box::new(spreadsheet::SpreadsheetWorkbook::open(path)?))
    }
}
