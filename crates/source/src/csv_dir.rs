use std::path::{Path, PathBuf};

use tickerboard_core::workbook::entity::{Cell, RawTable};
use tickerboard_core::workbook::error::SourceError;
use tickerboard_core::workbook::port::WorkbookSource;
use tracing::{debug, info};

use crate::memory::MemoryWorkbook;

/// # Summary
/// CSV 目录数据源：目录下每个 `.csv` 文件是一张工作表，表名取文件名主干。
///
/// # Invariants
/// - 所有字段按文本读取，类型转换完全交给规范化器。
/// - 工作表按文件名排序，保证顺序稳定。
pub struct CsvDirectory {
    inner: MemoryWorkbook,
}

impl CsvDirectory {
    /// # Summary
    /// 读取目录下的全部 CSV 文件。
    ///
    /// # Logic
    /// 1. 枚举目录，筛选扩展名为 csv (忽略大小写) 的文件并排序。
    /// 2. 逐个解析，首行为表头，允许行长度不一致。
    /// 3. 丢弃全部为空的数据行。
    ///
    /// # Arguments
    /// * `dir`: 目录路径。
    ///
    /// # Returns
    /// 成功返回数据源实例。
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, SourceError> {
        let dir = dir.as_ref();
        let key = dir.display().to_string();
        let entries = std::fs::read_dir(dir).map_err(|e| SourceError::Open {
            path: key.clone(),
            message: e.to_string(),
        })?;

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let is_csv = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if path.is_file() && is_csv {
                files.push(path);
            }
        }
        files.sort();

        let mut inner = MemoryWorkbook::new(key.clone());
        for path in files {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let table = read_sheet(name, &path)?;
            debug!("Read CSV sheet '{}' with {} rows", name, table.len());
            inner.insert(table);
        }

        info!("CSV workbook {} opened", key);
        Ok(Self { inner })
    }
}

impl WorkbookSource for CsvDirectory {
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

fn read_sheet(name: &str, path: &Path) -> Result<RawTable, SourceError> {
    let sheet_error = |e: csv::Error| SourceError::Sheet {
        sheet: name.to_string(),
        message: e.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(sheet_error)?;

    let header = reader
        .headers()
        .map_err(sheet_error)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut table = RawTable::new(name, header);
    for record in reader.records() {
        let record = record.map_err(sheet_error)?;
        let cells: Vec<Cell> = record.iter().map(Cell::text).collect();
        if cells.iter().all(Cell::is_empty) {
            continue;
        }
        table.push_row(cells);
    }
    Ok(table)
}
