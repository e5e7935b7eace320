use tickerboard_core::workbook::entity::RawTable;
use tickerboard_core::workbook::port::WorkbookSource;

/// # Summary
/// 基于内存的工作簿实现，同时作为文件型数据源的读取结果容器。
///
/// # Invariants
/// - 工作表名称唯一，重复插入时后者替换前者并保留原位置。
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    // 缓存键
    key: String,
    // 按插入顺序排列的工作表
    sheets: Vec<RawTable>,
}

impl MemoryWorkbook {
    /// 创建空工作簿
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            sheets: Vec::new(),
        }
    }

    /// 插入或替换一张工作表
    pub fn insert(&mut self, table: RawTable) {
        match self.sheets.iter_mut().find(|s| s.name == table.name) {
            Some(existing) => *existing = table,
            None => self.sheets.push(table),
        }
    }

    /// 链式插入，便于测试构造
    pub fn with_sheet(mut self, table: RawTable) -> Self {
        self.insert(table);
        self
    }
}

impl WorkbookSource for MemoryWorkbook {
    fn key(&self) -> &str {
        &self.key
    }

    fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    fn sheet(&self, name: &str) -> Option<&RawTable> {
        self.sheets.iter().find(|s| s.name == name)
    }
}
