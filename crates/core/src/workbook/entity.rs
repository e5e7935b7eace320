use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

static EMPTY_CELL: Cell = Cell::Empty;

/// # Summary
/// 工作簿中单个单元格的原始值，尚未按列语义进行类型转换。
///
/// # Invariants
/// - 空字符串统一表示为 `Empty`，不会出现 `Text("")`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    // 空单元格
    Empty,
    // 文本
    Text(String),
    // 数值 (整数单元格同样落在此处)
    Number(f64),
    // 布尔
    Bool(bool),
    // 表格原生的日期时间
    DateTime(NaiveDateTime),
    // 公式错误等 (例如 #N/A、#DIV/0!)
    Error(String),
}

impl Cell {
    /// 由文本构造单元格，空串视为空单元格
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }

    /// 是否为空单元格
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Empty => write!(f, "<empty>"),
            Cell::Text(s) => write!(f, "{:?}", s),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::DateTime(d) => write!(f, "{}", d),
            Cell::Error(e) => write!(f, "{}", e),
        }
    }
}

/// # Summary
/// 单张工作表的原始内容：表名、表头及数据行。
///
/// # Invariants
/// - 首行作为表头，不计入 `rows`。
/// - 数据行长度可短于表头，缺失部分按 `Cell::Empty` 读取。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    // 工作表名称
    pub name: String,
    // 表头列名
    pub header: Vec<String>,
    // 数据行
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// 创建一张只有表头的空表
    pub fn new(name: impl Into<String>, header: Vec<String>) -> Self {
        Self {
            name: name.into(),
            header,
            rows: Vec::new(),
        }
    }

    /// 追加一行数据
    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// # Summary
    /// 按列名查找列下标。
    ///
    /// # Logic
    /// 1. 表头与查询名均去除首尾空白后精确比较。
    /// 2. 同名列取第一个。
    ///
    /// # Arguments
    /// * `column`: 列名。
    ///
    /// # Returns
    /// 找到返回列下标，否则返回 None。
    pub fn column_index(&self, column: &str) -> Option<usize> {
        let wanted = column.trim();
        self.header.iter().position(|h| h.trim() == wanted)
    }

    /// 读取指定位置的单元格，越界时返回空单元格
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// 数据行数
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 是否没有任何数据行
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_lookup_trims_header() {
        let mut table = RawTable::new("AAA", vec![" Date".into(), "Open ".into()]);
        table.push_row(vec![Cell::text("01/02/2026")]);

        assert_eq!(table.column_index("Open"), Some(1));
        assert_eq!(table.column_index("Close"), None);
        assert_eq!(table.cell(0, 0), &Cell::Text("01/02/2026".into()));
        // 短行与越界行都按空单元格读取
        assert!(table.cell(0, 1).is_empty());
        assert!(table.cell(5, 0).is_empty());
    }

    #[test]
    fn test_empty_text_is_empty_cell() {
        assert_eq!(Cell::text(""), Cell::Empty);
        assert_eq!(Cell::text("N/A"), Cell::Text("N/A".into()));
    }
}
