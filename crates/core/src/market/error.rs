use serde::{Deserialize, Serialize};
use thiserror::Error;

/// # Summary
/// 加载阶段错误，任何一项都会使整个看板无法渲染。
/// 数据源本身的打开与读取错误由 `SourceError` 在构造数据源时报告。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug)]
pub enum LoadError {
    // 工作簿中缺少指定工作表
    #[error("Sheet '{0}' not found")]
    MissingSheet(String),
    // 工作表缺少必需列
    #[error("Column '{column}' not found in sheet '{sheet}'")]
    MissingColumn { sheet: String, column: String },
    // 元数据行的代码为空
    #[error("Blank ticker symbol at row {row}")]
    BlankSymbol { row: usize },
    // 元数据中代码重复
    #[error("Duplicate ticker symbol '{0}'")]
    DuplicateSymbol(String),
    // 元数据声明的代码没有同名历史表
    #[error("No history sheet for ticker '{symbol}'")]
    MissingHistory { symbol: String },
}

/// # Summary
/// 单元格目标类型，用于错误描述。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Number,
    DateTime,
}

impl std::fmt::Display for CellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellKind::Number => write!(f, "number"),
            CellKind::DateTime => write!(f, "date-time"),
        }
    }
}

/// # Summary
/// 类型转换阶段错误。仅严格策略（历史表）会产生单元格错误。
///
/// # Invariants
/// - 历史表上的错误只影响对应代码，随数据集保存，因此可克隆与序列化。
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalizeError {
    // 工作表缺少必需列
    #[error("Column '{column}' not found in sheet '{sheet}'")]
    MissingColumn { sheet: String, column: String },
    // 历史表单元格无法转换，`row` 从 1 开始且不含表头
    #[error("Cannot coerce {value} to {kind} in sheet '{sheet}', row {row}, column '{column}'")]
    Cell {
        sheet: String,
        row: usize,
        column: String,
        kind: CellKind,
        value: String,
    },
    // 原始数据集缺少元数据声明的历史表
    #[error("No history table for ticker '{0}'")]
    MissingHistory(String),
}

/// # Summary
/// 看板服务错误，汇总加载、转换与请求参数问题。
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    // 请求的代码不在数据集中
    #[error("Unknown ticker '{0}'")]
    UnknownTicker(String),
}
