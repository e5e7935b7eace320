use thiserror::Error;

/// # Summary
/// 工作簿数据源错误枚举，处理文件打开、读取与解析失败。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug)]
pub enum SourceError {
    // 文件或目录无法打开
    #[error("Cannot open workbook '{path}': {message}")]
    Open { path: String, message: String },
    // 单张工作表读取失败
    #[error("Cannot read sheet '{sheet}': {message}")]
    Sheet { sheet: String, message: String },
    // 底层 I/O 错误
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
