use crate::workbook::entity::RawTable;

/// # Summary
/// 多工作表表格数据源接口 (Port)。
///
/// # Invariants
/// - 实现者在构造时完成全部读取，之后只提供只读访问，不产生任何副作用。
/// - `key` 在进程生命周期内稳定，作为加载结果的缓存键。
pub trait WorkbookSource: Send + Sync {
    /// # Summary
    /// 数据源的稳定标识（通常是文件路径）。
    fn key(&self) -> &str;

    /// # Summary
    /// 按数据源中的原始顺序列出全部工作表名称。
    fn sheet_names(&self) -> Vec<&str>;

    /// # Summary
    /// 按名称获取工作表。
    ///
    /// # Arguments
    /// * `name`: 工作表名称，大小写敏感。
    ///
    /// # Returns
    /// 存在返回表引用，否则返回 None。
    fn sheet(&self, name: &str) -> Option<&RawTable>;
}
