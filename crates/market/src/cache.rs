use std::sync::Arc;

use dashmap::DashMap;
use tickerboard_core::market::entity::Dataset;
use tickerboard_core::market::error::DashboardError;
use tickerboard_core::workbook::port::WorkbookSource;
use tracing::{debug, info};

use crate::build_dataset;

/// # Summary
/// 加载与规范化结果的记忆化缓存。
///
/// # Invariants
/// - 以 (数据源标识, 元数据表名) 为键，命中时返回同一个 `Arc<Dataset>`。
/// - 缓存值只读，调用方不得原地修改。
#[derive(Default)]
pub struct DatasetCache {
    entries: DashMap<(String, String), Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Summary
    /// 获取或构建数据集。
    ///
    /// # Logic
    /// 1. 命中则直接返回缓存的共享指针。
    /// 2. 未命中时在锁外完成构建，避免长时间持有分片锁。
    /// 3. 并发构建时保留先写入者的结果，保证所有调用方拿到同一实例。
    ///
    /// # Arguments
    /// * `source`: 工作簿数据源。
    /// * `metadata_sheet`: 元数据工作表名称。
    ///
    /// # Returns
    /// 构建失败时返回错误且不写入缓存。
    pub fn get_or_load(
        &self,
        source: &dyn WorkbookSource,
        metadata_sheet: &str,
    ) -> Result<Arc<Dataset>, DashboardError> {
        let key = (source.key().to_string(), metadata_sheet.to_string());
        if let Some(hit) = self.entries.get(&key) {
            debug!("Dataset cache hit for {}", key.0);
            return Ok(hit.value().clone());
        }

        let dataset = Arc::new(build_dataset(source, metadata_sheet)?);
        info!("Dataset cached for {}", key.0);
        Ok(self.entries.entry(key).or_insert(dataset).value().clone())
    }

    /// 丢弃某个数据源的全部缓存项
    pub fn invalidate(&self, source_key: &str) {
        self.entries.retain(|(key, _), _| key != source_key);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
