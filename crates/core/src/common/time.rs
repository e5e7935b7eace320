use chrono::NaiveDate;
use std::sync::RwLock;

/// # Summary
/// 日历时钟接口，用于隔离物理系统时钟。
/// 周期过滤所依赖的“今天”必须通过此接口获取，以保证测试可确定。
pub trait Clock: Send + Sync {
    /// 获取当前的日历日期
    fn today(&self) -> NaiveDate;
}

/// # Summary
/// 读取本地系统时间的真实时钟。
pub struct SystemClock;

impl Clock for SystemClock {
    #[allow(clippy::disallowed_methods)]
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// # Summary
/// 固定日期时钟，允许测试或回放场景主动拨动日期。
///
/// # Invariants
/// - 并发安全：内部利用 `RwLock` 提供多线程读写。
/// - 锁中毒时沿用中毒前写入的日期。
pub struct FixedClock {
    current_date: RwLock<NaiveDate>,
}

impl FixedClock {
    /// 使用指定日期创建固定时钟
    pub fn new(date: NaiveDate) -> Self {
        Self {
            current_date: RwLock::new(date),
        }
    }

    /// 强制修改时钟的当前日期
    pub fn set_date(&self, date: NaiveDate) {
        let mut guard = self
            .current_date
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = date;
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self
            .current_date
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
