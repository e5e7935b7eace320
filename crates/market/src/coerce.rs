//! 单元格到数值与日期时间的转换规则。
//!
//! 两种策略按列组显式选择：
//! - [`permissive`]: 元数据列，失败或缺失都得到 `None`，从不报错；
//! - [`strict`]: 历史列，无法解析的内容是该代码的致命错误；
//!   数值列的空单元格先经 [`gap_as_nan`] 记为 NaN，由聚合阶段跳过。

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use tickerboard_core::market::error::{CellKind, NormalizeError};
use tickerboard_core::workbook::entity::Cell;

/// 单元格被拒绝的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    // 空单元格
    Missing,
    // 内容无法解释为目标类型
    Invalid,
}

/// 严格策略报错时定位单元格所需的信息，`row` 从 1 开始且不含表头
#[derive(Debug, Clone, Copy)]
pub struct CellRef<'a> {
    pub sheet: &'a str,
    pub row: usize,
    pub column: &'a str,
}

// 以四位年份开头的文本按年在前解析，其余一律按日在前解析；两位年份格式必须排在四位年份之前
const YEAR_FIRST_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const YEAR_FIRST_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

const DAY_FIRST_DATE_TIME_FORMATS: [&str; 12] = [
    "%d/%m/%y %H:%M:%S%.f",
    "%d/%m/%y %H:%M",
    "%d/%m/%Y %H:%M:%S%.f",
    "%d/%m/%Y %H:%M",
    "%d-%m-%y %H:%M:%S%.f",
    "%d-%m-%y %H:%M",
    "%d-%m-%Y %H:%M:%S%.f",
    "%d-%m-%Y %H:%M",
    "%d.%m.%y %H:%M:%S%.f",
    "%d.%m.%y %H:%M",
    "%d.%m.%Y %H:%M:%S%.f",
    "%d.%m.%Y %H:%M",
];

const DAY_FIRST_DATE_FORMATS: [&str; 6] = [
    "%d/%m/%y",
    "%d/%m/%Y",
    "%d-%m-%y",
    "%d-%m-%Y",
    "%d.%m.%y",
    "%d.%m.%Y",
];

// 表格序列日期的纪元 (1900 日期系统)
const SERIAL_EPOCH: (i32, u32, u32) = (1899, 12, 30);
// 9999-12-31 对应的序列号上界
const SERIAL_MAX: f64 = 2_958_466.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// # Summary
/// 将单元格转换为浮点数。
///
/// # Logic
/// 1. 数值原样返回，布尔转为 1/0。
/// 2. 文本去除首尾空白后按浮点字面量解析 (接受 `NaN`、`inf`)，千分位等格式视为无效。
/// 3. 空单元格为缺失，日期与错误单元格为无效。
pub fn number(cell: &Cell) -> Result<f64, Rejection> {
    match cell {
        Cell::Number(n) => Ok(*n),
        Cell::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Cell::Text(s) => s.trim().parse::<f64>().map_err(|_| Rejection::Invalid),
        Cell::Empty => Err(Rejection::Missing),
        Cell::DateTime(_) | Cell::Error(_) => Err(Rejection::Invalid),
    }
}

/// # Summary
/// 将单元格按“日在前”规则转换为日期时间。
///
/// # Logic
/// 1. 原生日期时间原样返回。
/// 2. 数值按表格序列日期解释，小数部分为当日时间。
/// 3. 文本先尝试 RFC 3339，再依次尝试带时间与纯日期的格式。
/// 4. 空单元格为缺失，其余为无效。
pub fn date_time(cell: &Cell) -> Result<NaiveDateTime, Rejection> {
    match cell {
        Cell::DateTime(d) => Ok(*d),
        Cell::Number(n) => from_serial(*n).ok_or(Rejection::Invalid),
        Cell::Text(s) => parse_day_first(s.trim()).ok_or(Rejection::Invalid),
        Cell::Empty => Err(Rejection::Missing),
        Cell::Bool(_) | Cell::Error(_) => Err(Rejection::Invalid),
    }
}

/// 宽松策略：任何拒绝都变为 `None`
pub fn permissive<T>(result: Result<T, Rejection>) -> Option<T> {
    result.ok()
}

/// 历史数值列的空缺：空单元格记为 NaN，无效内容仍被拒绝
pub fn gap_as_nan(result: Result<f64, Rejection>) -> Result<f64, Rejection> {
    match result {
        Err(Rejection::Missing) => Ok(f64::NAN),
        other => other,
    }
}

/// # Summary
/// 严格策略：任何拒绝都转为携带定位信息的 `NormalizeError::Cell`。
///
/// # Arguments
/// * `result`: 转换结果。
/// * `cell`: 原始单元格，用于错误描述。
/// * `at`: 单元格位置。
/// * `kind`: 目标类型。
pub fn strict<T>(
    result: Result<T, Rejection>,
    cell: &Cell,
    at: CellRef<'_>,
    kind: CellKind,
) -> Result<T, NormalizeError> {
    result.map_err(|_| NormalizeError::Cell {
        sheet: at.sheet.to_string(),
        row: at.row,
        column: at.column.to_string(),
        kind,
        value: cell.to_string(),
    })
}

fn parse_day_first(s: &str) -> Option<NaiveDateTime> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    if is_year_first(s) {
        parse_with(s, &YEAR_FIRST_DATE_TIME_FORMATS, &YEAR_FIRST_DATE_FORMATS)
    } else {
        parse_with(s, &DAY_FIRST_DATE_TIME_FORMATS, &DAY_FIRST_DATE_FORMATS)
    }
}

fn parse_with(s: &str, date_times: &[&str], dates: &[&str]) -> Option<NaiveDateTime> {
    date_times
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            dates
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

// `%Y` 接受任意位数，必须先确认四位年份，否则 "13-10-26" 会被读成公元 13 年
fn is_year_first(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() > 4 && bytes[..4].iter().all(u8::is_ascii_digit) && matches!(bytes[4], b'-' | b'/')
}

#[allow(clippy::cast_possible_truncation)]
fn from_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(0.0..SERIAL_MAX).contains(&serial) {
        return None;
    }
    let (y, m, d) = SERIAL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?.and_hms_opt(0, 0, 0)?;
    // 上面的范围检查保证毫秒数落在 i64 内
    let millis = (serial * MILLIS_PER_DAY).round() as i64;
    epoch.checked_add_signed(TimeDelta::try_milliseconds(millis)?)
}
