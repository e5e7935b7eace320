//! 面向展示层的格式化工具，不承载任何业务逻辑。

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// 缺失值的展示文本
pub const MISSING: &str = "—";

const CURRENCY_PREFIX: &str = "$ ";
const PERCENT_SUFFIX: &str = " %";

/// # Summary
/// 货币格式：两位小数、千分位分隔、`$ ` 前缀，负号位于前缀之后。
///
/// # Logic
/// 1. 按浮点数的精确二进制值转为十进制，再按银行家舍入保留两位小数；
///    `2.675` 的二进制值略小于 2.675，因此显示为 `$ 2.67`。
/// 2. 缺失值、NaN、无穷以及超出十进制表示范围的值显示为 [`MISSING`]。
pub fn format_currency(value: impl Into<Option<f64>>) -> String {
    fixed_two(value.into()).map_or_else(
        || MISSING.to_string(),
        |s| format!("{}{}", CURRENCY_PREFIX, s),
    )
}

/// 百分比格式：两位小数、千分位分隔、` %` 后缀
pub fn format_percentage(value: impl Into<Option<f64>>) -> String {
    fixed_two(value.into()).map_or_else(
        || MISSING.to_string(),
        |s| format!("{}{}", s, PERCENT_SUFFIX),
    )
}

/// 向零截断后的整数格式，带千分位分隔
pub fn format_grouped(value: impl Into<Option<f64>>) -> String {
    value
        .into()
        .and_then(Decimal::from_f64_retain)
        .map(|d| unsigned_zero(d.trunc()))
        .map_or_else(|| MISSING.to_string(), |d| group_thousands(&d.to_string()))
}

/// # Summary
/// 为十进制数字文本的整数部分插入千分位逗号。
///
/// # Arguments
/// * `digits`: 形如 `-1234567.89` 的文本。
pub fn group_thousands(digits: &str) -> String {
    let (sign, unsigned) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

fn fixed_two(value: Option<f64>) -> Option<String> {
    let decimal = Decimal::from_f64_retain(value?)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    Some(group_thousands(&format!("{:.2}", unsigned_zero(decimal))))
}

// -0 与 -0.00 不带符号
fn unsigned_zero(decimal: Decimal) -> Decimal {
    if decimal.is_zero() { Decimal::ZERO } else { decimal }
}

/// # Summary
/// 涨跌幅的着色分类，恰好为零归为上涨。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeClass {
    Positive,
    Negative,
}

impl ChangeClass {
    /// 缺失值不着色
    pub fn of(change_pct: Option<f64>) -> Option<Self> {
        change_pct.map(|v| {
            if v < 0.0 {
                ChangeClass::Negative
            } else {
                ChangeClass::Positive
            }
        })
    }
}

/// 表格行的斑马纹分组，按从零开始的行位置奇偶划分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowBand {
    Even,
    Odd,
}

impl RowBand {
    pub fn of(index: usize) -> Self {
        if index % 2 == 1 {
            RowBand::Odd
        } else {
            RowBand::Even
        }
    }
}
