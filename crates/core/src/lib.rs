//! # `tickerboard-core` - 领域核心
//!
//! 定义行情看板的实体、错误与端口 (Port)，不包含任何具体实现。
//!
//! ## 模块划分
//! - `common`: 回看周期与时钟端口
//! - `workbook`: 原始工作簿单元格、表与数据源端口
//! - `market`: 类型化后的行情实体与管道错误
//! - `config`: 全局应用配置

pub mod common;
pub mod config;
pub mod market;
pub mod workbook;
