//! # `tickerboard-api` - HTTP API 网关
//!
//! 看板的展示适配层，以 JSON 形式对外暴露三个读模型：
//! 概览表、图表序列与周期指标。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。

pub mod error;
pub mod routes;
pub mod server;
pub mod types;
