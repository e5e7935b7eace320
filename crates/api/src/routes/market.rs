//! # 行情看板路由控制器
//!
//! 实现 `/api/v1` 路径下的只读接口，每次请求都基于看板时钟的当前日期重新过滤与聚合。

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tickerboard_core::common::PeriodWindow;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiResponse, ChartResponse, MetricsResponse, PeriodResponse, TickerRowResponse};

/// 周期查询参数
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PeriodQuery {
    /// 周期名称 (Week / Month / Trimester / Year，不区分大小写)，缺省为 Trimester
    pub period: Option<String>,
}

impl PeriodQuery {
    fn resolve(&self) -> Result<PeriodWindow, ApiError> {
        match &self.period {
            Some(name) => name.parse().map_err(ApiError::BadRequest),
            None => Ok(PeriodWindow::default()),
        }
    }
}

/// 获取概览表
///
/// 按元数据行序返回全部证券，附带格式化文本、涨跌着色与斑马纹分组。
#[utoipa::path(
    get,
    path = "/api/v1/tickers",
    tag = "行情 (Market)",
    responses(
        (status = 200, description = "概览表获取成功", body = ApiResponse<Vec<TickerRowResponse>>)
    )
)]
pub async fn list_tickers(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TickerRowResponse>>>, ApiError> {
    let rows = state
        .dashboard
        .overview()
        .iter()
        .enumerate()
        .map(|(i, record)| TickerRowResponse::from_record(i, record))
        .collect();
    Ok(Json(ApiResponse::ok(rows)))
}

/// 获取可选证券代码
#[utoipa::path(
    get,
    path = "/api/v1/symbols",
    tag = "行情 (Market)",
    responses(
        (status = 200, description = "代码列表获取成功", body = ApiResponse<Vec<String>>)
    )
)]
pub async fn list_symbols(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let symbols = state
        .dashboard
        .symbols()
        .into_iter()
        .map(str::to_string)
        .collect();
    Ok(Json(ApiResponse::ok(symbols)))
}

/// 获取可选周期
#[utoipa::path(
    get,
    path = "/api/v1/periods",
    tag = "行情 (Market)",
    responses(
        (status = 200, description = "周期列表获取成功", body = ApiResponse<Vec<PeriodResponse>>)
    )
)]
pub async fn list_periods() -> Result<Json<ApiResponse<Vec<PeriodResponse>>>, ApiError> {
    let periods = PeriodWindow::ALL
        .into_iter()
        .map(PeriodResponse::from)
        .collect();
    Ok(Json(ApiResponse::ok(periods)))
}

/// 获取周期内的图表序列
///
/// 返回 `[today - days, today]` 闭区间内的日线，供 K 线与成交量双面板图表使用。
#[utoipa::path(
    get,
    path = "/api/v1/tickers/{symbol}/history",
    tag = "行情 (Market)",
    params(
        ("symbol" = String, Path, description = "证券代码"),
        PeriodQuery
    ),
    responses(
        (status = 200, description = "图表序列获取成功", body = ApiResponse<ChartResponse>),
        (status = 400, description = "周期名称非法"),
        (status = 404, description = "证券代码不存在"),
        (status = 422, description = "该代码的历史表含无法解析的单元格")
    )
)]
pub async fn get_history(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<ApiResponse<ChartResponse>>, ApiError> {
    let period = query.resolve()?;
    let view = state.dashboard.view(&symbol, period)?;
    Ok(Json(ApiResponse::ok(ChartResponse::from(&view))))
}

/// 获取周期指标
///
/// 窗口为空时各统计量为 null，展示文本为 `—`；市值始终取自元数据。
#[utoipa::path(
    get,
    path = "/api/v1/tickers/{symbol}/metrics",
    tag = "行情 (Market)",
    params(
        ("symbol" = String, Path, description = "证券代码"),
        PeriodQuery
    ),
    responses(
        (status = 200, description = "指标获取成功", body = ApiResponse<MetricsResponse>),
        (status = 400, description = "周期名称非法"),
        (status = 404, description = "证券代码不存在"),
        (status = 422, description = "该代码的历史表含无法解析的单元格")
    )
)]
pub async fn get_metrics(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<ApiResponse<MetricsResponse>>, ApiError> {
    let period = query.resolve()?;
    let view = state.dashboard.view(&symbol, period)?;
    tracing::debug!("Metrics for {} over {}: {} bars", symbol, period, view.bars.len());
    Ok(Json(ApiResponse::ok(MetricsResponse::from(&view))))
}
