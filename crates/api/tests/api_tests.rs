use std::sync::Arc;

use chrono::{Days, NaiveDate};
use reqwest::StatusCode;
use serde_json::Value;
use tickerboard_api::server::{AppState, build_router};
use tickerboard_api::types::{ApiResponse, ChartResponse, MetricsResponse, PeriodResponse, TickerRowResponse};
use tickerboard_core::common::time::FixedClock;
use tickerboard_core::market::entity::columns;
use tickerboard_core::workbook::entity::{Cell, RawTable};
use tickerboard_market::dashboard::Dashboard;
use tickerboard_source::memory::MemoryWorkbook;
use tokio::net::TcpListener;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn metadata(rows: &[(&str, &str, &str)]) -> RawTable {
    let mut header = vec![columns::TICKER.to_string(), columns::LAST_TRADE_TIME.to_string()];
    header.extend(columns::METADATA_NUMERIC.iter().map(|c| c.to_string()));
    let mut table = RawTable::new("ticker", header);
    for (symbol, change_pct, market_cap) in rows {
        let mut row = vec![Cell::text(*symbol), Cell::text("16/10/2026 15:30")];
        for column in columns::METADATA_NUMERIC {
            row.push(match column {
                columns::CHANGE_PCT => Cell::text(*change_pct),
                columns::MARKET_CAP => Cell::text(*market_cap),
                columns::LAST_PRICE => Cell::Number(1234.567),
                _ => Cell::Number(1.0),
            });
        }
        table.push_row(row);
    }
    table
}

fn history(symbol: &str, count: u32) -> RawTable {
    let mut header = vec![columns::DATE.to_string()];
    header.extend(columns::HISTORY_NUMERIC.iter().map(|c| c.to_string()));
    let mut table = RawTable::new(symbol, header);
    for i in 0..count {
        let date = today() - Days::new(u64::from(count - 1 - i));
        let v = f64::from(i);
        table.push_row(vec![
            Cell::text(date.format("%d/%m/%Y").to_string()),
            Cell::Number(v),
            Cell::Number(v + 2.0),
            Cell::Number(v - 1.0),
            Cell::Number(v + 1.0),
            Cell::Number(1_000_000.0 + v),
        ]);
    }
    table
}

// 帮助函数：在随机端口启动测试服务器
async fn spawn_test_server() -> String {
    let workbook = MemoryWorkbook::new("memory://api")
        .with_sheet(metadata(&[("AAA", "-1.5", "2500000000"), ("BBB", "0", "N/A")]))
        .with_sheet(history("AAA", 120))
        .with_sheet(history("BBB", 5));
    spawn_server(workbook).await
}

async fn spawn_server(workbook: MemoryWorkbook) -> String {
    tracing_subscriber::fmt()
        .with_env_filter("debug")
        .try_init()
        .ok();

    let clock = Arc::new(FixedClock::new(today()));
    let dashboard = Dashboard::load(&workbook, "ticker", clock).unwrap();
    let state = AppState {
        dashboard: Arc::new(dashboard),
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

#[tokio::test]
async fn test_overview_rows() {
    let base_url = spawn_test_server().await;
    let res = reqwest::get(format!("{}/api/v1/tickers", base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: ApiResponse<Vec<TickerRowResponse>> = res.json().await.unwrap();
    assert!(body.success);
    let rows = body.data.unwrap();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].symbol, "AAA");
    assert_eq!(rows[0].last_price_display, "$ 1,234.57");
    assert_eq!(rows[0].change_pct_display, "-1.50 %");
    assert_eq!(rows[0].change_class.as_deref(), Some("negative"));
    assert_eq!(rows[0].row_band, "even");
    assert_eq!(rows[0].trajectory.len(), 120);
    assert_eq!(rows[0].last_trade_time.as_deref(), Some("2026-10-16T15:30:00"));

    assert_eq!(rows[1].change_class.as_deref(), Some("positive"));
    assert_eq!(rows[1].row_band, "odd");
    assert_eq!(rows[1].market_cap, None);
}

#[tokio::test]
async fn test_symbols_and_periods() {
    let base_url = spawn_test_server().await;

    let body: ApiResponse<Vec<String>> = reqwest::get(format!("{}/api/v1/symbols", base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body.data.unwrap(), vec!["AAA", "BBB"]);

    let body: ApiResponse<Vec<PeriodResponse>> = reqwest::get(format!("{}/api/v1/periods", base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let periods = body.data.unwrap();
    let names: Vec<_> = periods.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Week", "Month", "Trimester", "Year"]);
    let days: Vec<_> = periods.iter().map(|p| p.days).collect();
    assert_eq!(days, vec![7, 31, 90, 365]);
    assert!(periods.iter().filter(|p| p.default).all(|p| p.name == "Trimester"));
}

#[tokio::test]
async fn test_history_chart() {
    let base_url = spawn_test_server().await;
    let res = reqwest::get(format!("{}/api/v1/tickers/AAA/history?period=week", base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: ApiResponse<ChartResponse> = res.json().await.unwrap();
    let chart = body.data.unwrap();
    assert_eq!(chart.period, "Week");
    assert_eq!(chart.today, "2026-10-16");
    assert_eq!(chart.bars.len(), 8);
    assert_eq!(chart.bars.last().unwrap().date, "2026-10-16T00:00:00");
    assert_eq!(chart.bars.first().unwrap().date, "2026-10-09T00:00:00");

    // 缺省周期为 Trimester
    let body: ApiResponse<ChartResponse> =
        reqwest::get(format!("{}/api/v1/tickers/AAA/history", base_url))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
    let chart = body.data.unwrap();
    assert_eq!(chart.period, "Trimester");
    assert_eq!(chart.bars.len(), 91);
}

#[tokio::test]
async fn test_metrics() {
    let base_url = spawn_test_server().await;
    let body: ApiResponse<MetricsResponse> =
        reqwest::get(format!("{}/api/v1/tickers/BBB/metrics?period=Year", base_url))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
    let metrics = body.data.unwrap();
    assert_eq!(metrics.bar_count, 5);
    assert_eq!(metrics.mean_volume_truncated, Some(1_000_002));

    let by_label = |label: &str| {
        metrics
            .metrics
            .iter()
            .find(|m| m.label == label)
            .unwrap()
            .clone()
    };
    assert_eq!(by_label("Lowest Volume Day Trade").display, "1,000,000");
    assert_eq!(by_label("Highest Close Price").display, "$ 5.00");
    assert_eq!(by_label("Average Daily Volume").display, "1,000,002");
    let cap = by_label("Current Market Cap");
    assert_eq!(cap.value, None);
    assert_eq!(cap.display, "—");
}

#[tokio::test]
async fn test_error_responses() {
    let base_url = spawn_test_server().await;

    let res = reqwest::get(format!("{}/api/v1/tickers/ZZZ/metrics", base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], Value::Bool(false));
    assert!(body["error"].as_str().unwrap().contains("ZZZ"));

    let res = reqwest::get(format!("{}/api/v1/tickers/AAA/history?period=Decade", base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], Value::Bool(false));
    assert_eq!(body["error"], Value::String("Unknown period: Decade".into()));
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let base_url = spawn_test_server().await;
    let doc: Value = reqwest::get(format!("{}/api-docs/openapi.json", base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let paths = doc["paths"].as_object().unwrap();
    for path in [
        "/api/v1/tickers",
        "/api/v1/symbols",
        "/api/v1/periods",
        "/api/v1/tickers/{symbol}/history",
        "/api/v1/tickers/{symbol}/metrics",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
}

#[tokio::test]
async fn test_rejected_history_only_affects_its_ticker() {
    let mut bad = history("BBB", 5);
    bad.rows[2][4] = Cell::text("N/A");
    let base_url = spawn_server(
        MemoryWorkbook::new("memory://api-bad")
            .with_sheet(metadata(&[("AAA", "1", "10"), ("BBB", "1", "10")]))
            .with_sheet(history("AAA", 10))
            .with_sheet(bad),
    )
    .await;

    let rows: ApiResponse<Vec<TickerRowResponse>> = reqwest::get(format!("{}/api/v1/tickers", base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let rows = rows.data.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows[1].trajectory.is_empty());

    let res = reqwest::get(format!("{}/api/v1/tickers/AAA/history?period=Week", base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = reqwest::get(format!("{}/api/v1/tickers/BBB/history?period=Week", base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], Value::Bool(false));
    assert!(body["error"].as_str().unwrap().contains("column 'Close'"));

    let res = reqwest::get(format!("{}/api/v1/tickers/BBB/metrics", base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
