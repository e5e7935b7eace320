mod common;

use chrono::NaiveDate;
use common::{sample_workbook, today};
use proptest::prelude::*;
use tickerboard_core::common::PeriodWindow;
use tickerboard_core::market::entity::{Bar, TickerRecord};
use tickerboard_market::aggregate::summarize;
use tickerboard_market::build_dataset;
use tickerboard_market::filter::filter_bars;

fn record(market_cap: Option<f64>) -> TickerRecord {
    TickerRecord {
        symbol: "AAA".into(),
        last_trade_time: None,
        last_price: None,
        previous_day_price: None,
        change: None,
        change_pct: None,
        volume: None,
        volume_avg: None,
        shares: None,
        day_high: None,
        day_low: None,
        market_cap,
        pe_ratio: None,
        eps: None,
        trajectory: Vec::new(),
    }
}

fn bar(close: f64, volume: f64) -> Bar {
    Bar {
        date: NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
        open: close,
        high: close,
        low: close,
        close,
        volume,
    }
}

#[test]
fn test_summary_over_window() {
    let bars = vec![bar(10.0, 300.0), bar(12.5, 100.0), bar(11.0, 200.0)];
    let metrics = summarize(&bars, &record(Some(5.0e9)));

    assert_eq!(metrics.bar_count, 3);
    assert_eq!(metrics.min_volume, Some(100.0));
    assert_eq!(metrics.max_volume, Some(300.0));
    assert_eq!(metrics.min_close, Some(10.0));
    assert_eq!(metrics.max_close, Some(12.5));
    assert_eq!(metrics.mean_volume, Some(200.0));
    assert_eq!(metrics.market_cap, Some(5.0e9));
}

#[test]
fn test_mean_volume_is_truncated_for_display() {
    let bars = vec![bar(1.0, 100.0), bar(1.0, 101.0), bar(1.0, 101.0)];
    let metrics = summarize(&bars, &record(None));
    assert_eq!(metrics.mean_volume_truncated(), Some(100));
}

#[test]
fn test_empty_window_yields_no_statistics() {
    let metrics = summarize(&[], &record(Some(42.0)));
    assert_eq!(metrics.bar_count, 0);
    assert_eq!(metrics.min_volume, None);
    assert_eq!(metrics.max_volume, None);
    assert_eq!(metrics.min_close, None);
    assert_eq!(metrics.max_close, None);
    assert_eq!(metrics.mean_volume, None);
    assert_eq!(metrics.mean_volume_truncated(), None);
    // 市值与窗口无关
    assert_eq!(metrics.market_cap, Some(42.0));
}

#[test]
fn test_nan_observations_are_skipped() {
    let bars = vec![bar(f64::NAN, 10.0), bar(3.0, f64::NAN), bar(1.0, 30.0)];
    let metrics = summarize(&bars, &record(None));

    assert_eq!(metrics.bar_count, 3);
    assert_eq!(metrics.min_close, Some(1.0));
    assert_eq!(metrics.max_close, Some(3.0));
    assert_eq!(metrics.min_volume, Some(10.0));
    assert_eq!(metrics.max_volume, Some(30.0));
    assert_eq!(metrics.mean_volume, Some(20.0));

    let all_nan = vec![bar(f64::NAN, f64::NAN)];
    let metrics = summarize(&all_nan, &record(None));
    assert_eq!(metrics.min_close, None);
    assert_eq!(metrics.mean_volume, None);
}

#[test]
fn test_market_cap_comes_from_record_not_window() {
    let dataset = build_dataset(&sample_workbook(), "ticker").unwrap();
    let record = dataset.record("BBB").unwrap();
    let bars = filter_bars(
        &dataset.history("BBB").unwrap().bars,
        today(),
        PeriodWindow::Week,
    );
    let metrics = summarize(&bars, record);

    assert_eq!(metrics.market_cap, record.market_cap);
    assert_eq!(metrics.bar_count, 8);
    // BBB: close = 100 + i，volume = 1000 + 10 * i，i 取 2..=9
    assert_eq!(metrics.min_close, Some(102.0));
    assert_eq!(metrics.max_close, Some(109.0));
    assert_eq!(metrics.mean_volume, Some(1055.0));
}

proptest! {
    #[test]
    fn prop_min_le_mean_le_max(
        samples in prop::collection::vec((-1.0e12f64..1.0e12, 0.0f64..1.0e15), 1..300),
    ) {
        let bars: Vec<Bar> = samples.into_iter().map(|(c, v)| bar(c, v)).collect();
        let metrics = summarize(&bars, &record(None));

        let (min_v, max_v) = (metrics.min_volume.unwrap(), metrics.max_volume.unwrap());
        let mean_v = metrics.mean_volume.unwrap();
        prop_assert!(min_v <= mean_v && mean_v <= max_v);
        prop_assert!(metrics.min_close.unwrap() <= metrics.max_close.unwrap());
    }
}
