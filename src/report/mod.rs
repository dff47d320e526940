//! Console rendering of a [`MarketStructure`]. Formatting only, no analysis.

use {
    crate::{analysis::MarketStructure, models::StrengthRecord},
    itertools::Itertools,
    std::fmt::Write,
    tabled::{Table, Tabled, settings::Style},
};

#[derive(Tabled)]
struct KeyLevelRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Price Level")]
    price: String,
    #[tabled(rename = "Relation to Spot")]
    relation: String,
}

#[derive(Tabled)]
struct StrengthRow {
    #[tabled(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Strength")]
    strength: String,
    #[tabled(rename = "Z")]
    z_score: String,
    #[tabled(rename = "Touches")]
    touches: usize,
    #[tabled(rename = "Spot Diff")]
    diff: String,
}

/// spot - level, signed
fn spot_diff(spot: f64, level: f64) -> String {
    format!("{:+.2}", spot - level)
}

fn join_prices(prices: &[f64]) -> String {
    if prices.is_empty() {
        return "-".to_string();
    }
    prices.iter().map(|p| format!("{:.2}", p)).join(", ")
}

fn strength_row(spot: f64, r: &StrengthRecord) -> StrengthRow {
    StrengthRow {
        rank: r.rank,
        price: format!("{:.2}", r.price),
        score: format!("{:.2}", r.normalized),
        strength: format!("{:.0}", r.raw_strength),
        z_score: format!("{:.2}", r.z_score),
        touches: r.touch_count,
        diff: spot_diff(spot, r.price),
    }
}

pub fn key_levels_table(ms: &MarketStructure) -> String {
    let spot = ms.current_price;
    let va = &ms.value_area;
    let rows = vec![
        KeyLevelRow {
            metric: "Current Price",
            price: format!("{:.2}", spot),
            relation: "-".to_string(),
        },
        KeyLevelRow {
            metric: "VAH (Value Area High)",
            price: format!("{:.2}", va.vah_price),
            relation: spot_diff(spot, va.vah_price),
        },
        KeyLevelRow {
            metric: "POC (Point of Control)",
            price: format!("{:.2}", va.poc_price),
            relation: spot_diff(spot, va.poc_price),
        },
        KeyLevelRow {
            metric: "VAL (Value Area Low)",
            price: format!("{:.2}", va.val_price),
            relation: spot_diff(spot, va.val_price),
        },
    ];
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Best `top_n` supports strictly below spot, by rank.
pub fn supports_table(ms: &MarketStructure, top_n: usize) -> String {
    let spot = ms.current_price;
    let rows: Vec<StrengthRow> = ms
        .strength
        .top_n_records(top_n, Some(spot))
        .into_iter()
        .map(|r| strength_row(spot, r))
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// The whole strongest tier in ascending price order.
pub fn strength_tier_table(ms: &MarketStructure) -> String {
    let spot = ms.current_price;
    let rows: Vec<StrengthRow> = ms
        .strength
        .top_tier
        .iter()
        .map(|r| strength_row(spot, r))
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn render_report(ms: &MarketStructure, top_n: usize) -> String {
    let va = &ms.value_area;
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(
        out,
        "CL Option Zone Analyzer | {} | {} candles | total volume {:.0}",
        ms.symbol,
        ms.candle_count,
        ms.total_volume()
    );
    let _ = writeln!(out, "\nKey Levels & Zones\n{}", key_levels_table(ms));

    let _ = writeln!(out, "\nMarket Context: {}", ms.zone_status());
    let _ = writeln!(out, "  POC ({:.2}): Mean Reversion Target.", va.poc_price);
    let _ = writeln!(out, "  VAH ({:.2}): Resistance / Breakout Level.", va.vah_price);
    let _ = writeln!(out, "  VAL ({:.2}): Support / Breakdown Level.", va.val_price);

    let _ = writeln!(
        out,
        "\nHigh Volume Nodes (Structural Levels): {}",
        join_prices(&ms.nodes.hvn_prices)
    );
    let _ = writeln!(
        out,
        "Low Volume Nodes (Liquidity Voids): {}",
        join_prices(&ms.nodes.lvn_prices)
    );

    let _ = writeln!(
        out,
        "\nStrongest Supports Below {:.2}\n{}",
        ms.current_price,
        supports_table(ms, top_n)
    );
    let _ = writeln!(
        out,
        "\nStrength Tier (score >= {:.2})\n{}",
        ms.strength.threshold,
        strength_tier_table(ms)
    );

    out
}
