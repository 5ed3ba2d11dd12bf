//! How bank settlement time drives the FX risk buffer.
//!
//! Sweeps the traditional settlement window from one hour to one week and
//! prints the breakeven user fee of each path at selected points.

use ramp_economics::core::params::ParameterSet;
use ramp_economics::sensitivity::curves::{settlement_duration, SETTLEMENT_HOURS_RANGE};

fn main() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║  ramp-economics: Settlement Sweep Example    ║");
    println!("╚══════════════════════════════════════════════╝\n");

    let params = ParameterSet {
        fx_volatility_pct: 18.0,
        ..Default::default()
    };

    let series = match settlement_duration(&params, SETTLEMENT_HOURS_RANGE) {
        Ok(series) => series,
        Err(e) => {
            eprintln!("sweep failed: {}", e);
            return;
        }
    };

    println!(
        "  {:>6}  {:>14}  {:>14}  {:>12}  {:>12}",
        "Hours", "Trad. Risk", "Opt. Risk", "Trad. bps", "Opt. bps"
    );
    let shown = [1.0, 6.0, 12.0, 24.0, 48.0, 72.0, 96.0, 120.0, 168.0];
    for point in series
        .points
        .iter()
        .filter(|p| shown.contains(&p.duration_hours))
    {
        println!(
            "  {:>6.0}  {:>14.2}  {:>14.2}  {:>12.2}  {:>12.2}",
            point.duration_hours,
            point.traditional_risk,
            point.optimized_risk,
            point.traditional_fee_bps,
            point.optimized_fee_bps
        );
    }

    // The buffer grows with the square root of time: 4x the window, 2x the buffer.
    if let (Some(day), Some(four_days)) = (
        series.points.iter().find(|p| p.duration_hours == 24.0),
        series.points.iter().find(|p| p.duration_hours == 96.0),
    ) {
        println!(
            "\n  96h / 24h risk ratio: {:.3}",
            four_days.traditional_risk / day.traditional_risk
        );
    }
}
