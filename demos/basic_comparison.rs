//! Compare both rebalancing paths for a mid-size ramp.
//!
//! Runs the default operator profile, then the two stress presets, and
//! prints the per-$100 breakdown next to the headline metrics.

use ramp_economics::analysis::comparison::compute_comparison;
use ramp_economics::core::money::to_cents;
use ramp_economics::core::params::ParameterSet;
use ramp_economics::core::preset::Preset;
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║  ramp-economics: Basic Comparison Example    ║");
    println!("╚══════════════════════════════════════════════╝\n");

    // --- Scenario 1: Default operator profile ---
    println!("━━━ Scenario 1: $10M / month, weekly-ish rebalancing ━━━\n");

    let params = ParameterSet::default();
    let result = match compute_comparison(&params) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("invalid parameters: {}", e);
            return;
        }
    };
    println!("{}", result);

    // --- Scenario 2: Presets ---
    println!("━━━ Scenario 2: Stress Presets ━━━\n");
    println!(
        "  {:<18} {:>16} {:>16} {:>14}",
        "Preset", "Traditional", "Optimized", "Risk Red."
    );
    for preset in Preset::ALL {
        let stressed = preset.apply(&params);
        match compute_comparison(&stressed) {
            Ok(r) => println!(
                "  {:<18} {:>16} {:>16} {:>13.1}%",
                preset.label(),
                to_cents(r.traditional.total),
                to_cents(r.optimized.total),
                r.derived.risk_reduction_percent
            ),
            Err(e) => println!("  {:<18} error: {}", preset.label(), e),
        }
    }
    println!();

    // --- Scenario 3: Where does the money go? ---
    println!("━━━ Scenario 3: Line Items (Traditional) ━━━\n");
    for item in &result.traditional.line_items {
        let amount = to_cents(item.signed_amount());
        let share = if result.traditional.total != 0.0 {
            item.signed_amount() / result.traditional.total * 100.0
        } else {
            0.0
        };
        let marker = if amount > dec!(10_000) { "  <-- dominant" } else { "" };
        println!(
            "  {:<22} {:>14} {:>7.1}%{}",
            item.component.label(),
            amount,
            share,
            marker
        );
    }
}
