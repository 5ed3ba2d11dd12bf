//! ramp-economics CLI
//!
//! Compare ramp rebalancing strategies from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Compare both paths with the default parameters
//! ramp-economics compare
//!
//! # Load parameters from JSON, apply a preset and override a field
//! ramp-economics compare --params ramp.json --preset volatile --set user_fee_bps=120
//!
//! # Print a sensitivity curve as JSON
//! ramp-economics sweep duration --format json
//!
//! # Stress the engine with random scenarios
//! ramp-economics sample --count 5000 --seed 42
//! ```

use ramp_economics::analysis::comparison::compute_comparison;
use ramp_economics::core::error::SweepError;
use ramp_economics::core::money::{round_to, to_cents};
use ramp_economics::core::params::{ParameterField, ParameterSet};
use ramp_economics::core::preset::Preset;
use ramp_economics::model::breakdown::CostBreakdown;
use ramp_economics::sensitivity::curves;
use ramp_economics::sensitivity::sweep::{SensitivitySeries, SweepRange};
use ramp_economics::simulation::scenario_sampler::{
    generate_random_scenarios, run_stress, SamplerConfig,
};
use rust_decimal::Decimal;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"ramp-economics: on/off-ramp rebalancing cost comparison

USAGE:
    ramp-economics <COMMAND> [OPTIONS]

COMMANDS:
    compare     Cost the traditional and optimized paths side by side
    sweep       Print a sensitivity curve: duration, fee, volume or yield
    presets     List the built-in stress presets
    sample      Run random scenarios drawn from the advisory ranges
    help        Show this message

OPTIONS (compare, sweep):
    --params <FILE>     JSON parameter file (missing fields use defaults)
    --preset <NAME>     Apply a preset: volatile, slow-banks
    --set <FIELD=VAL>   Override one parameter (repeatable)
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (sweep):
    --start <N> --end <N> --step <N>   Override the curve's default range

OPTIONS (sample):
    --count <N>         Number of scenarios (default: 1000)
    --seed <N>          Seed for a reproducible batch
    --format <FORMAT>   Output format: text (default) or json

EXAMPLES:
    ramp-economics compare --preset slow-banks
    ramp-economics compare --set monthly_volume=2500000 --format json
    ramp-economics sweep fee --start 50 --end 300 --step 10
    ramp-economics sample --count 5000 --seed 42"#
    );
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn next_value(args: &[String], i: usize, flag: &str) -> String {
    args.get(i)
        .cloned()
        .unwrap_or_else(|| fail(format!("{} requires a value", flag)))
}

fn parse_number<T: std::str::FromStr>(raw: &str, flag: &str) -> T {
    raw.parse()
        .unwrap_or_else(|_| fail(format!("{} expects a number, got '{}'", flag, raw)))
}

fn load_params(path: &str) -> ParameterSet {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("cannot read '{}': {}", path, e)));
    serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected an object of parameter fields, e.g.:");
        eprintln!(
            r#"{{ "monthly_volume": 10000000, "fx_volatility_pct": 12 }}"#
        );
        process::exit(1);
    })
}

/// Inputs shared by `compare` and `sweep`.
struct Inputs {
    params: ParameterSet,
    format: String,
    start: Option<f64>,
    end: Option<f64>,
    step: Option<f64>,
}

fn parse_inputs(args: &[String]) -> Inputs {
    let mut params = ParameterSet::default();
    let mut preset = None;
    let mut overrides = Vec::new();
    let mut inputs = Inputs {
        params: ParameterSet::default(),
        format: "text".to_string(),
        start: None,
        end: None,
        step: None,
    };

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--params" => {
                i += 1;
                params = load_params(&next_value(args, i, flag));
            }
            "--preset" => {
                i += 1;
                let raw = next_value(args, i, flag);
                preset = Some(raw.parse::<Preset>().unwrap_or_else(|e| fail(e)));
            }
            "--set" => {
                i += 1;
                let raw = next_value(args, i, flag);
                let (name, value) = raw
                    .split_once('=')
                    .unwrap_or_else(|| fail(format!("--set expects FIELD=VALUE, got '{}'", raw)));
                let field = name.trim().parse::<ParameterField>().unwrap_or_else(|e| fail(e));
                overrides.push((field, parse_number::<f64>(value.trim(), flag)));
            }
            "--format" => {
                i += 1;
                inputs.format = next_value(args, i, flag);
            }
            "--start" => {
                i += 1;
                inputs.start = Some(parse_number(&next_value(args, i, flag), flag));
            }
            "--end" => {
                i += 1;
                inputs.end = Some(parse_number(&next_value(args, i, flag), flag));
            }
            "--step" => {
                i += 1;
                inputs.step = Some(parse_number(&next_value(args, i, flag), flag));
            }
            _ => fail(format!("unknown option: {}", flag)),
        }
        i += 1;
    }

    // Preset first, explicit overrides win.
    if let Some(preset) = preset {
        params = preset.apply(&params);
    }
    for (field, value) in overrides {
        params = params.with_value(field, value);
    }
    inputs.params = params;
    inputs
}

/// JSON output schema for a comparison, money rounded to cents.
#[derive(serde::Serialize)]
struct ComparisonOutput {
    traditional_total: Decimal,
    optimized_total: Decimal,
    net_savings: Decimal,
    net_margin_per_transaction: Decimal,
    net_margin_percent: Decimal,
    risk_reduction_percent: Decimal,
    traditional_profit: Decimal,
    optimized_profit: Decimal,
    traditional_per_100: Decimal,
    optimized_per_100: Decimal,
    paths: Vec<PathOutput>,
}

#[derive(serde::Serialize)]
struct PathOutput {
    path: String,
    direct_costs: Decimal,
    capital_cost: Decimal,
    yield_income: Decimal,
    risk_buffer: Decimal,
    total: Decimal,
    line_items: Vec<LineItemOutput>,
}

#[derive(serde::Serialize)]
struct LineItemOutput {
    component: String,
    amount: Decimal,
}

fn path_output(b: &CostBreakdown) -> PathOutput {
    PathOutput {
        path: b.path.to_string(),
        direct_costs: to_cents(b.direct_costs),
        capital_cost: to_cents(b.capital_cost),
        yield_income: to_cents(b.yield_income),
        risk_buffer: to_cents(b.risk_buffer),
        total: to_cents(b.total),
        line_items: b
            .line_items
            .iter()
            .map(|item| LineItemOutput {
                component: item.component.label().to_string(),
                amount: to_cents(item.amount),
            })
            .collect(),
    }
}

fn cmd_compare(args: &[String]) {
    let inputs = parse_inputs(args);
    let result = compute_comparison(&inputs.params).unwrap_or_else(|e| fail(e));

    if inputs.format == "json" {
        let d = &result.derived;
        let output = ComparisonOutput {
            traditional_total: to_cents(result.traditional.total),
            optimized_total: to_cents(result.optimized.total),
            net_savings: to_cents(d.net_savings),
            net_margin_per_transaction: round_to(d.net_margin_per_transaction, 4),
            net_margin_percent: round_to(d.net_margin_percent, 4),
            risk_reduction_percent: round_to(d.risk_reduction_percent, 2),
            traditional_profit: to_cents(d.traditional.profit),
            optimized_profit: to_cents(d.optimized.profit),
            traditional_per_100: round_to(result.per_100.traditional.total, 4),
            optimized_per_100: round_to(result.per_100.optimized.total, 4),
            paths: vec![path_output(&result.traditional), path_output(&result.optimized)],
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_else(|e| fail(e))
        );
    } else {
        println!("{}", result);
    }
}

fn print_series<T: serde::Serialize>(
    series: Result<SensitivitySeries<T>, SweepError>,
    format: &str,
    row: impl Fn(&T) -> String,
    header: &str,
) {
    let series = series.unwrap_or_else(|e| fail(e));
    if format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&series).unwrap_or_else(|e| fail(e))
        );
    } else {
        println!("Sweep of {} ({} points)", series.field, series.len());
        println!("{}", header);
        for point in &series.points {
            println!("{}", row(point));
        }
    }
}

fn cmd_sweep(args: &[String]) {
    let Some((curve, rest)) = args.split_first() else {
        fail("sweep requires a curve: duration, fee, volume or yield");
    };
    let inputs = parse_inputs(rest);
    inputs.params.validate().unwrap_or_else(|e| fail(e));
    let params = &inputs.params;

    let range_or = |default: SweepRange| SweepRange {
        start: inputs.start.unwrap_or(default.start),
        end: inputs.end.unwrap_or(default.end),
        step: inputs.step.unwrap_or(default.step),
    };

    match curve.as_str() {
        "duration" => print_series(
            curves::settlement_duration(params, range_or(curves::SETTLEMENT_HOURS_RANGE)),
            &inputs.format,
            |p| {
                format!(
                    "{:>8} {:>12} {:>12} {:>14} {:>14}",
                    p.duration_hours,
                    round_to(p.traditional_fee_bps, 2),
                    round_to(p.optimized_fee_bps, 2),
                    to_cents(p.traditional_risk),
                    to_cents(p.optimized_risk)
                )
            },
            "   hours    trad bps     opt bps      trad risk       opt risk",
        ),
        "fee" => print_series(
            curves::user_fee(params, range_or(curves::USER_FEE_RANGE)),
            &inputs.format,
            |p| {
                format!(
                    "{:>8} {:>16} {:>16}",
                    p.fee_bps,
                    to_cents(p.traditional_profit),
                    to_cents(p.optimized_profit)
                )
            },
            "     bps      trad profit       opt profit",
        ),
        "volume" => print_series(
            curves::monthly_volume(params, range_or(curves::volume_range(params.monthly_volume))),
            &inputs.format,
            |p| {
                format!(
                    "{:>14} {:>16} {:>16}",
                    to_cents(p.monthly_volume),
                    to_cents(p.traditional_profit),
                    to_cents(p.optimized_profit)
                )
            },
            "        volume      trad profit       opt profit",
        ),
        "yield" => print_series(
            curves::yield_rate(params, range_or(curves::YIELD_RATE_RANGE)),
            &inputs.format,
            |p| {
                format!(
                    "{:>6} {:>16} {:>14} {:>16}",
                    p.yield_rate_pct,
                    to_cents(p.cost_of_capital),
                    to_cents(p.income),
                    to_cents(p.traditional_cost_of_capital)
                )
            },
            " yield  cost of capital         income   trad cost of cap",
        ),
        other => fail(format!("unknown curve '{}'", other)),
    }
}

fn cmd_presets() {
    for preset in Preset::ALL {
        println!("{:<12} {}", preset.key(), preset.label());
        println!("             {}", preset.description());
        for (field, value) in preset.overrides() {
            println!("             {} = {}", field, value);
        }
    }
}

fn cmd_sample(args: &[String]) {
    let mut config = SamplerConfig::default();
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--count" => {
                i += 1;
                config.count = parse_number(&next_value(args, i, flag), flag);
            }
            "--seed" => {
                i += 1;
                config.seed = Some(parse_number(&next_value(args, i, flag), flag));
            }
            "--format" => {
                i += 1;
                format = next_value(args, i, flag);
            }
            _ => fail(format!("unknown option: {}", flag)),
        }
        i += 1;
    }

    let scenarios = generate_random_scenarios(&config);
    let summary = run_stress(&scenarios).unwrap_or_else(|e| fail(e));

    if format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).unwrap_or_else(|e| fail(e))
        );
    } else {
        print!("{}", summary);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "compare" => cmd_compare(rest),
        "sweep" => cmd_sweep(rest),
        "presets" => cmd_presets(),
        "sample" => cmd_sample(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
