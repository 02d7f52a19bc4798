//! HomePlan Headless Generation Harness
//!
//! Validates the layout pipeline end to end over a sweep of seeds.
//! Runs entirely in-process: no storage, no networking, no rendering.
//!
//! Usage:
//!   cargo run -p homeplan-simtest
//!   cargo run -p homeplan-simtest -- --verbose --sweep 100
//!   cargo run -p homeplan-simtest -- --request house.json --emit-json

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use clap::Parser;
use homeplan_logic::distribution::distribute_bedrooms;
use homeplan_logic::graph::describe_graph;
use homeplan_logic::region::PLAN_EXTENT;
use homeplan_logic::request::validate_request;
use homeplan_logic::template::{build_case_template, has_stair, LayoutCase};
use homeplan_logic::{generate_layout, GenerationError, GeneratorConfig, LayoutRequest, RoomType};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Parser, Debug)]
#[command(name = "homeplan-simtest")]
#[command(about = "Headless sweep of the HomePlan layout generator")]
struct Args {
    /// Print every check, not just failures
    #[arg(short, long)]
    verbose: bool,

    /// Base seed for the sweep
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Seeds to try per request in the generation sweep
    #[arg(long, default_value_t = 25)]
    sweep: u64,

    /// Generate one layout for this JSON request instead of the built-in set
    #[arg(short, long)]
    request: Option<PathBuf>,

    /// Print the generated response payload as JSON
    #[arg(long)]
    emit_json: bool,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: impl Into<String>, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    println!("=== HomePlan Generation Harness ===\n");

    let mut results = Vec::new();

    if let Some(path) = &args.request {
        results.extend(run_request_file(path, &args));
    } else {
        // 1. Request constraints
        results.extend(validate_request_rules());

        // 2. Bedroom distribution sweep
        results.extend(validate_bedroom_distribution());

        // 3. Structural templates
        results.extend(validate_templates());

        // 4. Full generation sweep
        results.extend(validate_generation_sweep(&args));

        // 5. Retry exhaustion
        results.extend(validate_exhaustion(&args));
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Request constraints ──────────────────────────────────────────────

fn validate_request_rules() -> Vec<TestResult> {
    println!("--- Request Constraints ---");
    let mut results = Vec::new();

    let default_errors = validate_request(&LayoutRequest::default());
    results.push(TestResult::new(
        "request_default_valid",
        default_errors.is_empty(),
        format!("{} errors", default_errors.len()),
    ));

    let cases = [
        ("request_width_too_small", LayoutRequest { width: 39.0, length: 35.0, ..LayoutRequest::default() }),
        ("request_width_too_large", LayoutRequest { width: 101.0, ..LayoutRequest::default() }),
        ("request_length_too_short", LayoutRequest { length: 59.0, ..LayoutRequest::default() }),
        ("request_length_over_width", LayoutRequest { length: 81.0, ..LayoutRequest::default() }),
        ("request_no_bedrooms", LayoutRequest { total_bedrooms: 0, ..LayoutRequest::default() }),
        ("request_no_kitchen", LayoutRequest { kitchen_size: 0.0, ..LayoutRequest::default() }),
    ];
    for (name, request) in cases {
        let errors = validate_request(&request);
        results.push(TestResult::new(
            name,
            !errors.is_empty(),
            errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        ));
    }

    results
}

// ── 2. Bedroom distribution ─────────────────────────────────────────────

fn validate_bedroom_distribution() -> Vec<TestResult> {
    println!("--- Bedroom Distribution ---");
    let mut results = Vec::new();

    let mut bad = Vec::new();
    let mut checked = 0;
    for floors in 1..=6 {
        for total in 1..=40 {
            checked += 1;
            let d = distribute_bedrooms(total, floors);
            let sum: u32 = d.iter().sum();
            let busiest_upper = d.iter().skip(1).copied().max().unwrap_or(d[0]);
            if d.len() != floors as usize || sum != total || d[0] > busiest_upper {
                bad.push(format!("{total}/{floors} → {d:?}"));
            }
        }
    }
    results.push(TestResult::new(
        "distribution_invariants",
        bad.is_empty(),
        if bad.is_empty() {
            format!("{checked} (total, floors) pairs conserve totals")
        } else {
            format!("{} bad: {}", bad.len(), bad.join(", "))
        },
    ));

    let d = distribute_bedrooms(7, 3);
    results.push(TestResult::new(
        "distribution_7_over_3",
        d == vec![1, 3, 3],
        format!("{d:?}"),
    ));

    results
}

// ── 3. Structural templates ─────────────────────────────────────────────

fn validate_templates() -> Vec<TestResult> {
    println!("--- Structural Templates ---");
    let mut results = Vec::new();

    for case in [
        LayoutCase::DoubleSidedHall,
        LayoutCase::SingleSidedHall,
        LayoutCase::Compact,
    ] {
        let mut problems = Vec::new();
        for floors in 1..=4 {
            let mut stair_positions = BTreeSet::new();
            for floor in 0..floors {
                let t = build_case_template(case, floors, floor);
                let area: f32 = t.structural.iter().chain(&t.zones).map(|r| r.area()).sum();
                if (area - PLAN_EXTENT * PLAN_EXTENT).abs() > 1e-2 {
                    problems.push(format!("{floors}F/{floor}: area {area:.1}"));
                }
                if t.zones.is_empty() {
                    problems.push(format!("{floors}F/{floor}: no zones"));
                }
                let stairs: Vec<_> = t
                    .structural
                    .iter()
                    .filter(|r| r.room_type == Some(RoomType::Stair))
                    .collect();
                if stairs.is_empty() == has_stair(floors, floor) {
                    problems.push(format!("{floors}F/{floor}: stair count {}", stairs.len()));
                }
                for s in stairs {
                    stair_positions.insert((s.x.to_bits(), s.y.to_bits()));
                }
            }
            if stair_positions.len() > 1 {
                problems.push(format!("{floors}F: stairs move between floors"));
            }
        }
        results.push(TestResult::new(
            format!("template_{}", case.name().to_lowercase()),
            problems.is_empty(),
            if problems.is_empty() {
                "tiles footprint, stairs fixed on non-top floors".to_string()
            } else {
                problems.join(", ")
            },
        ));
    }

    results
}

// ── 4. Generation sweep ─────────────────────────────────────────────────

/// Requests swept across seeds. The 10m minimums produce more leaves per
/// zone, so more of them miss the hub and halls and need extra attempts.
fn sweep_requests() -> Vec<(&'static str, LayoutRequest)> {
    let base = LayoutRequest::default();
    vec![
        ("default", base.clone()),
        ("double_3f", LayoutRequest { length: 90.0, width: 90.0, floors: 3, rooms: 15, total_bedrooms: 6, ..base.clone() }),
        ("single_2f", LayoutRequest { length: 60.0, width: 60.0, rooms: 10, total_bedrooms: 3, ..base.clone() }),
        (
            "single_2f_small_rooms",
            LayoutRequest {
                length: 60.0,
                width: 60.0,
                rooms: 10,
                total_bedrooms: 3,
                min_room_length: 10.0,
                min_room_width: 10.0,
                ..base.clone()
            },
        ),
        ("compact_1f", LayoutRequest { length: 45.0, width: 45.0, floors: 1, rooms: 5, total_bedrooms: 1, ..base.clone() }),
        ("compact_2f", LayoutRequest { length: 40.0, width: 50.0, rooms: 8, total_bedrooms: 2, ..base }),
    ]
}

fn validate_generation_sweep(args: &Args) -> Vec<TestResult> {
    println!("--- Generation Sweep ({} seeds) ---", args.sweep);
    let config = GeneratorConfig::default();
    let mut results = Vec::new();

    for (label, request) in sweep_requests() {
        let mut failures = Vec::new();
        let mut attempts_total = 0;
        let mut worst_attempts = 0;

        for offset in 0..args.sweep {
            let seed = args.seed.wrapping_add(offset);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let generated = match generate_layout(&request, &config, &mut rng) {
                Ok(g) => g,
                Err(e) => {
                    failures.push(format!("seed {seed}: {e}"));
                    continue;
                }
            };
            attempts_total += generated.attempts;
            worst_attempts = worst_attempts.max(generated.attempts);

            let layout = &generated.layout;
            let hubs = layout.count(RoomType::KitchenLivingDiningHub);
            if hubs != 1 {
                failures.push(format!("seed {seed}: {hubs} hubs"));
            }
            let ids: BTreeSet<u32> = layout.rooms.iter().map(|r| r.id).collect();
            if ids.len() != layout.rooms.len() {
                failures.push(format!("seed {seed}: duplicate room ids"));
            }
            let outside = layout
                .rooms
                .iter()
                .filter(|r| !r.region().within_plan(1e-3))
                .count();
            if outside > 0 {
                failures.push(format!("seed {seed}: {outside} rooms outside plan"));
            }
            for floor in 0..layout.floors {
                let stairs = layout
                    .rooms_on_floor(floor)
                    .filter(|r| r.room_type == RoomType::Stair)
                    .count();
                if (stairs > 0) != has_stair(layout.floors, floor) {
                    failures.push(format!("seed {seed}: floor {floor} has {stairs} stairs"));
                }
            }
        }

        let ok = args.sweep.saturating_sub(failures.len() as u64).max(1);
        results.push(TestResult::new(
            format!("generate_{label}"),
            failures.is_empty(),
            if failures.is_empty() {
                format!(
                    "{} seeds valid, avg {:.1} attempts, worst {}",
                    args.sweep,
                    attempts_total as f64 / ok as f64,
                    worst_attempts
                )
            } else {
                failures.join("; ")
            },
        ));
    }

    results
}

// ── 5. Retry exhaustion ─────────────────────────────────────────────────

fn validate_exhaustion(args: &Args) -> Vec<TestResult> {
    println!("--- Retry Exhaustion ---");
    let config = GeneratorConfig::default();
    let request = LayoutRequest {
        floors: 1,
        rooms: 2,
        total_bedrooms: 10,
        ..LayoutRequest::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let result = match generate_layout(&request, &config, &mut rng) {
        Err(GenerationError::Exhausted { attempts, last_errors }) => TestResult::new(
            "exhaustion_surfaces_failure",
            attempts == config.max_attempts,
            format!(
                "gave up after {attempts} attempts: {}",
                last_errors.first().map(String::as_str).unwrap_or("-")
            ),
        ),
        Err(e) => TestResult::new("exhaustion_surfaces_failure", false, format!("unexpected error: {e}")),
        Ok(g) => TestResult::new(
            "exhaustion_surfaces_failure",
            false,
            format!("accepted an impossible layout on attempt {}", g.attempts),
        ),
    };
    vec![result]
}

// ── Single request mode ─────────────────────────────────────────────────

fn run_request_file(path: &Path, args: &Args) -> Vec<TestResult> {
    println!("--- Request {} (seed {}) ---", path.display(), args.seed);

    let request: LayoutRequest = match std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|s| serde_json::from_str(&s).map_err(|e| e.to_string()))
    {
        Ok(r) => r,
        Err(e) => return vec![TestResult::new("request_parse", false, e)],
    };

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let generated = match generate_layout(&request, &GeneratorConfig::default(), &mut rng) {
        Ok(g) => g,
        Err(e) => return vec![TestResult::new("request_generate", false, e.to_string())],
    };

    if args.verbose {
        print!("{}", describe_graph(&generated.layout.rooms, &generated.graph));
    }
    if args.emit_json {
        match serde_json::to_string_pretty(&generated.response()) {
            Ok(json) => println!("{json}"),
            Err(e) => return vec![TestResult::new("request_emit_json", false, e.to_string())],
        }
    }

    vec![TestResult::new(
        "request_generate",
        true,
        format!(
            "{} rooms on {} floors after {} attempts, {} components",
            generated.layout.rooms.len(),
            generated.layout.floors,
            generated.attempts,
            generated.validation.components
        ),
    )]
}
