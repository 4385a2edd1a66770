use std::time::{Duration, Instant};

use serde_json::json;

#[derive(Clone, Debug)]
struct BenchArgs {
    steps: u32,
    warmup: u32,
    repeats: u32,
    mode: subpersp::OriginMode,
    width: f64,
    height: f64,
    dump: bool,
}

#[derive(Clone, Debug, Default)]
struct RunMetrics {
    project_total: Duration,
    unproject_total: Duration,
    emit_total: Duration,
    wall_total: Duration,
    worst_error: f64,
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let args = parse_args()?;

    if args.steps < 2 {
        anyhow::bail!("--steps must be >= 2");
    }
    if !(args.width > 0.0 && args.height > 0.0) {
        anyhow::bail!("--width/--height must be > 0");
    }

    let cases = build_cases(&args);
    let frame = subpersp::ScriptFrame::default();

    if args.warmup > 0 {
        eprintln!("warmup: {} run(s)", args.warmup);
        for _ in 0..args.warmup {
            let _ = run_once(&args, &frame, &cases)?;
        }
    }

    eprintln!(
        "bench: {repeats} run(s) ({profile} build), {n} cases/run, mode={mode:?}, extents={w}x{h}",
        repeats = args.repeats,
        profile = if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
        n = cases.len(),
        mode = args.mode,
        w = args.width,
        h = args.height,
    );

    let mut runs = Vec::<RunMetrics>::with_capacity(args.repeats as usize);
    for _ in 0..args.repeats {
        runs.push(run_once(&args, &frame, &cases)?);
    }

    let worst = runs.iter().map(|m| m.worst_error).fold(0.0, f64::max);
    eprintln!("worst corner error: {worst:.3e}px");
    report_percentiles(&runs);

    if args.dump {
        let summary = json!({
            "cases": cases.len(),
            "repeats": args.repeats,
            "worst_error": worst,
            "wall_ms": runs.iter().map(|m| m.wall_total.as_secs_f64() * 1000.0).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"subpersp-bench (debug)

Projects a grid of transform parameters, solves each quad back to tags and
reports p50/p90/p99 for each stage.

Usage:
  cargo run -q
  cargo run -q -- --repeats 50 --steps 9
  cargo run -q -- --mode no-shear

Args:
  --steps N        samples per angle axis (default 7)
  --warmup N       (default 1)
  --repeats N      (default 100)
  --mode M         center | no-shear | keep (default keep)
  --width N        text extents width (default 300)
  --height N       text extents height (default 80)
  --dump           print a JSON summary on stdout
"#
    );
}

fn parse_args() -> anyhow::Result<BenchArgs> {
    let mut args = std::env::args().skip(1);

    let mut out = BenchArgs {
        steps: 7,
        warmup: 1,
        repeats: 100,
        mode: subpersp::OriginMode::Keep,
        width: 300.0,
        height: 80.0,
        dump: false,
    };

    while let Some(a) = args.next() {
        match a.as_str() {
            "--steps" => out.steps = parse_u32(args.next(), "--steps")?,
            "--warmup" => out.warmup = parse_u32(args.next(), "--warmup")?,
            "--repeats" => out.repeats = parse_u32(args.next(), "--repeats")?,
            "--width" => out.width = parse_f64(args.next(), "--width")?,
            "--height" => out.height = parse_f64(args.next(), "--height")?,
            "--mode" => {
                let v = args.next().ok_or_else(|| {
                    anyhow::anyhow!("missing value for --mode (center|no-shear|keep)")
                })?;
                out.mode = match v.as_str() {
                    "center" => subpersp::OriginMode::Center,
                    "no-shear" => subpersp::OriginMode::NoShear,
                    "keep" => subpersp::OriginMode::Keep,
                    _ => anyhow::bail!("unknown --mode '{v}' (expected center|no-shear|keep)"),
                };
            }
            "--dump" => out.dump = true,
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => anyhow::bail!("unknown arg '{a}' (try --help)"),
        }
    }

    Ok(out)
}

fn parse_u32(v: Option<String>, flag: &str) -> anyhow::Result<u32> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<u32>()
        .map_err(|e| anyhow::anyhow!("parse {flag} value '{v}': {e}"))
}

fn parse_f64(v: Option<String>, flag: &str) -> anyhow::Result<f64> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<f64>()
        .map_err(|e| anyhow::anyhow!("parse {flag} value '{v}': {e}"))
}

/// Evenly spaced samples in `[lo, hi]`.
fn linspace(lo: f64, hi: f64, steps: u32) -> impl Iterator<Item = f64> {
    let span = (hi - lo) / f64::from(steps - 1);
    (0..steps).map(move |i| lo + span * f64::from(i))
}

fn build_cases(args: &BenchArgs) -> Vec<subpersp::TransformParams> {
    let mut cases = Vec::new();
    for angle_x in linspace(-50.0, 50.0, args.steps) {
        for angle_y in linspace(-50.0, 50.0, args.steps) {
            for angle_z in linspace(-170.0, 170.0, args.steps) {
                cases.push(subpersp::TransformParams {
                    angle_x,
                    angle_y,
                    angle_z,
                    fax: 0.1,
                    fsc: subpersp::Vec2::new(120.0, 90.0),
                    pos: subpersp::Point::new(960.0, 540.0),
                    org: Some(subpersp::Point::new(940.0, 500.0)),
                    ..subpersp::TransformParams::default()
                });
            }
        }
    }
    cases
}

fn run_once(
    args: &BenchArgs,
    frame: &subpersp::ScriptFrame,
    cases: &[subpersp::TransformParams],
) -> anyhow::Result<RunMetrics> {
    let extents = subpersp::Rect::new(0.0, 0.0, args.width, args.height);
    let style = subpersp::StyleDefaults::default();
    let screen_z = frame.screen_z();
    let mut m = RunMetrics::default();

    let wall = Instant::now();
    for params in cases {
        let t0 = Instant::now();
        let quad = subpersp::project(params, &extents, screen_z);
        let t1 = Instant::now();
        let solved = subpersp::unproject(
            &quad,
            &subpersp::Unprojection {
                extents: &extents,
                previous: params,
                mode: args.mode,
                screen_z,
            },
        )
        .map_err(|e| anyhow::anyhow!("solve {params:?}: {e}"))?;
        let t2 = Instant::now();
        let edits = subpersp::emit(&solved, &style);
        let t3 = Instant::now();
        std::hint::black_box(edits);

        m.project_total += t1 - t0;
        m.unproject_total += t2 - t1;
        m.emit_total += t3 - t2;

        let back = subpersp::project(&solved, &extents, screen_z);
        for k in 0..4 {
            m.worst_error = m.worst_error.max((back[k] - quad[k]).length());
        }
    }
    m.wall_total = wall.elapsed();
    Ok(m)
}

fn report_percentiles(runs: &[RunMetrics]) {
    type Getter = fn(&RunMetrics) -> Duration;
    type Field = (&'static str, Getter);

    fn collect(runs: &[RunMetrics], f: fn(&RunMetrics) -> Duration) -> Vec<Duration> {
        let mut v = runs.iter().map(f).collect::<Vec<_>>();
        v.sort_by_key(|d| d.as_nanos());
        v
    }

    fn p(v: &[Duration], p: f64) -> Duration {
        if v.is_empty() {
            return Duration::ZERO;
        }
        let n = v.len();
        let rank = (p * (n as f64)).ceil().clamp(1.0, n as f64) as usize;
        v[rank - 1]
    }

    fn fmt_ms(d: Duration) -> String {
        format!("{:.3}ms", d.as_secs_f64() * 1000.0)
    }

    let fields: &[Field] = &[
        ("project_total", |m| m.project_total),
        ("unproject_total", |m| m.unproject_total),
        ("emit_total", |m| m.emit_total),
        ("wall_total", |m| m.wall_total),
    ];

    eprintln!("\npercentiles across runs (p50/p90/p99):");
    for (name, getter) in fields {
        let v = collect(runs, *getter);
        eprintln!(
            "  {name:18} p50={p50:>10}  p90={p90:>10}  p99={p99:>10}",
            name = *name,
            p50 = fmt_ms(p(&v, 0.50)),
            p90 = fmt_ms(p(&v, 0.90)),
            p99 = fmt_ms(p(&v, 0.99))
        );
    }
}
