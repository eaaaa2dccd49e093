use std::time::{Duration, Instant};

use anyhow::Context as _;
use serde_json::json;
use sha2::Digest as _;
use wavyte_resample::{
    AlphaFlags, Colorspace, Dimensions, Filter, ImageMut, ImageRef, ResizeConfig, ResizePlan,
};

#[derive(Clone, Debug)]
struct BenchArgs {
    width: u32,
    height: u32,
    channels: usize,
    warmup: u32,
    repeats: u32,
    srgb: bool,
    filters: Vec<Filter>,
}

#[derive(Clone, Copy, Debug)]
struct Case {
    name: &'static str,
    num: u32,
    den: u32,
}

const CASES: &[Case] = &[
    Case {
        name: "down_4x",
        num: 1,
        den: 4,
    },
    Case {
        name: "down_1_5x",
        num: 2,
        den: 3,
    },
    Case {
        name: "identity",
        num: 1,
        den: 1,
    },
    Case {
        name: "up_1_5x",
        num: 3,
        den: 2,
    },
    Case {
        name: "up_3x",
        num: 3,
        den: 1,
    },
];

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let args = parse_args()?;
    if args.width == 0 || args.height == 0 {
        anyhow::bail!("--width/--height must be > 0");
    }
    if args.repeats == 0 {
        anyhow::bail!("--repeats must be >= 1");
    }

    let src = synthetic_image(args.width, args.height, args.channels);
    eprintln!(
        "bench: {w}x{h}x{c} {space}, {repeats} run(s) ({profile} build)",
        w = args.width,
        h = args.height,
        c = args.channels,
        space = if args.srgb { "srgb" } else { "linear" },
        repeats = args.repeats,
        profile = if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
    );

    let mut results = Vec::new();
    for &filter in &args.filters {
        for case in CASES {
            results.push(run_case(&args, &src, filter, *case)?);
        }
    }

    let report = json!({
        "width": args.width,
        "height": args.height,
        "channels": args.channels,
        "srgb": args.srgb,
        "repeats": args.repeats,
        "results": results,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_case(
    args: &BenchArgs,
    src: &[u8],
    filter: Filter,
    case: Case,
) -> anyhow::Result<serde_json::Value> {
    let out_w = (args.width * case.num / case.den).max(1);
    let out_h = (args.height * case.num / case.den).max(1);
    let alpha = (args.channels == 4).then_some(3);
    let colorspace = if args.srgb {
        Colorspace::Srgb
    } else {
        Colorspace::Linear
    };
    let config = ResizeConfig::new(args.channels)
        .with_alpha(alpha, AlphaFlags::NONE)
        .with_filter(filter)
        .with_colorspace(colorspace);

    let input = ImageRef::new(src, args.width, args.height);
    let plan = ResizePlan::new(input.dimensions()?, Dimensions::new(out_w, out_h)?, &config)
        .with_context(|| format!("plan {} with {filter}", case.name))?;
    let mut dst = vec![0u8; out_w as usize * out_h as usize * args.channels];
    let mut scratch = vec![0.0f32; plan.layout.total_words()];

    for _ in 0..args.warmup {
        plan.execute_in(input, ImageMut::new(&mut dst, out_w, out_h), &mut scratch)?;
    }
    let mut times = Vec::with_capacity(args.repeats as usize);
    for _ in 0..args.repeats {
        let t0 = Instant::now();
        plan.execute_in(input, ImageMut::new(&mut dst, out_w, out_h), &mut scratch)?;
        times.push(t0.elapsed());
    }
    times.sort();

    let p50 = percentile(&times, 0.50);
    let mpix_per_s = f64::from(out_w) * f64::from(out_h) / p50.as_secs_f64().max(1e-9) / 1e6;
    eprintln!(
        "  {filter:>14} {name:10} -> {out_w}x{out_h}  p50={p50:>10}  p90={p90:>10}",
        name = case.name,
        p50 = fmt_ms(p50),
        p90 = fmt_ms(percentile(&times, 0.90)),
    );
    Ok(json!({
        "filter": filter,
        "case": case.name,
        "output": format!("{out_w}x{out_h}"),
        "memory_bytes": plan.memory_required(),
        "p50_ms": p50.as_secs_f64() * 1000.0,
        "p90_ms": percentile(&times, 0.90).as_secs_f64() * 1000.0,
        "p99_ms": percentile(&times, 0.99).as_secs_f64() * 1000.0,
        "mpix_per_s": mpix_per_s,
        "sha256": sha256_hex(&dst),
    }))
}

/// Deterministic gradient with a checkerboard so every filter has edges to ring on.
fn synthetic_image(width: u32, height: u32, channels: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(width as usize * height as usize * channels);
    for y in 0..height {
        for x in 0..width {
            let check = ((x / 8 + y / 8) % 2) as u8 * 64;
            for c in 0..channels {
                let v = match c {
                    0 => (x * 255 / width.max(1)) as u8,
                    1 => (y * 255 / height.max(1)) as u8,
                    3 => 255 - check,
                    _ => check.wrapping_add((c as u8).wrapping_mul(37)),
                };
                out.push(v);
            }
        }
    }
    out
}

fn percentile(v: &[Duration], p: f64) -> Duration {
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

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

fn parse_args() -> anyhow::Result<BenchArgs> {
    let mut args = std::env::args().skip(1);

    let mut out = BenchArgs {
        width: 1024,
        height: 768,
        channels: 4,
        warmup: 1,
        repeats: 20,
        srgb: false,
        filters: Filter::ALL.to_vec(),
    };

    while let Some(a) = args.next() {
        match a.as_str() {
            "--width" => out.width = parse_u32(args.next(), "--width")?,
            "--height" => out.height = parse_u32(args.next(), "--height")?,
            "--channels" => out.channels = parse_usize(args.next(), "--channels")?,
            "--warmup" => out.warmup = parse_u32(args.next(), "--warmup")?,
            "--repeats" => out.repeats = parse_u32(args.next(), "--repeats")?,
            "--srgb" => out.srgb = true,
            "--filter" => {
                let v = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("missing value for --filter"))?;
                out.filters = vec![v.parse().with_context(|| format!("parse --filter '{v}'"))?];
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => anyhow::bail!("unknown arg '{a}' (try --help)"),
        }
    }

    Ok(out)
}

fn print_help() {
    eprintln!(
        r#"wavyte-resample-bench

Resizes a synthetic image at several ratios per filter and prints a JSON report
(p50/p90/p99 per case plus a SHA-256 of the output for determinism checks).

Usage:
  cargo run -q --release
  cargo run -q --release -- --repeats 50 --filter mitchell --srgb

Args:
  --width N        (default 1024)
  --height N       (default 768)
  --channels N     (default 4; channel 3 is treated as alpha when 4)
  --warmup N       (default 1)
  --repeats N      (default 20)
  --filter NAME    only this filter (default: all)
  --srgb           sRGB input and output
"#
    );
}

fn parse_u32(v: Option<String>, flag: &str) -> anyhow::Result<u32> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<u32>()
        .with_context(|| format!("parse {flag} value '{v}'"))
}

fn parse_usize(v: Option<String>, flag: &str) -> anyhow::Result<usize> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<usize>()
        .with_context(|| format!("parse {flag} value '{v}'"))
}
