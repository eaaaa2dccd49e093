use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde_json::json;
use wavyte_resample::{
    AlphaFlags, Colorspace, Dimensions, EdgeMode, Filter, ResizeConfig, ResizePlan,
};

#[derive(Parser, Debug)]
#[command(name = "wavyte-resample", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resize plan (filters, geometry, memory) as JSON.
    Plan(PlanArgs),
    /// Print sampled kernel weights as JSON.
    Kernel(KernelArgs),
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input size, e.g. `640x480`.
    #[arg(long)]
    from: Dimensions,

    /// Output size, e.g. `320x240`.
    #[arg(long)]
    to: Dimensions,

    /// Base configuration as inline JSON; flags below override it.
    #[arg(long)]
    config_json: Option<String>,

    /// Channels per pixel.
    #[arg(long)]
    channels: Option<usize>,

    /// Alpha channel index.
    #[arg(long)]
    alpha: Option<usize>,

    /// Input color is already premultiplied.
    #[arg(long, default_value_t = false)]
    premultiplied: bool,

    /// Filter for both axes.
    #[arg(long)]
    filter: Option<Filter>,

    /// Edge mode for both axes.
    #[arg(long)]
    edge: Option<EdgeMode>,

    /// Colorspace of input and output.
    #[arg(long)]
    colorspace: Option<Colorspace>,

    /// Include the contributor and coefficient tables.
    #[arg(long, default_value_t = false)]
    contributors: bool,
}

#[derive(Parser, Debug)]
struct KernelArgs {
    /// Filter to sample.
    #[arg(long)]
    filter: Filter,

    /// Scale argument passed to the kernel.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Number of samples across `[-support, support]`.
    #[arg(long, default_value_t = 33)]
    samples: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Kernel(args) => cmd_kernel(args),
    }
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let mut config = match &args.config_json {
        Some(json) => ResizeConfig::from_json(json).context("parse --config-json")?,
        None => ResizeConfig::default(),
    };
    if let Some(channels) = args.channels {
        config.channels = channels;
    }
    if args.alpha.is_some() || args.premultiplied {
        let flags = if args.premultiplied {
            AlphaFlags::PREMULTIPLIED
        } else {
            AlphaFlags::NONE
        };
        let alpha = args.alpha.or(config.alpha_channel);
        config = config.with_alpha(alpha, flags);
    }
    if let Some(filter) = args.filter {
        config = config.with_filter(filter);
    }
    if let Some(edge) = args.edge {
        config = config.with_edge(edge);
    }
    if let Some(colorspace) = args.colorspace {
        config = config.with_colorspace(colorspace);
    }

    let plan = ResizePlan::new(args.from, args.to, &config)
        .with_context(|| format!("plan {} -> {}", args.from, args.to))?;
    let mut report = json!({
        "plan": plan,
        "memory_bytes": plan.memory_required(),
    });
    if args.contributors {
        let (horizontal, vertical) = plan.coefficient_tables();
        report["coefficients"] = json!({
            "horizontal": horizontal,
            "vertical": vertical,
        });
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_kernel(args: KernelArgs) -> anyhow::Result<()> {
    if args.samples < 2 {
        anyhow::bail!("--samples must be >= 2");
    }
    if !(args.scale.is_finite() && args.scale > 0.0) {
        anyhow::bail!("--scale must be finite and > 0");
    }
    let support = args.filter.support(args.scale);
    let step = 2.0 * support / (args.samples - 1) as f32;
    let points: Vec<_> = (0..args.samples)
        .map(|i| {
            let x = -support + step * i as f32;
            json!({ "x": x, "w": args.filter.kernel(x, args.scale) })
        })
        .collect();
    let report = json!({
        "filter": args.filter,
        "scale": args.scale,
        "support": support,
        "points": points,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
