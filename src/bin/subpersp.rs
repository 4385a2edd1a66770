use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "subpersp", version)]
struct Cli {
    /// Log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the quad a line's transform tags produce.
    Forward(ForwardArgs),
    /// Solve transform tags for a quad.
    Inverse(InverseArgs),
    /// Parse a persisted ambient plane descriptor.
    Plane(PlaneArgs),
}

#[derive(Parser, Debug)]
struct ForwardArgs {
    /// Transform parameters as JSON.
    #[arg(long)]
    params: String,

    /// Unformatted text extents as JSON (`{"x0":..,"y0":..,"x1":..,"y1":..}`).
    #[arg(long)]
    extents: String,

    /// Script frame as JSON; defaults to a 1920x1080 script shown 1:1.
    #[arg(long)]
    frame: Option<String>,
}

#[derive(Parser, Debug)]
struct InverseArgs {
    /// Quad corners in script coordinates as JSON (`[{"x":..,"y":..}, ...]`).
    #[arg(long)]
    quad: String,

    /// Line snapshot as JSON: params, extents and style of the previous state.
    #[arg(long)]
    line: String,

    /// Where to put `\org`.
    #[arg(long, value_enum, default_value_t = ModeChoice::Center)]
    mode: ModeChoice,

    /// Script frame as JSON; defaults to a 1920x1080 script shown 1:1.
    #[arg(long)]
    frame: Option<String>,
}

#[derive(Parser, Debug)]
struct PlaneArgs {
    /// Descriptor in `x1;y1|x2;y2|x3;y3|x4;y4` form.
    descriptor: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Center,
    NoShear,
    Keep,
}

impl From<ModeChoice> for subpersp::OriginMode {
    fn from(value: ModeChoice) -> Self {
        match value {
            ModeChoice::Center => Self::Center,
            ModeChoice::NoShear => Self::NoShear,
            ModeChoice::Keep => Self::Keep,
        }
    }
}

#[derive(serde::Serialize)]
struct InverseOut<'a> {
    params: &'a subpersp::TransformParams,
    edits: &'a [subpersp::TagEdit],
    block: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Forward(args) => cmd_forward(args),
        Command::Inverse(args) => cmd_inverse(args),
        Command::Plane(args) => cmd_plane(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_frame(frame: Option<&str>) -> anyhow::Result<subpersp::ScriptFrame> {
    let frame = match frame {
        Some(s) => serde_json::from_str(s).with_context(|| "parse frame JSON")?,
        None => subpersp::ScriptFrame::default(),
    };
    frame.validate()?;
    Ok(frame)
}

fn cmd_forward(args: ForwardArgs) -> anyhow::Result<()> {
    let params: subpersp::TransformParams =
        serde_json::from_str(&args.params).with_context(|| "parse params JSON")?;
    let extents: subpersp::TextExtents =
        serde_json::from_str(&args.extents).with_context(|| "parse extents JSON")?;
    let frame = parse_frame(args.frame.as_deref())?;

    let quad = subpersp::project(&params, &extents, frame.screen_z());
    println!("{}", serde_json::to_string_pretty(&quad)?);
    Ok(())
}

fn cmd_inverse(args: InverseArgs) -> anyhow::Result<()> {
    let quad: subpersp::Quad =
        serde_json::from_str(&args.quad).with_context(|| "parse quad JSON")?;
    let line: subpersp::LineState =
        serde_json::from_str(&args.line).with_context(|| "parse line JSON")?;
    let frame = parse_frame(args.frame.as_deref())?;

    if !quad.is_convex() {
        return Err(subpersp::SubperspError::degenerate("quad is not convex").into());
    }
    let params = subpersp::unproject(
        &quad,
        &subpersp::Unprojection {
            extents: &line.extents,
            previous: &line.params,
            mode: args.mode.into(),
            screen_z: frame.screen_z(),
        },
    )
    .with_context(|| "solve quad")?;

    let edits = subpersp::emit(&params, &line.style);
    let out = InverseOut {
        params: &params,
        edits: &edits,
        block: subpersp::override_block(&edits),
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_plane(args: PlaneArgs) -> anyhow::Result<()> {
    let quad = subpersp::AmbientPlane::decode(&args.descriptor)
        .with_context(|| format!("decode '{}'", args.descriptor))?;
    println!("{}", serde_json::to_string_pretty(&quad)?);
    Ok(())
}
