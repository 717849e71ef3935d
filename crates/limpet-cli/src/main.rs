use limpet::{
    Algorithm, GridBasedOptions, GridMode, LayoutAlignment, ResultData, Scene, Traversal,
};
use limpet_io::{LoadError, RenderError, RenderOptions, SaveError};
use serde::Serialize;
use std::io::Read;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Load(LoadError),
    Save(SaveError),
    Render(RenderError),
    Json(serde_json::Error),
    NoPlacement,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Load(err) => write!(f, "failed to load scene: {err}"),
            CliError::Save(err) => write!(f, "failed to save result: {err}"),
            CliError::Render(err) => write!(f, "failed to render image: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::NoPlacement => write!(f, "Circles can't be placed"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<LoadError> for CliError {
    fn from(value: LoadError) -> Self {
        Self::Load(value)
    }
}

impl From<SaveError> for CliError {
    fn from(value: SaveError) -> Self {
        Self::Save(value)
    }
}

impl From<RenderError> for CliError {
    fn from(value: RenderError) -> Self {
        Self::Render(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Place,
    Check,
}

struct Choice<T>(T);

impl FromStr for Choice<GridMode> {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Ok(Self(GridMode::Horizontal)),
            "vertical" => Ok(Self(GridMode::Vertical)),
            _ => Err(()),
        }
    }
}

impl FromStr for Choice<LayoutAlignment> {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "width-less" => Ok(Self(LayoutAlignment::WidthLess)),
            "height-less" => Ok(Self(LayoutAlignment::HeightLess)),
            "none" => Ok(Self(LayoutAlignment::None)),
            _ => Err(()),
        }
    }
}

impl FromStr for Choice<Traversal> {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sticky" => Ok(Self(Traversal::Sticky)),
            "round-robin" => Ok(Self(Traversal::RoundRobin)),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    out: Option<String>,
    json: bool,
    pretty: bool,
    image: Option<String>,
    render: RenderOptions,
    placement: GridBasedOptions,
}

#[derive(Serialize)]
struct CircleOut {
    id: i64,
    x: f64,
    y: f64,
    inner_radius: f64,
    outer_radius: f64,
}

#[derive(Serialize)]
struct PlacementOut {
    circles: Vec<CircleOut>,
}

impl From<&ResultData> for PlacementOut {
    fn from(result: &ResultData) -> Self {
        Self {
            circles: result
                .circles
                .iter()
                .map(|c| CircleOut {
                    id: c.id(),
                    x: c.position.x,
                    y: c.position.y,
                    inner_radius: c.inner_radius(),
                    outer_radius: c.outer_radius(),
                })
                .collect(),
        }
    }
}

fn usage() -> &'static str {
    "limpet-cli\n\
\n\
USAGE:\n\
  limpet-cli [place] [--out <path>] [--json] [--pretty] [--image <path.png|path.svg>] [--scale <n>] [--background <css-color>|none] [--mode horizontal|vertical] [--alignment width-less|height-less|none] [--traversal sticky|round-robin] [--no-relax] [<scene.xml>|-]\n\
  limpet-cli check [<scene.xml>|-]\n\
\n\
NOTES:\n\
  - If <scene.xml> is omitted or '-', the scene is read from stdin.\n\
  - place prints the result XML to stdout by default; use --out to write a file.\n\
  - --json switches the result to JSON (with radii); --pretty indents it.\n\
  - --image draws the zone, exclusions and placed circles; the format follows the extension.\n\
  - Exit code 3 means the circles could not all be placed.\n\
  - Set RUST_LOG=debug for placement diagnostics, LIMPET_PLACEMENT_TIMING=1 for stage timings.\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
    it.next().ok_or(CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "place" => args.command = Command::Place,
            "check" => args.command = Command::Check,
            "--json" => args.json = true,
            "--pretty" => args.pretty = true,
            "--no-relax" => args.placement.relax = false,
            "--out" => args.out = Some(next_value(&mut it)?.clone()),
            "--image" => args.image = Some(next_value(&mut it)?.clone()),
            "--scale" => {
                let scale = next_value(&mut it)?
                    .parse::<f64>()
                    .map_err(|_| CliError::Usage(usage()))?;
                if !(scale.is_finite() && scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
                args.render.scale = scale;
            }
            "--background" => {
                let bg = next_value(&mut it)?.trim();
                args.render.background = match bg {
                    "" | "none" => None,
                    bg => Some(bg.to_string()),
                };
            }
            "--mode" => {
                let Choice(mode): Choice<GridMode> = next_value(&mut it)?
                    .parse()
                    .map_err(|_| CliError::Usage(usage()))?;
                args.placement.mode = mode;
            }
            "--alignment" => {
                let Choice(alignment): Choice<LayoutAlignment> = next_value(&mut it)?
                    .parse()
                    .map_err(|_| CliError::Usage(usage()))?;
                args.placement.alignment = alignment;
            }
            "--traversal" => {
                let Choice(traversal): Choice<Traversal> = next_value(&mut it)?
                    .parse()
                    .map_err(|_| CliError::Usage(usage()))?;
                args.placement.traversal = traversal;
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_scene(input: Option<&str>) -> Result<Scene, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(limpet_io::parse_scene(&buf)?)
        }
        Some(path) => Ok(limpet_io::load_scene(path)?),
    }
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn write_result(result: &ResultData, args: &Args) -> Result<(), CliError> {
    if args.json {
        let out = PlacementOut::from(result);
        let mut text = if args.pretty {
            serde_json::to_string_pretty(&out)?
        } else {
            serde_json::to_string(&out)?
        };
        text.push('\n');
        return write_text(&text, args.out.as_deref());
    }
    match args.out.as_deref() {
        None | Some("-") => write_text(&limpet_io::result_to_xml(result), None),
        Some(path) => Ok(limpet_io::save_result(result, path)?),
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let scene = read_scene(args.input.as_deref())?;

    match args.command {
        Command::Check => {
            let zone = scene.zone();
            println!(
                "ok: zone ({}, {})-({}, {}), {} exclusion area(s), {} circle(s)",
                zone.min_point().x,
                zone.min_point().y,
                zone.max_point().x,
                zone.max_point().y,
                scene.exclusion_areas().len(),
                scene.circles().len()
            );
            Ok(())
        }
        Command::Place => {
            let Some(result) = limpet::place(&scene, Algorithm::GridBased(args.placement)) else {
                return Err(CliError::NoPlacement);
            };
            tracing::info!(circles = result.circles.len(), "placement succeeded");
            write_result(&result, &args)?;

            // The result is already written; a failed image only affects the exit code.
            if let Some(image) = args.image.as_deref() {
                limpet_io::write_image(image, &scene, &result, &args.render)?;
            }
            Ok(())
        }
    }
}

fn main() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "warn"))
        .try_init();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::NoPlacement) => {
            eprintln!("{}", CliError::NoPlacement);
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
