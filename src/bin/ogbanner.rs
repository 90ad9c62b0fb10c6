use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "ogbanner", version, about = "Render Open Graph banner images")]
struct Cli {
    /// Log layer steps at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the four stock theme banners.
    Banners(BannersArgs),
    /// Render the Earth Dragon edition banner.
    Earth(EarthArgs),
    /// Derive see-through variants of an existing image.
    Translucent(TranslucentArgs),
    /// Run every job of a manifest JSON file.
    Run(RunArgs),
    /// Print which font text would be drawn with.
    Fonts(FontsArgs),
}

#[derive(Parser, Debug)]
struct BannersArgs {
    /// Output directory.
    #[arg(long, default_value = "public")]
    out_dir: PathBuf,

    /// Font file (overrides `OGBANNER_FONT` and the system candidates).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Grain seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Parser, Debug)]
struct EarthArgs {
    /// Output PNG path.
    #[arg(long, default_value = "public/og-earth-dragon.png")]
    out: PathBuf,

    /// Font file (overrides `OGBANNER_FONT` and the system candidates).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Grain seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Parser, Debug)]
struct TranslucentArgs {
    /// Source image.
    #[arg(long)]
    src: PathBuf,

    /// Output directory; defaults to the source's directory.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Output file stem; defaults to the source file stem.
    #[arg(long)]
    stem: Option<String>,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Manifest JSON.
    #[arg(long)]
    manifest: PathBuf,

    /// Directory relative paths resolve against; defaults to the manifest's directory.
    #[arg(long)]
    root: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FontsArgs {
    /// Font file to inspect instead of the discovered one.
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Banners(args) => cmd_banners(args),
        Command::Earth(args) => cmd_earth(args),
        Command::Translucent(args) => cmd_translucent(args),
        Command::Run(args) => cmd_run(args),
        Command::Fonts(args) => cmd_fonts(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "ogbanner=debug" } else { "ogbanner=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn report(written: &[ogbanner::WrittenFile]) {
    for w in written {
        eprintln!("wrote {w}");
    }
}

fn write_one(path: &Path, surface: &ogbanner::Surface) -> anyhow::Result<ogbanner::WrittenFile> {
    let bytes = ogbanner::write_png(path, surface)?;
    Ok(ogbanner::WrittenFile {
        path: path.to_path_buf(),
        width: surface.width(),
        height: surface.height(),
        bytes,
    })
}

fn cmd_banners(args: BannersArgs) -> anyhow::Result<()> {
    let mut manifest = ogbanner::Manifest::site_default();
    manifest
        .jobs
        .retain(|job| matches!(job, ogbanner::Job::Banner { .. }));
    manifest.out_dir = args.out_dir;
    manifest.font = args.font;
    manifest.seed = args.seed;

    let written = ogbanner::run_manifest(&manifest, Path::new("."))?;
    report(&written);
    Ok(())
}

fn cmd_earth(args: EarthArgs) -> anyhow::Result<()> {
    let font = ogbanner::FontBook::discover_default(args.font.as_deref())?;
    let spec = ogbanner::EarthSpec {
        seed: args.seed,
        ..ogbanner::EarthSpec::default()
    };
    let img = ogbanner::build_earth_banner(&spec, font.as_ref())?;
    let written = write_one(&args.out, &img)?;
    report(&[written]);
    Ok(())
}

fn cmd_translucent(args: TranslucentArgs) -> anyhow::Result<()> {
    let out_dir = args
        .out_dir
        .unwrap_or_else(|| args.src.parent().unwrap_or_else(|| Path::new(".")).to_path_buf());
    let manifest = ogbanner::Manifest {
        out_dir,
        font: None,
        seed: 0,
        threads: None,
        jobs: vec![ogbanner::Job::Translucent {
            source: args.src,
            stem: args.stem,
        }],
    };

    let written = ogbanner::run_manifest(&manifest, Path::new("."))?;
    report(&written);
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let manifest = ogbanner::Manifest::load(&args.manifest)
        .with_context(|| format!("load manifest '{}'", args.manifest.display()))?;
    let root = match args.root {
        Some(root) => root,
        None => args
            .manifest
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };
    let written = ogbanner::run_manifest(&manifest, &root)?;
    report(&written);
    Ok(())
}

fn cmd_fonts(args: FontsArgs) -> anyhow::Result<()> {
    let Some(font) = ogbanner::FontBook::discover_default(args.font.as_deref())? else {
        eprintln!("no font found; set --font or {}", ogbanner::FONT_ENV_VAR);
        eprintln!("searched:");
        for candidate in ogbanner::DEFAULT_FONT_CANDIDATES {
            eprintln!("  {candidate}");
        }
        return Ok(());
    };

    let mut engine = ogbanner::TextLayoutEngine::new();
    let family = engine.register(&font)?;
    eprintln!("font diagnostics:");
    eprintln!("  path:    {}", font.path().display());
    eprintln!("  family:  {family}");
    eprintln!("  sha256:  {}", sha256_hex(font.bytes()));
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
