use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "shotmate", version)]
struct Cli {
    /// Log more (repeat for trace output).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration JSON (defaults apply when absent).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the silhouette for an image reference.
    Silhouette(SilhouetteArgs),
    /// List catalog poses.
    Poses(PosesArgs),
    /// Composite a pose overlay over a camera frame PNG.
    Overlay(OverlayArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Svg,
    Png,
}

#[derive(Parser, Debug)]
struct SilhouetteArgs {
    /// Image reference the silhouette is seeded from.
    #[arg(long)]
    uri: String,

    /// Generation canvas width (defaults to the processing size).
    #[arg(long)]
    width: Option<f64>,

    /// Generation canvas height (defaults to the processing size).
    #[arg(long)]
    height: Option<f64>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Output path (stdout for json/svg when omitted; required for png).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PosesArgs {
    /// `all` or a category id.
    #[arg(long, default_value = "all")]
    category: String,

    /// Print the full pose records as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum NudgeArg {
    Up,
    Down,
    Left,
    Right,
}

impl From<NudgeArg> for shotmate::Nudge {
    fn from(n: NudgeArg) -> Self {
        match n {
            NudgeArg::Up => Self::Up,
            NudgeArg::Down => Self::Down,
            NudgeArg::Left => Self::Left,
            NudgeArg::Right => Self::Right,
        }
    }
}

#[derive(Parser, Debug)]
struct OverlayArgs {
    /// Camera frame image.
    #[arg(long)]
    frame: PathBuf,

    /// Catalog pose id.
    #[arg(long, conflicts_with = "custom_uri", required_unless_present = "custom_uri")]
    pose: Option<String>,

    /// Local overlay image used for the catalog pose.
    #[arg(long, requires = "pose")]
    overlay_image: Option<String>,

    /// Import a custom pose from this image reference instead.
    #[arg(long)]
    custom_uri: Option<String>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Overlay opacity (snapped to the slider grid).
    #[arg(long)]
    opacity: Option<f64>,

    /// Overlay scale (snapped to the slider grid).
    #[arg(long)]
    scale: Option<f64>,

    /// Offset nudges, applied in order (e.g. `right,right,up`).
    #[arg(long, value_enum, value_delimiter = ',')]
    nudge: Vec<NudgeArg>,

    /// Rotation in degrees, parsed like free-text entry.
    #[arg(long, allow_hyphen_values = true)]
    rotation: Option<String>,

    /// Z-rotation in degrees, parsed like free-text entry.
    #[arg(long, allow_hyphen_values = true)]
    z_rotation: Option<String>,

    /// Mirror the overlay left to right.
    #[arg(long, default_value_t = false)]
    flip_h: bool,

    /// Mirror the overlay top to bottom.
    #[arg(long, default_value_t = false)]
    flip_v: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => shotmate::ShotmateConfig::load(path)?,
        None => shotmate::ShotmateConfig::default(),
    };
    match cli.cmd {
        Command::Silhouette(args) => cmd_silhouette(args, &config),
        Command::Poses(args) => cmd_poses(args),
        Command::Overlay(args) => cmd_overlay(args, &config),
    }
}

fn init_tracing(verbose: u8) {
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

fn cmd_silhouette(args: SilhouetteArgs, config: &shotmate::ShotmateConfig) -> anyhow::Result<()> {
    let processing = config.silhouette.processing;
    let width = args.width.unwrap_or(f64::from(processing.width));
    let height = args.height.unwrap_or(f64::from(processing.height));
    let data = shotmate::silhouette_for_uri(&args.uri, width, height);
    let style = shotmate::SilhouetteStyle::from(&config.silhouette);

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&data).context("serialize silhouette")?;
            write_text(args.out.as_deref(), &json)
        }
        OutputFormat::Svg => write_text(
            args.out.as_deref(),
            &shotmate::to_svg_document(&data, &style),
        ),
        OutputFormat::Png => {
            let out = args.out.context("--out is required for png output")?;
            let img = shotmate::rasterize_silhouette(&data, &style, style.view_box)?;
            write_png(&out, &img.to_straight_rgba8(), img.width, img.height)
        }
    }
}

fn cmd_poses(args: PosesArgs) -> anyhow::Result<()> {
    let catalog = shotmate::PoseCatalog::builtin()?;
    let filter = shotmate::CategoryFilter::parse(&args.category)?;
    let poses: Vec<&shotmate::Pose> = catalog.filter(filter).collect();

    if args.json {
        let json = serde_json::to_string_pretty(&poses).context("serialize poses")?;
        println!("{json}");
        return Ok(());
    }
    for p in poses {
        let category = catalog.category_name(p.category).unwrap_or(p.category.id());
        println!("{:<12} {:<18} {:<10} {:?}", p.id, p.name, category, p.difficulty);
    }
    Ok(())
}

fn cmd_overlay(args: OverlayArgs, config: &shotmate::ShotmateConfig) -> anyhow::Result<()> {
    let mut store = shotmate::PoseStore::new(&config.overlay);
    let mut camera = shotmate::CameraScreen::new(config.overlay);

    if let Some(uri) = &args.custom_uri {
        let picker = CliPicker { uri: uri.clone() };
        let token = store.token(shotmate::Screen::CustomPose);
        let outcome = pollster::block_on(shotmate::import_custom_pose(
            &picker,
            &shotmate::SystemClock,
            None,
            &config.silhouette,
        ));
        if let Some(notice) = store.apply_import(token, outcome) {
            eprintln!("{}: {}", notice.title, notice.message);
        }
    } else if let Some(id) = &args.pose {
        let catalog = shotmate::PoseCatalog::builtin()?;
        let mut pose = catalog
            .get(id)
            .cloned()
            .with_context(|| format!("unknown pose id '{id}'"))?;
        if args.overlay_image.is_some() {
            pose.overlay_image = args.overlay_image.clone();
        }
        store.set_selected_pose(Some(pose.into()));
    }

    if let Some(opacity) = args.opacity {
        camera.set_opacity(&mut store, opacity);
    }
    if let Some(scale) = args.scale {
        camera.set_scale(scale);
    }
    for n in &args.nudge {
        camera.nudge((*n).into());
    }
    if let Some(text) = args.rotation {
        camera.edit_rotation_text(text);
        camera.submit_rotation_text();
    }
    if let Some(text) = args.z_rotation {
        camera.edit_z_rotation_text(text);
        camera.submit_z_rotation_text();
    }
    if args.flip_h {
        camera.toggle_flip_h();
    }
    if args.flip_v {
        camera.toggle_flip_v();
    }

    let frame_bytes = std::fs::read(&args.frame)
        .with_context(|| format!("read frame '{}'", args.frame.display()))?;
    let mut frame = shotmate::FrameRGBA::from(shotmate::decode_image(&frame_bytes)?);

    let pose = store
        .selected_pose()
        .context("no pose selected (import was cancelled?)")?;
    let loader = shotmate::FsUriLoader::new(std::env::current_dir().context("current dir")?);
    let mut cache = shotmate::OverlayCache::new(shotmate::SilhouetteStyle::from(&config.silhouette));
    let prepared = cache.prepare(pose, &loader)?;
    if let Some(layer) = camera.overlay_layer(&store, &prepared.image) {
        shotmate::composite_overlay(&mut frame, &layer)?;
    }

    write_png(&args.out, &frame.to_straight_rgba8(), frame.width, frame.height)
}

/// Picker that always returns the image given on the command line.
struct CliPicker {
    uri: String,
}

impl shotmate::ImagePicker for CliPicker {
    async fn pick_image(&self) -> shotmate::ShotmateResult<shotmate::PickedImage> {
        Ok(shotmate::PickedImage {
            uri: self.uri.clone(),
        })
    }
}

fn write_text(out: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            ensure_parent_dir(path)?;
            std::fs::write(path, text)
                .with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn write_png(out: &Path, rgba8: &[u8], width: u32, height: u32) -> anyhow::Result<()> {
    ensure_parent_dir(out)?;
    image::save_buffer_with_format(
        out,
        rgba8,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
