use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use slotbar::config;
use slotbar::events::{Point, PointerEvent};
use slotbar::gui::slider::{FRAME_INTERVAL, MeasureSpec, Size, Slider};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "slotbar", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the slider into a PNG, optionally replaying a drag first
    Render(RenderArgs),
    /// Write the default config file and print its path
    Init,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Config file to use instead of the one in the user config directory
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 500.0)]
    width: f64,

    #[arg(long, default_value_t = 80.0)]
    height: f64,

    /// Slot selected before any drag
    #[arg(short, long)]
    index: Option<usize>,

    /// Pointer x positions: pressed at the first, moved through the rest,
    /// released at the last (e.g. --drag 240,330,410)
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    drag: Vec<f64>,

    /// Directory that receives every animation frame as a numbered PNG
    #[arg(long)]
    frames: Option<PathBuf>,

    #[arg(short, long, default_value = "slotbar.png")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => render(args),
        Commands::Init => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn render(args: RenderArgs) -> anyhow::Result<()> {
    let slider_config = config::load_config(args.config.as_deref())
        .context("Failed to load slider configuration")?;
    log::info!("Configuration loaded: {} slots", slider_config.slot_count());

    let mut slider = Slider::new(slider_config);
    slider.set_on_slide(|index| log::info!("Slid to slot {index}"));

    let size = slider.measure(MeasureSpec::exact(args.width), MeasureSpec::exact(args.height));
    if size.width < 1.0 || size.height < 1.0 {
        anyhow::bail!("Size {}x{} is too small to render", size.width, size.height);
    }
    slider.resize(size);

    if let Some(index) = args.index {
        slider.set_initial_index(index)?;
    }

    if let Some((&first, rest)) = args.drag.split_first() {
        let y = slider.layout().map_or(size.height / 2.0, |l| l.y());
        slider.handle(PointerEvent::Down(Point::new(first, y)));
        if !slider.gesture().is_dragging() {
            log::warn!("Press at x = {first} missed the slider");
        }
        for &x in rest {
            slider.handle(PointerEvent::Move(Point::new(x, y)));
        }
        let last = rest.last().copied().unwrap_or(first);
        slider.handle(PointerEvent::Up(Point::new(last, y)));
    }

    if let Some(dir) = &args.frames {
        fs_err::create_dir_all(dir)?;
        let mut frame = 0;
        write_png(&mut slider, size, &dir.join(format!("frame-{frame:04}.png")))?;
        while slider.is_animating() {
            slider.tick(FRAME_INTERVAL);
            frame += 1;
            write_png(&mut slider, size, &dir.join(format!("frame-{frame:04}.png")))?;
        }
    } else {
        while slider.is_animating() {
            slider.tick(FRAME_INTERVAL);
        }
    }

    write_png(&mut slider, size, &args.output)
}

fn write_png(slider: &mut Slider, size: Size, path: &Path) -> anyhow::Result<()> {
    let surface = cairo::ImageSurface::create(
        cairo::Format::ARgb32,
        size.width.ceil() as i32,
        size.height.ceil() as i32,
    )?;
    {
        let cr = cairo::Context::new(&surface)?;
        if let Err(e) = slider.render(&cr) {
            log::error!("Drawing error: {}", e);
            return Err(e.into());
        }
    }
    let mut file = fs_err::File::create(path)?;
    surface
        .write_to_png(&mut file)
        .with_context(|| format!("Failed to encode {}", path.display()))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
