use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use pastekit::{
    BatchItem, BatchOpts, CategoryRecord, CocoDataset, CompositeAnnotation, Compositor,
    CompositorConfig, ImageRecord,
};

#[derive(Parser, Debug)]
#[command(name = "pastekit", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite one object onto one background.
    One(OneArgs),
    /// Composite one object onto every image in a directory and write a COCO file.
    Batch(BatchArgs),
}

#[derive(Parser, Debug)]
struct OneArgs {
    /// Background image.
    #[arg(long)]
    background: PathBuf,

    /// Object image (alpha is honored when present).
    #[arg(long)]
    object: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Write annotation records as JSON here.
    #[arg(long)]
    annotations: Option<PathBuf>,

    /// Image id stamped into the annotation.
    #[arg(long, default_value_t = 1)]
    image_id: u64,

    /// Generator seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// JSON config overriding compositor defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Directory of background images.
    #[arg(long)]
    backgrounds: PathBuf,

    /// Object image (alpha is honored when present).
    #[arg(long)]
    object: PathBuf,

    /// Output directory (`images/` and `annotations.json`).
    #[arg(long)]
    out_dir: PathBuf,

    /// Base generator seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// JSON config overriding compositor defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable item-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Backgrounds loaded per chunk.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Category name written to the COCO file.
    #[arg(long, default_value = "target")]
    category_name: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::One(args) => cmd_one(args),
        Command::Batch(args) => cmd_batch(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<CompositorConfig> {
    match path {
        Some(p) => Ok(CompositorConfig::from_path(p)?),
        None => Ok(CompositorConfig::default()),
    }
}

fn cmd_one(args: OneArgs) -> anyhow::Result<()> {
    let compositor = Compositor::new(load_config(args.config.as_deref())?)?;
    let background = pastekit::load_background(&args.background)?;
    let object = pastekit::load_object(&args.object)?;

    let mut rng = pastekit::rng_from_seed(args.seed);
    let out = compositor.composite(&mut rng, background, &object, args.image_id)?;

    write_png(&out.image, &args.out)?;
    eprintln!("wrote {}", args.out.display());

    if let Some(path) = args.annotations {
        create_parent_dir(&path)?;
        let json = CompositeAnnotation::list_to_json(&out.annotations)?;
        std::fs::write(&path, json).with_context(|| format!("write '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    if args.chunk_size == 0 {
        anyhow::bail!("--chunk-size must be >= 1");
    }
    let compositor = Compositor::new(load_config(args.config.as_deref())?)?;
    let object = pastekit::load_object(&args.object)?;
    let paths = list_backgrounds(&args.backgrounds)?;
    if paths.is_empty() {
        anyhow::bail!("no images found in '{}'", args.backgrounds.display());
    }

    let images_dir = args.out_dir.join("images");
    std::fs::create_dir_all(&images_dir)
        .with_context(|| format!("create output dir '{}'", images_dir.display()))?;

    let opts = BatchOpts {
        seed: args.seed,
        parallel: args.parallel,
        threads: args.threads,
    };
    let mut dataset = CocoDataset::new(vec![CategoryRecord::object(
        compositor.config().category_id,
        args.category_name.clone(),
    )]);

    let mut next_id = 1u64;
    for chunk in paths.chunks(args.chunk_size) {
        let mut items = Vec::with_capacity(chunk.len());
        let mut names = Vec::with_capacity(chunk.len());
        for path in chunk {
            items.push(BatchItem {
                image_id: next_id,
                background: pastekit::load_background(path)?,
            });
            names.push(output_name(path, next_id));
            next_id += 1;
        }

        let results = pastekit::generate_batch(&compositor, items, &object, &opts)?;
        for (res, name) in results.iter().zip(names) {
            write_png(&res.image, &images_dir.join(&name))?;
            let image_id = res.annotations.first().map_or(0, |a| a.image_id);
            dataset.push(
                ImageRecord {
                    id: image_id,
                    file_name: name,
                    width: res.image.width(),
                    height: res.image.height(),
                },
                &res.annotations,
            )?;
        }
        tracing::info!(done = dataset.images.len(), total = paths.len(), "chunk written");
    }

    let ann_path = args.out_dir.join("annotations.json");
    dataset.write_json(&ann_path)?;
    eprintln!(
        "wrote {} images and {}",
        dataset.images.len(),
        ann_path.display()
    );
    Ok(())
}

fn list_backgrounds(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read dir '{}'", dir.display()))?;
    for entry in entries {
        let path = entry
            .with_context(|| format!("read dir entry in '{}'", dir.display()))?
            .path();
        if path.is_file() && pastekit::is_supported_image(&path) {
            paths.push(path);
        } else {
            tracing::debug!(path = %path.display(), "skipping non-image entry");
        }
    }
    paths.sort();
    Ok(paths)
}

fn output_name(path: &Path, image_id: u64) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    format!("{image_id:06}_{stem}.png")
}

fn create_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_png(img: &image::RgbImage, path: &Path) -> anyhow::Result<()> {
    create_parent_dir(path)?;
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))
}
