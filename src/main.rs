use std::fs::File;
// Write is needed to flush partial lines to the console
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use shapes_data::manifest::write_manifest;
use shapes_data::preview::{print_img, save_img};
use shapes_data::shapes::{load_data, ShapesData, SplitKind, DEFAULT_ROOT, DEFAULT_SEED};
use shapes_data::{Error, Result, Shape};

#[derive(Parser)]
#[command(version, about = "Load and partition the hand-drawn shapes dataset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DataArgs {
    /// Folder holding circles/, squares/ and triangles/
    #[arg(long, default_value = DEFAULT_ROOT)]
    root: PathBuf,
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
}

#[derive(Clone, Copy, ValueEnum)]
enum SplitArg {
    Train,
    Dev,
    Test,
}

impl From<SplitArg> for SplitKind {
    fn from(arg: SplitArg) -> Self {
        match arg {
            SplitArg::Train => SplitKind::Train,
            SplitArg::Dev => SplitKind::Dev,
            SplitArg::Test => SplitKind::Test,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the size and class balance of every split
    Summary {
        #[command(flatten)]
        data: DataArgs,
    },
    /// Show one image of a split together with its label
    Preview {
        #[command(flatten)]
        data: DataArgs,
        #[arg(long, value_enum, default_value_t = SplitArg::Train)]
        split: SplitArg,
        #[arg(long, default_value_t = 0)]
        index: usize,
        /// Also write the image to this PNG file
        #[arg(long)]
        save: Option<PathBuf>,
        #[arg(long, default_value_t = 8)]
        scale: u32,
    },
    /// Write which drawing went to which split as CSV
    Manifest {
        #[command(flatten)]
        data: DataArgs,
        #[arg(long, default_value = "splits.csv")]
        out: PathBuf,
    },
}

fn load(args: &DataArgs) -> Result<ShapesData> {
    print!("Loading data... ");
    let _ = io::stdout().flush();
    let now = Instant::now();
    let data = load_data(&args.root, args.seed)?;
    println!(
        "Loaded {} examples from {} [{}ms]",
        data.train.len() + data.dev.len() + data.test.len(),
        args.root.display(),
        now.elapsed().as_millis()
    );
    Ok(data)
}

fn summary(args: &DataArgs) -> Result<()> {
    let data = load(args)?;
    for (kind, set) in data.iter() {
        let counts = Shape::ALL
            .iter()
            .map(|&shape| format!("{} {}", set.count(shape), shape))
            .collect::<Vec<_>>()
            .join(", ");
        println!("{:>5}: {:>3} examples ({})", kind.label(), set.len(), counts);
    }
    Ok(())
}

fn preview(
    args: &DataArgs,
    split: SplitKind,
    index: usize,
    save: Option<&Path>,
    scale: u32,
) -> Result<()> {
    let data = load(args)?;
    let set = data.get(split);
    let stdout = io::stdout();
    print_img(set, index, &mut stdout.lock())?;
    if let Some(path) = save {
        save_img(set, index, path, scale)?;
        println!("Saved {} #{} to {}", split, index, path.display());
    }
    Ok(())
}

fn manifest(args: &DataArgs, out: &Path) -> Result<()> {
    let data = load(args)?;
    print!("Writing manifest... ");
    let _ = io::stdout().flush();
    let now = Instant::now();
    let file = File::create(out).map_err(|source| Error::Io {
        path: out.to_path_buf(),
        source,
    })?;
    write_manifest(&data, BufWriter::new(file))?;
    println!("Done - {} [{}ms]", out.display(), now.elapsed().as_millis());
    Ok(())
}

fn main() {
    // Diagnostics go to stderr, RUST_LOG=info or debug shows the loader's progress
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Summary { data } => summary(&data),
        Commands::Preview {
            data,
            split,
            index,
            save,
            scale,
        } => preview(&data, split.into(), index, save.as_deref(), scale),
        Commands::Manifest { data, out } => manifest(&data, &out),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
