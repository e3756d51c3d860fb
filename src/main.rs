use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use crossring::{read_job, write_result, EngineConfig};

/// Runs a sparse matrix job file and writes the result next to it
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Job file: header line, right-hand block, then a left-hand block or scalar
    input: PathBuf,

    /// Result file [default: <INPUT file name>_output.csv beside the input]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also print the result to stdout
    #[arg(long)]
    echo: bool,

    /// Worker threads for multiplication [default: all cores]
    #[arg(short, long)]
    threads: Option<usize>,

    /// Field delimiter
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// Log level: 0 off, 1 info, 2 debug, 3 trace
    #[arg(short, long, default_value_t = 0)]
    log: u8,
}

impl CliArgs {
    fn log_level(&self) -> log::LevelFilter {
        use log::LevelFilter::*;
        match self.log {
            1 => Info,
            2 => Debug,
            3 => Trace,
            _ => Off,
        }
    }

    fn output_path(&self) -> PathBuf {
        if let Some(path) = &self.output {
            return path.clone();
        }
        let name = self
            .input
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parent = self
            .input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        parent.join(format!("{}_output.csv", name))
    }

    fn config(&self) -> Result<EngineConfig> {
        if !self.delimiter.is_ascii() {
            bail!("delimiter must be a single ASCII character, got `{}`", self.delimiter);
        }
        let mut config = EngineConfig::default().with_delimiter(self.delimiter as u8);
        if let Some(n) = self.threads {
            config = config.with_threads(n);
        }
        Ok(config)
    }
}

fn init_logger(level: log::LevelFilter) -> Result<()> {
    use simplelog::*;

    let mut cb = ConfigBuilder::new();
    cb.set_location_level(LevelFilter::Off);
    cb.set_target_level(LevelFilter::Off);
    cb.set_thread_level(LevelFilter::Off);
    cb.set_level_color(Level::Trace, Some(Color::Green));

    TermLogger::init(level, cb.build(), TerminalMode::Mixed, ColorChoice::Auto)
        .context("failed to install logger")
}

fn run(args: &CliArgs) -> Result<()> {
    init_logger(args.log_level())?;
    info!("args: {:?}", args);

    let config = args.config()?;
    #[cfg(feature = "parallel")]
    crossring::install_global_pool(&config)?;
    let start = Instant::now();

    let file = File::open(&args.input)
        .with_context(|| format!("cannot open {}", args.input.display()))?;
    let job = read_job::<i64, _>(BufReader::new(file), &config)
        .with_context(|| format!("cannot read job from {}", args.input.display()))?;

    let result = job.run(&config)?;

    let output = args.output_path();
    let file = File::create(&output)
        .with_context(|| format!("cannot create {}", output.display()))?;
    write_result(BufWriter::new(file), job.op, &result, &config)
        .with_context(|| format!("cannot write {}", output.display()))?;
    info!("wrote {} cells to {}", result.nnz(), output.display());

    if args.echo {
        write_result(std::io::stdout().lock(), job.op, &result, &config)?;
    }

    info!("time: {:?}", start.elapsed());
    Ok(())
}

fn main() {
    let args = CliArgs::parse();

    if let Err(e) = run(&args) {
        log::error!("{:#}", e);
        eprintln!("\x1b[0;31merror\x1b[0m: {:#}", e);
        std::process::exit(1)
    }
}
