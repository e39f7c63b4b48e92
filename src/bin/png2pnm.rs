use png2pnm::{
  netpbm::netpbm_write_raster,
  png::{decode_png, DecodeOptions},
  PngResult,
};

use std::{
  fs::File,
  io::{BufReader, BufWriter},
  path::PathBuf,
  process::ExitCode,
};

use clap::Parser;
use env_logger::{Builder, Env};
use log::LevelFilter;

/// Converts an 8-bit grayscale or RGB PNG into a binary PGM/PPM file.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
  /// The PNG file to read.
  input: PathBuf,

  /// Where to write the PGM (grayscale) or PPM (color) output.
  output: PathBuf,

  /// Fail if any chunk's CRC doesn't match its contents.
  #[arg(long)]
  verify_crc: bool,

  /// Refuse images wider or taller than this.
  #[arg(long, value_name = "PIXELS")]
  max_dimension: Option<u32>,

  /// Log more (-v for debug, -vv for trace). Overrides `PNG2PNM_LOG`.
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

/// The level forced by `-v` flags, if any were given.
fn verbosity_level(verbose: u8) -> Option<LevelFilter> {
  match verbose {
    0 => None,
    1 => Some(LevelFilter::Debug),
    _ => Some(LevelFilter::Trace),
  }
}

fn init_logging(verbose: u8) {
  let mut builder = Builder::from_env(Env::new().filter_or("PNG2PNM_LOG", "warn"));
  if let Some(level) = verbosity_level(verbose) {
    builder.filter_level(level);
  }
  // only fails if a logger is already set, in which case that one is used
  let _ = builder.try_init();
}

fn run(cli: &Cli) -> PngResult<()> {
  let mut options = DecodeOptions::default().with_verify_checksums(cli.verify_crc);
  if let Some(max) = cli.max_dimension {
    options = options.with_max_dimension(max);
  }

  let raster = {
    let mut input = BufReader::new(File::open(&cli.input)?);
    decode_png(&mut input, options)?
  };
  log::debug!(
    "decoded {}: {}x{} with {} channel(s)",
    cli.input.display(),
    raster.width(),
    raster.height(),
    raster.channels()
  );

  let output = BufWriter::new(File::create(&cli.output)?);
  netpbm_write_raster(output, &raster)?;
  log::debug!("wrote {}", cli.output.display());
  Ok(())
}

fn main() -> ExitCode {
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(e) if e.use_stderr() => {
      let _ = e.print();
      return ExitCode::FAILURE;
    }
    // --help and --version
    Err(e) => e.exit(),
  };
  init_logging(cli.verbose);

  match run(&cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("error: {e}");
      ExitCode::FAILURE
    }
  }
}

#[test]
fn test_verbosity_level() {
  assert_eq!(verbosity_level(0), None);
  assert_eq!(verbosity_level(1), Some(LevelFilter::Debug));
  assert_eq!(verbosity_level(2), Some(LevelFilter::Trace));
  assert_eq!(verbosity_level(9), Some(LevelFilter::Trace));
}
