use std::ffi::OsString;
use std::path::PathBuf;
use std::{fmt::Display, fmt::Formatter};

use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use log::{error, info, LevelFilter};

use crate::compression::compress::compress_file;
use crate::compression::decompress::{decompress_file, test_file};

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// Build from the quiet flag and the number of -v flags.
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, 0) => Verbosity::Warnings,
            (false, 1) => Verbosity::Info,
            (false, 2) => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }

    /// The log level this verbosity lets through.
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Zip, Unzip, Test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One file and what to do with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub mode: Mode,
    pub file: PathBuf,
}

#[derive(Debug)]
pub struct HuffOpts {
    /// Files to process, in command line order
    pub jobs: Vec<Job>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "A huffman coding file compressor",
    long_about = "
    Compresses each file with a single static huffman code built from its byte frequencies.
    Compressed files get a .huff extension; decompressing strips it again (or adds .out if
    it is missing). Files are processed in the order given.",
    arg_required_else_help = true
)]
pub struct Args {
    /// Compress PATH into PATH.huff
    #[clap(short = 'c', long = "compress", value_name = "PATH", value_parser)]
    compress: Vec<PathBuf>,

    /// Decompress PATH
    #[clap(short = 'd', long = "decompress", value_name = "PATH", value_parser)]
    decompress: Vec<PathBuf>,

    /// Test compressed file integrity without writing anything
    #[clap(short = 't', long = "test", value_name = "PATH", value_parser)]
    test: Vec<PathBuf>,

    /// Force overwriting output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Be verbose (a 2nd -v gives more, a 3rd traces every code)
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress everything but the exit status
    #[clap(short = 'q', long = "quiet", conflicts_with = "verbose")]
    quiet: bool,
}

/// Parse the process arguments. Prints usage and exits on a bad command line.
pub fn huffopts_init() -> HuffOpts {
    match huffopts_from(std::env::args_os()) {
        Ok(opts) => opts,
        Err(e) => e.exit(),
    }
}

/// Parse `args` (program name first) into HuffOpts.
pub fn huffopts_from<I, T>(args: I) -> Result<HuffOpts, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = Args::command().try_get_matches_from(args)?;
    let args = Args::from_arg_matches(&matches)?;

    // clap groups values by flag; the argument indices put them back in command line order
    let mut indexed = vec![];
    for (mode, id, files) in [
        (Mode::Zip, "compress", args.compress),
        (Mode::Unzip, "decompress", args.decompress),
        (Mode::Test, "test", args.test),
    ] {
        let indices = arg_indices(&matches, id, files.len());
        indexed.extend(
            indices
                .into_iter()
                .zip(files)
                .map(|(idx, file)| (idx, Job { mode, file })),
        );
    }
    indexed.sort_by_key(|(idx, _)| *idx);

    Ok(HuffOpts {
        jobs: indexed.into_iter().map(|(_, job)| job).collect(),
        force_overwrite: args.force,
        verbose: Verbosity::from_flags(args.quiet, args.verbose),
    })
}

/// Run every job in order, carrying on past failures. Returns the number of jobs that failed.
pub fn run_jobs(opts: &HuffOpts) -> usize {
    let mut failures = 0;
    for job in &opts.jobs {
        info!("{} {}", job.mode, job.file.display());
        let result = match job.mode {
            Mode::Zip => compress_file(&job.file, opts.force_overwrite).map(|_| ()),
            Mode::Unzip => decompress_file(&job.file, opts.force_overwrite).map(|_| ()),
            Mode::Test => test_file(&job.file).map(|_| ()),
        };
        if let Err(e) = result {
            error!("{}: {}", job.file.display(), e);
            failures += 1;
        }
    }
    failures
}

fn arg_indices(matches: &ArgMatches, id: &str, count: usize) -> Vec<usize> {
    match matches.indices_of(id) {
        Some(indices) => indices.collect(),
        None => vec![0; count],
    }
}

#[cfg(test)]
mod test {
    use super::{huffopts_from, run_jobs, Job, Mode, Verbosity};
    use crate::tools::file_io::with_suffix;
    use log::LevelFilter;
    use std::fs;
    use std::path::PathBuf;

    fn job(mode: Mode, file: &str) -> Job {
        Job {
            mode,
            file: PathBuf::from(file),
        }
    }

    #[test]
    fn job_order_test() {
        let opts =
            huffopts_from(["huff", "-d", "b.huff", "-c", "a", "-t", "c.huff", "-c", "d"]).unwrap();
        assert_eq!(
            opts.jobs,
            vec![
                job(Mode::Unzip, "b.huff"),
                job(Mode::Zip, "a"),
                job(Mode::Test, "c.huff"),
                job(Mode::Zip, "d"),
            ]
        );
        assert!(!opts.force_overwrite);
        assert_eq!(opts.verbose, Verbosity::Warnings);
    }

    #[test]
    fn flags_test() {
        let opts = huffopts_from(["huff", "-f", "-vv", "--compress", "x"]).unwrap();
        assert!(opts.force_overwrite);
        assert_eq!(opts.verbose, Verbosity::Debug);
        assert_eq!(opts.jobs, vec![job(Mode::Zip, "x")]);

        let opts = huffopts_from(["huff", "-q", "-c", "x"]).unwrap();
        assert_eq!(opts.verbose.level_filter(), LevelFilter::Off);
    }

    #[test]
    fn verbosity_test() {
        assert_eq!(Verbosity::from_flags(false, 0).level_filter(), LevelFilter::Warn);
        assert_eq!(Verbosity::from_flags(false, 1).level_filter(), LevelFilter::Info);
        assert_eq!(Verbosity::from_flags(false, 2).level_filter(), LevelFilter::Debug);
        assert_eq!(Verbosity::from_flags(false, 7).level_filter(), LevelFilter::Trace);
        assert_eq!(Verbosity::from_flags(true, 3), Verbosity::Quiet);
    }

    #[test]
    fn bad_command_line_test() {
        assert!(huffopts_from(["huff"]).is_err());
        assert!(huffopts_from(["huff", "--bogus"]).is_err());
        assert!(huffopts_from(["huff", "-c"]).is_err());
        assert!(huffopts_from(["huff", "-q", "-v", "-c", "x"]).is_err());
    }

    #[test]
    fn run_jobs_test() {
        let dir = std::env::temp_dir();
        let missing = dir.join(format!("huff_jobs_missing_{}", std::process::id()));
        let real = dir.join(format!("huff_jobs_real_{}", std::process::id()));
        fs::write(&real, b"mississippi").unwrap();
        let packed = with_suffix(&real, ".huff");
        let _ = fs::remove_file(&packed);

        let opts = huffopts_from([
            "huff".into(),
            "-c".into(),
            missing.into_os_string(),
            "-c".into(),
            real.clone().into_os_string(),
            "-t".into(),
            packed.clone().into_os_string(),
        ])
        .unwrap();
        // the missing file fails, the jobs after it still run
        assert_eq!(run_jobs(&opts), 1);
        assert!(packed.exists());

        fs::remove_file(&real).unwrap();
        fs::remove_file(&packed).unwrap();
    }
}
