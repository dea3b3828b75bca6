use clap::builder::FalseyValueParser;
use clap::{CommandFactory, Parser};
use getgit_core::RunConfig;

/// Install git with the native package manager of this Linux distribution
#[derive(Parser, Debug)]
#[command(name = "get-git")]
#[command(about = "Detects the Linux distribution and installs git with its package manager", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Args {
    /// Show the commands that would run without running them
    #[arg(long = "dry-run", env = "DRY_RUN", value_parser = FalseyValueParser::new())]
    pub dry_run: bool,

    /// Only configure the package repository and refresh the cache
    #[arg(long = "setup-repo", env = "REPO_ONLY", value_parser = FalseyValueParser::new())]
    pub setup_repo: bool,

    /// Package version to install (best effort, a leading "v" is ignored)
    #[arg(long = "version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Report the detected distribution and git status, then exit
    #[arg(long = "check")]
    pub check: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Args {
    pub fn run_config(&self) -> RunConfig {
        RunConfig::new(self.dry_run, self.setup_repo, self.version.as_deref())
    }
}

/// Parses command-line arguments. Unknown `--flags` are returned separately
/// instead of aborting the run.
pub fn parse_args() -> (Args, Vec<String>) {
    let (known, illegal) = split_illegal_flags(std::env::args().collect());
    (Args::parse_from(known), illegal)
}

/// Separates long flags the parser does not define from the rest of `argv`
pub fn split_illegal_flags(argv: Vec<String>) -> (Vec<String>, Vec<String>) {
    let command = Args::command();
    let mut known_flags: Vec<String> = command
        .get_arguments()
        .filter_map(|arg| arg.get_long())
        .map(|long| long.to_string())
        .collect();
    known_flags.push("help".to_string());

    let mut known = Vec::with_capacity(argv.len());
    let mut illegal = Vec::new();
    let mut args = argv.into_iter().peekable();

    if let Some(program) = args.next() {
        known.push(program);
    }

    while let Some(arg) = args.next() {
        match arg.strip_prefix("--") {
            Some(flag) if !flag.is_empty() => {
                let (name, inline_value) = match flag.split_once('=') {
                    Some((name, _)) => (name, true),
                    None => (flag, false),
                };
                if !known_flags.iter().any(|k| k == name) {
                    illegal.push(arg);
                } else if name == "version" && !inline_value {
                    // A following `--flag` is not a version; drop the empty `--version`
                    match args.next_if(|next| !next.starts_with("--")) {
                        Some(value) => {
                            known.push(arg);
                            known.push(value);
                        }
                        None => illegal.push(arg),
                    }
                } else {
                    known.push(arg);
                }
            }
            _ => known.push(arg),
        }
    }

    (known, illegal)
}
