use anyhow::Result;
use getgit_core::{check_status, detect, InstallError, Installer, Outcome, SystemHost, GIT};

mod cli;

fn main() -> Result<()> {
    let (args, illegal) = cli::parse_args();

    for flag in &illegal {
        eprintln!("Illegal option {}", flag);
    }

    // Initialize logger with appropriate level based on verbose flag
    if std::env::var("RUST_LOG").is_err() {
        if args.verbose {
            std::env::set_var("RUST_LOG", "debug");
        } else {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();

    let host = SystemHost;

    if args.check {
        print!("{}", check_status(&host, &GIT));
        return Ok(());
    }

    let config = args.run_config();
    if config.dry_run {
        log::info!("Running in DRY-RUN mode - no commands will be executed");
    }
    if let Some(version) = &config.version {
        log::info!("Requesting {} version {}", GIT.name, version);
    }

    let result = detect(&host).and_then(|info| Installer::new(&host, &config).install(&info));

    match result {
        Ok(Outcome::Installed { .. }) | Ok(Outcome::DryRun) => Ok(()),
        Ok(Outcome::RepositoryConfigured) => {
            log::info!("Repository configured; run again without --setup-repo to install {}", GIT.name);
            Ok(())
        }
        Err(e) => {
            let code = e.exit_code();
            report_error(e);
            std::process::exit(code);
        }
    }
}

fn report_error(error: InstallError) {
    let hint = match &error {
        InstallError::UnsupportedPlatform { hint, .. } => hint.clone(),
        _ => None,
    };

    eprintln!();
    eprintln!("ERROR: {:#}", anyhow::Error::from(error));
    if let Some(hint) = hint {
        eprintln!();
        eprintln!("{}", hint);
    }
    eprintln!();
}
