use anyhow::Result;
use clap::Parser;

use git_semver::boundary::BoundaryWarning;
use git_semver::cli::{
    check_change, check_downgrade, compute_version, effective_enforcement, override_version,
    refresh_tags,
};
use git_semver::config::{self, Config};
use git_semver::domain::SemVerReleaseType;
use git_semver::git::Git2Repository;
use git_semver::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-semver",
    version,
    about = "Compute a project's semantic version from git tags and enforce SemVer rules"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short = 'C', long, default_value = ".", help = "Repository to read history from")]
    repo: String,

    #[arg(long, help = "Exact release version to use instead of git history")]
    version_override: Option<String>,

    #[arg(long, help = "Raise the computed version to at least this MAJOR.MINOR.PATCH")]
    snapshot_lower_bound: Option<String>,

    #[arg(long, help = "Bump to apply to the history version (major, minor, patch)")]
    release_type: Option<String>,

    #[arg(long, help = "Ignore uncommitted changes in the working tree")]
    ignore_dirty: bool,

    #[arg(long, help = "Do not enforce strict SemVer up to this version")]
    enforce_after_version: Option<String>,

    #[arg(long, help = "Fail unless the computed version is greater than this release")]
    previous_release: Option<String>,

    #[arg(long = "remote", help = "Remote to fetch tags from (repeatable)")]
    remotes: Vec<String>,

    #[arg(long, help = "Seconds to wait for remote tag fetches")]
    fetch_timeout: Option<u64>,

    #[arg(long, help = "Skip fetching tags from remotes")]
    no_fetch: bool,

    #[arg(long, help = "Print a diagnostic report instead of the bare version")]
    report: bool,

    #[arg(long, help = "Print whether the version is a clean release and exit non-zero if not")]
    is_clean_release: bool,

    #[arg(long, help = "Print which class of API change is currently permitted")]
    enforcement: bool,

    #[arg(long, value_name = "TYPE", help = "Fail if a change of this type is not permitted")]
    check_change: Option<String>,

    #[arg(short, long, help = "Show debug diagnostics on stderr")]
    verbose: bool,
}

impl Args {
    /// CLI flags take precedence over the configuration file
    fn apply_to(&self, config: &mut Config) {
        let version = &mut config.version;
        if let Some(value) = &self.version_override {
            version.version_override = Some(value.clone());
        }
        if let Some(value) = &self.snapshot_lower_bound {
            version.snapshot_lower_bound = Some(value.clone());
        }
        if let Some(value) = &self.release_type {
            version.release_type = Some(value.clone());
        }
        if let Some(value) = &self.enforce_after_version {
            version.enforce_after_version = Some(value.clone());
        }
        if let Some(value) = &self.previous_release {
            version.previous_release = Some(value.clone());
        }
        version.ignore_dirty |= self.ignore_dirty;

        if !self.remotes.is_empty() {
            config.remotes.names = self.remotes.clone();
        }
        if let Some(secs) = self.fetch_timeout {
            config.remotes.fetch_timeout_secs = secs;
        }
        if self.no_fetch {
            config.remotes.fetch = false;
        }
    }
}

fn main() {
    let args = Args::parse();
    ui::init_logging(args.verbose);

    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when a requested predicate does not hold
fn run(args: &Args) -> Result<bool> {
    let mut config = config::load_config(args.config.as_deref())?;
    args.apply_to(&mut config);

    // Validate every setting before any git access or version math
    let options = config.version_options()?;
    let change = args
        .check_change
        .as_deref()
        .map(str::parse::<SemVerReleaseType>)
        .transpose()?;

    let computed = match override_version(&options) {
        Some(computed) => computed,
        None => {
            let repo = Git2Repository::open(&args.repo, config.tag_pattern()?)?;
            if config.remotes.fetch {
                let timeout = config.remotes.fetch_timeout();
                for result in refresh_tags(&repo, &config.remotes.names, timeout) {
                    if let Some(warning) = BoundaryWarning::from_fetch(&result, timeout) {
                        ui::display_boundary_warning(&warning);
                    }
                }
            }
            compute_version(&options, &repo)?
        }
    };
    if let Some(history) = &computed.history {
        if history.tag.is_none() {
            ui::display_boundary_warning(&BoundaryWarning::NoReleaseTag {
                version: history.version.to_string(),
            });
        }
    }

    if let Some(previous) = &options.previous_release {
        check_downgrade(previous, &computed.version)?;
    }

    let decision = effective_enforcement(&options, &computed.version);

    if args.report {
        ui::display_report(&computed);
    } else if !args.is_clean_release && !args.enforcement && change.is_none() {
        ui::display_version(&computed);
    }

    if args.enforcement {
        ui::display_enforcement(&decision);
    }

    if let Some(change) = change {
        check_change(&decision, change, options.release_type)?;
        ui::display_success(&format!(
            "{} change permitted ({})",
            change,
            decision.explanation()
        ));
    }

    if args.is_clean_release {
        let clean = computed.is_clean_release();
        println!("{}", clean);
        return Ok(clean);
    }

    Ok(true)
}
