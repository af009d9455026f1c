use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use crate::previous::config::{ConfigOverrides, load_config};
use crate::previous::lookup::{PreviousData, lookup_previous_file_size};
use crate::previous::warn;

#[derive(Debug, Parser)]
#[command(
    name = "prev-data",
    version,
    about = "Print a student's previous-day file size from dated CSV archives as JSON"
)]
pub struct Cli {
    /// Student identifier, matched case-insensitively. Without it `{}` is printed.
    pub student_id: Option<String>,

    /// Directory holding `YYYY-MM-DD.csv` archives.
    #[arg(long)]
    pub archive_dir: Option<PathBuf>,

    /// TOML config file with [archive], [clock] and [warn] sections.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// IANA timezone for "today". Defaults to the local clock.
    #[arg(long)]
    pub timezone: Option<String>,

    /// Report why a lookup came back empty on stderr.
    #[arg(long, short)]
    pub verbose: bool,
}

fn resolve(cli: &Cli) -> PreviousData {
    let Some(student_id) = cli.student_id.as_deref() else {
        return PreviousData::empty();
    };

    let overrides = ConfigOverrides {
        archive_dir: cli.archive_dir.clone(),
        timezone: cli.timezone.clone(),
        verbose: cli.verbose,
    };
    let loaded = load_config(cli.config.as_deref(), &overrides)
        .and_then(|cfg| cfg.reference_clock().map(|clock| (cfg, clock)));
    match loaded {
        Ok((cfg, clock)) => lookup_previous_file_size(student_id, &cfg, clock),
        Err(err) => {
            if cli.verbose {
                let path = cli
                    .config
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                warn::emit(
                    "E000_CONFIG_INVALID",
                    "config",
                    &path,
                    "config failed to load",
                    &format!("{err:#}"),
                );
            }
            PreviousData::empty()
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let result = resolve(&cli);

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", result.to_json_line())?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_student_id_resolves_empty() {
        let cli = Cli::parse_from(["prev-data"]);
        assert_eq!(resolve(&cli), PreviousData::empty());
    }

    #[test]
    fn bad_timezone_resolves_empty() {
        let cli = Cli::parse_from(["prev-data", "abc123", "--timezone", "Not/AZone"]);
        assert_eq!(resolve(&cli), PreviousData::empty());
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::parse_from([
            "prev-data",
            "abc123",
            "--archive-dir",
            "/srv/archive",
            "--timezone",
            "Asia/Tokyo",
            "-v",
        ]);
        assert_eq!(cli.student_id.as_deref(), Some("abc123"));
        assert_eq!(cli.archive_dir, Some(PathBuf::from("/srv/archive")));
        assert_eq!(cli.timezone.as_deref(), Some("Asia/Tokyo"));
        assert!(cli.verbose);
    }
}
