use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use log::warn;
use walkdir::WalkDir;

use sloppyfix::{pipeline, rules::RuleSet};

/// Rewrites deprecated Go net parsing calls (net.ParseIP, net.ParseCIDR)
/// to their sloppy k8s.io/utils/net equivalents.
#[derive(Debug, Parser)]
#[command(name = "sloppyfix", version, about)]
struct Cli {
    /// Files or directories to fix; directories are walked recursively,
    /// skipping vendor and testdata.
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Report files that would change without writing them.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let rules = RuleSet::netparse();

    let mut failed = false;
    for path in &cli.paths {
        for file in go_files(path) {
            match pipeline::fix_file(&file, &rules, !cli.dry_run) {
                Ok(true) => println!("{}", file.display()),
                Ok(false) => {}
                Err(err) => {
                    warn!("{err:#}");
                    failed = true;
                }
            }
        }
    }

    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

fn go_files(root: &Path) -> Vec<PathBuf> {
    if root.is_file() {
        return vec![root.to_path_buf()];
    }
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            name != "vendor" && name != "testdata"
        })
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("walking {}: {err}", root.display());
                None
            }
        })
        .filter(|entry| {
            entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "go")
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}
