pub mod build;
pub mod completions;
pub mod list;
pub mod validate;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::warn;
use walkdir::WalkDir;

use crate::error::{PatgenError, Result};
use crate::output::{display_path, Printer};

/// Exit status when at least one file failed.
pub const EXIT_FAILURE: u8 = 1;

/// Exit status reserved for running out of memory.
pub const EXIT_OUT_OF_MEMORY: u8 = 100;

/// Extensions picked up when a directory is given as input.
const CONFIG_EXTENSIONS: &[&str] = &["ini", "yaml", "yml"];

/// patgen - Test-pattern bitmap generator
///
/// Without a subcommand, the arguments are configuration files to build:
/// `patgen a.ini b.ini` is the same as `patgen build a.ini b.ini`.
#[derive(Parser, Debug)]
#[command(name = "patgen")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub build: build::BuildArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate bitmaps from configuration files
    Build(build::BuildArgs),

    /// Check configuration files without generating images
    Validate(validate::ValidateArgs),

    /// List the supported pattern types
    List(list::ListArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Per-run tally of processed files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Files that produced (or validated to) an image.
    pub succeeded: usize,
    /// Files whose pattern type is not supported.
    pub skipped: usize,
    /// Files that failed to parse, generate or write.
    pub failed: usize,
}

impl Summary {
    /// Exit status for this run: success unless any file failed.
    pub fn exit_status(&self) -> u8 {
        if self.failed == 0 {
            0
        } else {
            EXIT_FAILURE
        }
    }
}

/// Exit status for a run that stopped with an error.
pub fn error_exit_status(err: &PatgenError) -> u8 {
    if err.is_fatal() {
        EXIT_OUT_OF_MEMORY
    } else {
        EXIT_FAILURE
    }
}

/// Expand the command-line paths into the list of files to process.
///
/// Files are taken as given. Directories are walked recursively for
/// configuration files, in sorted order.
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();

    for path in paths {
        if !path.is_dir() {
            inputs.push(path.clone());
            continue;
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.map_err(|e| PatgenError::Io {
                path: e.path().unwrap_or(path.as_path()).to_path_buf(),
                message: e.to_string(),
            })?;
            if entry.file_type().is_file() && is_config_file(entry.path()) {
                found.push(entry.into_path());
            }
        }

        if found.is_empty() {
            warn!("No configuration files found in {}", path.display());
        }
        inputs.extend(found);
    }

    Ok(inputs)
}

fn is_config_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            CONFIG_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Report a per-file failure with its full diagnostic.
pub(crate) fn report_failure(printer: &Printer, input: &Path, err: PatgenError) {
    printer.error("Failed", &display_path(input));
    eprintln!("{:?}", miette::Report::new(err));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_collect_inputs_walks_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.ini"), "").unwrap();
        fs::write(dir.path().join("a.yaml"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("nested").join("c.INI"), "").unwrap();

        let inputs = collect_inputs(&[dir.path().to_path_buf()]).unwrap();

        let names: Vec<String> = inputs
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
            .collect();
        assert_eq!(names, vec!["a.yaml", "b.ini", "nested/c.INI"]);
    }

    #[test]
    fn test_collect_inputs_keeps_files_as_given() {
        let inputs = collect_inputs(&[PathBuf::from("missing.cfg"), PathBuf::from("x")]).unwrap();
        assert_eq!(inputs, vec![PathBuf::from("missing.cfg"), PathBuf::from("x")]);
    }

    #[test]
    fn test_summary_exit_status() {
        assert_eq!(Summary::default().exit_status(), 0);
        let degraded = Summary {
            failed: 1,
            ..Summary::default()
        };
        assert_eq!(degraded.exit_status(), EXIT_FAILURE);
    }

    #[test]
    fn test_error_exit_status() {
        let alloc = PatgenError::Allocation {
            width: 1,
            height: 1,
        };
        assert_eq!(error_exit_status(&alloc), EXIT_OUT_OF_MEMORY);

        let io = PatgenError::Io {
            path: PathBuf::from("x"),
            message: "gone".to_string(),
        };
        assert_eq!(error_exit_status(&io), EXIT_FAILURE);
    }

    #[test]
    fn test_cli_parses_build() {
        let cli = Cli::try_parse_from(["patgen", "build", "a.ini", "b.ini", "-o", "out"]).unwrap();
        match cli.command {
            Some(Commands::Build(args)) => {
                assert_eq!(args.files.len(), 2);
                assert_eq!(args.output, Some(PathBuf::from("out")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_builds_bare_paths() {
        let cli = Cli::try_parse_from(["patgen", "a.ini", "dir", "--output", "out"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.build.files, vec![PathBuf::from("a.ini"), PathBuf::from("dir")]);
        assert_eq!(cli.build.output, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_cli_subcommand_without_files() {
        let cli = Cli::try_parse_from(["patgen", "list"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List(_))));
        assert!(cli.build.files.is_empty());
    }

    #[test]
    fn test_cli_requires_files() {
        assert!(Cli::try_parse_from(["patgen", "build"]).is_err());
        assert!(Cli::try_parse_from(["patgen"]).is_err());
    }
}
