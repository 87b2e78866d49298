//! Build command implementation.
//!
//! Generates one bitmap per configuration file.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use log::{debug, info};

use crate::config::Configuration;
use crate::error::{PatgenError, Result};
use crate::generate::{pattern_type, Dispatcher};
use crate::output::{display_path, plural, Printer};
use crate::render::{output_path, write_bmp};

use super::{collect_inputs, report_failure, Summary};

/// Generate bitmaps from configuration files
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Configuration files or directories to process
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output directory (default: beside each input file)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Result of processing one file.
enum FileOutcome {
    Written(PathBuf, (u32, u32)),
    NoImage(String),
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<Summary> {
    if let Some(dir) = &args.output {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| PatgenError::Io {
                path: dir.clone(),
                message: format!("Failed to create output directory: {}", e),
            })?;
        }
    }

    let inputs = collect_inputs(&args.files)?;
    let dispatcher = Dispatcher::builtin();
    let mut summary = Summary::default();
    let mut written = HashSet::new();

    for input in &inputs {
        match process_file(input, args.output.as_deref(), &dispatcher, &mut written) {
            Ok(FileOutcome::Written(path, (width, height))) => {
                summary.succeeded += 1;
                printer.status(
                    "Generated",
                    &format!("{} ({}x{})", display_path(&path), width, height),
                );
            }
            Ok(FileOutcome::NoImage(tag)) => {
                summary.skipped += 1;
                printer.warning(
                    "Skipped",
                    &format!(
                        "{}: no image produced for pattern type \"{}\"",
                        display_path(input),
                        tag
                    ),
                );
            }
            // Out of memory stops the whole run.
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => {
                summary.failed += 1;
                report_failure(printer, input, err);
            }
        }
    }

    let message = format!(
        "{}, {} skipped, {} failed",
        plural(summary.succeeded, "image", "images"),
        summary.skipped,
        summary.failed
    );
    printer.finished("Finished", &message, summary.failed);

    Ok(summary)
}

/// Parse, generate and write a single configuration file.
///
/// `written` holds every bitmap produced so far in this run; an input whose
/// output would replace one of them fails instead.
fn process_file(
    input: &Path,
    output_dir: Option<&Path>,
    dispatcher: &Dispatcher,
    written: &mut HashSet<PathBuf>,
) -> Result<FileOutcome> {
    let config = Configuration::load(input)?;
    debug!("Loaded configuration {}", input.display());

    let image = dispatcher.generate(&config)?;
    if image.is_empty() {
        let tag = pattern_type(&config)?;
        return Ok(FileOutcome::NoImage(tag.to_string()));
    }

    let path = output_path(input, output_dir);
    if written.contains(&path) {
        return Err(PatgenError::Write {
            path,
            message: "already written by an earlier input in this run".to_string(),
        });
    }
    write_bmp(&image, &path)?;
    written.insert(path.clone());
    info!("Wrote {} bytes of pixels to {}", image.pixels().len() * 3, path.display());

    Ok(FileOutcome::Written(path, image.size()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::read_bmp;
    use crate::types::Colour;
    use tempfile::tempdir;

    const RECTANGLE: &str = r#"[General]
type = "IntroColorRectangle"

[ImageProperties]
width = 16
height = 8
"#;

    const BLOCKS: &str = r#"[General]
type = "IntroBlocks"

[ImageProperties]
width = 8
height = 8

[BlockProperties]
colorWhite = (1.0, 1.0, 1.0)
colorBlack = (0.0, 0.0, 0.0)
nrXBlocks = 2
nrYBlocks = 2
invertColors = false
"#;

    fn args(files: Vec<PathBuf>, output: Option<PathBuf>) -> BuildArgs {
        BuildArgs { files, output }
    }

    #[test]
    fn test_build_writes_beside_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("rect.ini");
        fs::write(&input, RECTANGLE).unwrap();

        let summary = run(args(vec![input], None), &Printer::new()).unwrap();

        assert_eq!(summary.succeeded, 1);
        let image = read_bmp(&dir.path().join("rect.bmp")).unwrap();
        assert_eq!(image.size(), (16, 8));
        assert_eq!(image.get(0, 0), Some(Colour::BLACK));
    }

    #[test]
    fn test_build_into_output_directory() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("blocks.ini");
        let output = dir.path().join("dist").join("nested");
        fs::write(&input, BLOCKS).unwrap();

        run(args(vec![input], Some(output.clone())), &Printer::new()).unwrap();

        let image = read_bmp(&output.join("blocks.bmp")).unwrap();
        assert_eq!(image.get(0, 0), Some(Colour::WHITE));
        assert_eq!(image.get(4, 0), Some(Colour::BLACK));
    }

    #[test]
    fn test_build_continues_after_failures() {
        let dir = tempdir().unwrap();
        let broken = dir.path().join("broken.ini");
        let missing_key = dir.path().join("missing.ini");
        let good = dir.path().join("good.ini");
        fs::write(&broken, "[General\n").unwrap();
        fs::write(&missing_key, "[General]\ntype = \"IntroColorRectangle\"\n").unwrap();
        fs::write(&good, RECTANGLE).unwrap();

        let summary = run(
            args(vec![broken, missing_key, dir.path().join("absent.ini"), good], None),
            &Printer::new(),
        )
        .unwrap();

        assert_eq!(summary.failed, 3);
        assert_eq!(summary.succeeded, 1);
        assert!(dir.path().join("good.bmp").exists());
        assert!(!dir.path().join("missing.bmp").exists());
    }

    #[test]
    fn test_build_unknown_type_is_skipped() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("lines.ini");
        fs::write(&input, "[General]\ntype = \"IntroLines\"\n").unwrap();

        let summary = run(args(vec![input], None), &Printer::new()).unwrap();

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 0);
        assert!(!dir.path().join("lines.bmp").exists());
    }

    #[test]
    fn test_build_yaml_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("rect.yaml");
        fs::write(
            &input,
            "General:\n  type: IntroColorRectangle\nImageProperties:\n  width: 4\n  height: 2\n",
        )
        .unwrap();

        let summary = run(args(vec![dir.path().to_path_buf()], None), &Printer::new()).unwrap();

        assert_eq!(summary.succeeded, 1);
        assert_eq!(read_bmp(&dir.path().join("rect.bmp")).unwrap().size(), (4, 2));
    }

    #[test]
    fn test_build_rejects_output_collision() {
        let dir = tempdir().unwrap();
        let ini = dir.path().join("pattern.ini");
        let yaml = dir.path().join("pattern.yaml");
        fs::write(&ini, BLOCKS).unwrap();
        fs::write(
            &yaml,
            "General:\n  type: IntroColorRectangle\nImageProperties:\n  width: 4\n  height: 2\n",
        )
        .unwrap();

        let summary = run(args(vec![ini, yaml], None), &Printer::new()).unwrap();

        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.exit_status(), 1);
        let image = read_bmp(&dir.path().join("pattern.bmp")).unwrap();
        assert_eq!(image.size(), (8, 8));
        assert_eq!(image.get(0, 0), Some(Colour::WHITE));
    }

    #[test]
    fn test_build_allocation_failure_aborts() {
        let dir = tempdir().unwrap();
        let huge = dir.path().join("a-huge.ini");
        let later = dir.path().join("b-later.ini");
        fs::write(
            &huge,
            "[General]\ntype = \"IntroColorRectangle\"\n[ImageProperties]\nwidth = 4294967295\nheight = 4294967295\n",
        )
        .unwrap();
        fs::write(&later, RECTANGLE).unwrap();

        let err = run(args(vec![huge, later], None), &Printer::new()).unwrap_err();

        assert!(err.is_fatal());
        assert!(!dir.path().join("b-later.bmp").exists());
    }
}
