use std::path::PathBuf;

use clap::Args;

use crate::config::Configuration;
use crate::error::Result;
use crate::generate::{pattern_type, Dispatcher};
use crate::output::{display_path, plural, Printer};

use super::{collect_inputs, report_failure, Summary};

/// Check configuration files without generating images
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Configuration files or directories to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<Summary> {
    let inputs = collect_inputs(&args.files)?;
    let dispatcher = Dispatcher::builtin();
    let mut summary = Summary::default();

    for input in &inputs {
        let checked = Configuration::load(input).and_then(|config| {
            let matched = dispatcher.validate(&config)?;
            Ok((matched, pattern_type(&config)?.to_string()))
        });

        match checked {
            Ok((Some(tag), _)) => {
                summary.succeeded += 1;
                printer.status("Checked", &format!("{} ({})", display_path(input), tag));
            }
            Ok((None, tag)) => {
                summary.skipped += 1;
                printer.warning(
                    "Unsupported",
                    &format!("{}: pattern type \"{}\" produces no image", display_path(input), tag),
                );
            }
            Err(err) => {
                summary.failed += 1;
                report_failure(printer, input, err);
            }
        }
    }

    let message = format!(
        "{}, {} with errors",
        plural(inputs.len(), "file", "files"),
        summary.failed
    );
    printer.finished("Validated", &message, summary.failed);

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_validate_reports_each_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("ok.ini"),
            "[General]\ntype = \"IntroColorRectangle\"\n[ImageProperties]\nwidth = 2\nheight = 2\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("zero.ini"),
            "[General]\ntype = \"IntroColorRectangle\"\n[ImageProperties]\nwidth = 0\nheight = 2\n",
        )
        .unwrap();
        fs::write(dir.path().join("other.ini"), "[General]\ntype = \"Wireframe\"\n").unwrap();

        let summary = run(
            ValidateArgs {
                files: vec![dir.path().to_path_buf()],
            },
            &Printer::new(),
        )
        .unwrap();

        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 1);
        // Validation never writes images.
        assert!(!dir.path().join("ok.bmp").exists());
    }
}
