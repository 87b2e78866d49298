use std::io::{self, Write};

use clap::Args;

use crate::error::{PatgenError, Result};
use crate::generate::Dispatcher;

/// List the supported pattern types
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Also show the configuration keys each type reads
    #[arg(long)]
    pub keys: bool,
}

pub fn run(args: ListArgs) -> Result<()> {
    let stdout = io::stdout();
    write_listing(&Dispatcher::builtin(), args.keys, &mut stdout.lock()).map_err(|e| {
        PatgenError::Io {
            path: "<stdout>".into(),
            message: e.to_string(),
        }
    })
}

/// Write one line per pattern type, optionally followed by its keys.
fn write_listing(dispatcher: &Dispatcher, keys: bool, out: &mut impl Write) -> io::Result<()> {
    let generators = dispatcher.generators();
    let width = generators.iter().map(|g| g.tag().len()).max().unwrap_or(0);

    for generator in generators {
        writeln!(out, "{:<width$}  {}", generator.tag(), generator.description())?;
        if keys {
            for key in generator.keys() {
                writeln!(out, "{:<width$}    {}", "", key)?;
            }
        }
    }
    Ok(())
}
