use std::{env, io::Write};

use crate::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use gitlet_on_disk::{InitStatus, Locator};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("init")
        .about("Create an empty gitlet repository or reinitialize an existing one")
        .arg(
            Arg::with_name("directory")
                .help("Where to create the repository (defaults to the current directory)"),
        )
}

pub(crate) fn run(app: &mut App, init_matches: &ArgMatches) -> Result<()> {
    let cwd = env::current_dir()?;
    let work_dir = match init_matches.value_of_os("directory") {
        Some(dir) => cwd.join(dir),
        None => cwd,
    };

    let (locator, status) = Locator::create(&work_dir)?;

    let verb = match status {
        InitStatus::Created => "Initialized empty",
        InitStatus::Reinitialized => "Reinitialized existing",
    };

    writeln!(
        app,
        "{} Gitlet repository in {}/",
        verb,
        locator.gitlet_dir().display()
    )?;

    Ok(())
}
