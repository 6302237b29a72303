use std::{io::Write, path::Path};

use crate::{find_repo, App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use gitlet_core::{object, repo::Repo};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("hash-object")
        .about("Compute object ID and optionally store a blob from a file")
        .arg(
            Arg::with_name("w")
                .short("w")
                .help("Actually write the object into the object database"),
        )
        .arg(
            Arg::with_name("file")
                .required(true)
                .help("The file to hash"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let path = Path::new(args.value_of_os("file").unwrap_or_default());

    let id = if args.is_present("w") {
        find_repo::from_current_dir()?.write_object(path, true)?
    } else {
        object::hash_file(path)?
    };

    writeln!(app, "{}", id)?;
    Ok(())
}
