use std::io::Write;

use crate::{find_repo, App, Result};

use clap::{Arg, ArgGroup, ArgMatches, SubCommand};
use gitlet_core::{object::Id, repo::Repo};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("cat-file")
        .about("Provide content, type or size information for repository objects")
        .arg(Arg::with_name("t").short("t").help("Show the object's type"))
        .arg(Arg::with_name("s").short("s").help("Show the object's size"))
        .arg(Arg::with_name("p").short("p").help("Print the object's content"))
        .arg(
            Arg::with_name("e")
                .short("e")
                .help("Exit with zero status if the object exists and is valid"),
        )
        .group(
            ArgGroup::with_name("mode")
                .args(&["t", "s", "p", "e"])
                .required(true),
        )
        .arg(
            Arg::with_name("object")
                .required(true)
                .help("The ID of the object to show"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let id = Id::from_hex(args.value_of("object").unwrap_or_default())?;
    let repo = find_repo::from_current_dir()?;

    // For -e, a successful read is the whole check.
    let object = repo.read_object(&id)?;

    if args.is_present("t") {
        writeln!(app, "{}", object.kind())?;
    } else if args.is_present("s") {
        writeln!(app, "{}", object.len())?;
    } else if args.is_present("p") {
        app.write_all(object.content())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use gitlet_core::repo::Repo;
    use gitlet_on_disk::TempRepo;
    use serial_test::serial;

    use crate::{temp_cwd::TempCwd, App};

    const TEST_SHA1: &str = "d670460b4b4aece5915caf5c68d12f560a9fe3e4";

    fn repo_with_test_content() -> TempRepo {
        let tr = TempRepo::new();
        let path = tr.write_file("test", "test content\n");
        tr.locator().write_object(&path, true).unwrap();
        tr
    }

    #[test]
    #[serial]
    fn show_type() {
        let tr = repo_with_test_content();
        let _tcwd = TempCwd::new(tr.path());

        let stdout = App::run_with_args(vec!["cat-file", "-t", TEST_SHA1]).unwrap();
        assert_eq!(stdout, b"blob\n");
    }

    #[test]
    #[serial]
    fn show_size() {
        let tr = repo_with_test_content();
        let _tcwd = TempCwd::new(tr.path());

        let stdout = App::run_with_args(vec!["cat-file", "-s", TEST_SHA1]).unwrap();
        assert_eq!(stdout, b"13\n");
    }

    #[test]
    #[serial]
    fn print_content() {
        let tr = repo_with_test_content();
        let _tcwd = TempCwd::new(tr.path());

        let stdout = App::run_with_args(vec!["cat-file", "-p", TEST_SHA1]).unwrap();
        assert_eq!(stdout, b"test content\n");
    }

    #[test]
    #[serial]
    fn print_binary_content() {
        let tr = TempRepo::new();
        let content: Vec<u8> = (0..=255).collect();
        let path = tr.write_file("bytes", &content);
        let id = tr.locator().write_object(&path, true).unwrap();
        let _tcwd = TempCwd::new(tr.path());

        let stdout = App::run_with_args(vec!["cat-file", "-p", &id.to_string()]).unwrap();
        assert_eq!(stdout, content);
    }

    #[test]
    #[serial]
    fn exists() {
        let tr = repo_with_test_content();
        let _tcwd = TempCwd::new(tr.path());

        let stdout = App::run_with_args(vec!["cat-file", "-e", TEST_SHA1]).unwrap();
        assert!(stdout.is_empty());
    }

    #[test]
    #[serial]
    fn error_exists_missing_object() {
        let tr = TempRepo::new();
        let _tcwd = TempCwd::new(tr.path());

        let err = App::run_with_args(vec!["cat-file", "-e", TEST_SHA1]).unwrap_err();
        assert_eq!(err.to_string(), format!("object {} not found", TEST_SHA1));
    }

    #[test]
    #[serial]
    fn error_exists_corrupt_object() {
        let tr = repo_with_test_content();
        let path = tr
            .path()
            .join(".gitlet/objects/d6/70460b4b4aece5915caf5c68d12f560a9fe3e4");
        fs::remove_file(&path).unwrap();
        fs::write(&path, "not zlib").unwrap();
        let _tcwd = TempCwd::new(tr.path());

        let err = App::run_with_args(vec!["cat-file", "-e", TEST_SHA1]).unwrap_err();

        let errmsg = err.to_string();
        assert!(
            errmsg.starts_with(&format!("object {} is corrupt", TEST_SHA1)),
            "\nincorrect error message:\n\n{}",
            errmsg
        );
    }

    #[test]
    #[serial]
    fn error_missing_object() {
        let tr = TempRepo::new();
        let _tcwd = TempCwd::new(tr.path());

        let err = App::run_with_args(vec!["cat-file", "-p", TEST_SHA1]).unwrap_err();
        assert_eq!(err.to_string(), format!("object {} not found", TEST_SHA1));
    }

    #[test]
    #[serial]
    fn error_not_a_repo() {
        let dir = tempfile::tempdir().unwrap();
        let _tcwd = TempCwd::new(dir.path());

        let err = App::run_with_args(vec!["cat-file", "-t", TEST_SHA1]).unwrap_err();

        let errmsg = err.to_string();
        assert!(
            errmsg.starts_with("not a gitlet repository"),
            "\nincorrect error message:\n\n{}",
            errmsg
        );
    }

    #[test]
    fn error_invalid_id() {
        let err = App::run_with_args(vec!["cat-file", "-t", "d670460b"]).unwrap_err();
        assert_eq!(err.to_string(), "value is less than 40 digits long");
    }

    #[test]
    fn error_no_mode() {
        let err = App::run_with_args(vec!["cat-file", TEST_SHA1]).unwrap_err();

        let errmsg = err.to_string();
        assert!(
            errmsg.contains("required arguments were not provided"),
            "\nincorrect error message:\n\n{}",
            errmsg
        );
    }

    #[test]
    fn error_two_modes() {
        let err = App::run_with_args(vec!["cat-file", "-t", "-s", TEST_SHA1]).unwrap_err();

        let errmsg = err.to_string();
        assert!(
            errmsg.contains("cannot be used with"),
            "\nincorrect error message:\n\n{}",
            errmsg
        );
    }
}
