use std::{
    fmt::Display,
    io::{self, Write},
    path::PathBuf,
};

use flexi_logger::{Logger, LoggerHandle};
use ftag_tag_map::JsonFileStore;
use structopt::StructOpt;

use crate::ftag::FTag;

mod ftag;
mod path;

#[derive(Debug, StructOpt)]
#[structopt(
    about = "\"file tag\": attach free-text tags to files and find files by their tags. Tags are kept in a JSON tag map file."
)]
struct Opt {
    #[structopt(
        short = "m",
        long = "tag-map",
        default_value = ".ftag",
        parse(from_os_str),
        help = "tag map file; relative paths are resolved against the working directory"
    )]
    tag_map: PathBuf,

    #[structopt(
        short,
        long,
        parse(from_occurrences),
        help = "log more detail to stderr; may be given up to three times"
    )]
    verbose: u8,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    #[structopt(visible_alias = "a", about = "Add one or more tags to a file")]
    Add {
        #[structopt(help = "file to tag; it must exist")]
        file: String,

        #[structopt(required = true, help = "tags to add")]
        tags: Vec<String>,
    },

    #[structopt(about = "Verify that files referenced in the tag map exist")]
    Check,

    #[structopt(
        visible_alias = "clr",
        about = "Clear all tags associated with the given files"
    )]
    Clear {
        #[structopt(required = true, help = "files to clear")]
        files: Vec<String>,
    },

    #[structopt(
        visible_alias = "f",
        about = "Find the files that have all of the given tags"
    )]
    Find {
        #[structopt(required = true, help = "tags that every matching file must have")]
        tags: Vec<String>,
    },

    #[structopt(
        visible_alias = "ls",
        about = "List the tags of the given files, or of every file"
    )]
    List {
        #[structopt(help = "files to list tags for; all files if omitted")]
        files: Vec<String>,
    },

    #[structopt(
        visible_alias = "mv",
        about = "Tell ftag about a moved file so it can update the tag map"
    )]
    Move {
        #[structopt(help = "where the file used to be")]
        from: String,

        #[structopt(help = "where the file is now")]
        to: String,
    },

    #[structopt(visible_alias = "rm", about = "Remove one or more tags from a file")]
    Remove {
        #[structopt(help = "file to untag")]
        file: String,

        #[structopt(required = true, help = "tags to remove")]
        tags: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    // Parse command line arguments.
    let opt = Opt::from_args();

    // Set up logging. The handle has to outlive everything that logs.
    let _logger = init_logging(opt.verbose)?;

    let tag_map_path = path::resolve_path(&opt.tag_map)?;
    log::debug!("using tag map {}", tag_map_path.display());
    let store = JsonFileStore::new(&tag_map_path);

    match opt.command {
        Command::Add { file, tags } => {
            let mut ftag = FTag::load(&store)?;
            ftag.add(&file, &tags)?;
            ftag.store()?;
        }
        Command::Check => {
            let errors = FTag::load(&store)?.check();
            if !errors.is_empty() {
                return Err(ftag::Error::Check(errors).into());
            }
        }
        Command::Clear { files } => {
            let mut ftag = FTag::load(&store)?;
            ftag.clear(&files);
            ftag.store()?;
        }
        Command::Find { tags } => {
            print_lines(FTag::load(&store)?.find(&tags))?;
        }
        Command::List { files } => {
            print_lines(FTag::load(&store)?.list(&files))?;
        }
        Command::Move { from, to } => {
            let mut ftag = FTag::load(&store)?;
            ftag.move_file(&from, &to)?;
            ftag.store()?;
        }
        Command::Remove { file, tags } => {
            let mut ftag = FTag::load(&store)?;
            ftag.remove(&file, &tags);
            ftag.store()?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) -> anyhow::Result<LoggerHandle> {
    let logger = match verbose {
        0 => Logger::try_with_env_or_str("warn")?,
        1 => Logger::try_with_str("info")?,
        2 => Logger::try_with_str("debug")?,
        _ => Logger::try_with_str("trace")?,
    };

    Ok(logger.format(flexi_logger::colored_default_format).start()?)
}

fn print_lines<I>(lines: I) -> io::Result<()>
where
    I: IntoIterator,
    I::Item: Display,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        writeln!(out, "{}", line)?;
    }

    Ok(())
}
