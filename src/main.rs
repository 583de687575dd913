use std::ffi::OsString;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use std::str::FromStr;

use clap::Parser;
use exefind::{EnvSnapshot, Finder, Platform, SearchOption};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "exefind", version, about = "Locate executables on the search path")]
struct Args {
    /// Directories to search instead of the platform path variable
    #[arg(long, value_name = "LIST")]
    path: Option<OsString>,

    /// `;`-separated suffixes to try; an empty entry stands for no suffix
    #[arg(long, value_name = "LIST")]
    ext: Option<String>,

    /// Do not look in the working directory first
    #[arg(long)]
    no_cwd: bool,

    /// Print every match instead of the first one
    #[arg(short, long)]
    all: bool,

    /// Search with another platform's conventions
    #[arg(long, value_parser = Platform::from_str)]
    platform: Option<Platform>,

    #[arg(required = true, value_name = "NAME")]
    names: Vec<String>,
}

fn run<W: Write>(args: &Args, stdout: &mut W) -> anyhow::Result<ExitCode> {
    let mut env = EnvSnapshot::capture();
    if let Some(platform) = args.platform {
        env = env.with_platform(platform);
    }
    let option = SearchOption::for_platform(env.platform()).with_include_cwd_first(!args.no_cwd);

    let directories = args.path.as_deref().map(|path| env.split_list(path));
    let extensions: Option<Vec<String>> = args
        .ext
        .as_deref()
        .map(|ext| ext.split(';').map(String::from).collect());

    let mut missing = false;
    for name in &args.names {
        let mut finder = Finder::new(name).env(env.clone()).option(option);
        if let Some(directories) = &directories {
            finder = finder.directories(directories.iter().cloned());
        }
        if let Some(extensions) = &extensions {
            finder = finder.extensions(extensions.iter().cloned());
        }

        let found = if args.all {
            finder.find_all()
        } else {
            finder.find().map(|found| found.into_iter().collect())
        };
        match found {
            Ok(paths) if paths.is_empty() => {
                missing = true;
                eprintln!("{name}: not found");
            }
            Ok(paths) => {
                for path in paths {
                    writeln!(stdout, "{}", path.display())?;
                }
            }
            Err(err) => {
                eprintln!("exefind: {err}");
                return Ok(ExitCode::from(2));
            }
        }
    }

    Ok(if missing {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("EXEFIND_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let output = io::stdout().lock();
    let mut output = BufWriter::new(output);
    let code = run(&args, &mut output)?;
    output.flush()?;

    Ok(code)
}

#[cfg(test)]
mod test {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("exefind").chain(args.iter().copied()))
    }

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_names_and_flags() -> anyhow::Result<()> {
        let args = parse(&["--no-cwd", "--all", "--path", "/a:/b", "--ext", ";.sh", "tool", "other"])?;
        assert_eq!(args.path, Some(OsString::from("/a:/b")));
        assert_eq!(args.ext.as_deref(), Some(";.sh"));
        assert!(args.no_cwd);
        assert!(args.all);
        assert_eq!(args.platform, None);
        assert_eq!(args.names, vec!["tool".to_string(), "other".to_string()]);
        Ok(())
    }

    #[test]
    fn parse_platform() -> anyhow::Result<()> {
        let args = parse(&["--platform", "windows", "cmd"])?;
        assert_eq!(args.platform, Some(Platform::Windows));
        assert!(parse(&["--platform", "beos", "cmd"]).is_err());
        Ok(())
    }

    #[test]
    fn double_dash_ends_options() -> anyhow::Result<()> {
        let args = parse(&["--", "--no-cwd", ""])?;
        assert!(!args.no_cwd);
        assert_eq!(args.names, vec!["--no-cwd".to_string(), String::new()]);
        Ok(())
    }

    #[test]
    fn parse_errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--path"]).is_err());
        assert!(parse(&["--verbose", "tool"]).is_err());
    }
}
