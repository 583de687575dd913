//! Resolve a bare program name to the executable a shell would run.
//!
//! ```no_run
//! let path = exefind::which("cargo")?;
//! # Ok::<(), exefind::Error>(())
//! ```

use std::path::PathBuf;

mod env;
mod error;
mod finder;
mod probe;

pub use env::{EnvSnapshot, Platform};
pub use error::Error;
pub use finder::{Candidates, SearchOption, SearchRequest};
pub use probe::{FsProbe, Probe};

/// Looks `executable` up in the working directory, then in the platform
/// search path, trying the platform's default extensions.
///
/// `Ok(None)` means nothing qualified; `Err` only for a malformed name.
pub fn which(executable: &str) -> Result<Option<PathBuf>, Error> {
    Finder::new(executable).find()
}

pub fn which_in(
    executable: &str,
    directories: Option<&[&str]>,
    extensions: Option<&[&str]>,
) -> Result<Option<PathBuf>, Error> {
    let mut finder = Finder::new(executable);
    if let Some(directories) = directories {
        finder = finder.directories(directories.iter().copied());
    }
    if let Some(extensions) = extensions {
        finder = finder.extensions(extensions.iter().copied());
    }
    finder.find()
}

/// Builder for a single lookup. Anything left unset is derived from the
/// environment snapshot when [`Finder::find`] runs.
#[derive(Debug, Clone)]
pub struct Finder<P = FsProbe> {
    executable: String,
    directories: Option<Vec<PathBuf>>,
    extensions: Option<Vec<String>>,
    option: Option<SearchOption>,
    env: Option<EnvSnapshot>,
    probe: P,
}

impl Finder<FsProbe> {
    pub fn new(executable: &str) -> Finder<FsProbe> {
        Finder {
            executable: executable.into(),
            directories: None,
            extensions: None,
            option: None,
            env: None,
            probe: FsProbe,
        }
    }
}

impl<P: Probe> Finder<P> {
    pub fn directories<I>(mut self, directories: I) -> Finder<P>
    where
        I: IntoIterator,
        I::Item: Into<PathBuf>,
    {
        self.directories = Some(directories.into_iter().map(Into::into).collect());
        self
    }

    pub fn extensions<I>(mut self, extensions: I) -> Finder<P>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.extensions = Some(extensions.into_iter().map(Into::into).collect());
        self
    }

    pub fn option(mut self, option: SearchOption) -> Finder<P> {
        self.option = Some(option);
        self
    }

    pub fn env(mut self, env: EnvSnapshot) -> Finder<P> {
        self.env = Some(env);
        self
    }

    pub fn probe<Q: Probe>(self, probe: Q) -> Finder<Q> {
        Finder {
            executable: self.executable,
            directories: self.directories,
            extensions: self.extensions,
            option: self.option,
            env: self.env,
            probe,
        }
    }

    pub fn find(self) -> Result<Option<PathBuf>, Error> {
        let (request, option, env, probe) = self.into_request()?;
        Ok(request.resolve_with(&option, env.current_dir(), probe))
    }

    pub fn find_all(self) -> Result<Vec<PathBuf>, Error> {
        let (request, option, env, probe) = self.into_request()?;
        Ok(request
            .matches_with(&option, env.current_dir(), probe)
            .collect())
    }

    fn into_request(self) -> Result<(SearchRequest, SearchOption, EnvSnapshot, P), Error> {
        let env = self.env.unwrap_or_else(EnvSnapshot::capture);
        let option = self
            .option
            .unwrap_or_else(|| SearchOption::for_platform(env.platform()));
        let directories = self.directories.unwrap_or_else(|| env.search_path());
        let extensions = self.extensions.unwrap_or_else(|| env.search_extensions());

        let request = SearchRequest::new(&self.executable, directories, extensions)?;
        Ok((request, option, env, self.probe))
    }
}
