use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::env::Platform;
use crate::error::Error;
use crate::probe::Probe;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOption {
    include_cwd_first: bool,
    implicit_bare_name: bool,
    fold_extension_case: bool,
}

impl Default for SearchOption {
    fn default() -> SearchOption {
        SearchOption::for_platform(Platform::current())
    }
}

impl SearchOption {
    pub fn for_platform(platform: Platform) -> SearchOption {
        SearchOption {
            include_cwd_first: true,
            implicit_bare_name: true,
            fold_extension_case: platform.requires_extension(),
        }
    }

    pub fn with_include_cwd_first(mut self, include_cwd_first: bool) -> SearchOption {
        self.include_cwd_first = include_cwd_first;
        self
    }

    pub fn with_implicit_bare_name(mut self, implicit_bare_name: bool) -> SearchOption {
        self.implicit_bare_name = implicit_bare_name;
        self
    }

    pub fn with_fold_extension_case(mut self, fold_extension_case: bool) -> SearchOption {
        self.fold_extension_case = fold_extension_case;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    executable: String,
    directories: Vec<PathBuf>,
    extensions: Vec<String>,
}

impl SearchRequest {
    pub fn new<D, E>(executable: &str, directories: D, extensions: E) -> Result<SearchRequest, Error>
    where
        D: IntoIterator,
        D::Item: Into<PathBuf>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        if executable.is_empty() {
            return Err(Error::invalid_argument(executable, "name is empty"));
        }
        if executable.contains('\0') {
            return Err(Error::invalid_argument(executable, "name contains a NUL byte"));
        }
        Ok(SearchRequest {
            executable: executable.into(),
            directories: directories.into_iter().map(Into::into).collect(),
            extensions: extensions.into_iter().map(Into::into).collect(),
        })
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Paths to probe, in order: directories outer, suffixes inner.
    pub fn candidates<'a>(&'a self, option: &SearchOption, cwd: &'a Path) -> Candidates<'a> {
        let directories = option
            .include_cwd_first
            .then_some(cwd)
            .into_iter()
            .chain(self.directories.iter().map(PathBuf::as_path))
            .collect();
        Candidates {
            executable: &self.executable,
            directories,
            suffixes: self.suffixes(option),
            dir: 0,
            suffix: 0,
        }
    }

    /// Every candidate `probe` accepts, in search order. Each path is
    /// probed at most once and only when the iterator is advanced.
    pub fn matches_with<'a, P: Probe + 'a>(
        &'a self,
        option: &SearchOption,
        cwd: &'a Path,
        probe: P,
    ) -> impl Iterator<Item = PathBuf> + 'a {
        self.candidates(option, cwd).filter(move |candidate| {
            trace!(candidate = %candidate.display(), "probing");
            probe.is_executable(candidate)
        })
    }

    pub fn resolve_with<P: Probe>(
        &self,
        option: &SearchOption,
        cwd: &Path,
        probe: P,
    ) -> Option<PathBuf> {
        let found = self.matches_with(option, cwd, probe).next();
        match &found {
            Some(path) => debug!(executable = %self.executable, path = %path.display(), "resolved"),
            None => debug!(executable = %self.executable, "not found"),
        }
        found
    }

    fn suffixes(&self, option: &SearchOption) -> Vec<&str> {
        if option.fold_extension_case && self.has_known_extension() {
            return vec![""];
        }

        let mut suffixes: Vec<&str> = Vec::with_capacity(self.extensions.len() + 1);
        if option.implicit_bare_name && !self.extensions.iter().any(String::is_empty) {
            suffixes.push("");
        }
        for ext in &self.extensions {
            if option.fold_extension_case && suffixes.iter().any(|s| s.eq_ignore_ascii_case(ext)) {
                continue;
            }
            suffixes.push(ext);
        }
        suffixes
    }

    /// `tool.EXE` already carries `.exe`; appending it again is pointless.
    fn has_known_extension(&self) -> bool {
        let name = self.executable.as_str();
        self.extensions.iter().any(|ext| {
            let Some(start) = name.len().checked_sub(ext.len()) else {
                return false;
            };
            !ext.is_empty()
                && start > 0
                && name.is_char_boundary(start)
                && name[start..].eq_ignore_ascii_case(ext)
        })
    }
}

/// Lazy walk over the `directory × suffix` cross product.
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    executable: &'a str,
    directories: Vec<&'a Path>,
    suffixes: Vec<&'a str>,
    dir: usize,
    suffix: usize,
}

impl Iterator for Candidates<'_> {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        if self.suffixes.is_empty() {
            return None;
        }
        let dir = self.directories.get(self.dir)?;
        let candidate = dir.join(format!("{}{}", self.executable, self.suffixes[self.suffix]));

        self.suffix += 1;
        if self.suffix == self.suffixes.len() {
            self.suffix = 0;
            self.dir += 1;
        }
        Some(candidate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let total = self.directories.len() * self.suffixes.len();
        let done = self.dir * self.suffixes.len() + self.suffix;
        let left = total.saturating_sub(done);
        (left, Some(left))
    }
}
