use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use strum::{AsRefStr, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, AsRefStr)]
pub enum Platform {
    #[strum(serialize = "unix")]
    Unix,
    #[strum(serialize = "windows")]
    Windows,
}

impl Platform {
    pub fn current() -> Platform {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    pub fn path_var(self) -> &'static str {
        match self {
            Platform::Unix => "PATH",
            Platform::Windows => "Path",
        }
    }

    pub fn list_separator(self) -> char {
        match self {
            Platform::Unix => ':',
            Platform::Windows => ';',
        }
    }

    pub fn requires_extension(self) -> bool {
        matches!(self, Platform::Windows)
    }
}

impl Default for Platform {
    fn default() -> Platform {
        Platform::current()
    }
}

#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    platform: Platform,
    vars: HashMap<OsString, OsString>,
    cwd: Option<PathBuf>,
}

impl EnvSnapshot {
    pub fn new(platform: Platform) -> EnvSnapshot {
        EnvSnapshot {
            platform,
            vars: HashMap::new(),
            cwd: None,
        }
    }

    pub fn capture() -> EnvSnapshot {
        EnvSnapshot {
            platform: Platform::current(),
            vars: std::env::vars_os().collect(),
            cwd: std::env::current_dir().ok(),
        }
    }

    pub fn with_var<V: Into<OsString>>(mut self, name: &str, value: V) -> EnvSnapshot {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> EnvSnapshot {
        self.platform = platform;
        self
    }

    pub fn with_cwd<P: Into<PathBuf>>(mut self, cwd: P) -> EnvSnapshot {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn var(&self, name: &str) -> Option<&OsStr> {
        let exact = self.vars.get(OsStr::new(name));
        let found = match self.platform {
            Platform::Unix => exact,
            // names are case-insensitive there; an exact spelling wins, then the
            // smallest matching key
            Platform::Windows => exact.or_else(|| {
                self.vars
                    .iter()
                    .filter(|(k, _)| k.eq_ignore_ascii_case(name))
                    .min_by(|a, b| a.0.cmp(b.0))
                    .map(|(_, v)| v)
            }),
        };
        found.map(OsString::as_os_str)
    }

    pub fn current_dir(&self) -> &Path {
        self.cwd.as_deref().unwrap_or_else(|| Path::new("."))
    }

    /// Splits a directory list, dropping empty entries. Entries that are not
    /// valid unicode survive untouched when the snapshot uses the host's
    /// conventions.
    pub fn split_list(&self, value: &OsStr) -> Vec<PathBuf> {
        if self.platform == Platform::current() {
            return std::env::split_paths(value)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
        }
        value
            .to_string_lossy()
            .split(self.platform.list_separator())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .collect()
    }

    pub fn search_path(&self) -> Vec<PathBuf> {
        self.var(self.platform.path_var())
            .map(|paths| self.split_list(paths))
            .unwrap_or_default()
    }

    pub fn search_extensions(&self) -> Vec<String> {
        if !self.platform.requires_extension() {
            return vec![String::new()];
        }
        self.var("PATHEXT")
            .map(|exts| {
                exts.to_string_lossy()
                    .split(';')
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}
