use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid executable name `{name}`: {reason}")]
    InvalidArgument { name: String, reason: &'static str },
}

impl Error {
    pub(crate) fn invalid_argument(name: &str, reason: &'static str) -> Error {
        Error::InvalidArgument {
            name: name.escape_debug().to_string(),
            reason,
        }
    }
}
