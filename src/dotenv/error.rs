use std::path::PathBuf;
use thiserror::Error;

/// A single line of an env file that failed validation.
///
/// Every variant carries the offending raw text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    #[error("the definition of the environment variable \"{0}\" is missing an equals sign")]
    MissingSeparator(String),

    #[error(
        "invalid environment variable name \"{0}\": it must begin with an alphabetic character \
         or an underscore, followed by alphanumeric characters or underscores"
    )]
    InvalidName(String),

    #[error(
        "invalid environment variable value \"{0}\": control characters must be preceded \
         by a backslash"
    )]
    InvalidValue(String),
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DotenvError {
    #[error("path not set")]
    PathNotSet,

    #[error("\"{0}\" does not exist or is not accessible")]
    PathNotAccessible(PathBuf),

    #[error("path can not be overwritten once set")]
    PathAlreadySet,

    #[error("failed to read env file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path}:{line}: {source}")]
    Syntax {
        path: PathBuf,
        line: usize,
        source: SyntaxError,
    },

    #[error("invalid application environment key: {0}")]
    InvalidAppEnvName(#[source] SyntaxError),
}

impl DotenvError {
    /// True for the unset/inaccessible/unreadable path family.
    pub fn is_path_error(&self) -> bool {
        matches!(
            self,
            Self::PathNotSet
                | Self::PathNotAccessible(_)
                | Self::PathAlreadySet
                | Self::ReadError { .. }
        )
    }

    pub fn is_syntax_error(&self) -> bool {
        matches!(self, Self::Syntax { .. } | Self::InvalidAppEnvName(_))
    }

    /// The line-level validation failure behind this error, if any.
    pub fn syntax(&self) -> Option<&SyntaxError> {
        match self {
            Self::Syntax { source, .. } | Self::InvalidAppEnvName(source) => Some(source),
            _ => None,
        }
    }
}
