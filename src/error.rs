use std::io::Write;
use strum_macros::Display;
use thiserror::Error;

#[derive(Debug, Display)]
pub enum ConfigType {
    #[strum(serialize = "Main config")]
    MAIN,
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The input failed a precondition (null, empty, too long, pattern mismatch).
    #[error("{0}")]
    Validation(String),
    /// The input passed validation but is not in the format the tool expects.
    #[error("{0}")]
    Transformation(String),
    /// No tool or alias is registered under the given name.
    #[error("unknown transformation \"{0}\"")]
    NotFound(String),
    #[error("a transformation named \"{0}\" is already registered")]
    DuplicateMethod(String),
    #[error("error processing args. Cause : {0}")]
    ArgsProcessingError(String),
    #[error("unable to create default configuration file in {0}")]
    ConfigError(String),
    #[error("unable to read configuration file {file:?}. Cause : {cause}")]
    ConfigReadError { file: String, cause: String },
    #[error("unable to parse {location} file {file:?}. Cause : {cause}")]
    SerdeTomlError {
        location: ConfigType,
        file: String,
        cause: String,
    },
    #[error("unable to interpolate variable. Cause : {cause}")]
    InterpolationError { location: ConfigType, cause: String },
    #[error("JSON parsing error: {0}")]
    JsonError(String),
    #[error(transparent)]
    Io(#[from] ::std::io::Error),
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Whether the error is an input problem the end user can fix.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::Transformation(_))
    }
}

impl From<&'static str> for Error {
    fn from(s: &'static str) -> Self {
        Error::Msg(s.to_owned())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Msg(s)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::JsonError(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub fn default_error_handler(error: &Error, output: &mut dyn Write) {
    use nu_ansi_term::Color::{Red, Yellow};

    match error {
        Error::Io(io_error) if io_error.kind() == ::std::io::ErrorKind::BrokenPipe => {
            ::std::process::exit(0);
        }
        Error::Validation(_) => {
            writeln!(output, "{}: {}", Yellow.paint("[input error]"), error).ok();
        }
        Error::Transformation(_) => {
            writeln!(output, "{}: {}", Yellow.paint("[format error]"), error).ok();
        }
        Error::NotFound(_) | Error::DuplicateMethod(_) => {
            writeln!(output, "{}: {}", Red.paint("[tool error]"), error).ok();
        }
        Error::ConfigReadError { file: _, cause: _ }
        | Error::SerdeTomlError {
            location: _,
            file: _,
            cause: _,
        }
        | Error::InterpolationError {
            location: _,
            cause: _,
        } => {
            writeln!(output, "{}: {}", Red.paint("[config error]"), error).ok();
        }
        _ => {
            writeln!(output, "{}: {}", Red.paint("[textforge error]"), error).ok();
        }
    };
}
