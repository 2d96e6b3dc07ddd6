//! `textforge` is a catalogue of named text transformations (case
//! conversion, identifier styles, style-guide title casing, encodings,
//! formatters, Unicode text effects and string utilities) behind a single
//! dispatch entry point.
//!
//! The main struct of this crate is [`Dispatcher`](dispatcher::Dispatcher),
//! which resolves a tool name or alias in a [`MethodRegistry`](registry::MethodRegistry)
//! and runs the validated transformation. The [`qa`] module runs every
//! registered tool in bulk and tracks regressions and flaky tools.
//!
//! "Hello world" example:
//! ```
//! use textforge::prelude::*;
//!
//! let dispatcher = Dispatcher::with_defaults().unwrap();
//! let options = Options::new();
//!
//! assert_eq!(dispatcher.transform("camel-case", "hello world", &options).unwrap(), "helloWorld");
//! assert_eq!(dispatcher.transform("ap-style", "a tale of two cities", &options).unwrap(), "A Tale of Two Cities");
//! assert!(matches!(
//!     dispatcher.transform("base64-decode", "not-valid-base64!", &options),
//!     Err(Error::Transformation(_))
//! ));
//! ```

pub mod config;
pub mod constants;
pub mod dispatcher;
pub mod error;
pub mod log;
pub mod method;
pub mod options;
pub mod qa;
pub mod registry;
pub mod string_utils;
pub mod style_guide;
pub mod transforms;
pub mod validator;

/// The textforge prelude
///
/// This module re-exports the most commonly used items from textforge.
/// You can use it with `use textforge::prelude::*;` to bring all common items into scope.
pub mod prelude {
    // Re-export commonly used traits
    pub use crate::method::Transform;

    // Re-export commonly used types
    pub use crate::dispatcher::Dispatcher;
    pub use crate::error::{Error, Result};
    pub use crate::method::{Category, TransformMethod};
    pub use crate::options::Options;
    pub use crate::registry::MethodRegistry;
    pub use crate::validator::{ValidResult, Validator};
}
