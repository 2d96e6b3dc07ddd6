use std::fmt;

use serde::Serialize;
use strum_macros::Display;

use crate::constants::{limits::MAX_INPUT_LENGTH, messages};
use crate::error::{Error, Result};
use crate::options::Options;
use crate::validator::{validate_all, Validator};

/// Grouping label of a transform method
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[strum(serialize = "case-conversion")]
    CaseConversion,
    #[strum(serialize = "developer")]
    Developer,
    #[strum(serialize = "style-guides")]
    StyleGuides,
    #[strum(serialize = "encoding")]
    Encoding,
    #[strum(serialize = "code-formatting")]
    CodeFormatting,
    #[strum(serialize = "text-effects")]
    TextEffects,
    #[strum(serialize = "text-tools")]
    TextTools,
    #[strum(serialize = "generators")]
    Generators,
}

/// Trait for the body of a text transformation
///
/// Implementations must be total over well-formed UTF-8 unless the owning
/// method is flagged as fallible, in which case they may return
/// [`Error::Transformation`] for input that is not in the expected format.
///
/// # Examples
///
/// ```
/// use textforge::error::Result;
/// use textforge::method::Transform;
/// use textforge::options::Options;
///
/// let shout = |text: &str, _: &Options| -> Result<String> { Ok(text.to_uppercase()) };
/// assert_eq!(shout.execute("hi", &Options::new()).unwrap(), "HI");
/// ```
pub trait Transform: Send + Sync {
    /// Transforms the input text
    ///
    /// # Arguments
    /// * `input` - The validated input text
    /// * `options` - Tool specific options
    ///
    /// # Returns
    /// The transformed text or an error if transformation fails
    fn execute(&self, input: &str, options: &Options) -> Result<String>;
}

impl<F> Transform for F
where
    F: Fn(&str, &Options) -> Result<String> + Send + Sync,
{
    fn execute(&self, input: &str, options: &Options) -> Result<String> {
        self(input, options)
    }
}

/// A named, immutable text transformation with its metadata and validators
pub struct TransformMethod {
    name: String,
    category: Category,
    description: String,
    validators: Vec<Validator>,
    randomized: bool,
    fallible: bool,
    executor: Box<dyn Transform>,
}

impl fmt::Debug for TransformMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformMethod")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("validators", &self.validators)
            .field("randomized", &self.randomized)
            .field("fallible", &self.fallible)
            .finish()
    }
}

impl TransformMethod {
    /// Creates a method carrying the `required` validator
    pub fn new<T: Transform + 'static>(
        name: &str,
        category: Category,
        description: &str,
        executor: T,
    ) -> Self {
        Self {
            name: name.to_string(),
            category,
            description: description.to_string(),
            validators: vec![Validator::required()],
            randomized: false,
            fallible: false,
            executor: Box::new(executor),
        }
    }

    /// Appends a validator to the chain
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Removes every attached validator, including `required`
    pub fn without_validators(mut self) -> Self {
        self.validators.clear();
        self
    }

    /// Flags the method as drawing from the random source
    pub fn randomized(mut self) -> Self {
        self.randomized = true;
        self
    }

    /// Flags the method as allowed to reject badly formatted input
    pub fn fallible(mut self) -> Self {
        self.fallible = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    pub fn is_randomized(&self) -> bool {
        self.randomized
    }

    pub fn is_fallible(&self) -> bool {
        self.fallible
    }

    /// Validates a possibly missing input and executes the method.
    ///
    /// Order of checks: null input, hard length cap, attached validators.
    /// The method body never runs unless every check passes.
    pub fn transform(&self, input: Option<&str>, options: &Options) -> Result<String> {
        let input = input.ok_or_else(|| Error::Validation(messages::NULL_INPUT.to_string()))?;

        if input.chars().count() > MAX_INPUT_LENGTH {
            return Err(Error::Validation(format!(
                "Input exceeds maximum length of {} characters",
                MAX_INPUT_LENGTH
            )));
        }

        let result = validate_all(&self.validators, input);
        if !result.valid {
            return Err(Error::Validation(result.message.unwrap_or_else(|| {
                format!("Input is not valid for \"{}\"", self.name)
            })));
        }

        match self.executor.execute(input, options) {
            Err(e @ (Error::Validation(_) | Error::Transformation(_))) => Err(e),
            Err(e) => Err(Error::Transformation(format!("\"{}\" failed: {}", self.name, e))),
            ok => ok,
        }
    }

    /// Shorthand for [`transform`](Self::transform) with a present input
    pub fn run(&self, input: &str, options: &Options) -> Result<String> {
        self.transform(Some(input), options)
    }
}
