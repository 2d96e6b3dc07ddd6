use std::sync::Arc;

use crate::{
    error::Result,
    method::TransformMethod,
    options::Options,
    registry::MethodRegistry,
};

/// Single entry point used by callers to run a tool by name.
///
/// Holds a shared handle on a registry that was fully built beforehand;
/// cloning the dispatcher only clones the handle.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<MethodRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<MethodRegistry>) -> Self {
        Self { registry }
    }

    /// Builds the default catalogue and wraps it in a dispatcher
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(Arc::new(MethodRegistry::with_defaults()?)))
    }

    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    /// Gets a clone of the shared registry handle
    pub fn share(&self) -> Arc<MethodRegistry> {
        Arc::clone(&self.registry)
    }

    /// Resolves `name` (alias first) and runs the tool on `input`.
    ///
    /// # Errors
    /// * `NotFound` if no tool or alias is registered under `name`
    /// * `Validation` if the input fails a precondition
    /// * `Transformation` if a format-specific tool cannot parse the input
    pub fn transform(&self, name: &str, input: &str, options: &Options) -> Result<String> {
        self.transform_nullable(name, Some(input), options)
    }

    /// Same as [`transform`](Self::transform) for callers whose input may be missing
    pub fn transform_nullable(
        &self,
        name: &str,
        input: Option<&str>,
        options: &Options,
    ) -> Result<String> {
        let method = self.registry.get_method(name)?;
        method.transform(input, options)
    }

    pub fn method(&self, name: &str) -> Result<Arc<TransformMethod>> {
        self.registry.get_method(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use once_cell::sync::Lazy;

    static DISPATCHER: Lazy<Dispatcher> = Lazy::new(|| Dispatcher::with_defaults().unwrap());

    fn run(name: &str, input: &str) -> Result<String> {
        DISPATCHER.transform(name, input, &Options::new())
    }

    #[test]
    fn test_scenarios() {
        assert_eq!(run("camel-case", "hello world test").unwrap(), "helloWorldTest");
        assert_eq!(run("snake-case", "hello world test").unwrap(), "hello_world_test");

        let err = run("base64-decode", "not-valid-base64!").unwrap_err();
        assert!(matches!(err, Error::Transformation(ref m) if m.contains("Base64")));

        let once = run("rot13", "Hello").unwrap();
        assert_eq!(once, "Uryyb");
        assert_eq!(run("rot13", &once).unwrap(), "Hello");

        assert_eq!(
            run("ap-style", "a tale of two cities").unwrap(),
            "A Tale of Two Cities"
        );

        let err = run("upper-case", "").unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m == "Input is required"));
    }

    #[test]
    fn test_unknown_tool_is_not_found() {
        assert!(matches!(run("no-such-tool", "x"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_aliases_dispatch_to_canonical() {
        assert_eq!(run("uppercase", "abc").unwrap(), "ABC");
        assert_eq!(run("snake_case", "Hello World").unwrap(), "hello_world");
    }

    #[test]
    fn test_null_input() {
        let err = DISPATCHER
            .transform_nullable("upper-case", None, &Options::new())
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m == "Input cannot be null"));
    }

    #[test]
    fn test_boundary_through_facade() {
        let at_cap = "a".repeat(100_000);
        assert_eq!(run("upper-case", &at_cap).unwrap().len(), 100_000);
        let over_cap = "a".repeat(100_001);
        assert!(matches!(
            run("upper-case", &over_cap),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_every_tool_requires_input() {
        for m in DISPATCHER.registry().all_methods() {
            assert!(
                matches!(run(m.name(), ""), Err(Error::Validation(_))),
                "{} accepted empty input",
                m.name()
            );
        }
    }

    #[test]
    fn test_only_fallible_tools_fail_on_sample_text() {
        let samples = ["Hello World", "The quick brown fox!", "ünïcödé 日本 🦀", "a"];
        for m in DISPATCHER.registry().all_methods() {
            for sample in samples {
                let result = run(m.name(), sample);
                if !m.is_fallible() {
                    assert!(result.is_ok(), "{} failed on {:?}", m.name(), sample);
                } else if let Err(e) = result {
                    assert!(
                        matches!(e, Error::Transformation(_)),
                        "{} raised {:?}",
                        m.name(),
                        e
                    );
                }
            }
        }
    }

    #[test]
    fn test_concurrent_dispatch() {
        let dispatcher = DISPATCHER.clone();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let d = dispatcher.clone();
                std::thread::spawn(move || {
                    d.transform("kebab-case", &format!("thread number {}", i), &Options::new())
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(
                handle.join().unwrap().unwrap(),
                format!("thread-number-{}", i)
            );
        }
    }
}
