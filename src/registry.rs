use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::method::TransformMethod;
use crate::transforms;

/// Catalogue of transform methods keyed by name, alias and category.
///
/// The registry is built once and then shared read-only (usually behind an
/// `Arc`), so lookups need no locking.
#[derive(Debug, Default)]
pub struct MethodRegistry {
    methods: HashMap<String, Arc<TransformMethod>>,
    order: Vec<Arc<TransformMethod>>,
    categories: HashMap<String, Vec<Arc<TransformMethod>>>,
    category_order: Vec<String>,
    aliases: HashMap<String, String>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry holding the full tool catalogue and its aliases
    pub fn with_defaults() -> Result<Self> {
        let mut registry = Self::new();
        transforms::register_all(&mut registry)?;
        Ok(registry)
    }

    /// Registers a method under its own name and category.
    ///
    /// # Errors
    /// Returns `DuplicateMethod` if the name is already taken by a method or an alias
    pub fn register(&mut self, method: TransformMethod) -> Result<()> {
        let name = method.name().to_string();
        if self.methods.contains_key(&name) || self.aliases.contains_key(&name) {
            return Err(Error::DuplicateMethod(name));
        }

        let method = Arc::new(method);
        let category = method.category().to_string();
        if !self.categories.contains_key(&category) {
            self.category_order.push(category.clone());
        }
        self.categories
            .entry(category)
            .or_default()
            .push(Arc::clone(&method));
        self.methods.insert(name, Arc::clone(&method));
        self.order.push(method);
        Ok(())
    }

    /// Registers every method of the list, stopping at the first failure
    pub fn register_all<I>(&mut self, methods: I) -> Result<()>
    where
        I: IntoIterator<Item = TransformMethod>,
    {
        methods.into_iter().try_for_each(|m| self.register(m))
    }

    /// Makes `alias` resolve to the method registered as `canonical`.
    ///
    /// # Errors
    /// * `NotFound` if `canonical` is not a registered method name
    /// * `DuplicateMethod` if `alias` is already a method name or alias
    pub fn register_alias(&mut self, alias: &str, canonical: &str) -> Result<()> {
        if !self.methods.contains_key(canonical) {
            return Err(Error::NotFound(canonical.to_string()));
        }
        if self.methods.contains_key(alias) || self.aliases.contains_key(alias) {
            return Err(Error::DuplicateMethod(alias.to_string()));
        }
        self.aliases.insert(alias.to_string(), canonical.to_string());
        Ok(())
    }

    /// Resolves an alias to its canonical name, or returns the name unchanged
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(|s| s.as_str()).unwrap_or(name)
    }

    /// Looks a method up by name or alias
    pub fn get_method(&self, name: &str) -> Result<Arc<TransformMethod>> {
        self.methods
            .get(self.resolve(name))
            .cloned()
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(self.resolve(name))
    }

    /// Methods of a category in registration order (empty if unknown)
    pub fn get_category(&self, category: &str) -> Vec<Arc<TransformMethod>> {
        self.categories.get(category).cloned().unwrap_or_default()
    }

    /// Category names in the order they were first seen
    pub fn categories(&self) -> &[String] {
        &self.category_order
    }

    /// Case-insensitive substring search over name, description and category
    pub fn search_methods(&self, keyword: &str) -> Vec<Arc<TransformMethod>> {
        let needle = keyword.to_lowercase();
        self.order
            .iter()
            .filter(|m| {
                m.name().to_lowercase().contains(&needle)
                    || m.description().to_lowercase().contains(&needle)
                    || m.category().to_string().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Every method in registration order
    pub fn all_methods(&self) -> &[Arc<TransformMethod>] {
        &self.order
    }

    /// Aliases pointing at the given canonical name, sorted
    pub fn aliases_of(&self, canonical: &str) -> Vec<&str> {
        let mut aliases: Vec<&str> = self
            .aliases
            .iter()
            .filter(|(_, target)| target.as_str() == canonical)
            .map(|(alias, _)| alias.as_str())
            .collect();
        aliases.sort_unstable();
        aliases
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
