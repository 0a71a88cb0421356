//! Key → namer lookup

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::{CustomNamer, Namer};
use crate::error::{ModelGenError, Result};

static BUILTIN: Lazy<NamerRegistry> = Lazy::new(NamerRegistry::new);

/// Maps configuration keys to namers.
///
/// A new registry knows the built-in keys; [`NamerRegistry::register`] adds
/// custom transforms. A missing or empty key always means [`Namer::Identity`].
#[derive(Debug, Clone)]
pub struct NamerRegistry {
    namers: HashMap<String, Namer>,
}

impl Default for NamerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NamerRegistry {
    pub fn new() -> Self {
        let builtins: [(&[&str], Namer); 8] = [
            (&["", "identity", "nop"], Namer::Identity),
            (&["snake", "snake_case"], Namer::Snake),
            (&["camel", "camelCase"], Namer::Camel),
            (&["pascal", "PascalCase"], Namer::Pascal),
            (
                &["screaming_snake", "SCREAMING_SNAKE_CASE"],
                Namer::ScreamingSnake,
            ),
            (&["kebab", "kebab-case"], Namer::Kebab),
            (&["lower", "lowercase"], Namer::Lower),
            (&["upper", "UPPERCASE"], Namer::Upper),
        ];

        let mut namers = HashMap::new();
        for (keys, namer) in builtins {
            for key in keys {
                namers.insert((*key).to_string(), namer.clone());
            }
        }
        Self { namers }
    }

    /// Shared registry holding only the built-in namers
    pub fn builtin() -> &'static NamerRegistry {
        &BUILTIN
    }

    /// Register a custom transform, replacing any namer already under `key`
    pub fn register<F>(&mut self, key: impl Into<String>, apply: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        let key = key.into();
        let namer = Namer::Custom(CustomNamer::new(key.clone(), apply));
        self.namers.insert(key, namer);
    }

    pub fn lookup(&self, key: &str) -> Option<Namer> {
        self.namers.get(key).cloned()
    }

    /// Resolve an optional configuration key. `scope` describes who asked,
    /// and is only rendered when the key is unknown.
    pub fn resolve(&self, key: Option<&str>, scope: impl FnOnce() -> String) -> Result<Namer> {
        let key = key.unwrap_or("");
        self.lookup(key).ok_or_else(|| ModelGenError::UnknownNamer {
            key: key.to_string(),
            scope: scope(),
        })
    }
}
