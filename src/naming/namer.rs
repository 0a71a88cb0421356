//! Built-in and custom name transforms

use std::fmt;
use std::sync::Arc;

use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};

/// A pure, stateless transform from a raw identifier to a facing name.
#[derive(Clone, Default)]
pub enum Namer {
    /// Leaves the name unchanged
    #[default]
    Identity,
    /// `order_items`
    Snake,
    /// `orderItems`
    Camel,
    /// `OrderItems`
    Pascal,
    /// `ORDER_ITEMS`
    ScreamingSnake,
    /// `order-items`
    Kebab,
    /// ASCII lowercase, no word splitting
    Lower,
    /// ASCII uppercase, no word splitting
    Upper,
    /// Registered at runtime under its own key
    Custom(CustomNamer),
}

impl Namer {
    /// Apply the transform to a raw name
    pub fn apply(&self, raw: &str) -> String {
        match self {
            Namer::Identity => raw.to_string(),
            Namer::Snake => raw.to_snake_case(),
            Namer::Camel => raw.to_lower_camel_case(),
            Namer::Pascal => raw.to_upper_camel_case(),
            Namer::ScreamingSnake => raw.to_shouty_snake_case(),
            Namer::Kebab => raw.to_kebab_case(),
            Namer::Lower => raw.to_ascii_lowercase(),
            Namer::Upper => raw.to_ascii_uppercase(),
            Namer::Custom(custom) => (custom.apply)(raw),
        }
    }

    /// The registry key this namer is known by
    pub fn key(&self) -> &str {
        match self {
            Namer::Identity => "identity",
            Namer::Snake => "snake",
            Namer::Camel => "camel",
            Namer::Pascal => "pascal",
            Namer::ScreamingSnake => "screaming_snake",
            Namer::Kebab => "kebab",
            Namer::Lower => "lower",
            Namer::Upper => "upper",
            Namer::Custom(custom) => &custom.key,
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Namer::Identity)
    }
}

impl fmt::Debug for Namer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Namer({})", self.key())
    }
}

/// A namer backed by a user-supplied closure.
#[derive(Clone)]
pub struct CustomNamer {
    key: String,
    apply: Arc<dyn Fn(&str) -> String + Send + Sync>,
}

impl CustomNamer {
    pub fn new<F>(key: impl Into<String>, apply: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            apply: Arc::new(apply),
        }
    }
}
