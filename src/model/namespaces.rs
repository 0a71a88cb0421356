//! Namespace collection

use std::collections::{BTreeSet, HashSet};

use crate::mapping::TypeMapper;

/// Deduplicated set of namespaces gathered during one model build.
#[derive(Debug, Clone, Default)]
pub struct NamespaceSet {
    namespaces: BTreeSet<String>,
}

impl NamespaceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a namespace. Blank namespaces are ignored. Returns true if the
    /// namespace was not already present.
    pub fn insert(&mut self, namespace: &str) -> bool {
        let namespace = namespace.trim();
        if namespace.is_empty() || self.namespaces.contains(namespace) {
            return false;
        }
        self.namespaces.insert(namespace.to_string())
    }

    pub fn extend<I, S>(&mut self, namespaces: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for namespace in namespaces {
            self.insert(namespace.as_ref());
        }
    }

    /// Sorted namespaces
    pub fn to_vec(&self) -> Vec<String> {
        self.namespaces.iter().cloned().collect()
    }

    /// Hand the sorted set to the mapper for ordering. Whatever the mapper
    /// returns is cleaned of blanks and repeats.
    pub fn finish(self, mapper: &dyn TypeMapper) -> Vec<String> {
        let organized = mapper.organize_namespaces(self.to_vec());
        let mut seen = HashSet::with_capacity(organized.len());
        organized
            .into_iter()
            .filter(|ns| !ns.trim().is_empty() && seen.insert(ns.clone()))
            .collect()
    }
}
