// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

//! Qualifier handling for the Remote Asset API: canonical ordering, name-set
//! algebra for supported-qualifier checks, and translation of a qualifier set
//! into the REAPI `Command` used both for remote-execution fetches and for
//! action-cache key derivation.

use std::collections::{BTreeMap, HashSet};

use protos::gen::build::bazel::remote::asset::v1::Qualifier;

mod translator;
pub use translator::{CommandGenerator, qualifiers_to_command};


/// Sort qualifiers into their canonical order: by name, then by value, with
/// byte-wise comparison. Reference digests depend on this order.
pub fn sort_qualifiers(qualifiers: &mut [Qualifier]) {
    qualifiers.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.value.cmp(&b.value)));
}

/// Collect qualifiers into a name → value map. Later entries win, which is
/// irrelevant for well-formed requests (duplicate names are not meaningful).
pub fn qualifiers_to_map(qualifiers: &[Qualifier]) -> BTreeMap<String, String> {
    qualifiers
        .iter()
        .map(|q| (q.name.clone(), q.value.clone()))
        .collect()
}

/// The value of the `resource_type` qualifier, as used for metric labels.
pub fn resource_type_label(qualifiers: &[Qualifier]) -> String {
    qualifiers
        .iter()
        .find(|q| q.name == "resource_type")
        .map(|q| q.value.clone())
        .unwrap_or_else(|| "N/A".to_owned())
}

/// A set of qualifier names.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct QualifierSet(HashSet<String>);

impl QualifierSet {
    pub fn new() -> QualifierSet {
        QualifierSet(HashSet::new())
    }

    pub fn from_names<S: AsRef<str>, I: IntoIterator<Item = S>>(names: I) -> QualifierSet {
        QualifierSet(names.into_iter().map(|n| n.as_ref().to_owned()).collect())
    }

    pub fn from_qualifiers(qualifiers: &[Qualifier]) -> QualifierSet {
        QualifierSet(qualifiers.iter().map(|q| q.name.clone()).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn insert(&mut self, name: &str) {
        self.0.insert(name.to_owned());
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.as_str())
    }

    /// The set difference `self \ supported`, with `retain_if` deciding
    /// whether a name not in `supported` is nevertheless handled (e.g.
    /// per-header qualifier prefixes).
    pub fn difference_with<F: Fn(&str) -> bool>(
        &self,
        supported: &QualifierSet,
        retain_if: F,
    ) -> QualifierSet {
        QualifierSet(
            self.0
                .iter()
                .filter(|name| {
                    let name = name.as_str();
                    !supported.contains(name) && !retain_if(name)
                })
                .cloned()
                .collect(),
        )
    }

    /// The set difference `self \ supported`.
    pub fn difference(&self, supported: &QualifierSet) -> QualifierSet {
        self.difference_with(supported, |_| false)
    }

    /// The contained names, sorted, for deterministic error messages.
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.iter().cloned().collect();
        names.sort();
        names
    }
}
