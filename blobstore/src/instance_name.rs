// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::fmt;

use tonic::Status;

// Pathname components an instance name may not contain, as these act as
// separators in REAPI resource paths.
const RESERVED_KEYWORDS: &[&str] = &["blobs", "uploads", "operations", "capabilities"];

/// A validated REAPI instance name: an opaque tenant/namespace identifier in
/// which every digest is interpreted. The empty string is a valid instance
/// name.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct InstanceName(String);

impl InstanceName {
    pub fn new(name: &str) -> Result<InstanceName, Status> {
        if !name.is_empty() {
            for component in name.split('/') {
                if component.is_empty() {
                    return Err(Status::invalid_argument(format!(
                        "Invalid instance name {name:?}: contains an empty pathname component"
                    )));
                }
                if RESERVED_KEYWORDS.contains(&component) {
                    return Err(Status::invalid_argument(format!(
                        "Invalid instance name {name:?}: component {component:?} is a reserved keyword"
                    )));
                }
            }
        }
        Ok(InstanceName(name.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
