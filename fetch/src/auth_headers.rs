// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::collections::BTreeMap;
use std::str::FromStr;

use http::header::{HeaderMap, HeaderName, HeaderValue};
use protos::gen::build::bazel::remote::asset::v1::Qualifier;
use tonic::Status;

const HEADER_PREFIX: &str = "http_header:";
const HEADER_URL_PREFIX: &str = "http_header_url:";
const LEGACY_HEADERS_NAME: &str = "bazel.auth_headers";

/// The HTTP headers a client asked the fetcher to apply, keyed by target URI.
///
/// Headers come from three places: `http_header:<H>` qualifiers apply to
/// every URI, `http_header_url:<i>:<H>` qualifiers apply only to the URI at
/// index `i` in the request, and the legacy `bazel.auth_headers` JSON map
/// (URI → header → value) wins over both.
pub struct AuthHeaders(BTreeMap<String, BTreeMap<String, String>>);

impl AuthHeaders {
    pub fn from_qualifiers(
        uris: &[String],
        qualifiers: &[Qualifier],
    ) -> Result<AuthHeaders, Status> {
        let mut headers: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();

        for qualifier in qualifiers {
            if let Some(header) = qualifier.name.strip_prefix(HEADER_PREFIX) {
                for uri in uris {
                    headers
                        .entry(uri.clone())
                        .or_default()
                        .insert(header.to_owned(), qualifier.value.clone());
                }
            } else if let Some(rest) = qualifier.name.strip_prefix(HEADER_URL_PREFIX) {
                let (index, header) = rest.split_once(':').ok_or_else(|| {
                    Status::invalid_argument(format!(
                        "Malformed qualifier name: {:?}",
                        qualifier.name
                    ))
                })?;
                let index: usize = index.parse().map_err(|_| {
                    Status::invalid_argument(format!(
                        "Malformed URI index in qualifier name: {:?}",
                        qualifier.name
                    ))
                })?;
                let uri = uris.get(index).ok_or_else(|| {
                    Status::invalid_argument(format!(
                        "Qualifier {:?} refers to URI index {index}, but the request has {} URIs",
                        qualifier.name,
                        uris.len()
                    ))
                })?;
                headers
                    .entry(uri.clone())
                    .or_default()
                    .insert(header.to_owned(), qualifier.value.clone());
            }
        }

        // The legacy JSON map wins over per-header qualifiers.
        if let Some(qualifier) = qualifiers.iter().find(|q| q.name == LEGACY_HEADERS_NAME) {
            let legacy: BTreeMap<String, BTreeMap<String, String>> =
                serde_json::from_str(&qualifier.value).map_err(|err| {
                    Status::invalid_argument(format!(
                        "Cannot parse bazel.auth_headers qualifier: {err}"
                    ))
                })?;
            for (uri, uri_headers) in legacy {
                headers.entry(uri).or_default().extend(uri_headers);
            }
        }

        Ok(AuthHeaders(headers))
    }

    /// The headers to apply when requesting `uri`.
    pub fn header_map(&self, uri: &str) -> Result<HeaderMap, Status> {
        let mut map = HeaderMap::new();
        if let Some(headers) = self.0.get(uri) {
            for (header, value) in headers {
                let name = HeaderName::from_str(header).map_err(|err| {
                    Status::invalid_argument(format!("Invalid header name {header:?}: {err}"))
                })?;
                let value = HeaderValue::from_str(value).map_err(|err| {
                    Status::invalid_argument(format!("Invalid header value for {header:?}: {err}"))
                })?;
                map.insert(name, value);
            }
        }
        Ok(map)
    }
}
