// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::sync::{Arc, Once};
use std::time::Instant;

use async_trait::async_trait;
use grpc_util::decimal_exponential_buckets;
use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec};
use protos::gen::build::bazel::remote::asset::v1::{
    FetchBlobRequest, FetchBlobResponse, FetchDirectoryRequest, FetchDirectoryResponse, Qualifier,
};
use qualifier::{QualifierSet, resource_type_label};
use tonic::{Code, Status};

use crate::Fetcher;

static FETCHER_METRICS: Once = Once::new();

static FETCHER_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "remote_asset_fetcher_duration_seconds",
            "Amount of time spent per operation on fetching remote assets, in seconds.",
        )
        .buckets(decimal_exponential_buckets(-3, 6, 2)),
        &["name", "operation", "grpc_code", "resource_type"],
    )
    .unwrap()
});

static FETCHER_BLOB_SIZE_BYTES: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "remote_asset_fetcher_blob_size_bytes",
            "Size of blobs fetched, in bytes.",
        )
        .buckets(decimal_exponential_buckets(0, 9, 2)),
        &["name", "operation", "resource_type"],
    )
    .unwrap()
});

fn register_metrics() {
    FETCHER_METRICS.call_once(|| {
        let registry = prometheus::default_registry();
        registry
            .register(Box::new(FETCHER_DURATION_SECONDS.clone()))
            .unwrap();
        registry
            .register(Box::new(FETCHER_BLOB_SIZE_BYTES.clone()))
            .unwrap();
    });
}

/// A `Fetcher` decorator that reports Prometheus metrics per operation. The
/// collectors are process-wide and registered exactly once.
pub struct MetricsFetcher {
    fetcher: Arc<dyn Fetcher>,
    name: String,
}

impl MetricsFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher>, name: &str) -> MetricsFetcher {
        register_metrics();
        MetricsFetcher {
            fetcher,
            name: name.to_owned(),
        }
    }

    fn observe_duration(
        &self,
        operation: &str,
        code: Code,
        qualifiers: &[Qualifier],
        started: Instant,
    ) {
        let code = format!("{code:?}");
        let resource_type = resource_type_label(qualifiers);
        FETCHER_DURATION_SECONDS
            .with_label_values(&[
                self.name.as_str(),
                operation,
                code.as_str(),
                resource_type.as_str(),
            ])
            .observe(started.elapsed().as_secs_f64());
    }

    fn observe_blob_size(&self, operation: &str, qualifiers: &[Qualifier], size_bytes: i64) {
        let resource_type = resource_type_label(qualifiers);
        FETCHER_BLOB_SIZE_BYTES
            .with_label_values(&[self.name.as_str(), operation, resource_type.as_str()])
            .observe(size_bytes as f64);
    }
}

fn result_code<T>(result: &Result<T, Status>, status_of: fn(&T) -> i32) -> Code {
    match result {
        Ok(response) => Code::from(status_of(response)),
        Err(err) => err.code(),
    }
}

#[async_trait]
impl Fetcher for MetricsFetcher {
    async fn fetch_blob(&self, request: FetchBlobRequest) -> Result<FetchBlobResponse, Status> {
        let qualifiers = request.qualifiers.clone();
        let started = Instant::now();
        let result = self.fetcher.fetch_blob(request).await;
        let code = result_code(&result, |r: &FetchBlobResponse| {
            r.status.as_ref().map(|s| s.code).unwrap_or_default()
        });
        self.observe_duration("FetchBlob", code, &qualifiers, started);
        if let Ok(response) = &result {
            if let Some(digest) = &response.blob_digest {
                self.observe_blob_size("FetchBlob", &qualifiers, digest.size_bytes);
            }
        }
        result
    }

    async fn fetch_directory(
        &self,
        request: FetchDirectoryRequest,
    ) -> Result<FetchDirectoryResponse, Status> {
        let qualifiers = request.qualifiers.clone();
        let started = Instant::now();
        let result = self.fetcher.fetch_directory(request).await;
        let code = result_code(&result, |r: &FetchDirectoryResponse| {
            r.status.as_ref().map(|s| s.code).unwrap_or_default()
        });
        self.observe_duration("FetchDirectory", code, &qualifiers, started);
        result
    }

    fn check_qualifiers(&self, qualifiers: QualifierSet) -> QualifierSet {
        self.fetcher.check_qualifiers(qualifiers)
    }
}
