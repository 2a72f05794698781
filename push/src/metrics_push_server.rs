// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::sync::{Arc, Once};
use std::time::Instant;

use async_trait::async_trait;
use grpc_util::decimal_exponential_buckets;
use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec};
use protos::gen::build::bazel::remote::asset::v1::{
    PushBlobRequest, PushBlobResponse, PushDirectoryRequest, PushDirectoryResponse, Qualifier,
};
use qualifier::resource_type_label;
use tonic::{Code, Status};

use crate::PushServer;

static PUSH_SERVER_METRICS: Once = Once::new();

static PUSH_SERVER_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "remote_asset_push_server_duration_seconds",
            "Amount of time spent per operation on pushing remote assets, in seconds.",
        )
        .buckets(decimal_exponential_buckets(-3, 6, 2)),
        &["name", "operation", "grpc_code", "resource_type"],
    )
    .unwrap()
});

static PUSH_SERVER_BLOB_SIZE_BYTES: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "remote_asset_push_server_blob_size_bytes",
            "Size of blobs being pushed, in bytes.",
        )
        .buckets(decimal_exponential_buckets(0, 9, 2)),
        &["name", "operation", "resource_type"],
    )
    .unwrap()
});

fn register_metrics() {
    PUSH_SERVER_METRICS.call_once(|| {
        let registry = prometheus::default_registry();
        registry
            .register(Box::new(PUSH_SERVER_DURATION_SECONDS.clone()))
            .unwrap();
        registry
            .register(Box::new(PUSH_SERVER_BLOB_SIZE_BYTES.clone()))
            .unwrap();
    });
}

/// A Push server decorator that reports Prometheus metrics per operation.
/// The collectors are process-wide and registered exactly once.
pub struct MetricsPushServer {
    pusher: Arc<dyn PushServer>,
    name: String,
}

impl MetricsPushServer {
    pub fn new(pusher: Arc<dyn PushServer>, name: &str) -> MetricsPushServer {
        register_metrics();
        MetricsPushServer {
            pusher,
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
        PUSH_SERVER_DURATION_SECONDS
            .with_label_values(&[
                self.name.as_str(),
                operation,
                code.as_str(),
                resource_type.as_str(),
            ])
            .observe(started.elapsed().as_secs_f64());
    }
}

fn code_of<T>(result: &Result<T, Status>) -> Code {
    match result {
        Ok(_) => Code::Ok,
        Err(err) => err.code(),
    }
}

#[async_trait]
impl PushServer for MetricsPushServer {
    async fn push_blob(&self, request: PushBlobRequest) -> Result<PushBlobResponse, Status> {
        if let Some(digest) = &request.blob_digest {
            let resource_type = resource_type_label(&request.qualifiers);
            PUSH_SERVER_BLOB_SIZE_BYTES
                .with_label_values(&[self.name.as_str(), "PushBlob", resource_type.as_str()])
                .observe(digest.size_bytes as f64);
        }
        let qualifiers = request.qualifiers.clone();
        let started = Instant::now();
        let result = self.pusher.push_blob(request).await;
        self.observe_duration("PushBlob", code_of(&result), &qualifiers, started);
        result
    }

    async fn push_directory(
        &self,
        request: PushDirectoryRequest,
    ) -> Result<PushDirectoryResponse, Status> {
        let qualifiers = request.qualifiers.clone();
        let started = Instant::now();
        let result = self.pusher.push_directory(request).await;
        self.observe_duration("PushDirectory", code_of(&result), &qualifiers, started);
        result
    }
}
