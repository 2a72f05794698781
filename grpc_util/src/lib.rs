// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).

use protos::gen::google::rpc;
use tonic::{Code, Status};

pub mod prost;

pub fn status_to_str(status: tonic::Status) -> String {
    status_ref_to_str(&status)
}

pub fn status_ref_to_str(status: &tonic::Status) -> String {
    format!("{:?}: {:?}", status.code(), status.message())
}

/// Convert a `google.rpc.Status` proto (as embedded in Remote Asset API
/// responses and configuration) into a `tonic::Status`.
pub fn status_from_proto(status: &rpc::Status) -> Status {
    Status::new(Code::from(status.code), status.message.clone())
}

/// Convert a `tonic::Status` into the `google.rpc.Status` proto embedded in
/// Remote Asset API responses.
pub fn status_to_proto(status: &Status) -> rpc::Status {
    rpc::Status {
        code: status.code() as i32,
        message: status.message().to_owned(),
        ..rpc::Status::default()
    }
}

/// An OK `google.rpc.Status` with a human-readable message, for embedding in
/// successful fetch responses.
pub fn status_ok(message: &str) -> rpc::Status {
    rpc::Status {
        code: Code::Ok as i32,
        message: message.to_owned(),
        ..rpc::Status::default()
    }
}

/// Histogram bucket boundaries spanning `10^min_exponent ..= 10^max_exponent`
/// with `steps_per_exponent` logarithmically spaced buckets per decade.
pub fn decimal_exponential_buckets(
    min_exponent: i32,
    max_exponent: i32,
    steps_per_exponent: u32,
) -> Vec<f64> {
    let step = 10f64.powf(1.0 / f64::from(steps_per_exponent));
    let count = (max_exponent - min_exponent) as u32 * steps_per_exponent + 1;
    let mut buckets = Vec::with_capacity(count as usize);
    let mut bound = 10f64.powi(min_exponent);
    for _ in 0..count {
        buckets.push(bound);
        bound *= step;
    }
    buckets
}

#[cfg(test)]
mod tests {
    use tonic::{Code, Status};

    use super::{decimal_exponential_buckets, status_from_proto, status_to_proto};

    #[test]
    fn status_proto_round_trip() {
        let status = Status::new(Code::PermissionDenied, "nope");
        let proto = status_to_proto(&status);
        assert_eq!(proto.code, Code::PermissionDenied as i32);
        let back = status_from_proto(&proto);
        assert_eq!(back.code(), Code::PermissionDenied);
        assert_eq!(back.message(), "nope");
    }

    #[test]
    fn buckets_are_increasing() {
        let buckets = decimal_exponential_buckets(-3, 6, 2);
        assert_eq!(buckets.len(), 19);
        assert!((buckets[0] - 0.001).abs() < 1e-9);
        assert!(buckets.windows(2).all(|w| w[0] < w[1]));
        assert!((buckets[18] - 1_000_000.0).abs() < 1.0);
    }
}
