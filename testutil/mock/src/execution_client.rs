// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::collections::VecDeque;

use async_trait::async_trait;
use blobstore::{ExecutionClient, OperationStream};
use futures::StreamExt;
use grpc_util::prost::MessageExt;
use parking_lot::Mutex;
use protos::gen::build::bazel::remote::execution::v2 as remexec;
use protos::gen::google::longrunning::{Operation, operation};
use remexec::execution_stage;
use tonic::Status;

const EXECUTE_RESPONSE_TYPE_URL: &str =
    "type.googleapis.com/build.bazel.remote.execution.v2.ExecuteResponse";

/// An `ExecutionClient` that replays scripted responses. Each `execute` call
/// pops the next script entry and returns an operation stream that goes
/// through an executing update before completing, the way a real server
/// streams progress.
pub struct StubExecutionClient {
    responses: Mutex<VecDeque<Result<remexec::ExecuteResponse, Status>>>,
    pub requests: Mutex<Vec<remexec::ExecuteRequest>>,
}

impl StubExecutionClient {
    pub fn new(responses: Vec<remexec::ExecuteResponse>) -> StubExecutionClient {
        StubExecutionClient {
            responses: Mutex::new(responses.into_iter().map(Ok).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn always_failing(status: Status) -> StubExecutionClient {
        StubExecutionClient {
            responses: Mutex::new(VecDeque::from([Err(status)])),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ExecutionClient for StubExecutionClient {
    async fn execute(&self, request: remexec::ExecuteRequest) -> Result<OperationStream, Status> {
        let next = self
            .responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(Status::failed_precondition("No more scripted responses")));
        self.requests.lock().push(request.clone());
        let response = next?;

        let executing = Operation {
            name: "operations/stub".to_owned(),
            metadata: Some(prost_types::Any {
                type_url:
                    "type.googleapis.com/build.bazel.remote.execution.v2.ExecuteOperationMetadata"
                        .to_owned(),
                value: remexec::ExecuteOperationMetadata {
                    stage: execution_stage::Value::Executing as i32,
                    action_digest: request.action_digest,
                    ..remexec::ExecuteOperationMetadata::default()
                }
                .to_bytes()
                .to_vec(),
            }),
            done: false,
            result: None,
        };
        let completed = Operation {
            name: "operations/stub".to_owned(),
            metadata: None,
            done: true,
            result: Some(operation::Result::Response(prost_types::Any {
                type_url: EXECUTE_RESPONSE_TYPE_URL.to_owned(),
                value: response.to_bytes().to_vec(),
            })),
        };
        Ok(futures::stream::iter(vec![Ok(executing), Ok(completed)]).boxed())
    }
}
