// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use std::collections::BTreeMap;

use protos::gen::build::bazel::remote::asset::v1::Qualifier;
use protos::gen::build::bazel::remote::execution::v2 as remexec;
use remexec::command::OutputDirectoryFormat;
use tonic::Status;

use crate::qualifiers_to_map;

/// A function producing, for one URI, the REAPI `Command` that fetches it.
pub type CommandGenerator = Box<dyn Fn(&str) -> remexec::Command + Send + Sync>;

/// Translate a qualifier set into a command generator. The `resource_type`
/// qualifier selects the command shape; the remaining qualifiers
/// parameterize it.
pub fn qualifiers_to_command(qualifiers: &[Qualifier]) -> Result<CommandGenerator, Status> {
    let qualifiers = qualifiers_to_map(qualifiers);
    match qualifiers.get("resource_type").map(|s| s.as_str()) {
        None => Err(Status::invalid_argument("Missing resource_type qualifier")),
        Some("application/x-git") => Ok(git_command(qualifiers)),
        Some("application/octet-stream") => Ok(octet_stream_command(qualifiers)),
        Some(other) => Err(Status::invalid_argument(format!(
            "Unhandled resource_type: {other:?}"
        ))),
    }
}

fn shell_command(script: String) -> remexec::Command {
    remexec::Command {
        arguments: vec!["sh".to_owned(), "-c".to_owned(), script],
        output_paths: vec!["out".to_owned()],
        output_directory_format: OutputDirectoryFormat::TreeAndDirectory as i32,
        ..remexec::Command::default()
    }
}

// Fetches an asset from a given git repo. Supported qualifiers:
// - vcs.branch: The branch to use
// - vcs.commit: The specific commit
//
// Note that supplying both is valid, however only if the requested commit
// exists on the branch.
fn git_command(qualifiers: BTreeMap<String, String>) -> CommandGenerator {
    Box::new(move |uri| {
        let mut script = format!("git clone {uri} out");
        if let Some(branch) = qualifiers.get("vcs.branch") {
            script = format!("{script} --single-branch --branch {branch}");
        }
        if let Some(commit) = qualifiers.get("vcs.commit") {
            script = format!("{script} && git -C out checkout {commit}");
        }
        shell_command(script)
    })
}

// Fetches an asset from a given url. Supported qualifiers:
// - auth.basic.username: authentication with a basic username
// - auth.basic.password: authentication with a basic password
// - checksum.sri: verify the checksum after downloading
fn octet_stream_command(qualifiers: BTreeMap<String, String>) -> CommandGenerator {
    Box::new(move |uri| {
        let mut script = format!("wget -O out {uri}");
        if let Some(username) = qualifiers.get("auth.basic.username") {
            script = format!("{script} --http-user={username}");
        }
        if let Some(password) = qualifiers.get("auth.basic.password") {
            script = format!("{script} --http-password={password}");
        }
        if let Some((algorithm, base64)) =
            qualifiers.get("checksum.sri").and_then(|c| c.split_once('-'))
        {
            script = format!(
                "{script} && openssl dgst -{algorithm} -binary out | openssl base64 -A | grep {base64}"
            );
        }
        shell_command(script)
    })
}
