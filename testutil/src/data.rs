// Copyright 2023 Pants project contributors (see CONTRIBUTORS.md).
// Licensed under the Apache License, Version 2.0 (see LICENSE).
use grpc_util::prost::MessageExt;
use hashing::DigestFunction;
use protos::gen::build::bazel::remote::execution::v2 as remexec;

#[derive(Clone)]
pub struct TestData {
    string: String,
}

impl TestData {
    pub fn empty() -> TestData {
        TestData::new("")
    }

    pub fn hello() -> TestData {
        TestData::new("Hello")
    }

    pub fn changelog() -> TestData {
        TestData::new("unreleased: everything\n")
    }

    pub fn license() -> TestData {
        TestData::new("Apache License, Version 2.0")
    }

    pub fn new(s: &str) -> TestData {
        TestData {
            string: s.to_owned(),
        }
    }

    pub fn bytes(&self) -> bytes::Bytes {
        bytes::Bytes::copy_from_slice(self.string.as_str().as_bytes())
    }

    pub fn fingerprint(&self) -> hashing::Fingerprint {
        self.digest().hash
    }

    pub fn digest(&self) -> hashing::Digest {
        hashing::Digest::of_bytes(&self.bytes())
    }

    pub fn digest_with(&self, function: DigestFunction) -> hashing::Digest {
        function.digest(&self.bytes())
    }

    pub fn string(&self) -> String {
        self.string.clone()
    }

    pub fn len(&self) -> usize {
        self.string.len()
    }
}

#[derive(Clone)]
pub struct TestDirectory {
    pub directory: remexec::Directory,
}

impl TestDirectory {
    pub fn empty() -> TestDirectory {
        TestDirectory {
            directory: remexec::Directory::default(),
        }
    }

    // Directory structure:
    //
    // /CHANGELOG
    pub fn containing_changelog() -> TestDirectory {
        let directory = remexec::Directory {
            files: vec![remexec::FileNode {
                name: "CHANGELOG".to_owned(),
                digest: Some((&TestData::changelog().digest()).into()),
                is_executable: false,
                ..remexec::FileNode::default()
            }],
            ..remexec::Directory::default()
        };
        TestDirectory { directory }
    }

    // Directory structure:
    //
    // /LICENSE
    pub fn containing_license() -> TestDirectory {
        let directory = remexec::Directory {
            files: vec![remexec::FileNode {
                name: "LICENSE".to_owned(),
                digest: Some((&TestData::license().digest()).into()),
                is_executable: false,
                ..remexec::FileNode::default()
            }],
            ..remexec::Directory::default()
        };
        TestDirectory { directory }
    }

    // Directory structure:
    //
    // docs/CHANGELOG
    // legal/LICENSE
    pub fn nested() -> TestDirectory {
        let directory = remexec::Directory {
            directories: vec![
                remexec::DirectoryNode {
                    name: "docs".to_owned(),
                    digest: Some(TestDirectory::containing_changelog().digest().into()),
                },
                remexec::DirectoryNode {
                    name: "legal".to_owned(),
                    digest: Some(TestDirectory::containing_license().digest().into()),
                },
            ],
            ..remexec::Directory::default()
        };
        TestDirectory { directory }
    }

    // Directory structure:
    //
    // srcroot/docs/CHANGELOG
    // srcroot/legal/LICENSE
    pub fn double_nested() -> TestDirectory {
        let directory = remexec::Directory {
            directories: vec![remexec::DirectoryNode {
                name: "srcroot".to_owned(),
                digest: Some(TestDirectory::nested().digest().into()),
            }],
            ..remexec::Directory::default()
        };
        TestDirectory { directory }
    }

    pub fn directory(&self) -> remexec::Directory {
        self.directory.clone()
    }

    pub fn bytes(&self) -> bytes::Bytes {
        self.directory.to_bytes()
    }

    pub fn fingerprint(&self) -> hashing::Fingerprint {
        self.digest().hash
    }

    pub fn digest(&self) -> hashing::Digest {
        hashing::Digest::of_bytes(&self.bytes())
    }

    pub fn digest_with(&self, function: DigestFunction) -> hashing::Digest {
        function.digest(&self.bytes())
    }
}

#[derive(Clone)]
pub struct TestTree {
    pub tree: remexec::Tree,
}

impl TestTree {
    pub fn changelog_only() -> TestTree {
        TestTree::new(TestDirectory::containing_changelog().directory(), vec![])
    }

    pub fn nested() -> TestTree {
        TestTree::new(
            TestDirectory::nested().directory(),
            vec![
                TestDirectory::containing_changelog().directory(),
                TestDirectory::containing_license().directory(),
            ],
        )
    }

    pub fn new(root: remexec::Directory, children: Vec<remexec::Directory>) -> TestTree {
        TestTree {
            tree: remexec::Tree {
                root: Some(root),
                children,
            },
        }
    }

    pub fn bytes(&self) -> bytes::Bytes {
        self.tree.to_bytes()
    }

    pub fn digest(&self) -> hashing::Digest {
        hashing::Digest::of_bytes(&self.bytes())
    }

    pub fn digest_with(&self, function: DigestFunction) -> hashing::Digest {
        function.digest(&self.bytes())
    }
}
