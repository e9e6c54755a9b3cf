//! Test utilities shared by the charm crates.

use tempfile::TempDir;

/// Metadata with two requires relations, one provides, one peer and two storages.
pub const FULL_METADATA: &str = r#"
name: my-charm
summary: A charm used in tests
description: |
  Exercises every section of the metadata model.
maintainer: Alice <alice@example.com>
maintainers:
  - Bob <bob@example.com>
tags: [database, testing]
series: [focal, jammy]
subordinate: false
min-juju-version: 2.8.0
requires:
  db:
    interface: pgsql
    limit: 1
  cache:
    interface: redis
    optional: true
provides:
  website:
    interface: http
    scope: global
peers:
  cluster:
    interface: my-cluster
storage:
  data:
    type: filesystem
    location: /srv/data
  logs:
    type: filesystem
    multiple:
      range: 1-
resources:
  app:
    type: file
    filename: app.tar.gz
    description: Application bundle
payloads:
  monitor:
    type: docker
"#;

/// Metadata with relations `db` and `cache` and storage `logs`.
pub const SMALL_METADATA: &str = r#"
name: small
requires:
  db:
    interface: pgsql
provides:
  cache:
    interface: redis
storage:
  logs:
    type: filesystem
"#;

/// Creates a temporary directory that is cleaned up on drop.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Creates a charm directory holding `metadata.yaml` with the given content.
pub fn charm_dir(metadata: &str) -> TempDir {
    let dir = temp_dir();
    std::fs::write(dir.path().join("metadata.yaml"), metadata).expect("Failed to write metadata.yaml");
    dir
}

/// Assert that a Result is Ok and return the value.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a Result is Err and return the error.
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
