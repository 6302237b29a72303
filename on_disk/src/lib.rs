//! This crate provides a gitlet repository that stores objects on the local file system.
//!
//! Objects are stored loose, one zlib-compressed file per object, in the same
//! layout command-line git uses under `.git/objects`. The metadata directory
//! itself is named `.gitlet` so the two never collide.

#![deny(warnings)]

mod locator;
pub use locator::{InitStatus, Locator, GITLET_DIR};

mod loose;

mod temp_repo;
pub use temp_repo::TempRepo;
