//! This crate implements the core data model for a gitlet object store:
//! object framing, compression, and content hashing.
//!
//! Nothing in this crate knows where a repository lives on disk. See the
//! `gitlet_on_disk` crate for a repository that stores loose objects in a
//! `.gitlet` directory.

#![deny(warnings)]

pub mod hasher;
pub mod object;
pub mod repo;
pub mod zlib;
