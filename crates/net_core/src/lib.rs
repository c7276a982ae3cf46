//! `net_core`: replication message schema + framing.
//!
//! Scope
//! - Snapshot encode/decode traits and the combat event messages
//! - Length framing and spherical interest filtering

#![forbid(unsafe_code)]

pub mod frame;
pub mod interest;
pub mod snapshot;
