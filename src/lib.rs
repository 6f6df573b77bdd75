//! Fixed-capacity byte ring for high-rate sample ingestion.
//!
//! Writes never fail and never allocate: once storage is full the oldest bytes
//! are overwritten. Readers get the raw storage in physical order together with
//! `head` and `used`, from which the logical oldest-to-newest content follows.

pub mod config;
pub mod ring;
pub mod view;
