//! Core infrastructure: virtual time

pub mod time;
