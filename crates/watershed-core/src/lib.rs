//! Watershed Core — shared domain abstractions.
//!
//! This crate defines the error type, time source, and command/event
//! traits that the content and session crates build on. It contains no
//! game rules.

pub mod clock;
pub mod command;
pub mod error;
pub mod event;
