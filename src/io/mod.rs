//! I/O utilities for input handling
//!
//! This module provides the seekable reader abstraction and helpers for
//! opening the raw input stream.

pub mod seekable;
pub mod input;
