//! Errors produced while lexing and parsing.
//!
//! Every error is a [`vf_error::Error`], re-exported here as [`Error`]. The concrete kinds are
//! defined in [`kind`]; use [`Error::is`] or [`Error::downcast_ref`] to tell them apart.

pub mod kind;

pub use vf_error::Error;
