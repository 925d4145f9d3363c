//! An abstraction layer for hosted text-completion models.
//!
//! This crate establishes a unified protocol for the chat front-end to
//! talk to a prompt-in/text-out completion service, so that the session
//! logic doesn't depend on any particular vendor or transport.
//!
//! Types in this crate don't define any behavior beyond parsing, instead
//! they are the constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod credential;
mod error;
mod provider;
mod request;
mod response;

pub use credential::*;
pub use error::*;
pub use provider::*;
pub use request::*;
pub use response::*;
