//! Telegram Bot API data types.
//!
//! Only the subset of the Bot API needed to route webhook updates and answer
//! them is modelled. Unknown fields are ignored when decoding.
//!
//! - [`update`]: inbound webhook payloads ([`Update`] and what it contains)
//! - [`send`]: outgoing methods returned as the webhook response

pub mod send;
pub mod update;

pub use send::*;
pub use update::*;
