//! Domain model and pure logic for the job chat bridge.
//!
//! Nothing in this crate performs I/O. The remote job client, poller and
//! façade live in `jobchat-jobs`; this crate defines the values they pass
//! around and the classifier that turns a job's textual result into a
//! renderable chat message.

pub mod classify;
pub mod error;
pub mod ids;
pub mod message;
pub mod output;
pub mod question;
pub mod status;
pub mod table;
