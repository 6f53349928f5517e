//! Remote job dispatch for the chat bridge.
//!
//! Submits a question to a remote job service, polls the run until it
//! reaches a terminal state, collects the output of every subtask and hands
//! the result to the classifier in `jobchat-core`.
//!
//! [`bridge::Bridge`] is the entry point; [`service::JobService`] is the seam
//! between the bridge and the HTTP client in [`api`].

pub mod aggregator;
pub mod api;
pub mod bridge;
pub mod error;
pub mod messages;
pub mod poller;
pub mod run;
pub mod service;
