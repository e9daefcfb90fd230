//! Scam Simulator - Educational phone-scam role play
//!
//! A human plays a phone scammer against a simulated elderly victim. A
//! director tracks how far the scam script has progressed and how risky the
//! call has become, and an optional audience periodically votes a disruptive
//! event into the victim's next reply.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
