//! Latest safe departure planner server.
//!
//! A web application that answers: "I must be at this place by this
//! time; when is the latest I can safely leave, for each way of
//! getting there?"

pub mod buffer;
pub mod cache;
pub mod domain;
pub mod maps;
pub mod planner;
pub mod weather;
pub mod web;
