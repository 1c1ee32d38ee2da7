//! Brief In: a server-rendered front-end for the Brief In tech blog.
//!
//! The crate is layered the usual way: `domain` holds the content model and
//! pure rules, `application` assembles pages and talks to the content API
//! behind a repository trait, `infra` provides the HTTP server, the reqwest
//! client, and telemetry, and `presentation` owns the askama templates and
//! their view types.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
pub mod util;
