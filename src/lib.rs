//! sortie: plan outings and the programmes inside them.
//!
//! The engine is two pure modules, [`validate`] and [`query`]. Around
//! them sit [`storage`] (SQLite), [`schedule`] (validate-then-persist),
//! [`config`], and the [`cli`] front end.

pub mod cli;
pub mod config;
pub mod model;
pub mod query;
pub mod schedule;
pub mod storage;
pub mod validate;
