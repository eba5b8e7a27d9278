//! TaskMaster: a personal task tracking server.
//!
//! The interesting part lives in [`query`]: pure filtering, ordering, and
//! aggregation over task snapshots. [`db`] persists tasks in SQLite and
//! supplies the snapshots, [`api`] exposes the HTTP surface, and [`ui`]
//! renders the terminal views for the CLI.

pub mod api;
pub mod db;
pub mod models;
pub mod query;
pub mod ui;
