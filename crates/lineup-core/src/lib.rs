// Formation board core: roster model, placement rules, persistence and
// configuration. Nothing in this crate touches the terminal.

pub mod config;
pub mod db;
pub mod formation;
pub mod persistence;
