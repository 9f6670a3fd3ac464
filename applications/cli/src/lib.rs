/// Admin Panel - command-line front end
///
/// Lists, searches, sorts and pages users from a REST backend, edits them,
/// and reports registration counts over the last 24 hours, 7, 15 and 30
/// days.
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
