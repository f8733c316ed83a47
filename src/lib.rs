pub mod classify;
pub mod cleanup;
pub mod commands;
pub mod database;
pub mod package;
pub mod resolver;
pub mod runtime;
