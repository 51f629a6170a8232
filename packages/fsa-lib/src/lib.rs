pub mod automaton;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logger;
pub mod validation;
