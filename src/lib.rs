// Public API - configuration, data types, engine and export functions
pub mod config;
pub mod error;
pub mod export;
pub mod probe;
pub mod state;
pub mod trace;
