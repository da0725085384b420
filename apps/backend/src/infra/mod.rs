//! Infrastructure layer: database lifecycle and state assembly.

pub mod db;
pub mod state;
