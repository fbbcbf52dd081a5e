//! Command implementations

pub mod bom;
pub mod completions;
pub mod init;
pub mod mat;
