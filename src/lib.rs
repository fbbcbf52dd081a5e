//! bomtally: a bill-of-materials cost editor
//!
//! Materials compose into assemblies through BOM line items carrying a
//! quantity and a cached unit cost. An assembly's cost is the shallow
//! roll-up of its direct lines, unless a manual override supersedes it.
//! State lives in a single JSON data file.

pub mod cli;
pub mod core;
