//! Core module - material store, cost engine, and mutation API

pub mod cost;
pub mod error;
pub mod material;
pub mod mutate;
pub mod persist;
pub mod store;
pub mod workspace;

pub use error::CoreError;
pub use material::{Bom, BomItem, Material, MaterialId};
pub use mutate::{ComponentRef, LineEdit};
pub use persist::PersistError;
pub use store::Store;
pub use workspace::{Workspace, WorkspaceError};
