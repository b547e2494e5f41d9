//! crudkit: partial updates and query-string compilation for CRUD endpoints
//!
//! This is the public meta-crate. Downstream users depend on **crudkit** only.
//!
//! It re-exports the stable public API from:
//!   - `crudkit-core`   (field models, values, paths, patches, query compilers)
//!
//! plus the serialization and identifier crates that declared records need.

pub use crudkit_core as core;

pub use crudkit_core::{Error, LAST_INDEX_SEGMENT, config, error, model, patch, path, query};

//
// Macros
//

pub use crudkit_core::entity_model;

//
// Third-party
// Records declared with `entity_model!` derive serde and use these id types.
//

pub use serde;
pub use serde_json;
pub use ulid;
pub use uuid;

//
// Prelude
//

pub mod prelude {
    pub use crudkit_core::prelude::*;
    pub use ulid::Ulid;
    pub use uuid::Uuid;
}
