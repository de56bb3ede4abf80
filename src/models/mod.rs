//! Argo CD model layer
//!
//! Structure:
//! - `resource_kind.rs` - The Argo CD kinds that form apps-of-apps hierarchies
//! - `node.rs` - Typed node, id and source types
//! - `descriptor.rs` - Extraction of typed nodes from raw resource objects

pub mod descriptor;
pub mod node;
pub mod resource_kind;

pub use descriptor::parse_node;
pub use node::{Node, NodeId, SourceRef};
pub use resource_kind::{ARGO_API_GROUP, ARGO_API_VERSION, ArgoResourceKind};
