//! XSD schema graph
//!
//! The graph is built in one pass over a parsed [`Document`](crate::documents::Document)
//! and holds every named and anonymous type definition in an arena.

pub mod graph;
pub mod particles;
pub mod parsing;

pub use graph::{
    AttributeDecl, AttributeUse, ComplexType, ElementDecl, Particle, Resolved, SchemaGraph,
    SimpleType, SimpleVariety, TypeDef, TypeId, TypeRef,
};
pub use particles::{MaxOccurs, Occurs};
