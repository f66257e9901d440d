//! fOS HTML - Element behaviours
//!
//! Behaviour of HTML elements whose rendering depends on fetched content.
//! Currently the `<object>` element.

pub mod object;

pub use object::{
    FallbackReason, HtmlObjectElement, LayoutNodeKind, ObjectConfig, ObjectContext,
    ObjectRepresentationEngine, ObjectStep, ObjectTask, Phase, RepresentationError,
};

/// Attribute names element behaviours react to
pub mod attribute_names {
    pub const DATA: &str = "data";
    pub const TYPE: &str = "type";
}
