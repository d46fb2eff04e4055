//! Query pipeline - keyword search, field filters and pagination over a
//! document collection.

mod params;
mod pipeline;
mod predicate;

pub use params::{KEYWORD_PARAM, PAGE_PARAM, ParamValue, QueryParams, RESERVED_PARAMS};
pub use pipeline::QueryFeatures;
pub use predicate::{
    CmpOp, Condition, Document, DocumentQuery, FieldKind, FieldValue, Predicate, Window,
};
