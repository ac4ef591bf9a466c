//! Pipeline module - the data-shaping stages, leaf-first.
//!
//! Each stage is a pure `DataFrame -> DataFrame` function; the driver owns
//! one table at a time and threads it through in order:
//! loader -> schema -> features -> filter -> enrich -> (export), with the VIF
//! reducer, sampler and fairness join running as separate passes over the
//! processed output.

pub mod enrich;
pub mod error;
pub mod fairness;
pub mod features;
pub mod filter;
pub mod loader;
pub mod sample;
pub mod schema;
pub mod vif;

pub use enrich::*;
pub use error::PipelineError;
pub use fairness::*;
pub use features::*;
pub use filter::*;
pub use loader::*;
pub use sample::*;
pub use schema::*;
pub use vif::*;
