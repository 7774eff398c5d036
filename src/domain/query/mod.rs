//! Parameterized report query construction
//!
//! Filter criteria are compiled into condition fragments whose values are
//! allocated through a [`ParameterBinder`]; the [`ClauseAssembler`] then
//! splices those fragments into a static [`QueryTemplate`]. Statement text
//! and bound values are produced as two separate, synchronized streams:
//! only code-controlled identifiers and `$n` markers ever reach the text.

mod assembler;
mod binder;
mod compiler;
mod criterion;
mod template;

pub use assembler::{BuiltQuery, ClauseAssembler};
pub use binder::{ParameterBinder, ParameterList, Placeholder};
pub use compiler::{ConditionCompiler, ConditionFragment};
pub use criterion::{CriterionKind, FilterCriterion, Section};
pub use template::QueryTemplate;
