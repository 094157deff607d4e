//! Constrained generation engine for numbers checked by the eleven test.
//!
//! Builds candidates digit by digit from an optional prefix, rejects those
//! found in the generated or excluded sets, and gives up with diagnostics
//! once the retry budget is spent.

pub mod builder;
pub mod engine;
pub mod model;
pub mod sampler;
pub mod sets;
pub mod source;
pub mod validator;

pub use builder::SequenceBuilder;
pub use elfproef_core::{BsnError, DigitString, ExhaustionDiagnostics, Result};
pub use engine::ElfproefEngine;
pub use model::{EngineOptions, GenerateRequest, SessionSnapshot};
pub use sampler::{BoundedSampler, DEFAULT_MAX_ATTEMPTS};
pub use sets::{ConstraintSets, TrackedSet};
pub use source::{DigitSource, RandomDigits, ScriptedDigits};
pub use validator::validate;
