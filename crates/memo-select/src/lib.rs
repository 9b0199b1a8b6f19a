#![forbid(unsafe_code)]

//! Composable selectors with single-slot memoization.
//!
//! A selector derives a [`Value`] from a state `S` and optional props `P`.
//! It is built from one or more dependencies, whose outputs feed a combiner.
//! A memoized selector remembers the dependency outputs and result of its
//! most recent call and skips the combiner when every output is unchanged
//! under its [`Equality`].
//!
//! - [`build_selector`]: no memoization, the combiner runs on every call.
//! - [`build_memoized_selector`]: memoized with identity equality.
//! - [`create_memoized_selector_factory`]: a [`SelectorCreator`] bound to a
//!   custom equality.
//!
//! Selectors compose: a built [`Selector`] converts into a [`Dependency`],
//! and each stage of a chain keeps its own cache, so a chain stops
//! recomputing at the first stage whose inputs are unchanged.
//!
//! # Invariants
//!
//! 1. One cache slot per selector instance, holding at most one
//!    `(inputs, result)` pair.
//! 2. The first call to a memoized selector always runs the combiner.
//! 3. Later calls run it iff some dependency output differs from the stored
//!    one at the same position.
//! 4. Purity (state-only vs. state-and-params) is decided once, at build time.
//! 5. Construction is the only place errors occur.

pub mod config;
pub mod dependency;
pub mod equality;
pub mod error;
pub mod factory;
pub mod memo;
pub mod resolve;
pub mod selector;
pub mod structured;
pub mod value;

pub use config::SelectorConfig;
pub use dependency::{Dependency, Purity};
pub use equality::Equality;
pub use error::{Result, SelectorError};
pub use factory::{
    SelectorArgs, SelectorCreator, build_memoized_selector, build_selector,
    create_memoized_selector_factory,
};
pub use memo::{Combiner, Memo};
pub use resolve::{Input, resolve};
pub use selector::Selector;
pub use structured::StructuredSpec;
pub use value::{Record, Value};
