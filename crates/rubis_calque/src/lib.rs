//! # rubis_calque
//!
//! Calque - Synthetic Ruby generation and source mapping for Rubis.
//!
//! ## Name Origin
//!
//! **Calque** (/kalk/) is the French word for tracing paper. This crate
//! lays a tracing sheet over a parsed HAML document: it redraws only the
//! embedded Ruby, producing a synthetic script a Ruby linter can read,
//! with every traced line pointing back at the template line it came
//! from.
//!
//! ## Purpose
//!
//! Ruby linters do not understand HAML. Given the template tree from
//! `rubis_arbre`, the [`extract::ScriptExtractor`] reassembles the
//! document's script fragments into one syntactically self-contained
//! Ruby source, so that
//!
//! ```haml
//! - if signed_in?(viewer)
//!   %span Stuff
//!   = link_to 'Sign Out', sign_out_path
//! - else
//!   .some-class{ class: my_method }= my_method
//!   = link_to 'Sign In', sign_in_path
//! ```
//!
//! becomes
//!
//! ```ruby
//! if signed_in?(viewer)
//!   puts # span
//!   puts # Stuff
//!   link_to 'Sign Out', sign_out_path
//! else
//!   {}.merge({ class: my_method })
//!   puts # div
//!   my_method
//!   link_to 'Sign In', sign_in_path
//! end
//! ```
//!
//! Linter diagnostics carry synthetic line numbers; callers translate
//! them back through the returned [`source_map::SourceMap`].
//!
//! The synthetic Ruby is for static analysis only. It is never executed
//! and makes no attempt to reproduce the template's runtime behavior —
//! it only has to be well-formed, with every original code expression
//! present exactly once.

pub mod error;
pub mod extract;
pub mod interpolation;
pub mod keywords;
pub mod source_map;

pub use error::ExtractError;
pub use extract::{ExtractedScript, ScriptExtractor};
pub use keywords::BlockRole;
pub use source_map::SourceMap;
