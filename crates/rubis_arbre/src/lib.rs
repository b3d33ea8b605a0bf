//! # rubis_arbre
//!
//! Arbre - The template tree surface for Rubis.
//!
//! ## Name Origin
//!
//! **Arbre** (/aʁbʁ/) is the French word for tree. This crate holds the
//! parsed shape of a HAML document — the tree an external parser produces
//! and every downstream Rubis stage reads.
//!
//! ## Purpose
//!
//! - **Template tree**: a closed [`NodeKind`](ast::NodeKind) sum type over
//!   the six HAML node kinds, matched exhaustively by consumers.
//! - **Attribute source location**: recovery of the verbatim source spans
//!   for a tag's dynamic (code-valued) attributes across the three HAML
//!   attribute syntaxes, multi-line spans included.
//!
//! Parsing raw HAML text is out of scope; the parser is an external
//! collaborator that builds [`ast::Node`] values and attaches
//! [`attributes::locate`] results to tag nodes.

pub mod ast;
pub mod attributes;

pub use ast::{Node, NodeKind};
pub use attributes::{locate, AttributeError, AttributeStyle, DynamicAttributes};
