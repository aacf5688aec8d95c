//! Core engine for the multi-tenant directory publisher.
//!
//! A single deployment serves many directories (category × location
//! pages), each addressable either through a dedicated subdomain or a
//! path prefix on a shared host. This crate owns the pieces with real
//! invariants: the route matcher and response target resolver, the
//! TTL-bounded catalog registry, and the featured-listing segmenter
//! with its subcategory aggregator. Persistence, authoring, and the
//! outer transport stack are external collaborators.

pub mod catalog;
pub mod config;
pub mod error;
pub mod featured;
pub mod routing;
pub mod telemetry;
