//! # HTTParrot Architecture
//!
//! HTTParrot is a **fixture factory for fake HTTP responses**. Tests register
//! named blueprints once, then build as many independent response objects as
//! they need, tweak them per call, and render them into the
//! `(status, headers, body)` triple a stub server sends back.
//!
//! ## The Two Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Factory Registry (factory.rs)                              │
//! │  - define / build / collection_of / one_of / clear          │
//! │  - composition via parent(): whole-widget inheritance       │
//! │  - every build re-runs the blueprint on a fresh widget      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Attribute Bag (widget.rs, attributes/)                     │
//! │  - ordered name → AttrValue mapping, total get / set        │
//! │  - render(): ERB template or inspect string                 │
//! │  - to_wire_response(): (status, Content-Length, [body])     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Template evaluation lives in the `stencil` workspace crate.
//!
//! ## Example
//!
//! ```rust
//! use httparrot::factory::{Overrides, ResponseFactory};
//!
//! let mut factory = ResponseFactory::new();
//! factory.define("user", |w, _| {
//!     w.set("name", "Ada");
//!     Ok(())
//! });
//!
//! let ada = factory.build("user").unwrap();
//! let grace = factory
//!     .build_with("user", &Overrides::new().set("name", "Grace"))
//!     .unwrap();
//!
//! assert!(ada.render().unwrap().contains("name=Ada"));
//! assert!(grace.render().unwrap().contains("name=Grace"));
//! assert_ne!(ada, grace);
//!
//! let (status, headers, body) = grace.to_wire_response(201).unwrap().into_parts();
//! assert_eq!(status, 201);
//! assert_eq!(headers["Content-Length"], body[0].len().to_string());
//! ```
//!
//! ## Key Principle: No I/O Beyond Templates
//!
//! The library never prints and never exits. The only filesystem access is
//! reading a template during `render()` (and `ParrotConfig::load`/`save`).
//! The `parrot` binary owns argument parsing, logging setup and exit codes.
//!
//! ## Module Overview
//!
//! - [`factory`]: Blueprint registry, overrides and composition
//! - [`widget`]: The attribute bag and its renderers
//! - [`attributes`]: Attribute value model
//! - [`response`]: The wire response triple
//! - [`inflect`]: Class and collection naming helpers
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod attributes;
pub mod config;
pub mod error;
pub mod factory;
pub mod inflect;
pub mod response;
pub mod widget;

pub use attributes::{AttrValue, Attributes};
pub use error::{ParrotError, Result};
pub use factory::{Overrides, Parent, ResponseFactory};
pub use response::WireResponse;
pub use widget::Widget;
