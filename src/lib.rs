//! # rspecgen - Profile utility for POWDER testbed experiments
//!
//! This library builds the GENI request RSpec for a fixed three-node
//! network experiment profile and serializes it for submission to the
//! POWDER portal.
//!
//! ## Overview
//!
//! A profile describes the resources an experiment wants — physical nodes,
//! disk images, block storage, and the links wiring the nodes together.
//! rspecgen holds that description as a typed in-memory model, validates the
//! structural invariants the portal would otherwise reject at submission
//! time, and renders the v3 XML request document.
//!
//! ## Architecture
//!
//! The library is organized into three modules:
//!
//! - `portal`: parameter definition, binding, and verification
//! - `rspec`: the request model (nodes, interfaces, links, storage, tour)
//!   and its XML serialization
//! - `profile`: the fixed traffic/cta/cpf topology and its tour text
//!
//! ## Example Usage
//!
//! ```rust
//! use rspecgen::{portal::Context, profile};
//! use std::collections::BTreeMap;
//!
//! let mut context = Context::new();
//! profile::define_parameters(&mut context)?;
//!
//! let mut bindings = BTreeMap::new();
//! bindings.insert("phystype".to_string(), "d710".to_string());
//! let params = context.bind_parameters(&bindings);
//! context.verify_parameters()?;
//!
//! let request = profile::build_request(&params)?;
//! let xml = request.to_xml()?;
//! assert!(xml.contains("hardware_type name=\"d710\""));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Library validation errors are typed `thiserror` enums
//! ([`portal::ParameterError`], [`rspec::RspecError`]); the binary reports
//! them through `color_eyre`.

pub mod portal;
pub mod profile;
pub mod rspec;
