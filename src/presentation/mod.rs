//! Presentation layer for visual styling and colour mapping.
//!
//! This module contains presentation logic separated from panel state:
//! - Colour mapping for impact badges and outlet accents

pub mod color_mapping;
