//! Data models for the element dataset.
//!
//! [`element::Element`] is the canonical record emitted for every atomic number,
//! [`category::Category`] the closed chemical-family classification, and
//! [`raw::RawElement`] the loosely-typed entry read from the external feed.

pub mod category;
pub mod element;
pub mod raw;
