//! # arbor-types
//!
//! Core data types shared by the arbor pipeline:
//!
//! - **Attribute types**: `AttrValue`, `AttrKey`, `Attributes`
//! - **Feature types**: `Feature` (any geometry, possibly null) and
//!   `PointFeature` (exactly one point)
//! - **Record types**: `EntityClass`, `EntityRecord` (one row of a parcel
//!   hierarchy document)
//!
//! Geometries are `geo` primitives; records serialize with Serde into the
//! field layout expected by the inventory database.
//!
//! ## Examples
//!
//! ```rust
//! use arbor_types::feature::{AttrValue, PointFeature, Properties};
//! use geo::Point;
//!
//! let mut tree = PointFeature::new(Point::new(11.35, 46.49));
//! tree.set("Reihe", AttrValue::Int(4));
//! assert_eq!(tree.attr("Reihe").as_i64(), Some(4));
//! assert!(tree.attr("Baum").is_null());
//! ```

pub mod feature;
pub mod record;
