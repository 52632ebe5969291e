//! Per-fragment surface shading.
//!
//! Three layers, evaluated once per fragment:
//! - [`lighting`]: Blinn-Phong reflectance for directional, point and spot lights.
//! - [`shadow`]: 3x3 percentage-closer filtering against a shadow map.
//! - [`shade`]: combines visibility, lighting, ambient and base color into the
//!   output color.
//!
//! Everything here is a pure function of its inputs. Textures are borrowed
//! through the [`shade_hal`] traits and never written.

#![cfg_attr(not(test), no_std)]

pub mod lighting;
pub mod math;
pub mod shade;
pub mod shadow;

pub use lighting::{DirectionalLight, Falloff, Light, Material, PointLight, SpotLight};
pub use shade::{Fragment, MaterialConstants, PassConstants, ShadingComposer, MAX_LIGHTS};
pub use shadow::{compute_visibility, AddressMode, CompareFilter, ComparisonSampler};
