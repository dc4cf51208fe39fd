//! Small formatting helpers shared by the renderers.

pub mod bytes;
