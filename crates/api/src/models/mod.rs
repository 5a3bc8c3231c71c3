pub mod class_ref;
pub mod location;

pub use class_ref::ClassRef;
pub use location::ArtifactLocation;
