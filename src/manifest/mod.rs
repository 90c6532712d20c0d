//! The ordered manifest document and the edits applied to it.

pub mod builder;
pub mod document;
pub mod features;

pub use builder::ManifestBuilder;
pub use document::Document;
pub use features::{BASE_FLAGS, Feature, FeatureSet};
