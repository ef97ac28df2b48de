pub mod assembly;
pub mod extraction;
pub mod resolution;
pub mod structure;
