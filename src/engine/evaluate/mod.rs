pub mod feedback;
pub mod scoring;
