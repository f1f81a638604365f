pub mod fixture;
pub mod samples;
