#![warn(clippy::pedantic)]

pub mod config;
pub mod display;
pub mod error;
pub mod hit_test;
pub mod render_outline;

pub use config::DriverConfig;
pub use display::{Canvas, DisplayList, Paint, Surface};
pub use error::DriverError;
pub use hit_test::{LinkHit, link_at};
pub use render_outline::{DescribeImage, render_outline};
