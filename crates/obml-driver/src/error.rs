/// Errors that can occur while preparing a document for painting.
///
/// ```text
/// ┌────────────────┬──────────────────────────────────────────────┐
/// │ Variant        │ Cause                                        │
/// ├────────────────┼──────────────────────────────────────────────┤
/// │ InvalidSurface │ page width or height is zero or negative     │
/// └────────────────┴──────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("page size {width}x{height} cannot back a drawing surface")]
    InvalidSurface { width: i32, height: i32 },
}
