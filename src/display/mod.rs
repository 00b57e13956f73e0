//! Display formatting module
//!
//! Pure mappings from remaining seconds to text and severity.

pub mod formatter;

// Re-export main items
pub use formatter::{
    description, display, format_remaining, is_almost_deadline, status_message, title,
    DisplayInfo, Severity,
};
