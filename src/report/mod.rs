pub mod category;
pub mod formatter;
pub mod normalize;

pub use category::*;
pub use formatter::ReportFormatter;
pub use normalize::{file_name, normalize};
