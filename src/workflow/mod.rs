pub mod conversion;
pub mod definition;
pub mod link;
pub mod loader;

pub use conversion::*;
pub use definition::*;
pub use link::*;
pub use loader::*;
