pub mod index;
pub mod roles;
pub mod sink;

pub use index::EdgeIndex;
pub use roles::{NodeRoles, accepts_image, consumes_model};
pub use sink::locate_sink;
