pub mod global;
pub mod resolver;
pub mod template;

pub use global::*;
pub use resolver::*;
pub use template::*;
