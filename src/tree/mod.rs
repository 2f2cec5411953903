pub mod forest;
pub mod ids;
pub mod node;
pub mod outline;
pub mod validate;
pub mod value;

pub use forest::*;
pub use ids::*;
pub use node::*;
pub use outline::*;
pub use validate::*;
pub use value::*;
