pub mod geometry;
pub mod options;
pub mod path;
pub mod ports;
pub mod robot;
pub mod route;
pub mod swath;

pub use geometry::*;
pub use options::*;
pub use path::*;
pub use ports::*;
pub use robot::*;
pub use route::*;
pub use swath::*;
