pub use edge::Edge;
pub use point::Point;
pub use size::Size;

mod edge;
mod point;
mod size;
