pub mod clock;
pub mod controller;
pub mod input_adapter;

pub use clock::{Clock, Tick};
pub use controller::{OrbitControls, OrbitInput, DEFAULT_DAMPING_FACTOR};
pub use input_adapter::PointerAdapter;
