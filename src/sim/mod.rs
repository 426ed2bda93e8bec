pub mod autopilot;
pub mod event;
pub mod step;
pub mod world;
