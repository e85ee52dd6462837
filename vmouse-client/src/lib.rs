pub mod actuator;
pub mod feedback;
pub mod fps;
pub mod provider;
pub mod runner;
