// Module Definition
pub mod config;
pub mod controller; // Drives allocate -> generate -> combine
pub mod error;
pub mod generator;
pub mod kernels; // Combine kernels, sequential and parallel
pub mod memory;
pub mod verify;
