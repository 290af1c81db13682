// Domain layer: record shapes and ports. No dependencies on other crate modules.

pub mod model;
pub mod ports;
