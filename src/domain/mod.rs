// Domain layer: core models and the provider port.

pub mod model;
pub mod ports;
