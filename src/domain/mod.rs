// Domain layer: lead model and the two backend ports.

pub mod model;
pub mod ports;
