// Domain layer: portfolio and job models plus the ports the core talks through.

pub mod model;
pub mod ports;
