// Domain layer: content records, sections and the ports the services depend on.

pub mod model;
pub mod ports;
pub mod section;
