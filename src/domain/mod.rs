// Domain layer: billing records, tier definitions and the ports the core reads them through.

pub mod model;
pub mod ports;
