// Domain layer: student records and the ports the shell depends on.

pub mod model;
pub mod ports;
