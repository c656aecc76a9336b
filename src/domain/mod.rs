// Domain layer: models, the injected catalog and ports. No I/O here.

pub mod catalog;
pub mod model;
pub mod ports;
