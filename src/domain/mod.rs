// Domain layer: records, the shared text normalization and the pipeline ports.

pub mod model;
pub mod normalize;
pub mod ports;
