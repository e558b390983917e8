// Domain layer: models, ports, declension rules and the RSVP service. No I/O here.

pub mod declension;
pub mod model;
pub mod ports;
pub mod services;
