pub mod snapshot;
pub mod zone;
