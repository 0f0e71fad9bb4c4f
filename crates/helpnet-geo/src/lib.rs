pub mod distance;
pub mod locate;

pub use distance::distance_km;
pub use locate::IpLocator;
