pub mod dispatch_order;
pub mod fleet_unit;
pub mod lane;
pub mod placement;

// Re-export core models for easy access
pub use dispatch_order::{DispatchOrder, OrderItem, ThermalProfile};
pub use fleet_unit::{FleetUnit, OperationalStatus, UnitStatus};
pub use lane::Lane;
pub use placement::{LoadProfile, PlacementCandidate};
