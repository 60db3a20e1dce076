//! Data model types for quote calculations.

mod calculation;
mod currency;
mod installation;
pub mod numeric;
mod other_cost;
mod supplier;
mod transport;
mod variant;

pub use calculation::{Address, AppState, CalculationData, CalculationMode, ProjectMeta};
pub use currency::Currency;
pub use installation::{
    CalcMethod, CustomInstallationItem, EquipmentRental, InstallationData, InstallationStage,
    LinkedSource,
};
pub use other_cost::OtherCostItem;
pub use supplier::{find_supplier, Supplier, SupplierItem};
pub use transport::{TransportBinding, TransportItem};
pub use variant::Variant;
