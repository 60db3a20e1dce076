//! Installation stages, equipment rentals and custom installation items.
//!
//! All installation prices are in PLN.

use serde::{Deserialize, Serialize};

use super::numeric::lenient_f64;

/// How a stage's installation work is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CalcMethod {
    /// Priced per pallet spot.
    #[default]
    Pallets,
    /// Priced per installer man-day.
    Time,
    /// Both parts added together.
    Both,
}

impl CalcMethod {
    /// Check if the pallet-spot part applies.
    pub fn includes_pallets(&self) -> bool {
        matches!(self, CalcMethod::Pallets | CalcMethod::Both)
    }

    /// Check if the labor part applies.
    pub fn includes_time(&self) -> bool {
        matches!(self, CalcMethod::Time | CalcMethod::Both)
    }
}

/// A rented machine (forklift, scissor lift) for one stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EquipmentRental {
    /// Rental is part of the stage.
    pub is_enabled: bool,
    /// Price per rental day.
    #[serde(deserialize_with = "lenient_f64")]
    pub daily_rate: f64,
    /// Number of rental days.
    #[serde(deserialize_with = "lenient_f64")]
    pub days: f64,
    /// Day of the stage on which the rental starts (scheduling only).
    #[serde(deserialize_with = "lenient_f64")]
    pub start_offset: f64,
    /// Delivery and pickup price.
    #[serde(deserialize_with = "lenient_f64")]
    pub transport_price: f64,
}

impl EquipmentRental {
    /// Create an enabled rental.
    pub fn new(daily_rate: f64, days: f64, transport_price: f64) -> Self {
        Self {
            is_enabled: true,
            daily_rate,
            days,
            transport_price,
            ..Default::default()
        }
    }

    /// Rental cost, 0 when disabled.
    pub fn cost(&self) -> f64 {
        if self.is_enabled {
            self.days * self.daily_rate + self.transport_price
        } else {
            0.0
        }
    }
}

/// Reference from a custom item to supplier data, resolved at computation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum LinkedSource {
    /// A single supplier item.
    Item { id: String },
    /// A whole supplier (all its items).
    Group { id: String },
}

/// An extra installation line item, stage-local or global.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomInstallationItem {
    /// Unique item id.
    pub id: String,
    /// Item description.
    pub name: String,
    /// Quantity; a snapshot of the linked sources while auto-synced.
    #[serde(deserialize_with = "lenient_f64")]
    pub quantity: f64,
    /// Price per unit in PLN.
    #[serde(deserialize_with = "lenient_f64")]
    pub unit_price: f64,
    /// What-if flag.
    pub is_excluded: bool,
    /// Supplier items or groups this item's quantity follows.
    pub linked_sources: Vec<LinkedSource>,
    /// Quantity follows `linked_sources`.
    pub is_auto_quantity: bool,
    /// Parent item for hierarchical display.
    pub parent_id: Option<String>,
    /// Children hidden in the display tree.
    pub is_collapsed: bool,
}

impl CustomInstallationItem {
    /// Create a new item.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: f64,
        unit_price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
            unit_price,
            ..Default::default()
        }
    }

    /// Check if the quantity is driven by linked sources.
    pub fn is_auto_linked(&self) -> bool {
        self.is_auto_quantity && !self.linked_sources.is_empty()
    }
}

/// One installation stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstallationStage {
    /// Unique stage id.
    pub id: String,
    /// Stage name.
    pub name: String,
    /// Pricing method.
    pub calc_method: CalcMethod,
    /// Suppliers whose item labor minutes roll up into this stage.
    pub linked_supplier_ids: Vec<String>,
    /// Number of pallet spots to install.
    #[serde(deserialize_with = "lenient_f64")]
    pub pallet_spots: f64,
    /// Price per pallet spot.
    #[serde(deserialize_with = "lenient_f64")]
    pub pallet_spot_price: f64,
    /// Pallet spots a crew installs per day.
    #[serde(deserialize_with = "lenient_f64")]
    pub pallet_spots_per_day: f64,
    /// Working hours per day.
    #[serde(deserialize_with = "lenient_f64")]
    pub work_day_hours: f64,
    /// Crew size.
    #[serde(deserialize_with = "lenient_f64")]
    pub installers_count: f64,
    /// Price of one installer day.
    #[serde(deserialize_with = "lenient_f64")]
    pub man_day_rate: f64,
    /// Extra labor hours on top of the supplier roll-up.
    #[serde(deserialize_with = "lenient_f64")]
    pub manual_labor_hours: f64,
    /// Forklift rental.
    pub forklift: EquipmentRental,
    /// Scissor lift rental.
    pub scissor_lift: EquipmentRental,
    /// Stage-local extra items.
    pub custom_items: Vec<CustomInstallationItem>,
    /// What-if flag for the whole stage.
    pub is_excluded: bool,
}

impl Default for InstallationStage {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            calc_method: CalcMethod::default(),
            linked_supplier_ids: Vec::new(),
            pallet_spots: 0.0,
            pallet_spot_price: 0.0,
            pallet_spots_per_day: 0.0,
            work_day_hours: 8.0,
            installers_count: 0.0,
            man_day_rate: 0.0,
            manual_labor_hours: 0.0,
            forklift: EquipmentRental::default(),
            scissor_lift: EquipmentRental::default(),
            custom_items: Vec::new(),
            is_excluded: false,
        }
    }
}

impl InstallationStage {
    /// Create a new stage.
    pub fn new(id: impl Into<String>, name: impl Into<String>, calc_method: CalcMethod) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            calc_method,
            ..Default::default()
        }
    }
}

/// Installation section of a calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstallationData {
    /// Installation stages.
    pub stages: Vec<InstallationStage>,
    /// Cross-stage extra items, nestable via `parent_id`.
    pub custom_items: Vec<CustomInstallationItem>,
    /// Flat add-on in PLN.
    #[serde(deserialize_with = "lenient_f64")]
    pub other_installation_costs: f64,
}
