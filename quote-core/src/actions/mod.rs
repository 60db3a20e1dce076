//! Editing actions on the data model.
//!
//! These are the mutations the editor performs between costing runs.
//! Variants are the exception: applying one returns a modified copy.

mod installation;
mod transport;
mod variant;

pub use installation::{resync_custom_item, set_custom_item_quantity, sync_linked_quantities};
pub use transport::{
    duplicate_transport_paths, merge_transport, set_manual_trucks, sync_transport_totals,
    toggle_manual_override, unmerge_transport,
};
pub use variant::{apply_variant, apply_variant_by_id};
