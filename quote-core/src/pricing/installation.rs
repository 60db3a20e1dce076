//! Installation stage costing and custom item resolution.
//!
//! Every amount here is in PLN; conversion to the offer currency happens
//! once, in the project aggregator.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::config::safe_div::ceil_div;
use crate::config::MINUTES_PER_HOUR;
use crate::model::{
    find_supplier, CustomInstallationItem, InstallationData, InstallationStage, LinkedSource,
    Supplier,
};

/// Supplier data an installation calculation reads from.
#[derive(Debug, Clone, Copy)]
pub struct InstallationContext<'a> {
    /// Suppliers of the same calculation.
    pub suppliers: &'a [Supplier],
}

impl<'a> InstallationContext<'a> {
    /// Create a context over a supplier list.
    pub fn new(suppliers: &'a [Supplier]) -> Self {
        Self { suppliers }
    }
}

/// Quantity of one linked source, looked up in the supplier list.
///
/// Unknown ids resolve to 0.
fn resolve_source(source: &LinkedSource, suppliers: &[Supplier]) -> f64 {
    match source {
        LinkedSource::Group { id } => {
            find_supplier(suppliers, id).map_or(0.0, Supplier::total_quantity)
        }
        LinkedSource::Item { id } => suppliers
            .iter()
            .find_map(|s| s.find_item(id))
            .map_or(0.0, |item| item.quantity),
    }
}

/// Sum of the quantities a custom item is linked to.
pub fn resolve_linked_quantity(sources: &[LinkedSource], suppliers: &[Supplier]) -> f64 {
    sources.iter().map(|s| resolve_source(s, suppliers)).sum()
}

/// Quantity used for costing a custom item.
///
/// Auto-synced items follow their linked sources live; everything else uses
/// the stored quantity.
pub fn effective_quantity(item: &CustomInstallationItem, suppliers: &[Supplier]) -> f64 {
    if item.is_auto_linked() {
        resolve_linked_quantity(&item.linked_sources, suppliers)
    } else {
        item.quantity
    }
}

/// Value of a custom item line, ignoring its exclusion flag.
pub fn custom_item_value(item: &CustomInstallationItem, suppliers: &[Supplier]) -> f64 {
    effective_quantity(item, suppliers) * item.unit_price
}

/// Sum of custom items as `(active, excluded)`.
fn sum_custom_items(items: &[CustomInstallationItem], suppliers: &[Supplier]) -> (f64, f64) {
    items.iter().fold((0.0, 0.0), |(active, excluded), item| {
        let value = custom_item_value(item, suppliers);
        if item.is_excluded {
            (active, excluded + value)
        } else {
            (active + value, excluded)
        }
    })
}

/// Labor hours rolled up from the stage's linked suppliers.
///
/// Excluded items and suppliers that are not included do not add labor. A
/// supplier linked more than once counts once.
pub fn linked_supplier_hours(stage: &InstallationStage, ctx: &InstallationContext<'_>) -> f64 {
    let mut seen = HashSet::new();
    let minutes: f64 = stage
        .linked_supplier_ids
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .filter_map(|id| find_supplier(ctx.suppliers, id))
        .filter(|s| s.is_included)
        .map(Supplier::active_labor_minutes)
        .sum();
    minutes / MINUTES_PER_HOUR
}

/// Detailed cost and duration of one stage, in PLN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageCost {
    /// Hours rolled up from linked suppliers.
    pub stage_hours: f64,
    /// Supplier hours plus manual hours.
    pub total_hours: f64,
    /// Crew hours per day.
    pub daily_capacity: f64,
    /// Days needed by the labor estimate.
    pub time_based_days: f64,
    /// Days needed by the pallet estimate.
    pub pallet_based_days: f64,
    /// Selected stage duration.
    pub duration_days: f64,
    /// Pallet-spot part.
    pub pallet_cost: f64,
    /// Installer man-day part.
    pub labor_cost: f64,
    /// Forklift and scissor lift rentals.
    pub equipment_cost: f64,
    /// Active stage-local custom items.
    pub custom_items_cost: f64,
    /// Excluded stage-local custom items.
    pub excluded_items_cost: f64,
    /// Stage cost, computed even when the stage is excluded.
    pub total: f64,
    /// Stage is excluded from parent totals.
    pub is_excluded: bool,
}

impl StageCost {
    /// Amount this stage adds to the installation total.
    pub fn contribution(&self) -> f64 {
        if self.is_excluded {
            0.0
        } else {
            self.total
        }
    }

    /// Amount removed from the installation total by what-if flags.
    pub fn excluded_amount(&self) -> f64 {
        if self.is_excluded {
            self.total + self.excluded_items_cost
        } else {
            self.excluded_items_cost
        }
    }
}

/// Compute cost and duration of a stage.
pub fn calculate_stage_breakdown(
    stage: &InstallationStage,
    ctx: &InstallationContext<'_>,
) -> StageCost {
    let stage_hours = linked_supplier_hours(stage, ctx);
    let total_hours = stage_hours + stage.manual_labor_hours;

    let daily_capacity = stage.work_day_hours * stage.installers_count;
    let time_based_days = ceil_div(total_hours, daily_capacity);
    let pallet_based_days = ceil_div(stage.pallet_spots, stage.pallet_spots_per_day);

    let duration_days = if stage.calc_method.includes_pallets()
        && stage.pallet_spots > 0.0
        && stage.pallet_spots_per_day > 0.0
    {
        pallet_based_days
    } else {
        time_based_days
    };

    let pallet_cost = if stage.calc_method.includes_pallets() {
        stage.pallet_spots * stage.pallet_spot_price
    } else {
        0.0
    };

    let labor_cost = if stage.calc_method.includes_time() {
        time_based_days * stage.installers_count * stage.man_day_rate
    } else {
        0.0
    };

    let equipment_cost = stage.forklift.cost() + stage.scissor_lift.cost();
    let (custom_items_cost, excluded_items_cost) =
        sum_custom_items(&stage.custom_items, ctx.suppliers);

    StageCost {
        stage_hours,
        total_hours,
        daily_capacity,
        time_based_days,
        pallet_based_days,
        duration_days,
        pallet_cost,
        labor_cost,
        equipment_cost,
        custom_items_cost,
        excluded_items_cost,
        total: pallet_cost + labor_cost + equipment_cost + custom_items_cost,
        is_excluded: stage.is_excluded,
    }
}

/// Cost of a stage in PLN.
///
/// This is the computed value even for an excluded stage, so it can be
/// previewed; parents use [`StageCost::contribution`].
pub fn calculate_stage_cost(stage: &InstallationStage, ctx: &InstallationContext<'_>) -> f64 {
    calculate_stage_breakdown(stage, ctx).total
}

/// Installation totals in PLN.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationCost {
    /// Per-stage details, in stage order.
    pub stages: Vec<StageCost>,
    /// Sum of active stages.
    pub stages_total: f64,
    /// Active global custom items.
    pub custom_items_total: f64,
    /// Flat add-on.
    pub other_installation_costs: f64,
    /// Installation total.
    pub total: f64,
    /// Amount removed by what-if flags.
    pub excluded: f64,
}

/// Compute the whole installation section in PLN.
pub fn calculate_installation_cost(
    installation: &InstallationData,
    ctx: &InstallationContext<'_>,
) -> InstallationCost {
    let stages: Vec<StageCost> = installation
        .stages
        .iter()
        .map(|stage| calculate_stage_breakdown(stage, ctx))
        .collect();

    let stages_total: f64 = stages.iter().map(StageCost::contribution).sum();
    let stages_excluded: f64 = stages.iter().map(StageCost::excluded_amount).sum();
    let (custom_items_total, custom_excluded) =
        sum_custom_items(&installation.custom_items, ctx.suppliers);

    let total = stages_total + custom_items_total + installation.other_installation_costs;
    debug!(
        stages = stages.len(),
        stages_total,
        custom_items_total,
        total,
        "Installation costs calculated (PLN)"
    );

    InstallationCost {
        stages,
        stages_total,
        custom_items_total,
        other_installation_costs: installation.other_installation_costs,
        total,
        excluded: stages_excluded + custom_excluded,
    }
}

/// A custom item with its children, for hierarchical display.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomItemNode<'a> {
    /// The item itself.
    pub item: &'a CustomInstallationItem,
    /// Child items in list order.
    pub children: Vec<CustomItemNode<'a>>,
}

/// Build the display tree from the flat custom item list.
///
/// Items whose parent is missing become roots. Items caught in a parent
/// cycle are attached under the first cycle member in list order.
pub fn build_custom_item_tree(items: &[CustomInstallationItem]) -> Vec<CustomItemNode<'_>> {
    let ids: HashSet<&str> = items.iter().map(|i| i.id.as_str()).collect();
    let mut children: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut roots = Vec::new();

    for (idx, item) in items.iter().enumerate() {
        match item.parent_id.as_deref() {
            Some(parent) if parent != item.id && ids.contains(parent) => {
                children.entry(parent).or_default().push(idx);
            }
            _ => roots.push(idx),
        }
    }

    let mut visited = vec![false; items.len()];
    let mut tree: Vec<CustomItemNode<'_>> = roots
        .into_iter()
        .filter_map(|idx| build_node(items, idx, &children, &mut visited))
        .collect();

    // Anything unvisited sits in a cycle.
    for idx in 0..items.len() {
        if let Some(node) = build_node(items, idx, &children, &mut visited) {
            tree.push(node);
        }
    }

    tree
}

fn build_node<'a>(
    items: &'a [CustomInstallationItem],
    idx: usize,
    children: &HashMap<&str, Vec<usize>>,
    visited: &mut [bool],
) -> Option<CustomItemNode<'a>> {
    if visited[idx] {
        return None;
    }
    visited[idx] = true;

    let item = &items[idx];
    let child_nodes = children
        .get(item.id.as_str())
        .map(|idxs| {
            idxs.iter()
                .filter_map(|&child| build_node(items, child, children, visited))
                .collect()
        })
        .unwrap_or_default();

    Some(CustomItemNode {
        item,
        children: child_nodes,
    })
}

/// Flatten a tree into `(depth, item)` rows, hiding children of collapsed items.
pub fn visible_rows<'a>(tree: &[CustomItemNode<'a>]) -> Vec<(usize, &'a CustomInstallationItem)> {
    fn walk<'a>(
        nodes: &[CustomItemNode<'a>],
        depth: usize,
        out: &mut Vec<(usize, &'a CustomInstallationItem)>,
    ) {
        for node in nodes {
            out.push((depth, node.item));
            if !node.item.is_collapsed {
                walk(&node.children, depth + 1, out);
            }
        }
    }

    let mut rows = Vec::new();
    walk(tree, 0, &mut rows);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::float_cmp::approx_eq;
    use crate::model::{CalcMethod, Currency, EquipmentRental, SupplierItem};

    fn labor_supplier() -> Supplier {
        Supplier::new("s1", "Racks", Currency::Pln)
            .with_item(SupplierItem {
                time_minutes: 30.0,
                ..SupplierItem::new("i1", "Upright", 40.0, 100.0)
            })
            .with_item(SupplierItem {
                time_minutes: 15.0,
                ..SupplierItem::new("i2", "Beam", 80.0, 20.0)
            })
            .with_item(SupplierItem {
                time_minutes: 60.0,
                is_excluded: true,
                ..SupplierItem::new("i3", "Mesh", 10.0, 5.0)
            })
    }

    fn pallet_stage() -> InstallationStage {
        InstallationStage {
            pallet_spots: 10.0,
            pallet_spot_price: 50.0,
            ..InstallationStage::new("st1", "Hall A", CalcMethod::Pallets)
        }
    }

    // ==================== pallet method tests ====================

    #[test]
    fn test_pallet_cost() {
        let cost = calculate_stage_breakdown(&pallet_stage(), &InstallationContext::new(&[]));
        assert_eq!(cost.pallet_cost, 500.0);
        assert_eq!(cost.total, 500.0);
        assert_eq!(cost.duration_days, 0.0);
    }

    #[test]
    fn test_pallet_duration() {
        let stage = InstallationStage {
            pallet_spots_per_day: 4.0,
            ..pallet_stage()
        };
        let cost = calculate_stage_breakdown(&stage, &InstallationContext::new(&[]));
        assert_eq!(cost.pallet_based_days, 3.0);
        assert_eq!(cost.duration_days, 3.0);
    }

    #[test]
    fn test_pallet_duration_falls_back_to_time() {
        let stage = InstallationStage {
            manual_labor_hours: 20.0,
            work_day_hours: 8.0,
            installers_count: 2.0,
            ..pallet_stage()
        };
        let cost = calculate_stage_breakdown(&stage, &InstallationContext::new(&[]));
        assert_eq!(cost.duration_days, 2.0);
        // labor is not priced under PALLETS
        assert_eq!(cost.labor_cost, 0.0);
        assert_eq!(cost.total, 500.0);
    }

    // ==================== time method tests ====================

    #[test]
    fn test_time_cost_rounds_days_up() {
        let suppliers = vec![labor_supplier()];
        let stage = InstallationStage {
            linked_supplier_ids: vec!["s1".into()],
            manual_labor_hours: 5.0,
            work_day_hours: 8.0,
            installers_count: 3.0,
            man_day_rate: 400.0,
            pallet_spots: 99.0,
            pallet_spots_per_day: 1.0,
            ..InstallationStage::new("st1", "Hall A", CalcMethod::Time)
        };

        let cost = calculate_stage_breakdown(&stage, &InstallationContext::new(&suppliers));
        // (40*30 + 80*15) / 60 = 40 h, excluded mesh ignored
        assert!(approx_eq(cost.stage_hours, 40.0));
        assert!(approx_eq(cost.total_hours, 45.0));
        assert_eq!(cost.daily_capacity, 24.0);
        assert_eq!(cost.time_based_days, 2.0);
        assert_eq!(cost.duration_days, 2.0);
        assert_eq!(cost.pallet_cost, 0.0);
        assert_eq!(cost.labor_cost, 2400.0);
        assert_eq!(cost.total, 2400.0);
    }

    #[test]
    fn test_time_zero_capacity() {
        let stage = InstallationStage {
            manual_labor_hours: 10.0,
            installers_count: 0.0,
            man_day_rate: 400.0,
            ..InstallationStage::new("st1", "Hall A", CalcMethod::Time)
        };
        let cost = calculate_stage_breakdown(&stage, &InstallationContext::new(&[]));
        assert_eq!(cost.time_based_days, 0.0);
        assert_eq!(cost.total, 0.0);
    }

    #[test]
    fn test_excluded_supplier_adds_no_labor() {
        let mut supplier = labor_supplier();
        supplier.is_included = false;
        let stage = InstallationStage {
            linked_supplier_ids: vec!["s1".into()],
            ..InstallationStage::new("st1", "Hall A", CalcMethod::Time)
        };
        assert_eq!(
            linked_supplier_hours(&stage, &InstallationContext::new(&[supplier])),
            0.0
        );
    }

    #[test]
    fn test_duplicate_link_counts_once() {
        let suppliers = vec![labor_supplier()];
        let stage = InstallationStage {
            linked_supplier_ids: vec!["s1".into(), "s1".into()],
            ..InstallationStage::new("st1", "Hall A", CalcMethod::Time)
        };
        let hours = linked_supplier_hours(&stage, &InstallationContext::new(&suppliers));
        assert!(approx_eq(hours, 40.0));
    }

    // ==================== both method tests ====================

    #[test]
    fn test_both_sums_parts() {
        let stage = InstallationStage {
            pallet_spots: 10.0,
            pallet_spot_price: 50.0,
            pallet_spots_per_day: 5.0,
            manual_labor_hours: 16.0,
            work_day_hours: 8.0,
            installers_count: 1.0,
            man_day_rate: 300.0,
            ..InstallationStage::new("st1", "Hall A", CalcMethod::Both)
        };
        let cost = calculate_stage_breakdown(&stage, &InstallationContext::new(&[]));
        assert_eq!(cost.pallet_cost, 500.0);
        assert_eq!(cost.labor_cost, 600.0);
        assert_eq!(cost.duration_days, 2.0);
        assert_eq!(cost.total, 1100.0);
    }

    // ==================== equipment and custom item tests ====================

    #[test]
    fn test_equipment_and_custom_items() {
        let mut stage = pallet_stage();
        stage.forklift = EquipmentRental::new(200.0, 3.0, 150.0);
        stage.scissor_lift = EquipmentRental {
            is_enabled: false,
            ..EquipmentRental::new(500.0, 3.0, 150.0)
        };
        stage.custom_items = vec![
            CustomInstallationItem::new("c1", "Anchors", 100.0, 2.0),
            CustomInstallationItem {
                is_excluded: true,
                ..CustomInstallationItem::new("c2", "Paint", 1.0, 80.0)
            },
        ];

        let cost = calculate_stage_breakdown(&stage, &InstallationContext::new(&[]));
        assert_eq!(cost.equipment_cost, 750.0);
        assert_eq!(cost.custom_items_cost, 200.0);
        assert_eq!(cost.excluded_items_cost, 80.0);
        assert_eq!(cost.total, 1450.0);
        assert_eq!(
            calculate_stage_cost(&stage, &InstallationContext::new(&[])),
            1450.0
        );
    }

    #[test]
    fn test_excluded_stage_still_previews() {
        let stage = InstallationStage {
            is_excluded: true,
            ..pallet_stage()
        };
        let cost = calculate_stage_breakdown(&stage, &InstallationContext::new(&[]));
        assert_eq!(cost.total, 500.0);
        assert_eq!(cost.contribution(), 0.0);
        assert_eq!(cost.excluded_amount(), 500.0);
    }

    // ==================== linked source tests ====================

    #[test]
    fn test_resolve_linked_sources() {
        let suppliers = vec![labor_supplier()];
        let group = vec![LinkedSource::Group { id: "s1".into() }];
        let item = vec![LinkedSource::Item { id: "i2".into() }];
        let missing = vec![LinkedSource::Item { id: "zz".into() }];

        assert_eq!(resolve_linked_quantity(&group, &suppliers), 130.0);
        assert_eq!(resolve_linked_quantity(&item, &suppliers), 80.0);
        assert_eq!(resolve_linked_quantity(&missing, &suppliers), 0.0);
    }

    #[test]
    fn test_effective_quantity_follows_links_only_when_auto() {
        let suppliers = vec![labor_supplier()];
        let mut item = CustomInstallationItem::new("c1", "Anchors", 7.0, 2.0);
        item.linked_sources = vec![LinkedSource::Item { id: "i1".into() }];

        assert_eq!(effective_quantity(&item, &suppliers), 7.0);
        item.is_auto_quantity = true;
        assert_eq!(effective_quantity(&item, &suppliers), 40.0);
        assert_eq!(custom_item_value(&item, &suppliers), 80.0);
    }

    // ==================== installation total tests ====================

    #[test]
    fn test_installation_total() {
        let installation = InstallationData {
            stages: vec![
                pallet_stage(),
                InstallationStage {
                    is_excluded: true,
                    ..pallet_stage()
                },
            ],
            custom_items: vec![
                CustomInstallationItem::new("g1", "Site manager", 5.0, 600.0),
                CustomInstallationItem {
                    is_excluded: true,
                    ..CustomInstallationItem::new("g2", "Hotel", 4.0, 250.0)
                },
            ],
            other_installation_costs: 1000.0,
        };

        let cost = calculate_installation_cost(&installation, &InstallationContext::new(&[]));
        assert_eq!(cost.stages.len(), 2);
        assert_eq!(cost.stages_total, 500.0);
        assert_eq!(cost.custom_items_total, 3000.0);
        assert_eq!(cost.total, 4500.0);
        assert_eq!(cost.excluded, 1500.0);
    }

    // ==================== tree tests ====================

    fn child(id: &str, parent: Option<&str>) -> CustomInstallationItem {
        CustomInstallationItem {
            parent_id: parent.map(String::from),
            ..CustomInstallationItem::new(id, id, 1.0, 1.0)
        }
    }

    #[test]
    fn test_build_tree() {
        let items = vec![
            child("root", None),
            child("a", Some("root")),
            child("b", Some("a")),
            child("orphan", Some("missing")),
        ];
        let tree = build_custom_item_tree(&items);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].item.id, "root");
        assert_eq!(tree[0].children[0].item.id, "a");
        assert_eq!(tree[0].children[0].children[0].item.id, "b");
        assert_eq!(tree[1].item.id, "orphan");
    }

    #[test]
    fn test_build_tree_breaks_cycles() {
        let items = vec![
            child("a", Some("b")),
            child("b", Some("a")),
            child("self", Some("self")),
        ];
        let tree = build_custom_item_tree(&items);
        let rows = visible_rows(&tree);
        assert_eq!(rows.len(), 3);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_visible_rows_respect_collapse() {
        let mut items = vec![
            child("root", None),
            child("a", Some("root")),
            child("b", Some("a")),
        ];
        let rows: Vec<_> = visible_rows(&build_custom_item_tree(&items))
            .into_iter()
            .map(|(depth, item)| (depth, item.id.clone()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (0, "root".to_string()),
                (1, "a".to_string()),
                (2, "b".to_string())
            ]
        );

        items[1].is_collapsed = true;
        let rows = visible_rows(&build_custom_item_tree(&items));
        assert_eq!(rows.len(), 2);
    }
}
