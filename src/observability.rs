//! Metric names recorded by the registry. The embedding application decides
//! whether and where to install an exporter; with none installed these are
//! no-ops.

/// Counter: candidate schedules merged or swapped in.
pub const MERGES_TOTAL: &str = "rota_merges_total";

/// Counter: merges rejected because of an overlap, own-schedule or
/// cross-entity.
pub const CONFLICTS_TOTAL: &str = "rota_conflicts_total";

/// Counter: appointments cancelled.
pub const CANCELS_TOTAL: &str = "rota_cancels_total";

/// Gauge: entities currently registered.
pub const ENTRIES_ACTIVE: &str = "rota_entries_active";
