//! Pure reconciliation of the local latest-result cache with the remote list.
//! No I/O — independently testable without network or storage.

use std::collections::HashSet;

use uuid::Uuid;

use crate::models::career::CareerResult;

/// Merges the remote result list (already ordered newest-first) with the local
/// latest result, if any.
///
/// The remote list is de-duplicated by id with the first occurrence winning
/// and order preserved. The local result is prepended iff its id is not
/// already present. The output never contains two entries with the same id.
pub fn reconcile_results(
    local_latest: Option<CareerResult>,
    remote: Vec<CareerResult>,
) -> Vec<CareerResult> {
    let mut seen: HashSet<Uuid> = HashSet::new();
    let mut merged: Vec<CareerResult> = Vec::with_capacity(remote.len() + 1);

    for result in remote {
        if seen.insert(result.id) {
            merged.push(result);
        }
    }

    if let Some(local) = local_latest {
        if !seen.contains(&local.id) {
            merged.insert(0, local);
        }
    }

    merged
}
