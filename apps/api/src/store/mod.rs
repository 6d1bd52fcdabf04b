// Persistence: a file-backed draft store (offline-first cache), a Postgres
// per-user store for signed-in users, and the pure reconciliation of the two.

pub mod local;
pub mod reconcile;
pub mod remote;
