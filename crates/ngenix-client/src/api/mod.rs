//! API endpoint modules.

mod records;
mod zones;

pub use records::{PendingChange, RecordsApi, ZoneChange};
pub use zones::ZonesApi;
