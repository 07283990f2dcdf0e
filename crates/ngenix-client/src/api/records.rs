//! Challenge record operations.
//!
//! NGENIX keeps records inside the zone object, so adding or removing a
//! record is a read-modify-write of the zone's whole record list.

use crate::NgenixClient;
use ngenix_core::{
    challenge_record_name, relative_record_name, zone_candidates, DnsZone, NgenixError, RecordId,
    Result, ZoneRecord,
};
use tracing::{debug, info};

/// Outcome of a record change: the handle and the zone contents around it
#[derive(Debug, Clone)]
pub struct ZoneChange {
    /// The challenge record that was added or removed
    pub record: RecordId,
    /// Zone records before the change
    pub before: Vec<ZoneRecord>,
    /// Zone records after the change
    pub after: Vec<ZoneRecord>,
    /// False when the zone already was in the requested state and no update was sent
    pub changed: bool,
}

/// A record addition that has been read but not yet sent
#[derive(Debug, Clone)]
pub struct PendingChange {
    /// The challenge record to add
    pub record: RecordId,
    /// Zone records as read from the API
    pub before: Vec<ZoneRecord>,
    /// Replacement record list; `None` when the record already exists
    records: Option<Vec<ZoneRecord>>,
}

impl PendingChange {
    /// Returns true if applying this change sends a zone update
    #[must_use]
    pub const fn needs_update(&self) -> bool {
        self.records.is_some()
    }
}

/// Challenge record operations
pub struct RecordsApi<'a> {
    client: &'a NgenixClient,
}

impl<'a> RecordsApi<'a> {
    pub(crate) const fn new(client: &'a NgenixClient) -> Self {
        Self { client }
    }

    /// Find the zone holding records for `domain`.
    ///
    /// Zone names are tried from the domain itself up through its parents.
    pub async fn find_zone(&self, domain: &str) -> Result<DnsZone> {
        let zones = self.client.zones().list().await?;

        zone_candidates(domain)
            .into_iter()
            .find_map(|candidate| zones.by_name(candidate))
            .cloned()
            .ok_or_else(|| NgenixError::ZoneNotFound {
                domain: domain.to_string(),
            })
    }

    /// Resolve where the challenge record for `domain` and `value` lives.
    pub async fn locate(&self, domain: &str, value: &str) -> Result<RecordId> {
        let zone = self.find_zone(domain).await?;
        let fqdn = challenge_record_name(domain);

        debug!(domain, zone = %zone.name, zone_id = %zone.id, "resolved DNS zone");

        Ok(RecordId {
            name: relative_record_name(&fqdn, &zone.name),
            zone_id: zone.id,
            zone_name: zone.name,
            value: value.to_string(),
        })
    }

    /// Add the TXT record `_acme-challenge.<domain>` holding `value`.
    ///
    /// Sends exactly one zone update, unless the zone already holds an
    /// identical record. API errors are returned as-is.
    pub async fn create_record(&self, domain: &str, value: &str) -> Result<ZoneChange> {
        let pending = self.prepare_create(domain, value).await?;
        self.apply(pending).await
    }

    /// Read the zone and work out the update that adds the challenge record.
    ///
    /// Nothing is written; pass the result to [`apply`](Self::apply).
    pub async fn prepare_create(&self, domain: &str, value: &str) -> Result<PendingChange> {
        let record = self.locate(domain, value).await?;
        let before = self.client.zones().get(&record.zone_id).await?.records;

        let records = if before.iter().any(|r| record.matches(r)) {
            info!(record = %record.name, zone = %record.zone_name, "TXT record already present");
            None
        } else {
            let mut records = before.clone();
            records.push(record.to_record());
            Some(records)
        };

        Ok(PendingChange {
            record,
            before,
            records,
        })
    }

    /// Send the update prepared by [`prepare_create`](Self::prepare_create).
    pub async fn apply(&self, pending: PendingChange) -> Result<ZoneChange> {
        let PendingChange {
            record,
            before,
            records,
        } = pending;

        let Some(records) = records else {
            return Ok(ZoneChange {
                after: before.clone(),
                before,
                record,
                changed: false,
            });
        };

        info!(record = %record.name, zone = %record.zone_name, "adding TXT record");
        let after = self
            .client
            .zones()
            .update_records(&record.zone_id, &records)
            .await?;

        Ok(ZoneChange {
            record,
            before,
            after,
            changed: true,
        })
    }

    /// Remove the record behind `record` from its zone.
    ///
    /// When the record is already gone no update is sent.
    pub async fn delete_record(&self, record: &RecordId) -> Result<ZoneChange> {
        let before = self.client.zones().get(&record.zone_id).await?.records;
        let records: Vec<ZoneRecord> = before
            .iter()
            .filter(|r| !record.matches(r))
            .cloned()
            .collect();

        if records.len() == before.len() {
            info!(record = %record.name, zone = %record.zone_name, "TXT record already absent");
            return Ok(ZoneChange {
                record: record.clone(),
                after: before.clone(),
                before,
                changed: false,
            });
        }

        info!(record = %record.name, zone = %record.zone_name, "deleting TXT record");
        let after = self
            .client
            .zones()
            .update_records(&record.zone_id, &records)
            .await?;

        Ok(ZoneChange {
            record: record.clone(),
            before,
            after,
            changed: true,
        })
    }
}
