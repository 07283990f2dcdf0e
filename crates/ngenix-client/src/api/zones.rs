//! DNS zone endpoints.

use crate::NgenixClient;
use ngenix_core::{DnsZoneDetails, DnsZoneList, Result, ZoneRecord, ZoneRecordsUpdate};
use tracing::debug;

/// DNS zone endpoints
pub struct ZonesApi<'a> {
    client: &'a NgenixClient,
}

impl<'a> ZonesApi<'a> {
    pub(crate) const fn new(client: &'a NgenixClient) -> Self {
        Self { client }
    }

    /// List the zones of the client's customer
    pub async fn list(&self) -> Result<DnsZoneList> {
        let customer_id = self.client.credentials().customer_id();
        let list: DnsZoneList = self
            .client
            .get_with_query("/dns-zone", &[("customerId", customer_id)])
            .await?;

        debug!(customer_id, zones = list.elements.len(), "listed DNS zones");
        Ok(list)
    }

    /// Fetch a zone with all of its records
    pub async fn get(&self, zone_id: &str) -> Result<DnsZoneDetails> {
        self.client.get(&format!("/dns-zone/{zone_id}")).await
    }

    /// Replace the record list of a zone.
    ///
    /// Read-only `link` members are stripped from the records before sending.
    /// Returns the records as stored by the API.
    pub async fn update_records(
        &self,
        zone_id: &str,
        records: &[ZoneRecord],
    ) -> Result<Vec<ZoneRecord>> {
        let mut records = records.to_vec();
        records.iter_mut().for_each(ZoneRecord::strip_links);

        let updated: DnsZoneDetails = self
            .client
            .patch(
                &format!("/dns-zone/{zone_id}"),
                &ZoneRecordsUpdate { records: &records },
            )
            .await?;

        Ok(updated.records)
    }
}
