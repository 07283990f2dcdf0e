use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NgenixError;
use crate::types::ZoneRecord;

/// Handle to a challenge record created through the API.
///
/// NGENIX stores records inside the zone object and does not assign them ids
/// of their own, so the handle pins the zone id together with the record's
/// identity. It renders as `<zone-id>/<zone-name>/<record-name>/<value>` and
/// is what the `perform` hook prints for Certbot to pass back to `cleanup`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId {
    /// Zone holding the record
    pub zone_id: String,
    /// Name of that zone
    pub zone_name: String,
    /// Record name relative to the zone
    pub name: String,
    /// TXT value
    pub value: String,
}

impl RecordId {
    /// The zone record this handle refers to
    #[must_use]
    pub fn to_record(&self) -> ZoneRecord {
        ZoneRecord::txt(&self.name, &self.value)
    }

    /// Returns true if `record` is the record behind this handle
    #[must_use]
    pub fn matches(&self, record: &ZoneRecord) -> bool {
        record.is_txt(&self.name, &self.value)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.zone_id, self.zone_name, self.name, self.value
        )
    }
}

impl FromStr for RecordId {
    type Err = NgenixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut parts = s.splitn(4, '/');
        let mut next = || {
            parts
                .next()
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .ok_or_else(|| NgenixError::InvalidRecordId(s.to_string()))
        };

        Ok(Self {
            zone_id: next()?,
            zone_name: next()?,
            name: next()?,
            value: next()?,
        })
    }
}

/// A challenge record: the domain being validated and where its TXT record lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeRecord {
    /// Domain under validation (as given by Certbot)
    pub domain: String,
    /// Fully qualified `_acme-challenge` name
    pub fqdn: String,
    /// Handle used for deletion
    pub id: RecordId,
}
