use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Record type used for DNS-01 challenges
pub const TXT: &str = "TXT";

/// Reference members whose server-generated `link` must not be sent back
const REFERENCE_FIELDS: [&str; 2] = ["configRef", "targetGroupRef"];

/// DNS zone summary from `GET /dns-zone`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsZone {
    /// Zone identifier
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// Zone name (e.g. `example.com`)
    pub name: String,
}

/// Paged zone listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsZoneList {
    /// Zones visible to the customer
    #[serde(default)]
    pub elements: Vec<DnsZone>,
}

impl DnsZoneList {
    /// Find a zone by exact name (case-insensitive, trailing dot ignored)
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&DnsZone> {
        let name = name.trim_end_matches('.');
        self.elements
            .iter()
            .find(|z| z.name.trim_end_matches('.').eq_ignore_ascii_case(name))
    }
}

/// Full zone as returned by `GET /dns-zone/<id>` and `PATCH /dns-zone/<id>`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsZoneDetails {
    /// Zone identifier
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,

    /// Zone name
    #[serde(default)]
    pub name: Option<String>,

    /// Every record in the zone
    #[serde(default)]
    pub records: Vec<ZoneRecord>,
}

/// Body of a zone update
#[derive(Debug, Serialize)]
pub struct ZoneRecordsUpdate<'a> {
    /// Complete replacement record list
    pub records: &'a [ZoneRecord],
}

/// A single record in a DNS zone.
///
/// The zone is replaced as a whole on update, so the record is kept as the
/// raw JSON object and written back member for member, explicit nulls
/// included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneRecord {
    members: Map<String, Value>,
}

impl ZoneRecord {
    /// Build a TXT record
    #[must_use]
    pub fn txt(name: impl Into<String>, data: impl Into<String>) -> Self {
        let mut members = Map::new();
        members.insert("name".to_string(), Value::String(name.into()));
        members.insert("type".to_string(), Value::String(TXT.to_string()));
        members.insert("data".to_string(), Value::String(data.into()));
        Self { members }
    }

    /// Record name relative to the zone
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.str_member("name")
    }

    /// Record type (A, CNAME, TXT, ...)
    #[must_use]
    pub fn record_type(&self) -> Option<&str> {
        self.str_member("type")
    }

    /// Record data as a string, if it is one
    #[must_use]
    pub fn data_str(&self) -> Option<&str> {
        self.str_member("data")
    }

    /// Any member by its API name
    #[must_use]
    pub fn get(&self, member: &str) -> Option<&Value> {
        self.members.get(member)
    }

    /// Returns true if this is the TXT record `name` holding `value`
    #[must_use]
    pub fn is_txt(&self, name: &str, value: &str) -> bool {
        self.record_type().is_some_and(|t| t.eq_ignore_ascii_case(TXT))
            && self.name().is_some_and(|n| n.eq_ignore_ascii_case(name))
            && self.data_str() == Some(value)
    }

    /// Drop the read-only `link` member from reference objects.
    pub fn strip_links(&mut self) {
        for field in REFERENCE_FIELDS {
            if let Some(Value::Object(reference)) = self.members.get_mut(field) {
                reference.remove("link");
            }
        }
    }

    fn str_member(&self, member: &str) -> Option<&str> {
        self.members.get(member).and_then(Value::as_str)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

fn opt_string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<StringOrNumber>::deserialize(deserializer).map(|v| v.map(String::from))
}
