use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// One intervention as returned by the statistics API and stored in the
/// history file.
///
/// The JSON object is kept as received: keys, key order, `null`s and fields
/// we know nothing about are written back untouched. The typed accessors
/// below only read it (report rendering, dedup key, identity lookup).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Intervention {
    raw: Map<String, Value>,
}

/// Chef d'intervention.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chief {
    pub rank: String,
    pub firstname: String,
    pub lastname: String,
}

/// A fireman engaged on the intervention.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrewMember {
    pub nip: String,
    pub firstname: String,
    pub lastname: String,
}

impl TryFrom<Map<String, Value>> for Intervention {
    type Error = String;

    fn try_from(raw: Map<String, Value>) -> Result<Self, Self::Error> {
        match raw.get("rapport") {
            Some(Value::String(_)) => Ok(Self { raw }),
            Some(other) => Err(format!("field `rapport` is not a string: {other}")),
            None => Err("missing field `rapport`".to_string()),
        }
    }
}

impl Serialize for Intervention {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl Intervention {
    /// Minimal record (`rapport` + `what`), handy to build fixtures.
    pub fn new(report_id: impl Into<String>, kind: impl Into<String>) -> Self {
        let mut raw = Map::new();
        raw.insert("rapport".into(), Value::String(report_id.into()));
        raw.insert("what".into(), Value::String(kind.into()));
        Self { raw }
    }

    /// Set a feed key, keeping its position when it already exists.
    /// `rapport` is the identity of the record and cannot be changed.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        if key != "rapport" {
            self.raw.insert(key.to_string(), value.into());
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// The record exactly as stored.
    pub fn as_json(&self) -> &Map<String, Value> {
        &self.raw
    }

    pub fn report_id(&self) -> &str {
        self.raw
            .get("rapport")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn kind(&self) -> String {
        text(self.raw.get("what"))
    }

    pub fn place(&self) -> String {
        text(self.raw.get("where"))
    }

    /// Postal code: the feed sends it either as text or as a number.
    pub fn postal_code(&self) -> String {
        text(self.raw.get("npa"))
    }

    pub fn locality(&self) -> String {
        text(self.raw.get("localite"))
    }

    /// Raw timestamp text, parsed only when the report is rendered.
    pub fn start_time(&self) -> String {
        text(self.raw.get("alarmTime"))
    }

    pub fn end_time(&self) -> String {
        text(self.raw.get("repliTime"))
    }

    pub fn chief(&self) -> Chief {
        let chief = self.raw.get("chief");
        Chief {
            rank: text(field(chief, "rank")),
            firstname: text(field(chief, "firstname")),
            lastname: text(field(chief, "lastname")),
        }
    }

    /// Crew list, empty when the feed did not send one.
    pub fn crew(&self) -> Vec<CrewMember> {
        let Some(Value::Array(members)) = self.raw.get("firemen") else {
            return Vec::new();
        };

        members
            .iter()
            .map(|m| CrewMember {
                nip: text(field(Some(m), "nip")),
                firstname: text(field(Some(m), "firstname")),
                lastname: text(field(Some(m), "lastname")),
            })
            .collect()
    }

    /// `"<where> - <npa> <localite>"`
    pub fn location_label(&self) -> String {
        format!(
            "{} - {} {}",
            self.place(),
            self.postal_code(),
            self.locality()
        )
    }

    /// `"<rank> <firstname> <lastname>"`
    pub fn chief_label(&self) -> String {
        let c = self.chief();
        format!("{} {} {}", c.rank, c.firstname, c.lastname)
    }
}

fn field<'a>(obj: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    obj.and_then(|v| v.get(key))
}

/// Text of a scalar feed value; missing or `null` reads as empty.
fn text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
