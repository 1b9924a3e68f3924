//! Types for the exported archive: global index, day index, messages.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Milliseconds since the Unix epoch.
///
/// Exports carry either a number or an RFC 3339 string; both are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn millis(self) -> i64 {
        self.0
    }

    pub fn to_datetime(self) -> OffsetDateTime {
        let nanos = i128::from(self.0) * 1_000_000;
        OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }

    pub fn from_datetime(dt: OffsetDateTime) -> Self {
        Self((dt.unix_timestamp_nanos() / 1_000_000) as i64)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Text(String),
            Null(()),
        }

        let ts = match Raw::deserialize(deserializer)? {
            Raw::Int(ms) => Timestamp(ms),
            Raw::Float(ms) => Timestamp(ms as i64),
            Raw::Text(text) => parse_text_timestamp(&text).unwrap_or_else(|| {
                tracing::warn!(value = %text, "unparsable timestamp, using epoch");
                Timestamp::default()
            }),
            Raw::Null(()) => Timestamp::default(),
        };
        Ok(ts)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

fn parse_text_timestamp(text: &str) -> Option<Timestamp> {
    let trimmed = text.trim();
    if let Ok(ms) = trimmed.parse::<i64>() {
        return Some(Timestamp(ms));
    }
    OffsetDateTime::parse(trimmed, &Rfc3339)
        .ok()
        .map(Timestamp::from_datetime)
}

/// Treats an explicit `null` like a missing key
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A known user in the archive
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Archive-wide index (`index.json` at the data root)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalIndex {
    #[serde(default, deserialize_with = "null_default")]
    pub owner: String,
    #[serde(default, deserialize_with = "null_default")]
    pub users: BTreeMap<String, User>,
}

impl GlobalIndex {
    pub fn user(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    /// Display name for a username, falling back to the username itself
    pub fn display_name<'a>(&'a self, username: &'a str) -> &'a str {
        self.user(username)
            .and_then(|u| u.display_name.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or(username)
    }

    /// Name shown above a message
    pub fn sender_name<'a>(&'a self, message: &'a Message) -> &'a str {
        if message.is_sender {
            "Me"
        } else {
            self.display_name(&message.from)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationType {
    Group,
    #[default]
    #[serde(other)]
    Individual,
}

/// Per-conversation summary inside a day index
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationSummary {
    #[serde(rename = "type", default, deserialize_with = "null_default")]
    pub kind: ConversationType,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub participants: Vec<String>,
    #[serde(default)]
    pub latest_from: Option<String>,
    #[serde(default)]
    pub latest_kind: Option<String>,
    #[serde(default)]
    pub latest_media_type: Option<String>,
    #[serde(default)]
    pub latest_timestamp: Timestamp,
    #[serde(default, deserialize_with = "null_default")]
    pub is_sender: bool,
}

impl ConversationSummary {
    pub fn is_group(&self) -> bool {
        self.kind == ConversationType::Group
    }

    pub fn latest_kind(&self) -> &str {
        self.latest_kind.as_deref().unwrap_or("chat")
    }

    /// The participant that isn't the archive owner
    pub fn other_participant<'a>(&'a self, owner: &str) -> Option<&'a str> {
        self.participants
            .iter()
            .map(String::as_str)
            .find(|p| *p != owner)
    }

    /// Name shown in the chat list and conversation header
    pub fn display_name(&self, id: &str, global: &GlobalIndex) -> String {
        if self.is_group() {
            return self
                .title
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| id.to_string());
        }
        let other = self.other_participant(&global.owner).unwrap_or(id);
        match global.user(other) {
            Some(_) => global.display_name(other).to_string(),
            None => id.to_string(),
        }
    }
}

/// Day index (`days/<day>/index.json`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayIndex {
    #[serde(default, deserialize_with = "null_default")]
    pub conversations: BTreeMap<String, ConversationSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Chat,
    Snap,
    Other,
}

/// A single exported message
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub from: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub timestamp: Timestamp,
    #[serde(default, deserialize_with = "null_default")]
    pub is_sender: bool,
    /// Public path of the attached media, when the export kept it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Media length in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self.kind.as_deref().unwrap_or("chat") {
            "chat" => MessageKind::Chat,
            "snap" => MessageKind::Snap,
            _ => MessageKind::Other,
        }
    }

    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    /// Chat message carrying plain text
    pub fn is_text(&self) -> bool {
        self.kind() == MessageKind::Chat && self.media_type() == Some("TEXT")
    }

    pub fn is_video(&self) -> bool {
        matches!(self.media_type(), Some("VIDEO") | Some("video"))
    }

    pub fn is_voice_note(&self) -> bool {
        self.kind() == MessageKind::Chat && self.media_type() == Some("NOTE")
    }

    /// Stable anchor for linking back into the conversation
    pub fn anchor(&self, index: usize) -> String {
        match self.id.as_deref() {
            Some(id) if !id.is_empty() => format!("message-{id}"),
            _ => format!("message-{index}"),
        }
    }
}
