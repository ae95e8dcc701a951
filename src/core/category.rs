use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Bucket a leaf payload is grouped under inside a section.
///
/// Variant order is the fixed order categories are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Commands,
    CopiedFiles,
    CreatedFiles,
    Alerts,
    Notes,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Commands,
        Category::CopiedFiles,
        Category::CreatedFiles,
        Category::Alerts,
        Category::Notes,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Commands => "commands",
            Category::CopiedFiles => "copied_files",
            Category::CreatedFiles => "created_files",
            Category::Alerts => "alerts",
            Category::Notes => "notes",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "commands" => Ok(Category::Commands),
            "copied_files" => Ok(Category::CopiedFiles),
            "created_files" => Ok(Category::CreatedFiles),
            "alerts" => Ok(Category::Alerts),
            "notes" => Ok(Category::Notes),
            other => Err(format!(
                "unknown category: {other} (expected commands|copied_files|created_files|alerts|notes)"
            )),
        }
    }
}

// Serialized as the bare tag so it can key a JSON object.
impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<Category>().map_err(serde::de::Error::custom)
    }
}
