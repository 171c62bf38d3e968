use serde::{Deserialize, Serialize};
use std::fmt;

/// Class of a record in a parcel hierarchy.
///
/// Serialized as the lowercase label (`"parcel"`, `"row"`, `"tree"`,
/// `"pillar"`); any other label round-trips through [`EntityClass::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityClass {
    Parcel,
    Row,
    Tree,
    Pillar,
    Other(String),
}

impl EntityClass {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Parcel => "parcel",
            Self::Row => "row",
            Self::Tree => "tree",
            Self::Pillar => "pillar",
            Self::Other(label) => label.as_str(),
        }
    }

    /// Whether this class sits at the leaf level (below a row).
    pub fn is_entity(&self) -> bool {
        !matches!(self, Self::Parcel | Self::Row)
    }
}

impl From<String> for EntityClass {
    fn from(label: String) -> Self {
        match label.trim().to_lowercase().as_str() {
            "parcel" => Self::Parcel,
            "row" => Self::Row,
            "tree" => Self::Tree,
            "pillar" => Self::Pillar,
            _ => Self::Other(label),
        }
    }
}

impl From<&str> for EntityClass {
    fn from(label: &str) -> Self {
        Self::from(label.to_string())
    }
}

impl From<EntityClass> for String {
    fn from(class: EntityClass) -> Self {
        match class {
            EntityClass::Other(label) => label,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One object of a parcel hierarchy document, in database field layout.
///
/// Field order is the serialization order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityRecord {
    #[serde(rename = "ID")]
    pub id: u64,
    pub class: EntityClass,
    pub number: i64,
    pub class_number: i64,
    #[serde(rename = "ParentID")]
    pub parent_id: Option<u64>,
    #[serde(rename = "BaseID")]
    pub base_id: Option<u64>,
    pub name: Option<String>,
    pub prev_obj_distance: f64,
    /// `POINT(x y)` for leaf records, `None` for parcel and row records.
    pub coordinates: Option<String>,
    pub is_anchor: u8,
    pub created: String,
    /// Epoch milliseconds.
    pub last_modified: i64,
    pub deleted: u8,
}

impl EntityRecord {
    pub fn is_anchor(&self) -> bool {
        self.is_anchor == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_labels() {
        assert_eq!(EntityClass::from("Tree"), EntityClass::Tree);
        assert_eq!(EntityClass::from("pillar"), EntityClass::Pillar);
        assert_eq!(
            EntityClass::from("hail-net post"),
            EntityClass::Other("hail-net post".into())
        );
        assert_eq!(String::from(EntityClass::Row), "row");
        assert!(EntityClass::Tree.is_entity());
        assert!(!EntityClass::Parcel.is_entity());
    }

    #[test]
    fn test_record_field_layout() {
        let record = EntityRecord {
            id: 3,
            class: EntityClass::Tree,
            number: 1,
            class_number: 1,
            parent_id: Some(2),
            base_id: Some(1),
            name: None,
            prev_obj_distance: 0.0,
            coordinates: Some("POINT(11.5 46.25)".into()),
            is_anchor: 1,
            created: "2024-03-01T06:51:10".into(),
            last_modified: 1_709_275_870_000,
            deleted: 0,
        };

        let json = serde_json::to_string(&record).expect("record serializes");
        assert_eq!(
            json,
            r#"{"ID":3,"Class":"tree","Number":1,"ClassNumber":1,"ParentID":2,"BaseID":1,"Name":null,"PrevObjDistance":0.0,"Coordinates":"POINT(11.5 46.25)","IsAnchor":1,"Created":"2024-03-01T06:51:10","LastModified":1709275870000,"Deleted":0}"#
        );

        let parsed: EntityRecord = serde_json::from_str(&json).expect("record parses");
        assert_eq!(parsed, record);
    }
}
