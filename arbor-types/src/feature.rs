use geo::{Geometry, Point};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Named attributes of a feature, ordered by attribute name.
pub type Attributes = BTreeMap<String, AttrValue>;

static NULL_VALUE: AttrValue = AttrValue::Null;

/// A single attribute value as found in a vector layer.
///
/// Survey layers mix integer, floating point and text columns freely (a row
/// number may arrive as `4`, `4.0` or `"4"`), so the accessors below are
/// lenient about the stored representation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl AttrValue {
    /// Whether the value is missing. NaN floats count as missing.
    pub fn is_null(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Integer view of the value.
    ///
    /// Floats are accepted only when finite and integral, text only when it
    /// parses as an integer (or an integral float).
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor_types::feature::AttrValue;
    ///
    /// assert_eq!(AttrValue::Float(3.0).as_i64(), Some(3));
    /// assert_eq!(AttrValue::Float(3.5).as_i64(), None);
    /// assert_eq!(AttrValue::Text(" 12 ".into()).as_i64(), Some(12));
    /// assert_eq!(AttrValue::Null.as_i64(), None);
    /// ```
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Float(v) => float_to_i64(*v),
            Self::Text(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(float_to_i64))
            }
            Self::Null | Self::Bool(_) => None,
        }
    }

    /// Floating point view of the value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) if !v.is_nan() => Some(*v),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Text view of the value, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Grouping key for this value, `None` when missing.
    ///
    /// Integral numbers (in any representation) collapse onto the same
    /// [`AttrKey::Int`], so `4`, `4.0` and `"4"` land in one group.
    pub fn key(&self) -> Option<AttrKey> {
        if self.is_null() {
            return None;
        }
        if let Some(v) = self.as_i64() {
            return Some(AttrKey::Int(v));
        }
        match self {
            Self::Text(s) => Some(AttrKey::Text(s.clone())),
            other => Some(AttrKey::Text(other.to_string())),
        }
    }
}

fn float_to_i64(v: f64) -> Option<i64> {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Normalized, totally ordered form of an attribute value used for grouping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttrKey {
    Int(i64),
    Text(String),
}

impl fmt::Display for AttrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<AttrKey> for AttrValue {
    fn from(key: AttrKey) -> Self {
        match key {
            AttrKey::Int(v) => AttrValue::Int(v),
            AttrKey::Text(s) => AttrValue::Text(s),
        }
    }
}

/// Read and write access to named attributes.
pub trait Properties {
    fn properties(&self) -> &Attributes;

    fn properties_mut(&mut self) -> &mut Attributes;

    /// Value of an attribute, [`AttrValue::Null`] when absent.
    fn attr(&self, name: &str) -> &AttrValue {
        self.properties().get(name).unwrap_or(&NULL_VALUE)
    }

    fn set(&mut self, name: &str, value: AttrValue) {
        self.properties_mut().insert(name.to_string(), value);
    }

    fn has_column(&self, name: &str) -> bool {
        self.properties().contains_key(name)
    }
}

/// A feature as read from a layer: optional geometry plus attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Feature {
    pub geometry: Option<Geometry<f64>>,
    pub properties: Attributes,
}

impl Feature {
    pub fn new(geometry: impl Into<Geometry<f64>>) -> Self {
        Self {
            geometry: Some(geometry.into()),
            properties: Attributes::new(),
        }
    }

    /// A feature without geometry.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.set(name, value.into());
        self
    }
}

impl Properties for Feature {
    fn properties(&self) -> &Attributes {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut Attributes {
        &mut self.properties
    }
}

/// A feature whose geometry is exactly one point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointFeature {
    pub point: Point<f64>,
    pub properties: Attributes,
}

impl PointFeature {
    pub fn new(point: Point<f64>) -> Self {
        Self {
            point,
            properties: Attributes::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.set(name, value.into());
        self
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.point.x()
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.point.y()
    }
}

impl Properties for PointFeature {
    fn properties(&self) -> &Attributes {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut Attributes {
        &mut self.properties
    }
}

impl From<PointFeature> for Feature {
    fn from(feature: PointFeature) -> Self {
        Self {
            geometry: Some(Geometry::Point(feature.point)),
            properties: feature.properties,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_is_null() {
        assert!(AttrValue::Float(f64::NAN).is_null());
        assert!(!AttrValue::Float(0.0).is_null());
        assert!(AttrValue::Null.is_null());
    }

    #[test]
    fn test_key_collapses_integral_numbers() {
        assert_eq!(AttrValue::Int(4).key(), Some(AttrKey::Int(4)));
        assert_eq!(AttrValue::Float(4.0).key(), Some(AttrKey::Int(4)));
        assert_eq!(AttrValue::from("4").key(), Some(AttrKey::Int(4)));
        assert_eq!(
            AttrValue::from("North-5").key(),
            Some(AttrKey::Text("North-5".into()))
        );
        assert_eq!(AttrValue::Null.key(), None);
    }

    #[test]
    fn test_attr_missing_is_null() {
        let feature = Feature::empty().with_attr("Reihe", 2i64);
        assert_eq!(feature.attr("Reihe").as_i64(), Some(2));
        assert!(feature.attr("Baum").is_null());
        assert!(!feature.has_column("Baum"));
    }

    #[test]
    fn test_untagged_deserialization() {
        let values: Vec<AttrValue> = serde_json::from_str(r#"[null, 3, 2.5, "x", true]"#)
            .expect("valid attribute values");
        assert_eq!(
            values,
            vec![
                AttrValue::Null,
                AttrValue::Int(3),
                AttrValue::Float(2.5),
                AttrValue::Text("x".into()),
                AttrValue::Bool(true),
            ]
        );
    }
}
