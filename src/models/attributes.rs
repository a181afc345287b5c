use serde::{Deserialize, Serialize};

/// One of the four garment categories compared by the similarity scorer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum AttributeSlot {
    Top,
    Bottom,
    Outerwear,
    Shoes,
}

impl AttributeSlot {
    pub const ALL: [AttributeSlot; 4] = [
        AttributeSlot::Top,
        AttributeSlot::Bottom,
        AttributeSlot::Outerwear,
        AttributeSlot::Shoes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeSlot::Top => "top",
            AttributeSlot::Bottom => "bottom",
            AttributeSlot::Outerwear => "outerwear",
            AttributeSlot::Shoes => "shoes",
        }
    }
}

/// Classified description of one garment or outfit image.
///
/// Produced by the upstream classifier at upload time and treated as
/// immutable afterwards. Every slot is free text such as "blue denim jacket".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClothingAttributeRecord {
    #[serde(default)]
    pub top: Option<String>,
    #[serde(default)]
    pub bottom: Option<String>,
    #[serde(default)]
    pub outerwear: Option<String>,
    #[serde(default)]
    pub shoes: Option<String>,
}

impl ClothingAttributeRecord {
    /// Populated text for `slot`. Blank values count as unpopulated.
    pub fn slot(&self, slot: AttributeSlot) -> Option<&str> {
        let value = match slot {
            AttributeSlot::Top => self.top.as_deref(),
            AttributeSlot::Bottom => self.bottom.as_deref(),
            AttributeSlot::Outerwear => self.outerwear.as_deref(),
            AttributeSlot::Shoes => self.shoes.as_deref(),
        };
        value.filter(|text| !text.trim().is_empty())
    }

    pub fn populated_slots(&self) -> impl Iterator<Item = AttributeSlot> + '_ {
        AttributeSlot::ALL
            .into_iter()
            .filter(move |slot| self.slot(*slot).is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.populated_slots().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_slots_are_unpopulated() {
        let record = ClothingAttributeRecord {
            top: Some("   ".into()),
            bottom: Some(String::new()),
            outerwear: None,
            shoes: Some("white sneakers".into()),
        };

        assert_eq!(record.slot(AttributeSlot::Top), None);
        assert_eq!(record.slot(AttributeSlot::Bottom), None);
        assert_eq!(record.slot(AttributeSlot::Shoes), Some("white sneakers"));
        assert_eq!(
            record.populated_slots().collect::<Vec<_>>(),
            vec![AttributeSlot::Shoes]
        );
        assert!(!record.is_empty());
        assert!(ClothingAttributeRecord::default().is_empty());
    }

    #[test]
    fn deserializes_partial_analysis() {
        let record: ClothingAttributeRecord =
            serde_json::from_str(r#"{"top":"red silk blouse"}"#).unwrap();
        assert_eq!(record.top.as_deref(), Some("red silk blouse"));
        assert!(record.bottom.is_none());
    }
}
