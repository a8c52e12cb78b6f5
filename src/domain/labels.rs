//! The fixed disease category label set.
//!
//! The network outputs one score per category, positionally aligned with
//! [`DiseaseClass::ALL`]. The order is baked in at training time and must
//! never be rearranged.

use serde::{Deserialize, Serialize};

/// A tomato leaf disease category (nine diseases plus healthy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiseaseClass {
    /// Bacterial spot (Xanthomonas)
    BacterialSpot,
    /// Early blight (Alternaria solani)
    EarlyBlight,
    /// Late blight (Phytophthora infestans)
    LateBlight,
    /// Leaf mold (Passalora fulva)
    LeafMold,
    /// Septoria leaf spot
    SeptoriaLeafSpot,
    /// Two-spotted spider mite damage
    SpiderMites,
    /// Target spot (Corynespora cassiicola)
    TargetSpot,
    /// Tomato yellow leaf curl virus
    YellowLeafCurlVirus,
    /// Tomato mosaic virus
    MosaicVirus,
    /// No disease detected
    Healthy,
}

impl DiseaseClass {
    /// Number of categories in the label set.
    pub const COUNT: usize = 10;

    /// All categories in the order the network was trained with.
    ///
    /// Index `i` of this array corresponds to index `i` of the model's
    /// output score vector.
    pub const ALL: [DiseaseClass; Self::COUNT] = [
        DiseaseClass::BacterialSpot,
        DiseaseClass::EarlyBlight,
        DiseaseClass::LateBlight,
        DiseaseClass::LeafMold,
        DiseaseClass::SeptoriaLeafSpot,
        DiseaseClass::SpiderMites,
        DiseaseClass::TargetSpot,
        DiseaseClass::YellowLeafCurlVirus,
        DiseaseClass::MosaicVirus,
        DiseaseClass::Healthy,
    ];

    /// The training label string for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiseaseClass::BacterialSpot => "Tomato___Bacterial_spot",
            DiseaseClass::EarlyBlight => "Tomato___Early_blight",
            DiseaseClass::LateBlight => "Tomato___Late_blight",
            DiseaseClass::LeafMold => "Tomato___Leaf_Mold",
            DiseaseClass::SeptoriaLeafSpot => "Tomato___Septoria_leaf_spot",
            DiseaseClass::SpiderMites => "Tomato___Spider_mites Two-spotted_spider_mite",
            DiseaseClass::TargetSpot => "Tomato___Target_Spot",
            DiseaseClass::YellowLeafCurlVirus => "Tomato___Tomato_Yellow_Leaf_Curl_Virus",
            DiseaseClass::MosaicVirus => "Tomato___Tomato_mosaic_virus",
            DiseaseClass::Healthy => "Tomato___healthy",
        }
    }

    /// A human-readable name: the training label with the crop prefix
    /// stripped and underscores replaced by spaces.
    pub fn display_name(&self) -> &'static str {
        match self {
            DiseaseClass::BacterialSpot => "Bacterial spot",
            DiseaseClass::EarlyBlight => "Early blight",
            DiseaseClass::LateBlight => "Late blight",
            DiseaseClass::LeafMold => "Leaf Mold",
            DiseaseClass::SeptoriaLeafSpot => "Septoria leaf spot",
            DiseaseClass::SpiderMites => "Spider mites Two-spotted spider mite",
            DiseaseClass::TargetSpot => "Target Spot",
            DiseaseClass::YellowLeafCurlVirus => "Tomato Yellow Leaf Curl Virus",
            DiseaseClass::MosaicVirus => "Tomato mosaic virus",
            DiseaseClass::Healthy => "healthy",
        }
    }

    /// Looks up the category for a class id (the output vector index).
    ///
    /// Returns `None` for ids outside the label set.
    pub fn from_class_id(class_id: usize) -> Option<DiseaseClass> {
        Self::ALL.get(class_id).copied()
    }

    /// Whether this category is the healthy (no disease) category.
    pub fn is_healthy(&self) -> bool {
        matches!(self, DiseaseClass::Healthy)
    }
}

impl std::fmt::Display for DiseaseClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_set_size() {
        assert_eq!(DiseaseClass::ALL.len(), DiseaseClass::COUNT);
        assert_eq!(DiseaseClass::COUNT, 10);
    }

    #[test]
    fn test_training_order() {
        assert_eq!(DiseaseClass::from_class_id(0), Some(DiseaseClass::BacterialSpot));
        assert_eq!(DiseaseClass::from_class_id(8), Some(DiseaseClass::MosaicVirus));
        assert_eq!(DiseaseClass::from_class_id(9), Some(DiseaseClass::Healthy));
        assert_eq!(DiseaseClass::from_class_id(10), None);
    }

    #[test]
    fn test_training_label_strings() {
        assert_eq!(
            DiseaseClass::BacterialSpot.as_str(),
            "Tomato___Bacterial_spot"
        );
        assert_eq!(
            DiseaseClass::SpiderMites.as_str(),
            "Tomato___Spider_mites Two-spotted_spider_mite"
        );
        assert_eq!(DiseaseClass::Healthy.as_str(), "Tomato___healthy");
    }

    #[test]
    fn test_display_name_strips_prefix() {
        assert_eq!(DiseaseClass::EarlyBlight.display_name(), "Early blight");
        assert_eq!(
            DiseaseClass::YellowLeafCurlVirus.display_name(),
            "Tomato Yellow Leaf Curl Virus"
        );
    }

    #[test]
    fn test_only_one_healthy_category() {
        let healthy = DiseaseClass::ALL.iter().filter(|c| c.is_healthy()).count();
        assert_eq!(healthy, 1);
    }
}
