/// Classification of a bill-of-quantities line item.
///
/// Carried through a calculation for the caller's bookkeeping and used by
/// tactics to pick a sequence. The arithmetic never looks at it.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemType {
    /// Own labour
    #[default]
    Work,
    /// Own material
    Material,
    /// Sub-contracted labour
    SubWork,
    /// Sub-contracted material
    SubMaterial,
    /// Labour component of a composite item
    WorkComponent,
    /// Material component of a composite item
    MaterialComponent,
}

impl ItemType {
    pub const fn is_subcontracted(self) -> bool {
        matches!(self, ItemType::SubWork | ItemType::SubMaterial)
    }

    pub const fn is_component(self) -> bool {
        matches!(self, ItemType::WorkComponent | ItemType::MaterialComponent)
    }
}
