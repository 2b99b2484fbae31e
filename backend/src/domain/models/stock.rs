use shared::BloodType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockEntry {
    pub blood_type: BloodType,
    pub quantity: u32,
}
