// Normalizer configuration and fixed display labels
use crate::error::NormalizeError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENCY: &str = "THB";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    pub default_currency: String,
    pub group_separator: String,
    pub labels: DisplayLabels,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
            group_separator: ",".to_string(),
            labels: DisplayLabels::default(),
        }
    }
}

impl NormalizerConfig {
    // Load from JSON; absent keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, NormalizeError> {
        Ok(serde_json::from_str(json)?)
    }
}

// Every fixed string a summary can contain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayLabels {
    pub hour_unit: String,
    pub minute_unit: String,
    pub unspecified: String,
    pub price_unavailable: String,
    pub no_data: String,
    pub non_stop: String,
    pub stop_suffix: String,
    pub recommended_tag: String,
    pub non_stop_tag: String,
    pub refundable: String,
    pub non_refundable: String,
    pub nights_suffix: String,
    pub star_suffix: String,
    pub seats_suffix: String,
    pub distance_unit: String,
    pub transport_car_rental: String,
    pub transport_bus: String,
    pub transport_train: String,
    pub transport_metro: String,
    pub transport_ferry: String,
    pub transport_transfer: String,
    pub transport_other: String,
}

impl Default for DisplayLabels {
    fn default() -> Self {
        Self {
            hour_unit: "ชม".to_string(),
            minute_unit: "นาที".to_string(),
            unspecified: "ไม่ระบุ".to_string(),
            price_unavailable: "ไม่ระบุราคา".to_string(),
            no_data: "ไม่มีข้อมูล".to_string(),
            non_stop: "Non-stop".to_string(),
            stop_suffix: "stop".to_string(),
            recommended_tag: "แนะนำ".to_string(),
            non_stop_tag: "บินตรง".to_string(),
            refundable: "คืนเงินได้".to_string(),
            non_refundable: "คืนเงินไม่ได้".to_string(),
            nights_suffix: "คืน".to_string(),
            star_suffix: "ดาว".to_string(),
            seats_suffix: "ที่นั่ง".to_string(),
            distance_unit: "กม.".to_string(),
            transport_car_rental: "🚗 รถเช่า".to_string(),
            transport_bus: "🚌 รถบัส".to_string(),
            transport_train: "🚆 รถไฟ".to_string(),
            transport_metro: "🚇 รถไฟฟ้า".to_string(),
            transport_ferry: "⛴️ เรือเฟอร์รี่".to_string(),
            transport_transfer: "🚐 รถรับส่ง".to_string(),
            transport_other: "🚘 การเดินทาง".to_string(),
        }
    }
}
