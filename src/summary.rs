// Display-ready output shared by every choice category
use crate::config::DisplayLabels;
use crate::error::Degraded;
use crate::layover::LayoverAnnotation;
use crate::price::ResolvedPrice;
use crate::record::{ChoiceCategory, ChoiceRecord};
use crate::tags::TagSet;
use serde::Serialize;

// Turns one raw record of a fixed category into a summary. Never fails.
pub trait ChoiceNormalizer {
    fn category(&self) -> ChoiceCategory;

    fn normalize(&self, record: &ChoiceRecord) -> NormalizedSummary;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSummary {
    pub id: Option<String>,
    pub label: Option<String>,
    pub category: Option<ChoiceCategory>,
    pub display_total_price: String,
    pub display_currency: String,
    pub price: ResolvedPrice,
    pub details: SummaryDetails,
    pub resolved_tags: TagSet,
    pub degradations: Vec<Degraded>,
}

impl NormalizedSummary {
    pub fn is_available(&self) -> bool {
        !matches!(self.details, SummaryDetails::Unavailable { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SummaryDetails {
    Flight(FlightDetails),
    Hotel(HotelDetails),
    Transport(TransportDetails),
    Unavailable { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDetails {
    pub origin: String,
    pub destination: String,
    pub route: String,
    pub route_names: String,
    pub stop_count: usize,
    pub stop_label: String,
    pub carriers: Vec<String>,
    pub carrier_label: String,
    pub total_duration: Option<String>,
    pub segments: Vec<SegmentView>,
    pub layovers: Vec<LayoverAnnotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentView {
    pub from: Option<String>,
    pub from_name: Option<String>,
    pub to: Option<String>,
    pub to_name: Option<String>,
    pub carrier: Option<String>,
    pub carrier_name: Option<String>,
    pub flight_number: Option<String>,
    pub depart_clock: Option<String>,
    pub arrive_clock: Option<String>,
    pub arrive_plus: Option<String>,
    pub aircraft: Option<String>,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelDetails {
    pub name: String,
    pub nights: Option<u64>,
    pub nights_label: Option<String>,
    pub board_type: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub star_label: Option<String>,
    pub meal_plan: Option<String>,
    pub image_url: Option<String>,
    pub pricing: HotelPricingView,
    pub refund_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum HotelPricingView {
    Breakdown {
        per_night: Option<String>,
        taxes_and_fees: Option<String>,
        total: String,
    },
    Flat {
        price: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportDetails {
    pub kind: Option<String>,
    pub type_label: String,
    pub provider: Option<String>,
    pub vehicle_type: Option<String>,
    pub seats_label: Option<String>,
    pub features: Vec<String>,
    pub duration: Option<String>,
    pub distance_label: Option<String>,
    pub note: Option<String>,
}

// Caller tags deduplicated, then the automatic "recommended" tag
pub fn base_tags(record: &ChoiceRecord, labels: &DisplayLabels) -> TagSet {
    let mut tags = TagSet::from_tags(record.tags.iter().flatten().cloned());
    if record.is_recommended() {
        tags.insert(labels.recommended_tag.clone());
    }
    tags
}
