// Raw choice records as delivered by the upstream planning service
use crate::error::{json_kind, NormalizeError};
use crate::lenient;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceCategory {
    Flight,
    Hotel,
    Transport,
}

impl ChoiceCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ChoiceCategory::Flight => "flight",
            ChoiceCategory::Hotel => "hotel",
            ChoiceCategory::Transport => "transport",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChoiceRecord {
    #[serde(deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub label: Option<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub tags: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::flag")]
    pub recommended: Option<bool>,
    #[serde(deserialize_with = "lenient::optional")]
    pub flight: Option<FlightPayload>,
    #[serde(deserialize_with = "lenient::optional")]
    pub hotel: Option<HotelOffer>,
    #[serde(deserialize_with = "lenient::optional")]
    pub transport: Option<TransportOffer>,
    #[serde(deserialize_with = "lenient::optional")]
    pub car: Option<TransportOffer>,
    #[serde(deserialize_with = "lenient::scalar")]
    pub total_price: Option<Value>,
    #[serde(deserialize_with = "lenient::scalar")]
    pub price: Option<Value>,
    #[serde(deserialize_with = "lenient::text")]
    pub total_price_text: Option<String>,
    #[serde(deserialize_with = "lenient::optional")]
    pub price_breakdown: Option<PriceBreakdown>,
    #[serde(deserialize_with = "lenient::text")]
    pub currency: Option<String>,
}

impl ChoiceRecord {
    // Parse one record from JSON text. Fails only when the text is not a JSON object.
    pub fn from_json(json: &str) -> Result<Self, NormalizeError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, NormalizeError> {
        if !value.is_object() {
            return Err(NormalizeError::InvalidShape {
                expected: "object",
                found: json_kind(&value),
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    // Parse a JSON array of records; entries that are not objects are skipped
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, NormalizeError> {
        Self::list_from_value(serde_json::from_str(json)?)
    }

    pub fn list_from_value(value: Value) -> Result<Vec<Self>, NormalizeError> {
        match value {
            Value::Array(items) => Ok(items
                .into_iter()
                .filter_map(|item| Self::from_value(item).ok())
                .collect()),
            other => Err(NormalizeError::InvalidShape {
                expected: "array",
                found: json_kind(&other),
            }),
        }
    }

    pub fn is_recommended(&self) -> bool {
        self.recommended.unwrap_or(false)
    }

    // Category of the payload that is "the" choice: flight, then hotel, then car/transport
    pub fn detect_category(&self) -> Option<ChoiceCategory> {
        if self.flight.is_some() {
            Some(ChoiceCategory::Flight)
        } else if self.hotel.is_some() {
            Some(ChoiceCategory::Hotel)
        } else if self.car.is_some() || self.transport.is_some() {
            Some(ChoiceCategory::Transport)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PriceBreakdown {
    #[serde(deserialize_with = "lenient::text")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FlightPayload {
    #[serde(deserialize_with = "lenient::list")]
    pub segments: Vec<FlightSegment>,
    #[serde(deserialize_with = "lenient::scalar")]
    pub price_total: Option<Value>,
    #[serde(deserialize_with = "lenient::text")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FlightSegment {
    #[serde(deserialize_with = "lenient::text")]
    pub from: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub to: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub carrier: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub flight_number: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub depart_time: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub depart_at: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub arrive_time: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub arrive_at: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub arrive_plus: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub aircraft_code: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HotelOffer {
    // Spellings seen upstream are kept apart so a payload carrying several
    // of them still deserializes; `HotelNormalizer` picks one.
    #[serde(rename = "hotelName", deserialize_with = "lenient::text")]
    pub hotel_name: Option<String>,
    #[serde(rename = "hotel_name", deserialize_with = "lenient::text")]
    pub hotel_name_snake: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::scalar")]
    pub nights: Option<Value>,
    #[serde(rename = "boardType", deserialize_with = "lenient::text")]
    pub board_type: Option<String>,
    #[serde(rename = "board_type", deserialize_with = "lenient::text")]
    pub board_type_snake: Option<String>,
    #[serde(deserialize_with = "lenient::scalar")]
    pub star_rating: Option<Value>,
    #[serde(deserialize_with = "lenient::text")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient::scalar")]
    pub price_total: Option<Value>,
    #[serde(deserialize_with = "lenient::text")]
    pub currency: Option<String>,
    #[serde(deserialize_with = "lenient::optional")]
    pub booking: Option<HotelBooking>,
    #[serde(deserialize_with = "lenient::optional")]
    pub location: Option<HotelLocation>,
    #[serde(deserialize_with = "lenient::optional")]
    pub visuals: Option<HotelVisuals>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HotelBooking {
    #[serde(deserialize_with = "lenient::optional")]
    pub pricing: Option<HotelPricing>,
    #[serde(deserialize_with = "lenient::optional")]
    pub policies: Option<HotelPolicies>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HotelPricing {
    #[serde(deserialize_with = "lenient::scalar")]
    pub price_per_night: Option<Value>,
    #[serde(deserialize_with = "lenient::scalar")]
    pub taxes_and_fees: Option<Value>,
    #[serde(deserialize_with = "lenient::scalar")]
    pub total_amount: Option<Value>,
    #[serde(deserialize_with = "lenient::text")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HotelPolicies {
    #[serde(deserialize_with = "lenient::flag")]
    pub is_refundable: Option<bool>,
    #[serde(deserialize_with = "lenient::text")]
    pub meal_plan: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HotelLocation {
    #[serde(deserialize_with = "lenient::text")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HotelVisuals {
    #[serde(deserialize_with = "lenient::text")]
    pub image_url: Option<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportKind {
    CarRental,
    Bus,
    Train,
    Metro,
    Ferry,
    Transfer,
    Other(String),
}

impl TransportKind {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "car_rental" | "car" => TransportKind::CarRental,
            "bus" => TransportKind::Bus,
            "train" => TransportKind::Train,
            "metro" => TransportKind::Metro,
            "ferry" => TransportKind::Ferry,
            "transfer" => TransportKind::Transfer,
            _ => TransportKind::Other(raw.trim().to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TransportOffer {
    #[serde(rename = "type", deserialize_with = "lenient::text")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient::scalar")]
    pub price: Option<Value>,
    #[serde(deserialize_with = "lenient::scalar")]
    pub price_amount: Option<Value>,
    #[serde(deserialize_with = "lenient::text")]
    pub currency: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub duration: Option<String>,
    #[serde(deserialize_with = "lenient::scalar")]
    pub distance: Option<Value>,
    #[serde(deserialize_with = "lenient::text")]
    pub provider: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub company: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub vehicle_type: Option<String>,
    #[serde(deserialize_with = "lenient::scalar")]
    pub seats: Option<Value>,
    #[serde(deserialize_with = "lenient::scalar")]
    pub capacity: Option<Value>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub features: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub amenities: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::text")]
    pub note: Option<String>,
}

impl TransportOffer {
    pub fn transport_kind(&self) -> Option<TransportKind> {
        lenient::non_blank(self.kind.as_ref()).map(TransportKind::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_parse_flight_record() {
        let json = r#"{
            "id": 7,
            "label": "BKK - NRT",
            "tags": ["แนะนำ", "แนะนำ"],
            "recommended": true,
            "total_price": 2500,
            "flight": {
                "segments": [
                    {"from": "BKK", "to": "NRT", "carrier": "TG", "flight_number": 642,
                     "depart_at": "2025-06-11T08:00:00", "arrive_at": "2025-06-11T16:00:00",
                     "duration": "PT6H"}
                ]
            }
        }"#;

        let record = ChoiceRecord::from_json(json).unwrap();
        assert_eq!(record.id.as_deref(), Some("7"));
        assert!(record.is_recommended());
        assert_eq!(record.detect_category(), Some(ChoiceCategory::Flight));

        let flight = record.flight.unwrap();
        assert_eq!(flight.segments.len(), 1);
        assert_eq!(flight.segments[0].flight_number.as_deref(), Some("642"));
    }

    #[test]
    fn test_hotel_snake_case_keys() {
        let json = r#"{"hotel": {"hotel_name": "Riverside", "board_type": "BB", "nights": 2}}"#;
        let record = ChoiceRecord::from_json(json).unwrap();
        let hotel = record.hotel.unwrap();
        assert_eq!(hotel.hotel_name_snake.as_deref(), Some("Riverside"));
        assert_eq!(hotel.board_type_snake.as_deref(), Some("BB"));
        assert_eq!(hotel.hotel_name, None);
    }

    #[test]
    fn test_hotel_with_every_name_spelling_is_kept() {
        let json = r#"{"total_price": 3200, "hotel": {
            "hotelName": "Riverside", "hotel_name": "riverside", "name": "Riverside CNX",
            "boardType": "BB", "board_type": "bb", "nights": 2}}"#;
        let record = ChoiceRecord::from_json(json).unwrap();
        assert_eq!(record.detect_category(), Some(ChoiceCategory::Hotel));

        let hotel = record.hotel.unwrap();
        assert_eq!(hotel.hotel_name.as_deref(), Some("Riverside"));
        assert_eq!(hotel.hotel_name_snake.as_deref(), Some("riverside"));
        assert_eq!(hotel.name.as_deref(), Some("Riverside CNX"));
        assert_eq!(hotel.board_type.as_deref(), Some("BB"));
        assert_eq!(hotel.board_type_snake.as_deref(), Some("bb"));
        assert_eq!(hotel.nights, Some(serde_json::json!(2)));
    }

    #[test]
    fn test_repeated_key_keeps_last_value() {
        let json = r#"{"id": "a", "id": "b", "hotel": {"hotelName": "First", "hotelName": "Second"}}"#;
        let record = ChoiceRecord::from_json(json).unwrap();
        assert_eq!(record.id.as_deref(), Some("b"));
        assert_eq!(record.hotel.unwrap().hotel_name.as_deref(), Some("Second"));
    }

    #[test]
    fn test_bad_field_drops_only_that_field() {
        let json = r#"{
            "id": {"nested": true},
            "label": "Kept",
            "tags": {"not": "a list"},
            "recommended": "maybe",
            "total_price": [1, 2],
            "currency": 7,
            "hotel": {
                "hotelName": ["not", "text"],
                "name": "Fallback Name",
                "nights": {"n": 2},
                "boardType": "HB",
                "star_rating": 4,
                "booking": "none"
            }
        }"#;
        let record = ChoiceRecord::from_json(json).unwrap();

        assert_eq!(record.id, None);
        assert_eq!(record.label.as_deref(), Some("Kept"));
        assert_eq!(record.tags, None);
        assert_eq!(record.recommended, None);
        assert_eq!(record.total_price, None);
        assert_eq!(record.currency.as_deref(), Some("7"));

        let hotel = record.hotel.unwrap();
        assert_eq!(hotel.hotel_name, None);
        assert_eq!(hotel.name.as_deref(), Some("Fallback Name"));
        assert_eq!(hotel.nights, None);
        assert_eq!(hotel.board_type.as_deref(), Some("HB"));
        assert_eq!(hotel.star_rating, Some(serde_json::json!(4)));
        assert_eq!(hotel.booking, None);
    }

    #[test]
    fn test_malformed_payload_is_dropped() {
        let json = r#"{"id": "x", "flight": "not an object", "hotel": {"hotelName": "Kept"}}"#;
        let record = ChoiceRecord::from_json(json).unwrap();
        assert!(record.flight.is_none());
        assert_eq!(record.detect_category(), Some(ChoiceCategory::Hotel));
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = ChoiceRecord::from_json("[1, 2]").unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::InvalidShape {
                expected: "object",
                found: "array"
            }
        ));
    }

    #[test]
    fn test_list_skips_non_objects() {
        let records = ChoiceRecord::list_from_json(r#"[{"id": "a"}, 5, {"id": "b"}]"#).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_car_before_transport_in_detection() {
        let record = ChoiceRecord {
            car: Some(TransportOffer::default()),
            ..Default::default()
        };
        assert_eq!(record.detect_category(), Some(ChoiceCategory::Transport));
        assert_eq!(ChoiceRecord::default().detect_category(), None);
    }

    #[test_case("car_rental", TransportKind::CarRental; "snake case")]
    #[test_case("Car Rental", TransportKind::CarRental; "spaced")]
    #[test_case("BUS", TransportKind::Bus; "upper case")]
    #[test_case("metro", TransportKind::Metro; "metro")]
    #[test_case("tuk_tuk", TransportKind::Other("tuk_tuk".to_string()); "unknown kept")]
    fn test_transport_kind_parse(raw: &str, expected: TransportKind) {
        assert_eq!(TransportKind::parse(raw), expected);
    }
}
