// Ground transport offers: rentals, buses, trains, ferries and transfers
use crate::config::DisplayLabels;
use crate::hotel::whole_number;
use crate::lenient::{finite_number, non_blank};
use crate::normalizer::Normalizer;
use crate::record::{ChoiceCategory, ChoiceRecord, TransportKind, TransportOffer};
use crate::summary::{ChoiceNormalizer, NormalizedSummary, SummaryDetails, TransportDetails};
use serde_json::Value;

impl TransportKind {
    pub fn as_str(&self) -> &str {
        match self {
            TransportKind::CarRental => "car_rental",
            TransportKind::Bus => "bus",
            TransportKind::Train => "train",
            TransportKind::Metro => "metro",
            TransportKind::Ferry => "ferry",
            TransportKind::Transfer => "transfer",
            TransportKind::Other(raw) => raw,
        }
    }

    pub fn label<'l>(&self, labels: &'l DisplayLabels) -> &'l str {
        match self {
            TransportKind::CarRental => &labels.transport_car_rental,
            TransportKind::Bus => &labels.transport_bus,
            TransportKind::Train => &labels.transport_train,
            TransportKind::Metro => &labels.transport_metro,
            TransportKind::Ferry => &labels.transport_ferry,
            TransportKind::Transfer => &labels.transport_transfer,
            TransportKind::Other(_) => &labels.transport_other,
        }
    }
}

pub struct TransportNormalizer<'a> {
    normalizer: &'a Normalizer,
}

impl<'a> TransportNormalizer<'a> {
    pub fn new(normalizer: &'a Normalizer) -> Self {
        Self { normalizer }
    }

    // A `car` payload makes the record a rental whatever `transport.type` says
    pub fn select<'r>(&self, record: &'r ChoiceRecord) -> Option<(&'r TransportOffer, Option<TransportKind>)> {
        if let Some(car) = record.car.as_ref() {
            return Some((car, Some(TransportKind::CarRental)));
        }
        record
            .transport
            .as_ref()
            .map(|offer| (offer, offer.transport_kind()))
    }

    fn details(&self, offer: &TransportOffer, kind: Option<TransportKind>) -> TransportDetails {
        let labels = self.normalizer.labels();

        TransportDetails {
            type_label: kind
                .as_ref()
                .map_or(labels.transport_other.as_str(), |k| k.label(labels))
                .to_string(),
            kind: kind.as_ref().map(|k| k.as_str().to_string()),
            provider: non_blank(offer.provider.as_ref())
                .or_else(|| non_blank(offer.company.as_ref()))
                .map(str::to_string),
            vehicle_type: non_blank(offer.vehicle_type.as_ref()).map(str::to_string),
            seats_label: whole_number(offer.seats.as_ref())
                .or_else(|| whole_number(offer.capacity.as_ref()))
                .map(|seats| format!("{} {}", seats, labels.seats_suffix)),
            features: offer
                .features
                .as_ref()
                .filter(|list| !list.is_empty())
                .or(offer.amenities.as_ref())
                .map(|list| {
                    list.iter()
                        .map(|f| f.trim())
                        .filter(|f| !f.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            duration: non_blank(offer.duration.as_ref())
                .map(|raw| self.normalizer.durations().format_iso(raw)),
            distance_label: distance_label(offer.distance.as_ref(), labels),
            note: non_blank(offer.note.as_ref()).map(str::to_string),
        }
    }
}

impl ChoiceNormalizer for TransportNormalizer<'_> {
    fn category(&self) -> ChoiceCategory {
        ChoiceCategory::Transport
    }

    fn normalize(&self, record: &ChoiceRecord) -> NormalizedSummary {
        let price = self.normalizer.resolve_price(record, ChoiceCategory::Transport);
        let details = match self.select(record) {
            Some((offer, kind)) => self.details(offer, kind),
            None => {
                return self
                    .normalizer
                    .unavailable(record, Some(ChoiceCategory::Transport), price)
            }
        };

        self.normalizer.summarize(
            record,
            ChoiceCategory::Transport,
            price,
            SummaryDetails::Transport(details),
            &[],
            Vec::new(),
        )
    }
}

// Numbers are kilometres; text is shown as given
fn distance_label(distance: Option<&Value>, labels: &DisplayLabels) -> Option<String> {
    match distance? {
        Value::String(text) => non_blank(Some(text)).map(str::to_string),
        value => finite_number(Some(value)).map(|km| format!("{} {}", km, labels.distance_unit)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn transport_details(summary: &NormalizedSummary) -> &TransportDetails {
        match &summary.details {
            SummaryDetails::Transport(details) => details,
            other => panic!("expected transport details, got {:?}", other),
        }
    }

    #[test_case("car_rental", "🚗 รถเช่า"; "car rental")]
    #[test_case("bus", "🚌 รถบัส"; "bus")]
    #[test_case("train", "🚆 รถไฟ"; "train")]
    #[test_case("metro", "🚇 รถไฟฟ้า"; "metro")]
    #[test_case("ferry", "⛴️ เรือเฟอร์รี่"; "ferry")]
    #[test_case("transfer", "🚐 รถรับส่ง"; "transfer")]
    #[test_case("songthaew", "🚘 การเดินทาง"; "unknown type")]
    fn test_type_labels(kind: &str, expected: &str) {
        let record = ChoiceRecord {
            transport: Some(TransportOffer {
                kind: Some(kind.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let summary = Normalizer::default().transports().normalize(&record);
        assert_eq!(transport_details(&summary).type_label, expected);
    }

    #[test]
    fn test_car_payload_takes_precedence() {
        let record = ChoiceRecord::from_json(
            r#"{
                "transport": {"type": "bus", "price": 300, "provider": "Green Bus"},
                "car": {"price_amount": 1500, "company": "Drive Thai", "vehicle_type": "SUV", "capacity": 5}
            }"#,
        )
        .unwrap();

        let summary = Normalizer::default().transports().normalize(&record);
        let details = transport_details(&summary);

        assert_eq!(details.kind.as_deref(), Some("car_rental"));
        assert_eq!(details.type_label, "🚗 รถเช่า");
        assert_eq!(details.provider.as_deref(), Some("Drive Thai"));
        assert_eq!(details.vehicle_type.as_deref(), Some("SUV"));
        assert_eq!(details.seats_label.as_deref(), Some("5 ที่นั่ง"));
        assert_eq!(summary.display_total_price, "THB 1,500");
    }

    #[test]
    fn test_transport_fields() {
        let record = ChoiceRecord::from_json(
            r#"{
                "transport": {
                    "type": "ferry",
                    "price": 450,
                    "currency": "THB",
                    "duration": "PT1H30M",
                    "distance": 42.5,
                    "provider": "Lomprayah",
                    "seats": "120",
                    "features": [],
                    "amenities": ["แอร์", " ", "ห้องน้ำ"],
                    "note": "เช็คอินก่อน 30 นาที"
                }
            }"#,
        )
        .unwrap();

        let summary = Normalizer::default().transports().normalize(&record);
        let details = transport_details(&summary);

        assert_eq!(summary.display_total_price, "THB 450");
        assert_eq!(details.duration.as_deref(), Some("1ชม 30นาที"));
        assert_eq!(details.distance_label.as_deref(), Some("42.5 กม."));
        assert_eq!(details.seats_label.as_deref(), Some("120 ที่นั่ง"));
        assert_eq!(details.features, vec!["แอร์".to_string(), "ห้องน้ำ".to_string()]);
        assert_eq!(details.note.as_deref(), Some("เช็คอินก่อน 30 นาที"));
    }

    #[test]
    fn test_preformatted_values_pass_through() {
        let record = ChoiceRecord {
            transport: Some(TransportOffer {
                duration: Some("ประมาณ 3 ชั่วโมง".to_string()),
                distance: Some(json!("120 km")),
                ..Default::default()
            }),
            ..Default::default()
        };
        let summary = Normalizer::default().transports().normalize(&record);
        let details = transport_details(&summary);

        assert_eq!(details.kind, None);
        assert_eq!(details.type_label, "🚘 การเดินทาง");
        assert_eq!(details.duration.as_deref(), Some("ประมาณ 3 ชั่วโมง"));
        assert_eq!(details.distance_label.as_deref(), Some("120 km"));
    }

    #[test]
    fn test_missing_payload() {
        let summary = Normalizer::default()
            .transports()
            .normalize(&ChoiceRecord::default());
        assert!(!summary.is_available());
        assert_eq!(summary.category, Some(ChoiceCategory::Transport));
    }
}
