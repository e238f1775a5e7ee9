use trip_choice_normalizer::summary::{HotelPricingView, SummaryDetails};
use trip_choice_normalizer::{
    ChoiceCategory, ChoiceRecord, NormalizedSummary, Normalizer, NormalizerConfig,
};

const FIXTURE: &str = include_str!("fixtures/choices.json");

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("trip_choice_normalizer=debug")),
        )
        .with_test_writer()
        .try_init();
}

fn summaries() -> Vec<NormalizedSummary> {
    init_logging();
    Normalizer::default()
        .normalize_json(FIXTURE)
        .expect("fixture is valid JSON")
}

#[test]
fn test_fixture_skips_non_object_entries() {
    let summaries = summaries();
    assert_eq!(summaries.len(), 4);
    let ids: Vec<_> = summaries.iter().map(|s| s.id.as_deref()).collect();
    assert_eq!(
        ids,
        vec![Some("flight-1"), Some("hotel-1"), Some("transport-1"), Some("404")]
    );
}

#[test]
fn test_flight_end_to_end() {
    let summaries = summaries();
    let flight = &summaries[0];

    assert_eq!(flight.category, Some(ChoiceCategory::Flight));
    assert_eq!(flight.display_total_price, "THB 2,500");
    assert_eq!(flight.resolved_tags.as_slice(), ["แนะนำ", "ประหยัด"]);

    let details = match &flight.details {
        SummaryDetails::Flight(details) => details,
        other => panic!("expected flight details, got {:?}", other),
    };
    assert_eq!(details.route, "CNX → NRT");
    assert_eq!(details.stop_label, "1 stop");
    assert_eq!(details.carrier_label, "การบินไทย");
    assert_eq!(details.total_duration.as_deref(), Some("24ชม 45นาที"));
    assert_eq!(details.layovers[0].wait.as_deref(), Some("15ชม 20นาที"));
    assert_eq!(
        details.layovers[0].airport_name.as_deref(),
        Some("ท่าอากาศยานสุวรรณภูมิ")
    );
    assert_eq!(details.segments[1].flight_number.as_deref(), Some("TG642"));
    assert_eq!(
        details.segments[1].aircraft.as_deref(),
        Some("Boeing 777-300ER")
    );
}

#[test]
fn test_hotel_end_to_end() {
    let summaries = summaries();
    let hotel = &summaries[1];

    assert_eq!(hotel.display_total_price, "THB 3,200");
    assert_eq!(hotel.resolved_tags.as_slice(), ["ใกล้สถานี"]);

    let details = match &hotel.details {
        SummaryDetails::Hotel(details) => details,
        other => panic!("expected hotel details, got {:?}", other),
    };
    assert!(matches!(details.pricing, HotelPricingView::Breakdown { .. }));
    assert_eq!(details.refund_label.as_deref(), Some("คืนเงินไม่ได้"));
    assert_eq!(details.star_label.as_deref(), Some("4 ดาว"));
}

#[test]
fn test_transport_end_to_end() {
    let summaries = summaries();
    let train = &summaries[2];

    assert_eq!(train.display_currency, "USD");
    assert_eq!(train.display_total_price, "USD 38.5");

    let details = match &train.details {
        SummaryDetails::Transport(details) => details,
        other => panic!("expected transport details, got {:?}", other),
    };
    assert_eq!(details.type_label, "🚆 รถไฟ");
    assert_eq!(details.provider.as_deref(), Some("SRT"));
    assert_eq!(details.duration.as_deref(), Some("11ชม"));
}

#[test]
fn test_malformed_payload_degrades_to_unavailable() {
    let summaries = summaries();
    let broken = &summaries[3];

    assert!(!broken.is_available());
    assert_eq!(broken.category, None);
    assert_eq!(broken.display_total_price, "สอบถามราคา");
    assert!(!broken.price.is_real);
}

#[test]
fn test_summary_serializes_for_renderer() {
    let summaries = summaries();
    let json = serde_json::to_value(&summaries[0]).unwrap();

    assert_eq!(json["displayTotalPrice"], "THB 2,500");
    assert_eq!(json["displayCurrency"], "THB");
    assert_eq!(json["details"]["kind"], "flight");
    assert_eq!(json["details"]["stopLabel"], "1 stop");
    assert_eq!(json["resolvedTags"][0], "แนะนำ");
    assert_eq!(json["price"]["amountSource"], "total_price");
}

#[test]
fn test_category_normalizer_ignores_other_payloads() {
    init_logging();
    let record = ChoiceRecord::from_json(
        r#"{"hotel": {"hotelName": "H", "price_total": 900}, "flight": {"price_total": 4000, "segments": []}}"#,
    )
    .unwrap();

    let normalizer = Normalizer::default();
    let as_hotel = normalizer.normalize(ChoiceCategory::Hotel, &record);
    assert_eq!(as_hotel.display_total_price, "THB 900");

    let as_flight = normalizer.normalize(ChoiceCategory::Flight, &record);
    assert!(!as_flight.is_available());
    assert_eq!(as_flight.display_total_price, "THB 4,000");
}

#[test]
fn test_custom_config_labels() {
    init_logging();
    let config = NormalizerConfig::from_json(
        r#"{"labels": {"non_stop": "Direct", "non_stop_tag": "direct", "hour_unit": "h", "minute_unit": "m"}}"#,
    )
    .unwrap();
    let normalizer = Normalizer::new(config, Default::default());

    let record = ChoiceRecord::from_json(
        r#"{"flight": {"segments": [{"from": "BKK", "to": "HKT",
            "depart_at": "2025-06-11T07:00:00", "arrive_at": "2025-06-11T08:25:00"}]}}"#,
    )
    .unwrap();
    let summary = normalizer.normalize_auto(&record);

    let details = match &summary.details {
        SummaryDetails::Flight(details) => details,
        other => panic!("expected flight details, got {:?}", other),
    };
    assert_eq!(details.stop_label, "Direct");
    assert_eq!(details.total_duration.as_deref(), Some("1h 25m"));
    assert_eq!(summary.resolved_tags.as_slice(), ["direct"]);
}
