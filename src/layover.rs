// Waiting time between consecutive flight segments
use crate::catalog::Catalog;
use crate::duration::{DurationFormatter, Instant};
use crate::error::{Degraded, Resolution};
use crate::lenient::non_blank;
use crate::precedence::{first_valid, Candidate};
use crate::record::FlightSegment;
use serde::Serialize;

// Timestamp fields of a segment, in the order they are trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentTime {
    DepartAt,
    DepartTime,
    ArriveAt,
    ArriveTime,
}

impl Candidate for SegmentTime {
    type Source = FlightSegment;
    type Value = String;

    // Only values that parse as an instant count
    fn read(self, segment: &FlightSegment) -> Option<String> {
        let raw = match self {
            SegmentTime::DepartAt => segment.depart_at.as_ref(),
            SegmentTime::DepartTime => segment.depart_time.as_ref(),
            SegmentTime::ArriveAt => segment.arrive_at.as_ref(),
            SegmentTime::ArriveTime => segment.arrive_time.as_ref(),
        };
        non_blank(raw)
            .filter(|s| Instant::parse(s).is_some())
            .map(str::to_string)
    }

    fn path(self) -> &'static str {
        match self {
            SegmentTime::DepartAt => "depart_at",
            SegmentTime::DepartTime => "depart_time",
            SegmentTime::ArriveAt => "arrive_at",
            SegmentTime::ArriveTime => "arrive_time",
        }
    }
}

pub const DEPARTURE_CHAIN: &[SegmentTime] = &[SegmentTime::DepartAt, SegmentTime::DepartTime];
pub const ARRIVAL_CHAIN: &[SegmentTime] = &[SegmentTime::ArriveAt, SegmentTime::ArriveTime];

pub fn departure(segment: &FlightSegment) -> Resolution<String> {
    first_valid(segment, DEPARTURE_CHAIN)
        .map(|hit| hit.value)
        .ok_or(Degraded::MissingField { field: "depart_at" })
}

pub fn arrival(segment: &FlightSegment) -> Resolution<String> {
    first_valid(segment, ARRIVAL_CHAIN)
        .map(|hit| hit.value)
        .ok_or(Degraded::MissingField { field: "arrive_at" })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoverAnnotation {
    pub airport_code: Option<String>,
    pub airport_name: Option<String>,
    pub wait: Option<String>,
}

pub struct LayoverCalculator<'a> {
    formatter: &'a DurationFormatter,
    catalog: &'a Catalog,
}

impl<'a> LayoverCalculator<'a> {
    pub fn new(formatter: &'a DurationFormatter, catalog: &'a Catalog) -> Self {
        Self { formatter, catalog }
    }

    // One entry per adjacent pair, each computed from that pair alone. The
    // arriving segment's day-offset marker moves its landing forward.
    pub fn try_compute(&self, segments: &[FlightSegment]) -> Vec<Resolution<String>> {
        segments
            .windows(2)
            .map(|pair| {
                let landed = arrival(&pair[0])?;
                let leaves = departure(&pair[1])?;
                self.formatter
                    .try_elapsed_between_offsets(&landed, pair[0].arrive_plus.as_deref(), &leaves, None)
                    .map(|elapsed| self.formatter.format_elapsed(elapsed))
            })
            .collect()
    }

    pub fn compute(&self, segments: &[FlightSegment]) -> Vec<Option<String>> {
        self.try_compute(segments)
            .into_iter()
            .map(Result::ok)
            .collect()
    }

    // Layovers paired with the airport where the traveller waits
    pub fn annotations(&self, segments: &[FlightSegment]) -> Vec<LayoverAnnotation> {
        self.annotate(segments, &self.try_compute(segments))
    }

    // Same as `annotations`, reusing waits already returned by `try_compute`
    pub fn annotate(
        &self,
        segments: &[FlightSegment],
        waits: &[Resolution<String>],
    ) -> Vec<LayoverAnnotation> {
        segments
            .windows(2)
            .zip(waits)
            .map(|(pair, wait)| {
                let airport_code = non_blank(pair[0].to.as_ref())
                    .or_else(|| non_blank(pair[1].from.as_ref()))
                    .map(str::to_string);
                LayoverAnnotation {
                    airport_name: airport_code.as_deref().map(|c| self.catalog.airport_name(c)),
                    airport_code,
                    wait: wait.as_ref().ok().cloned(),
                }
            })
            .collect()
    }
}

pub fn compute_layovers(segments: &[FlightSegment]) -> Vec<Option<String>> {
    let formatter = DurationFormatter::default();
    let catalog = Catalog::builtin();
    LayoverCalculator::new(&formatter, &catalog).compute(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(from: &str, to: &str, depart_at: &str, arrive_at: &str) -> FlightSegment {
        FlightSegment {
            from: Some(from.to_string()),
            to: Some(to.to_string()),
            depart_at: Some(depart_at.to_string()),
            arrive_at: Some(arrive_at.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_three_segments_two_layovers() {
        let segments = vec![
            segment("CNX", "BKK", "2025-06-11T07:00:00", "2025-06-11T08:10:00"),
            segment("BKK", "HKG", "2025-06-11T10:00:00", "2025-06-11T13:45:00"),
            segment("HKG", "NRT", "2025-06-11T15:00:00", "2025-06-11T20:00:00"),
        ];

        let layovers = compute_layovers(&segments);
        assert_eq!(
            layovers,
            vec![Some("1ชม 50นาที".to_string()), Some("1ชม 15นาที".to_string())]
        );
    }

    #[test]
    fn test_missing_timestamp_only_affects_its_pair() {
        let mut middle = segment("BKK", "HKG", "2025-06-11T10:00:00", "not a time");
        middle.arrive_time = Some("".to_string());
        let segments = vec![
            segment("CNX", "BKK", "2025-06-11T07:00:00", "2025-06-11T08:10:00"),
            middle,
            segment("HKG", "NRT", "2025-06-11T15:00:00", "2025-06-11T20:00:00"),
        ];

        let layovers = compute_layovers(&segments);
        assert_eq!(layovers.len(), 2);
        assert_eq!(layovers[0].as_deref(), Some("1ชม 50นาที"));
        assert_eq!(layovers[1], None);
    }

    #[test]
    fn test_fallback_to_time_fields() {
        let first = FlightSegment {
            arrive_time: Some("2025-06-11T08:10".to_string()),
            ..Default::default()
        };
        let second = FlightSegment {
            depart_at: Some("13:00".to_string()),
            depart_time: Some("2025-06-11T09:00".to_string()),
            ..Default::default()
        };
        assert_eq!(
            compute_layovers(&[first, second]),
            vec![Some("50นาที".to_string())]
        );
    }

    #[test]
    fn test_overnight_gap_passes_through() {
        let segments = vec![
            segment("BKK", "DXB", "2025-06-11T01:00:00", "2025-06-11T05:00:00"),
            segment("DXB", "LHR", "2025-06-12T07:30:00", "2025-06-12T12:00:00"),
        ];
        assert_eq!(
            compute_layovers(&segments),
            vec![Some("26ชม 30นาที".to_string())]
        );
    }

    #[test]
    fn test_next_day_arrival_starts_the_layover() {
        let mut overnight = segment("BKK", "NRT", "2025-06-11T23:30:00", "2025-06-11T03:00:00");
        overnight.arrive_plus = Some("+1".to_string());
        let segments = vec![
            segment("CNX", "BKK", "2025-06-11T20:00:00", "2025-06-11T21:10:00"),
            overnight,
            segment("NRT", "HND", "2025-06-12T06:00:00", "2025-06-12T07:00:00"),
        ];

        assert_eq!(
            compute_layovers(&segments),
            vec![Some("2ชม 20นาที".to_string()), Some("3ชม".to_string())]
        );
    }

    #[test]
    fn test_annotate_reuses_computed_waits() {
        let segments = vec![
            segment("CNX", "BKK", "2025-06-11T07:00:00", "2025-06-11T08:10:00"),
            segment("BKK", "HKG", "2025-06-11T07:00:00", "2025-06-11T13:45:00"),
        ];
        let formatter = DurationFormatter::default();
        let catalog = Catalog::builtin();
        let calculator = LayoverCalculator::new(&formatter, &catalog);

        let waits = calculator.try_compute(&segments);
        let annotations = calculator.annotate(&segments, &waits);
        assert_eq!(waits, vec![Err(Degraded::NegativeInterval { minutes: -70 })]);
        assert_eq!(annotations[0].wait, None);
        assert_eq!(annotations, calculator.annotations(&segments));
    }

    #[test]
    fn test_reversed_pair_is_none() {
        let segments = vec![
            segment("BKK", "HKG", "2025-06-11T10:00:00", "2025-06-11T13:45:00"),
            segment("HKG", "NRT", "2025-06-11T12:00:00", "2025-06-11T20:00:00"),
        ];
        let formatter = DurationFormatter::default();
        let catalog = Catalog::builtin();
        let calculator = LayoverCalculator::new(&formatter, &catalog);
        assert_eq!(
            calculator.try_compute(&segments),
            vec![Err(Degraded::NegativeInterval { minutes: -105 })]
        );
    }

    #[test]
    fn test_short_itineraries_have_no_layovers() {
        assert!(compute_layovers(&[]).is_empty());
        assert!(compute_layovers(&[segment("BKK", "CNX", "a", "b")]).is_empty());
    }

    #[test]
    fn test_annotations_name_the_connecting_airport() {
        let segments = vec![
            segment("CNX", "BKK", "2025-06-11T07:00:00", "2025-06-11T08:10:00"),
            segment("BKK", "NRT", "2025-06-11T10:00:00", "2025-06-11T18:00:00"),
        ];
        let formatter = DurationFormatter::default();
        let catalog = Catalog::builtin();
        let annotations = LayoverCalculator::new(&formatter, &catalog).annotations(&segments);

        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].airport_code.as_deref(), Some("BKK"));
        assert_eq!(
            annotations[0].airport_name.as_deref(),
            Some("ท่าอากาศยานสุวรรณภูมิ")
        );
        assert_eq!(annotations[0].wait.as_deref(), Some("1ชม 50นาที"));
    }
}
