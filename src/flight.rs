// Flight itineraries: route, stops, carriers, journey time and layovers
use crate::duration::Instant;
use crate::error::Degraded;
use crate::layover::{arrival, departure, LayoverCalculator};
use crate::lenient::non_blank;
use crate::normalizer::Normalizer;
use crate::record::{ChoiceCategory, ChoiceRecord, FlightSegment};
use crate::summary::{ChoiceNormalizer, FlightDetails, NormalizedSummary, SegmentView, SummaryDetails};
use crate::tags::TagSet;

pub struct FlightNormalizer<'a> {
    normalizer: &'a Normalizer,
}

impl<'a> FlightNormalizer<'a> {
    pub fn new(normalizer: &'a Normalizer) -> Self {
        Self { normalizer }
    }

    pub fn stop_label(&self, segment_count: usize) -> String {
        let labels = self.normalizer.labels();
        match segment_count.saturating_sub(1) {
            0 => labels.non_stop.clone(),
            stops => format!("{} {}", stops, labels.stop_suffix),
        }
    }

    // Carrier codes in first-seen order, no duplicates
    pub fn carriers(&self, segments: &[FlightSegment]) -> Vec<String> {
        let codes = segments
            .iter()
            .filter_map(|segment| non_blank(segment.carrier.as_ref()))
            .map(str::to_uppercase);
        TagSet::from_tags(codes).as_slice().to_vec()
    }

    fn details(&self, segments: &[FlightSegment], degradations: &mut Vec<Degraded>) -> FlightDetails {
        let catalog = self.normalizer.catalog();
        let labels = self.normalizer.labels();
        let durations = self.normalizer.durations();

        // callers guarantee at least one segment
        let first = &segments[0];
        let last = &segments[segments.len() - 1];

        let origin = endpoint(first.from.as_ref(), "from", &labels.unspecified, degradations);
        let destination = endpoint(last.to.as_ref(), "to", &labels.unspecified, degradations);

        let carriers = self.carriers(segments);
        let carrier_label = carriers
            .iter()
            .map(|code| catalog.airline_name(code))
            .collect::<Vec<_>>()
            .join(", ");

        let total_duration = departure(first)
            .and_then(|leaves| {
                let lands = arrival(last)?;
                durations.try_elapsed_between(&leaves, &lands, last.arrive_plus.as_deref())
            })
            .map(|elapsed| durations.format_elapsed(elapsed))
            .map_err(|err| degradations.push(err))
            .ok();

        let calculator = LayoverCalculator::new(durations, catalog);
        let waits = calculator.try_compute(segments);
        degradations.extend(waits.iter().filter_map(|wait| wait.clone().err()));
        let layovers = calculator.annotate(segments, &waits);

        FlightDetails {
            route: format!("{} → {}", origin, destination),
            route_names: format!(
                "{} → {}",
                catalog.airport_name(&origin),
                catalog.airport_name(&destination)
            ),
            origin,
            destination,
            stop_count: segments.len() - 1,
            stop_label: self.stop_label(segments.len()),
            carriers,
            carrier_label,
            total_duration,
            segments: segments.iter().map(|s| self.segment_view(s)).collect(),
            layovers,
        }
    }

    fn segment_view(&self, segment: &FlightSegment) -> SegmentView {
        let catalog = self.normalizer.catalog();
        let from = non_blank(segment.from.as_ref()).map(str::to_string);
        let to = non_blank(segment.to.as_ref()).map(str::to_string);
        let carrier = non_blank(segment.carrier.as_ref()).map(str::to_uppercase);

        SegmentView {
            from_name: from.as_deref().map(|code| catalog.airport_name(code)),
            to_name: to.as_deref().map(|code| catalog.airport_name(code)),
            carrier_name: carrier.as_deref().map(|code| catalog.airline_name(code)),
            flight_number: flight_number(carrier.as_deref(), segment.flight_number.as_ref()),
            depart_clock: clock(departure(segment).ok(), segment.depart_time.as_ref()),
            arrive_clock: clock(arrival(segment).ok(), segment.arrive_time.as_ref()),
            arrive_plus: non_blank(segment.arrive_plus.as_ref()).map(str::to_string),
            aircraft: non_blank(segment.aircraft_code.as_ref()).map(|code| catalog.aircraft_name(code)),
            duration: non_blank(segment.duration.as_ref())
                .map(|raw| self.normalizer.durations().format_iso(raw)),
            from,
            to,
            carrier,
        }
    }
}

impl ChoiceNormalizer for FlightNormalizer<'_> {
    fn category(&self) -> ChoiceCategory {
        ChoiceCategory::Flight
    }

    fn normalize(&self, record: &ChoiceRecord) -> NormalizedSummary {
        let price = self.normalizer.resolve_price(record, ChoiceCategory::Flight);
        let segments = match record.flight.as_ref() {
            Some(flight) if !flight.segments.is_empty() => &flight.segments,
            _ => {
                return self
                    .normalizer
                    .unavailable(record, Some(ChoiceCategory::Flight), price)
            }
        };

        let mut degradations = Vec::new();
        let details = self.details(segments, &mut degradations);
        let non_stop = [self.normalizer.labels().non_stop_tag.as_str()];
        let category_tags: &[&str] = if details.stop_count == 0 {
            &non_stop
        } else {
            &[]
        };

        self.normalizer.summarize(
            record,
            ChoiceCategory::Flight,
            price,
            SummaryDetails::Flight(details),
            category_tags,
            degradations,
        )
    }
}

fn endpoint(
    code: Option<&String>,
    field: &'static str,
    unspecified: &str,
    degradations: &mut Vec<Degraded>,
) -> String {
    match non_blank(code) {
        Some(code) => code.to_uppercase(),
        None => {
            degradations.push(Degraded::MissingField { field });
            unspecified.to_string()
        }
    }
}

// "TG642"; numbers that already carry the carrier prefix are kept as they are
fn flight_number(carrier: Option<&str>, number: Option<&String>) -> Option<String> {
    let number = non_blank(number)?;
    match carrier {
        Some(carrier) if !number.to_uppercase().starts_with(carrier) => {
            Some(format!("{}{}", carrier, number))
        }
        _ => Some(number.to_string()),
    }
}

// Clock time of a parsed timestamp, otherwise the raw display text
fn clock(timestamp: Option<String>, display: Option<&String>) -> Option<String> {
    timestamp
        .as_deref()
        .and_then(Instant::parse)
        .map(Instant::clock_label)
        .or_else(|| non_blank(display).map(str::to_string))
}
