// Normalizes heterogeneous trip choice records (flights, hotels, ground transport)
// into display-ready summaries

pub mod catalog;
pub mod config;
pub mod duration;
pub mod error;
pub mod flight;
pub mod hotel;
pub mod layover;
pub mod lenient;
pub mod normalizer;
pub mod precedence;
pub mod price;
pub mod record;
pub mod summary;
pub mod tags;
pub mod transport;

// Re-export key types for convenience
pub use catalog::{resolve_aircraft_name, resolve_airline_name, resolve_airport_name, Catalog};
pub use config::{DisplayLabels, NormalizerConfig};
pub use duration::{elapsed_between, format_iso_duration, DurationFormatter, Elapsed};
pub use error::{Degraded, NormalizeError, Resolution};
pub use flight::FlightNormalizer;
pub use hotel::HotelNormalizer;
pub use layover::{compute_layovers, LayoverAnnotation, LayoverCalculator};
pub use normalizer::{normalize_choice, Normalizer};
pub use price::{resolve_total, PriceFormatter, PricePrecedence, ResolvedPrice};
pub use record::{ChoiceCategory, ChoiceRecord, FlightSegment, HotelOffer, TransportKind, TransportOffer};
pub use summary::{ChoiceNormalizer, NormalizedSummary, SummaryDetails};
pub use tags::TagSet;
pub use transport::TransportNormalizer;
