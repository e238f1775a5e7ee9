// Entry point: owns configuration and catalogs, dispatches records by category
use crate::catalog::Catalog;
use crate::config::{DisplayLabels, NormalizerConfig};
use crate::duration::DurationFormatter;
use crate::error::{Degraded, NormalizeError};
use crate::flight::FlightNormalizer;
use crate::hotel::HotelNormalizer;
use crate::price::{resolve_total, PriceFormatter, PricePrecedence, ResolvedPrice, RECORD_PRECEDENCE};
use crate::record::{ChoiceCategory, ChoiceRecord};
use crate::summary::{base_tags, ChoiceNormalizer, NormalizedSummary, SummaryDetails};
use crate::tags::TagSet;
use crate::transport::TransportNormalizer;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Normalizer {
    config: NormalizerConfig,
    catalog: Catalog,
    durations: DurationFormatter,
    prices: PriceFormatter,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default(), Catalog::builtin())
    }
}

impl Normalizer {
    pub fn new(config: NormalizerConfig, catalog: Catalog) -> Self {
        Self {
            durations: DurationFormatter::new(config.labels.clone()),
            prices: PriceFormatter::from_config(&config),
            config,
            catalog,
        }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    pub fn labels(&self) -> &DisplayLabels {
        &self.config.labels
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn durations(&self) -> &DurationFormatter {
        &self.durations
    }

    pub fn prices(&self) -> &PriceFormatter {
        &self.prices
    }

    pub fn flights(&self) -> FlightNormalizer<'_> {
        FlightNormalizer::new(self)
    }

    pub fn hotels(&self) -> HotelNormalizer<'_> {
        HotelNormalizer::new(self)
    }

    pub fn transports(&self) -> TransportNormalizer<'_> {
        TransportNormalizer::new(self)
    }

    pub fn normalize(&self, category: ChoiceCategory, record: &ChoiceRecord) -> NormalizedSummary {
        match category {
            ChoiceCategory::Flight => self.flights().normalize(record),
            ChoiceCategory::Hotel => self.hotels().normalize(record),
            ChoiceCategory::Transport => self.transports().normalize(record),
        }
    }

    // Category taken from whichever payload the record carries
    pub fn normalize_auto(&self, record: &ChoiceRecord) -> NormalizedSummary {
        match record.detect_category() {
            Some(category) => self.normalize(category, record),
            None => {
                let price = resolve_total(record, &RECORD_PRECEDENCE, &self.config.default_currency);
                let mut summary = self.unavailable(record, None, price);
                summary.degradations.push(Degraded::MissingPayload { category: "choice" });
                summary
            }
        }
    }

    pub fn normalize_all(&self, records: &[ChoiceRecord]) -> Vec<NormalizedSummary> {
        records.iter().map(|record| self.normalize_auto(record)).collect()
    }

    // A JSON object or array of objects; non-object array entries are skipped
    pub fn normalize_json(&self, json: &str) -> Result<Vec<NormalizedSummary>, NormalizeError> {
        let value: Value = serde_json::from_str(json)?;
        let records = match value {
            list @ Value::Array(_) => ChoiceRecord::list_from_value(list)?,
            other => vec![ChoiceRecord::from_value(other)?],
        };
        Ok(self.normalize_all(&records))
    }

    pub(crate) fn resolve_price(
        &self,
        record: &ChoiceRecord,
        category: ChoiceCategory,
    ) -> ResolvedPrice {
        resolve_total(
            record,
            &PricePrecedence::for_category(category),
            &self.config.default_currency,
        )
    }

    // Shared assembly: display price, caller tags plus automatic ones
    pub(crate) fn summarize(
        &self,
        record: &ChoiceRecord,
        category: ChoiceCategory,
        price: ResolvedPrice,
        details: SummaryDetails,
        category_tags: &[&str],
        degradations: Vec<Degraded>,
    ) -> NormalizedSummary {
        let mut resolved_tags = base_tags(record, self.labels());
        for tag in category_tags {
            resolved_tags.insert(*tag);
        }
        for degradation in &degradations {
            debug!(id = ?record.id, category = category.as_str(), %degradation, "degraded value");
        }

        NormalizedSummary {
            id: record.id.clone(),
            label: record.label.clone(),
            category: Some(category),
            display_total_price: self
                .prices
                .display_total(&price, record.total_price_text.as_ref()),
            display_currency: price.currency.clone(),
            price,
            details,
            resolved_tags,
            degradations,
        }
    }

    // Minimal "no data available" summary for a record missing its payload
    pub(crate) fn unavailable(
        &self,
        record: &ChoiceRecord,
        category: Option<ChoiceCategory>,
        price: ResolvedPrice,
    ) -> NormalizedSummary {
        let resolved_tags: TagSet = base_tags(record, self.labels());
        let degradations = match category {
            Some(category) => vec![Degraded::MissingPayload {
                category: category.as_str(),
            }],
            None => Vec::new(),
        };
        debug!(id = ?record.id, ?category, "no payload to normalize");

        NormalizedSummary {
            id: record.id.clone(),
            label: record.label.clone(),
            category,
            display_total_price: self
                .prices
                .display_total(&price, record.total_price_text.as_ref()),
            display_currency: price.currency.clone(),
            price,
            details: SummaryDetails::Unavailable {
                message: self.labels().no_data.clone(),
            },
            resolved_tags,
            degradations,
        }
    }
}

// Normalize with the default configuration and built-in catalogs
pub fn normalize_choice(record: &ChoiceRecord) -> NormalizedSummary {
    Normalizer::default().normalize_auto(record)
}
