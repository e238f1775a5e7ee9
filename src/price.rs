// Total price resolution over per-category precedence tables
use crate::config::NormalizerConfig;
use crate::lenient::{finite_number, non_blank};
use crate::precedence::{first_valid, Candidate};
use crate::record::{ChoiceCategory, ChoiceRecord};
use serde::Serialize;

// Where an amount may live on a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceCandidate {
    TotalPrice,
    Price,
    FlightPriceTotal,
    HotelPriceTotal,
    HotelBookingTotal,
    CarPrice,
    CarPriceAmount,
    TransportPrice,
    TransportPriceAmount,
}

impl Candidate for PriceCandidate {
    type Source = ChoiceRecord;
    type Value = f64;

    fn read(self, record: &ChoiceRecord) -> Option<f64> {
        let raw = match self {
            PriceCandidate::TotalPrice => record.total_price.as_ref(),
            PriceCandidate::Price => record.price.as_ref(),
            PriceCandidate::FlightPriceTotal => {
                record.flight.as_ref().and_then(|f| f.price_total.as_ref())
            }
            PriceCandidate::HotelPriceTotal => {
                record.hotel.as_ref().and_then(|h| h.price_total.as_ref())
            }
            PriceCandidate::HotelBookingTotal => record
                .hotel
                .as_ref()
                .and_then(|h| h.booking.as_ref())
                .and_then(|b| b.pricing.as_ref())
                .and_then(|p| p.total_amount.as_ref()),
            PriceCandidate::CarPrice => record.car.as_ref().and_then(|c| c.price.as_ref()),
            PriceCandidate::CarPriceAmount => {
                record.car.as_ref().and_then(|c| c.price_amount.as_ref())
            }
            PriceCandidate::TransportPrice => {
                record.transport.as_ref().and_then(|t| t.price.as_ref())
            }
            PriceCandidate::TransportPriceAmount => record
                .transport
                .as_ref()
                .and_then(|t| t.price_amount.as_ref()),
        };
        finite_number(raw)
    }

    fn path(self) -> &'static str {
        match self {
            PriceCandidate::TotalPrice => "total_price",
            PriceCandidate::Price => "price",
            PriceCandidate::FlightPriceTotal => "flight.price_total",
            PriceCandidate::HotelPriceTotal => "hotel.price_total",
            PriceCandidate::HotelBookingTotal => "hotel.booking.pricing.total_amount",
            PriceCandidate::CarPrice => "car.price",
            PriceCandidate::CarPriceAmount => "car.price_amount",
            PriceCandidate::TransportPrice => "transport.price",
            PriceCandidate::TransportPriceAmount => "transport.price_amount",
        }
    }
}

// Where a currency code may live on a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyCandidate {
    BreakdownCurrency,
    RecordCurrency,
    FlightCurrency,
    HotelCurrency,
    HotelBookingCurrency,
    CarCurrency,
    TransportCurrency,
}

impl Candidate for CurrencyCandidate {
    type Source = ChoiceRecord;
    type Value = String;

    fn read(self, record: &ChoiceRecord) -> Option<String> {
        let raw = match self {
            CurrencyCandidate::BreakdownCurrency => record
                .price_breakdown
                .as_ref()
                .and_then(|b| b.currency.as_ref()),
            CurrencyCandidate::RecordCurrency => record.currency.as_ref(),
            CurrencyCandidate::FlightCurrency => {
                record.flight.as_ref().and_then(|f| f.currency.as_ref())
            }
            CurrencyCandidate::HotelCurrency => {
                record.hotel.as_ref().and_then(|h| h.currency.as_ref())
            }
            CurrencyCandidate::HotelBookingCurrency => record
                .hotel
                .as_ref()
                .and_then(|h| h.booking.as_ref())
                .and_then(|b| b.pricing.as_ref())
                .and_then(|p| p.currency.as_ref()),
            CurrencyCandidate::CarCurrency => record.car.as_ref().and_then(|c| c.currency.as_ref()),
            CurrencyCandidate::TransportCurrency => {
                record.transport.as_ref().and_then(|t| t.currency.as_ref())
            }
        };
        non_blank(raw).map(str::to_string)
    }

    fn path(self) -> &'static str {
        match self {
            CurrencyCandidate::BreakdownCurrency => "price_breakdown.currency",
            CurrencyCandidate::RecordCurrency => "currency",
            CurrencyCandidate::FlightCurrency => "flight.currency",
            CurrencyCandidate::HotelCurrency => "hotel.currency",
            CurrencyCandidate::HotelBookingCurrency => "hotel.booking.pricing.currency",
            CurrencyCandidate::CarCurrency => "car.currency",
            CurrencyCandidate::TransportCurrency => "transport.currency",
        }
    }
}

// The declared amount and currency chains of one category
#[derive(Debug, Clone, Copy)]
pub struct PricePrecedence {
    pub amounts: &'static [PriceCandidate],
    pub currencies: &'static [CurrencyCandidate],
}

pub const FLIGHT_PRECEDENCE: PricePrecedence = PricePrecedence {
    amounts: &[
        PriceCandidate::TotalPrice,
        PriceCandidate::Price,
        PriceCandidate::FlightPriceTotal,
    ],
    currencies: &[
        CurrencyCandidate::BreakdownCurrency,
        CurrencyCandidate::RecordCurrency,
        CurrencyCandidate::FlightCurrency,
    ],
};

pub const HOTEL_PRECEDENCE: PricePrecedence = PricePrecedence {
    amounts: &[
        PriceCandidate::TotalPrice,
        PriceCandidate::Price,
        PriceCandidate::HotelPriceTotal,
        PriceCandidate::HotelBookingTotal,
    ],
    currencies: &[
        CurrencyCandidate::BreakdownCurrency,
        CurrencyCandidate::RecordCurrency,
        CurrencyCandidate::HotelCurrency,
        CurrencyCandidate::HotelBookingCurrency,
    ],
};

pub const TRANSPORT_PRECEDENCE: PricePrecedence = PricePrecedence {
    amounts: &[
        PriceCandidate::TotalPrice,
        PriceCandidate::Price,
        PriceCandidate::CarPrice,
        PriceCandidate::CarPriceAmount,
        PriceCandidate::TransportPrice,
        PriceCandidate::TransportPriceAmount,
    ],
    currencies: &[
        CurrencyCandidate::BreakdownCurrency,
        CurrencyCandidate::RecordCurrency,
        CurrencyCandidate::CarCurrency,
        CurrencyCandidate::TransportCurrency,
    ],
};

// Top-level fields only, for records whose category payload is missing
pub const RECORD_PRECEDENCE: PricePrecedence = PricePrecedence {
    amounts: &[PriceCandidate::TotalPrice, PriceCandidate::Price],
    currencies: &[
        CurrencyCandidate::BreakdownCurrency,
        CurrencyCandidate::RecordCurrency,
    ],
};

impl PricePrecedence {
    pub fn for_category(category: ChoiceCategory) -> Self {
        match category {
            ChoiceCategory::Flight => FLIGHT_PRECEDENCE,
            ChoiceCategory::Hotel => HOTEL_PRECEDENCE,
            ChoiceCategory::Transport => TRANSPORT_PRECEDENCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPrice {
    pub amount: Option<f64>,
    pub currency: String,
    pub is_real: bool,
    pub amount_source: Option<PriceCandidate>,
    pub currency_source: Option<CurrencyCandidate>,
}

pub fn resolve_total(
    record: &ChoiceRecord,
    precedence: &PricePrecedence,
    default_currency: &str,
) -> ResolvedPrice {
    let amount_hit = first_valid(record, precedence.amounts);
    let currency_hit = first_valid(record, precedence.currencies);

    let amount = amount_hit.as_ref().map(|hit| hit.value);
    ResolvedPrice {
        amount,
        currency: currency_hit
            .as_ref()
            .map(|hit| hit.value.clone())
            .unwrap_or_else(|| default_currency.to_string()),
        is_real: amount.map_or(false, |n| n.is_finite() && n > 0.0),
        amount_source: amount_hit.map(|hit| hit.candidate),
        currency_source: currency_hit.map(|hit| hit.candidate),
    }
}

// Renders amounts with grouped thousands, keeping only the fraction the value has
#[derive(Debug, Clone)]
pub struct PriceFormatter {
    separator: String,
    unavailable: String,
}

impl Default for PriceFormatter {
    fn default() -> Self {
        Self::from_config(&NormalizerConfig::default())
    }
}

impl PriceFormatter {
    pub fn from_config(config: &NormalizerConfig) -> Self {
        Self {
            separator: config.group_separator.clone(),
            unavailable: config.labels.price_unavailable.clone(),
        }
    }

    pub fn format_amount(&self, amount: f64) -> String {
        let text = amount.abs().to_string();
        let (integer, fraction) = match text.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (text.as_str(), None),
        };

        let mut grouped = String::with_capacity(text.len() + integer.len() / 3);
        if amount.is_sign_negative() && amount != 0.0 {
            grouped.push('-');
        }
        for (i, digit) in integer.chars().enumerate() {
            if i > 0 && (integer.len() - i) % 3 == 0 {
                grouped.push_str(&self.separator);
            }
            grouped.push(digit);
        }
        if let Some(fraction) = fraction {
            grouped.push('.');
            grouped.push_str(fraction);
        }
        grouped
    }

    // "{currency} {amount}" for real prices, otherwise the free-form text or placeholder
    pub fn display_total(&self, price: &ResolvedPrice, fallback_text: Option<&String>) -> String {
        match price.amount {
            Some(amount) if price.is_real => {
                format!("{} {}", price.currency, self.format_amount(amount))
            }
            _ => non_blank(fallback_text)
                .map(str::to_string)
                .unwrap_or_else(|| self.unavailable.clone()),
        }
    }

    // Display form of any secondary amount in the price's currency
    pub fn display_amount(&self, currency: &str, amount: f64) -> String {
        format!("{} {}", currency, self.format_amount(amount))
    }
}
