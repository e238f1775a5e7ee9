// Hotel offers: pricing breakdown or flat summary, refundability
use crate::lenient::{finite_number, non_blank};
use crate::normalizer::Normalizer;
use crate::precedence::{first_valid, Candidate};
use crate::price::ResolvedPrice;
use crate::record::{ChoiceCategory, ChoiceRecord, HotelOffer, HotelPricing};
use crate::summary::{ChoiceNormalizer, HotelDetails, HotelPricingView, NormalizedSummary, SummaryDetails};
use serde_json::Value;

// Text fields that arrive under more than one key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotelText {
    HotelName,
    HotelNameSnake,
    Name,
    BoardType,
    BoardTypeSnake,
}

impl Candidate for HotelText {
    type Source = HotelOffer;
    type Value = String;

    fn read(self, hotel: &HotelOffer) -> Option<String> {
        let raw = match self {
            HotelText::HotelName => hotel.hotel_name.as_ref(),
            HotelText::HotelNameSnake => hotel.hotel_name_snake.as_ref(),
            HotelText::Name => hotel.name.as_ref(),
            HotelText::BoardType => hotel.board_type.as_ref(),
            HotelText::BoardTypeSnake => hotel.board_type_snake.as_ref(),
        };
        non_blank(raw).map(str::to_string)
    }

    fn path(self) -> &'static str {
        match self {
            HotelText::HotelName => "hotel.hotelName",
            HotelText::HotelNameSnake => "hotel.hotel_name",
            HotelText::Name => "hotel.name",
            HotelText::BoardType => "hotel.boardType",
            HotelText::BoardTypeSnake => "hotel.board_type",
        }
    }
}

pub const NAME_CHAIN: &[HotelText] = &[HotelText::HotelName, HotelText::HotelNameSnake, HotelText::Name];
pub const BOARD_CHAIN: &[HotelText] = &[HotelText::BoardType, HotelText::BoardTypeSnake];

pub struct HotelNormalizer<'a> {
    normalizer: &'a Normalizer,
}

impl<'a> HotelNormalizer<'a> {
    pub fn new(normalizer: &'a Normalizer) -> Self {
        Self { normalizer }
    }

    // Breakdown when `booking.pricing` carries at least one amount, flat price otherwise
    pub fn pricing_view(
        &self,
        hotel: &HotelOffer,
        price: &ResolvedPrice,
        display_total: &str,
    ) -> HotelPricingView {
        let pricing = hotel
            .booking
            .as_ref()
            .and_then(|booking| booking.pricing.as_ref())
            .filter(|pricing| has_amount(pricing));

        match pricing {
            Some(pricing) => {
                let prices = self.normalizer.prices();
                let amount = |value: Option<&Value>| {
                    finite_number(value).map(|n| prices.display_amount(&price.currency, n))
                };
                HotelPricingView::Breakdown {
                    per_night: amount(pricing.price_per_night.as_ref()),
                    taxes_and_fees: amount(pricing.taxes_and_fees.as_ref()),
                    total: amount(pricing.total_amount.as_ref())
                        .unwrap_or_else(|| display_total.to_string()),
                }
            }
            None => HotelPricingView::Flat {
                price: display_total.to_string(),
            },
        }
    }

    // Present whenever the offer states its policies
    pub fn refund_label(&self, hotel: &HotelOffer) -> Option<String> {
        let labels = self.normalizer.labels();
        let policies = hotel.booking.as_ref()?.policies.as_ref()?;
        Some(if policies.is_refundable == Some(true) {
            labels.refundable.clone()
        } else {
            labels.non_refundable.clone()
        })
    }

    fn details(&self, hotel: &HotelOffer, price: &ResolvedPrice, display_total: &str) -> HotelDetails {
        let labels = self.normalizer.labels();
        let nights = whole_number(hotel.nights.as_ref());
        let location = hotel.location.as_ref();
        let policies = hotel.booking.as_ref().and_then(|b| b.policies.as_ref());

        HotelDetails {
            name: first_valid(hotel, NAME_CHAIN)
                .map(|hit| hit.value)
                .unwrap_or_else(|| labels.unspecified.clone()),
            nights,
            nights_label: nights.map(|n| format!("{} {}", n, labels.nights_suffix)),
            board_type: first_valid(hotel, BOARD_CHAIN).map(|hit| hit.value),
            address: non_blank(hotel.address.as_ref())
                .or_else(|| location.and_then(|l| non_blank(l.address.as_ref())))
                .map(str::to_string),
            city: location
                .and_then(|l| non_blank(l.city.as_ref()))
                .map(str::to_string),
            star_label: finite_number(hotel.star_rating.as_ref())
                .filter(|stars| *stars > 0.0)
                .map(|stars| format!("{} {}", stars, labels.star_suffix)),
            meal_plan: policies
                .and_then(|p| non_blank(p.meal_plan.as_ref()))
                .map(str::to_string),
            image_url: hotel.visuals.as_ref().and_then(|v| {
                non_blank(v.image_url.as_ref())
                    .map(str::to_string)
                    .or_else(|| v.images.iter().flatten().find(|s| !s.trim().is_empty()).cloned())
            }),
            pricing: self.pricing_view(hotel, price, display_total),
            refund_label: self.refund_label(hotel),
        }
    }
}

impl ChoiceNormalizer for HotelNormalizer<'_> {
    fn category(&self) -> ChoiceCategory {
        ChoiceCategory::Hotel
    }

    fn normalize(&self, record: &ChoiceRecord) -> NormalizedSummary {
        let price = self.normalizer.resolve_price(record, ChoiceCategory::Hotel);
        let hotel = match record.hotel.as_ref() {
            Some(hotel) => hotel,
            None => {
                return self
                    .normalizer
                    .unavailable(record, Some(ChoiceCategory::Hotel), price)
            }
        };

        let display_total = self
            .normalizer
            .prices()
            .display_total(&price, record.total_price_text.as_ref());
        let details = self.details(hotel, &price, &display_total);

        let labels = self.normalizer.labels();
        let refundable = [labels.refundable.as_str()];
        let category_tags: &[&str] = if details.refund_label.as_deref() == Some(labels.refundable.as_str()) {
            &refundable
        } else {
            &[]
        };

        self.normalizer.summarize(
            record,
            ChoiceCategory::Hotel,
            price,
            SummaryDetails::Hotel(details),
            category_tags,
            Vec::new(),
        )
    }
}

fn has_amount(pricing: &HotelPricing) -> bool {
    [
        pricing.price_per_night.as_ref(),
        pricing.taxes_and_fees.as_ref(),
        pricing.total_amount.as_ref(),
    ]
    .into_iter()
    .any(|value| finite_number(value).is_some())
}

// Counts such as nights arrive as numbers or numeric strings
pub(crate) fn whole_number(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
