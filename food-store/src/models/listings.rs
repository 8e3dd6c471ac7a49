use std::cmp::Ordering;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use super::document::{Document, FieldMatch};

pub const FOOD_NAME: &str = "food_name";
pub const FOOD_QUANTITY: &str = "food_quantity";
pub const PICKUP_LOCATION: &str = "pickup_location";
pub const EXPIRED_DATE: &str = "expired_date";
pub const ADDITIONAL_NOTES: &str = "additional_notes";
pub const FOOD_STATUS: &str = "food_status";
pub const FOOD_IMAGE: &str = "food_image";

pub const STATUS_REQUESTED: &str = "Requested";

const STATUS_PATH: &[&str] = &[FOOD_STATUS];
const DONOR_EMAIL_PATH: &[&str] = &["donor", "email"];

/// The listing fields a client may replace on an existing listing.
///
/// A field the client leaves out is written as `null`, the same as sending
/// it explicitly. Only JSON objects deserialize; other keys are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFields {
    pub food_name: Value,
    pub food_quantity: Value,
    pub pickup_location: Value,
    pub expired_date: Value,
    pub additional_notes: Value,
    pub food_status: Value,
    pub food_image: Value,
}

impl<'de> Deserialize<'de> for ListingFields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // objects only, never positional sequences
        let body = Map::<String, Value>::deserialize(deserializer)?;
        Ok(ListingFields::from_body(&body))
    }
}

impl ListingFields {
    pub const NAMES: [&'static str; 7] = [
        FOOD_NAME,
        FOOD_QUANTITY,
        PICKUP_LOCATION,
        EXPIRED_DATE,
        ADDITIONAL_NOTES,
        FOOD_STATUS,
        FOOD_IMAGE,
    ];

    pub fn from_body(body: &Map<String, Value>) -> Self {
        let field = |name: &str| body.get(name).cloned().unwrap_or(Value::Null);

        Self {
            food_name: field(FOOD_NAME),
            food_quantity: field(FOOD_QUANTITY),
            pickup_location: field(PICKUP_LOCATION),
            expired_date: field(EXPIRED_DATE),
            additional_notes: field(ADDITIONAL_NOTES),
            food_status: field(FOOD_STATUS),
            food_image: field(FOOD_IMAGE),
        }
    }

    pub fn into_map(self) -> Map<String, Value> {
        let values = [
            self.food_name,
            self.food_quantity,
            self.pickup_location,
            self.expired_date,
            self.additional_notes,
            self.food_status,
            self.food_image,
        ];

        Self::NAMES
            .into_iter()
            .map(ToOwned::to_owned)
            .zip(values)
            .collect()
    }
}

pub fn by_status(status: impl Into<String>) -> FieldMatch {
    FieldMatch::new(STATUS_PATH, status)
}

pub fn by_donor_email(email: impl Into<String>) -> FieldMatch {
    FieldMatch::new(DONOR_EMAIL_PATH, email)
}

/// `food_quantity` as a finite number; numeric strings count, anything else
/// (including "inf" or "NaN" text) doesn't.
pub fn quantity(listing: &Document) -> Option<f64> {
    let quantity = match listing.get(FOOD_QUANTITY)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    quantity.filter(|quantity| quantity.is_finite())
}

/// Largest quantity first. Listings without a usable quantity go last, and
/// ties keep their incoming order.
pub fn sort_by_quantity_desc(listings: &mut [Document]) {
    listings.sort_by(|a, b| match (quantity(a), quantity(b)) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
