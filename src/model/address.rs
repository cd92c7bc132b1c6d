use super::{AddressId, Audit};
use crate::framework::document::document;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: AddressId,
    pub country: String,
    pub city: String,
    pub street: String,
    pub postal_code: Option<u32>,
    pub audit: Audit,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressCreate {
    pub country: String,
    pub city: String,
    pub street: String,
    pub postal_code: Option<u32>,
}

impl AddressCreate {
    /// Names of the required fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("country", &self.country),
            ("city", &self.city),
            ("street", &self.street),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressUpdate {
    pub country: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
    pub postal_code: Option<u32>,
}

impl AddressUpdate {
    pub fn is_empty(&self) -> bool {
        self.country.is_none()
            && self.city.is_none()
            && self.street.is_none()
            && self.postal_code.is_none()
    }
}

impl Address {
    fn from_params(id: AddressId, params: AddressCreate, audit: Audit) -> Self {
        Self {
            id,
            country: params.country,
            city: params.city,
            street: params.street,
            postal_code: params.postal_code,
            audit,
        }
    }

    pub fn apply(&mut self, update: AddressUpdate) {
        if let Some(country) = update.country {
            self.country = country;
        }
        if let Some(city) = update.city {
            self.city = city;
        }
        if let Some(street) = update.street {
            self.street = street;
        }
        if let Some(code) = update.postal_code {
            self.postal_code = Some(code);
        }
    }
}

document!(Address, create = AddressCreate, collection = addresses, label = city);
