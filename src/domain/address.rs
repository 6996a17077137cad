use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const POSTAL_CODE_LEN: usize = 8;

/// Free-form delivery address, filled manually or from a postal lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    Street,
    Number,
    Neighborhood,
    City,
    State,
    Reference,
}

impl std::str::FromStr for AddressField {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "street" => Ok(Self::Street),
            "number" => Ok(Self::Number),
            "neighborhood" => Ok(Self::Neighborhood),
            "city" => Ok(Self::City),
            "state" => Ok(Self::State),
            "reference" => Ok(Self::Reference),
            other => Err(StoreError::ValidationError(format!(
                "Unknown address field: {other}"
            ))),
        }
    }
}

impl ShippingAddress {
    pub fn set(&mut self, field: AddressField, value: &str) {
        let value = value.to_string();
        match field {
            AddressField::Street => self.street = value,
            AddressField::Number => self.number = value,
            AddressField::Neighborhood => self.neighborhood = value,
            AddressField::City => self.city = value,
            AddressField::State => self.state = value,
            AddressField::Reference => {
                self.reference = (!value.trim().is_empty()).then_some(value)
            }
        }
    }

    /// Required fields that are still blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("street", &self.street),
            ("number", &self.number),
            ("city", &self.city),
            ("state", &self.state),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn ensure_complete(&self) -> Result<(), StoreError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(StoreError::AddressIncomplete(missing))
        }
    }

    /// Overwrites the autofilled parts of the address. The house number is
    /// reset because a lookup never knows it.
    pub fn fill_from(&mut self, found: &PostalAddress) {
        self.street = found.street.clone();
        self.number.clear();
        self.neighborhood = found.neighborhood.clone();
        self.city = found.city.clone();
        self.state = found.state.clone();
    }

    /// Single-line form sent with orders: `street, number - neighborhood, city/state`.
    pub fn one_line(&self) -> String {
        let mut out = format!("{}, {}", self.street.trim(), self.number.trim());
        if !self.neighborhood.trim().is_empty() {
            out.push_str(" - ");
            out.push_str(self.neighborhood.trim());
        }
        out.push_str(&format!(", {}/{}", self.city.trim(), self.state.trim()));
        out
    }
}

/// Address returned by a postal lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

/// Digits-only postal code, at most eight of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostalCode(String);

impl PostalCode {
    /// Strips anything that is not a digit and keeps the first eight digits.
    pub fn normalize(input: &str) -> Self {
        Self(
            input
                .chars()
                .filter(char::is_ascii_digit)
                .take(POSTAL_CODE_LEN)
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.0.len() == POSTAL_CODE_LEN
    }

    pub fn ensure_complete(&self) -> Result<(), StoreError> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(StoreError::InvalidPostalCode(format!(
                "expected {POSTAL_CODE_LEN} digits, got '{}'",
                self.0
            )))
        }
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ShippingAddress {
        ShippingAddress {
            street: "Praça da Sé".to_string(),
            number: "100".to_string(),
            neighborhood: "Sé".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            reference: None,
        }
    }

    #[test]
    fn test_postal_code_normalization() {
        assert_eq!(PostalCode::normalize("01001-000").as_str(), "01001000");
        assert_eq!(PostalCode::normalize("0100100099").as_str(), "01001000");
        assert!(!PostalCode::normalize("0100").is_complete());
        assert!(matches!(
            PostalCode::normalize("abc").ensure_complete(),
            Err(StoreError::InvalidPostalCode(_))
        ));
    }

    #[test]
    fn test_missing_fields() {
        assert!(complete().ensure_complete().is_ok());

        let mut address = complete();
        address.number = "  ".to_string();
        address.state.clear();
        // Neighborhood is optional.
        address.neighborhood.clear();
        assert_eq!(address.missing_fields(), vec!["number", "state"]);
        assert!(matches!(
            address.ensure_complete(),
            Err(StoreError::AddressIncomplete(_))
        ));
    }

    #[test]
    fn test_fill_from_resets_number() {
        let mut address = complete();
        address.fill_from(&PostalAddress {
            street: "Avenida Paulista".to_string(),
            neighborhood: "Bela Vista".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
        });
        assert_eq!(address.street, "Avenida Paulista");
        assert!(address.number.is_empty());
    }

    #[test]
    fn test_one_line() {
        assert_eq!(complete().one_line(), "Praça da Sé, 100 - Sé, São Paulo/SP");
    }

    #[test]
    fn test_set_field() {
        let mut address = ShippingAddress::default();
        address.set("number".parse().unwrap(), "42");
        address.set(AddressField::Reference, " ");
        assert_eq!(address.number, "42");
        assert_eq!(address.reference, None);
        assert!("floor".parse::<AddressField>().is_err());
    }
}
