use crate::domain::address::AddressField;
use crate::error::{Result, StoreError};
use crate::interfaces::actions::Action;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Add,
    Qty,
    Remove,
    Cep,
    Lookup,
    Address,
    Coupon,
    Uncoupon,
    Checkout,
    Stock,
}

/// One raw `action,target,value` row.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct ActionRecord {
    pub action: ActionType,
    pub target: Option<String>,
    pub value: Option<String>,
}

impl TryFrom<ActionRecord> for Action {
    type Error = StoreError;

    fn try_from(record: ActionRecord) -> Result<Self> {
        let ActionRecord {
            action,
            target,
            value,
        } = record;
        Ok(match action {
            ActionType::Add => Action::AddToCart {
                product_id: parse_id(target, "product id")?,
            },
            ActionType::Qty => Action::UpdateQuantity {
                line_id: parse_id(target, "line id")?,
                quantity: required(value, "quantity")?
                    .parse()
                    .map_err(|_| StoreError::ValidationError("Invalid quantity".to_string()))?,
            },
            ActionType::Remove => Action::RemoveLine {
                line_id: parse_id(target, "line id")?,
            },
            ActionType::Cep => Action::SetPostalCode(required(target, "postal code")?),
            ActionType::Lookup => Action::LookupPostalCode,
            ActionType::Address => Action::SetAddress {
                field: required(target, "address field")?.parse()?,
                value: value.unwrap_or_default(),
            },
            ActionType::Coupon => Action::ApplyCoupon(required(target, "coupon code")?),
            ActionType::Uncoupon => Action::RemoveCoupon,
            ActionType::Checkout => Action::Checkout,
            ActionType::Stock => Action::UpdateInventory {
                variation_id: parse_id(target, "variation id")?,
                stock: required(value, "stock")?,
            },
        })
    }
}

fn required(field: Option<String>, name: &'static str) -> Result<String> {
    field.ok_or(StoreError::MissingField(name))
}

fn parse_id(field: Option<String>, name: &'static str) -> Result<u64> {
    required(field, name)?
        .parse()
        .map_err(|_| StoreError::ValidationError(format!("Invalid {name}")))
}

/// Reads scripted actions from a CSV source with an `action,target,value` header.
///
/// Whitespace is trimmed and short rows are accepted, as with hand-written scripts.
pub struct ActionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ActionReader<R> {
    /// Creates a new `ActionReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily reads and converts each row.
    pub fn actions(self) -> impl Iterator<Item = Result<Action>> {
        self.reader
            .into_deserialize::<ActionRecord>()
            .map(|result| result.map_err(StoreError::from).and_then(Action::try_from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_valid_stream() {
        let data = "action, target, value\n\
                    add, 1,\n\
                    qty, 1, 3\n\
                    cep, 01001-000,\n\
                    address, number, 42\n\
                    coupon, DEZ,\n\
                    checkout,,";
        let reader = ActionReader::new(data.as_bytes());
        let results: Vec<Result<Action>> = reader.actions().collect();

        assert_eq!(results.len(), 6);
        assert_eq!(
            results[0].as_ref().unwrap(),
            &Action::AddToCart { product_id: 1 }
        );
        assert_eq!(
            results[1].as_ref().unwrap(),
            &Action::UpdateQuantity {
                line_id: 1,
                quantity: 3
            }
        );
        assert_eq!(
            results[3].as_ref().unwrap(),
            &Action::SetAddress {
                field: AddressField::Number,
                value: "42".to_string()
            }
        );
        assert_eq!(results[5].as_ref().unwrap(), &Action::Checkout);
    }

    #[test]
    fn test_reader_short_rows() {
        let data = "action,target,value\nlookup\nuncoupon";
        let reader = ActionReader::new(data.as_bytes());
        let results: Vec<Result<Action>> = reader.actions().collect();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap(), &Action::LookupPostalCode);
    }

    #[test]
    fn test_reader_malformed_lines() {
        let data = "action,target,value\nfly,1,\nadd,abc,\nqty,1,\naddress,floor,2";
        let reader = ActionReader::new(data.as_bytes());
        let results: Vec<Result<Action>> = reader.actions().collect();

        assert!(matches!(results[0], Err(StoreError::CsvError(_))));
        assert!(matches!(results[1], Err(StoreError::ValidationError(_))));
        assert!(matches!(results[2], Err(StoreError::MissingField("quantity"))));
        assert!(matches!(results[3], Err(StoreError::ValidationError(_))));
    }
}
