use crate::application::storefront::Storefront;
use crate::domain::address::AddressField;
use crate::error::Result;

/// A single scripted user action.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddToCart { product_id: u64 },
    UpdateQuantity { line_id: u64, quantity: i64 },
    RemoveLine { line_id: u64 },
    SetPostalCode(String),
    LookupPostalCode,
    SetAddress { field: AddressField, value: String },
    ApplyCoupon(String),
    RemoveCoupon,
    Checkout,
    UpdateInventory { variation_id: u64, stock: String },
}

impl Action {
    /// Runs the action against the session.
    pub async fn apply(self, store: &mut Storefront) -> Result<()> {
        match self {
            Action::AddToCart { product_id } => {
                store.add_to_cart(product_id)?;
            }
            Action::UpdateQuantity { line_id, quantity } => {
                store.update_quantity(line_id, quantity);
            }
            Action::RemoveLine { line_id } => store.remove_line(line_id),
            Action::SetPostalCode(code) => store.set_postal_code(&code),
            Action::LookupPostalCode => store.lookup_postal_code().await?,
            Action::SetAddress { field, value } => store.set_address_field(field, &value),
            Action::ApplyCoupon(code) => {
                store.apply_coupon(&code).await?;
            }
            Action::RemoveCoupon => store.remove_coupon(),
            Action::Checkout => {
                store.checkout().await?;
            }
            Action::UpdateInventory {
                variation_id,
                stock,
            } => {
                store.update_inventory(variation_id, &stock)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::{InMemoryBackend, InMemoryPostalService};

    #[tokio::test]
    async fn test_apply_sequence() {
        let backend = InMemoryBackend::seeded();
        let mut store = Storefront::new(
            Box::new(backend.clone()),
            Box::new(InMemoryPostalService::seeded()),
        );
        store.load_catalog().await.unwrap();

        let script = vec![
            Action::AddToCart { product_id: 1 },
            Action::UpdateQuantity {
                line_id: 1,
                quantity: 3,
            },
            Action::SetPostalCode("80010-000".to_string()),
            Action::LookupPostalCode,
            Action::SetAddress {
                field: AddressField::Number,
                value: "15".to_string(),
            },
            Action::ApplyCoupon("DEZ".to_string()),
            Action::Checkout,
        ];
        for action in script {
            action.apply(&mut store).await.unwrap();
        }

        let orders = backend.submitted_orders().await;
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].items[0].quantity, 3);
        assert_eq!(orders[0].coupon_code.as_deref(), Some("DEZ"));
        assert!(store.cart().is_empty());
    }
}
