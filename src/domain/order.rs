use super::address::{PostalCode, ShippingAddress};
use super::cart::LineItem;
use super::coupon::Coupon;
use super::money::Money;
use super::pricing::CartTotals;
use serde::{Deserialize, Serialize, Serializer};

/// Order status assigned to freshly submitted orders.
pub const STATUS_PENDING: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    #[serde(rename = "produto_id")]
    pub product_id: u64,
    #[serde(rename = "variacao_id")]
    pub variation_id: Option<u64>,
    #[serde(rename = "quantidade")]
    pub quantity: u32,
    #[serde(rename = "preco_unitario", serialize_with = "serialize_money")]
    pub unit_price: Money,
}

/// Body of `POST /pedidos`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderPayload {
    #[serde(rename = "itens")]
    pub items: Vec<OrderItem>,
    #[serde(serialize_with = "serialize_money")]
    pub subtotal: Money,
    #[serde(rename = "frete", serialize_with = "serialize_money")]
    pub shipping: Money,
    #[serde(serialize_with = "serialize_money")]
    pub total: Money,
    #[serde(rename = "cep")]
    pub postal_code: String,
    #[serde(rename = "endereco")]
    pub address: String,
    #[serde(rename = "endereco_referencia")]
    pub address_reference: Option<String>,
    pub status_id: u32,
    #[serde(rename = "codigo_cupom")]
    pub coupon_code: Option<String>,
    #[serde(rename = "desconto_aplicado", serialize_with = "serialize_money")]
    pub discount: Money,
}

impl OrderPayload {
    pub fn new(
        lines: &[LineItem],
        totals: CartTotals,
        postal_code: &PostalCode,
        address: &ShippingAddress,
        coupon: Option<&Coupon>,
    ) -> Self {
        Self {
            items: lines
                .iter()
                .map(|line| OrderItem {
                    product_id: line.product_id,
                    variation_id: line.variation_id,
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                })
                .collect(),
            subtotal: totals.subtotal.rounded(),
            shipping: totals.shipping.rounded(),
            total: totals.total.rounded(),
            postal_code: postal_code.to_string(),
            address: address.one_line(),
            address_reference: address.reference.clone(),
            status_id: STATUS_PENDING,
            // Only report a coupon that actually discounted something.
            coupon_code: coupon
                .filter(|_| totals.discount > Money::ZERO)
                .map(|c| c.code.clone()),
            discount: totals.discount.rounded(),
        }
    }
}

/// What the backend answers after accepting an order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderReceipt {
    pub id: u64,
}

/// The backend expects JSON numbers for money, not strings.
fn serialize_money<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    rust_decimal::serde::float::serialize(&money.0, serializer)
}
