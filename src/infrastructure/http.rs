//! HTTP adapters for the store REST backend and the ViaCEP postal service.

use crate::domain::address::{PostalAddress, PostalCode};
use crate::domain::coupon::Coupon;
use crate::domain::money::{Money, Price};
use crate::domain::order::{OrderPayload, OrderReceipt};
use crate::domain::ports::{PostalService, StoreBackend};
use crate::domain::product::{Product, ProductDraft};
use crate::error::{Result, StoreError};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response, StatusCode, Url};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

pub const VIACEP_URL: &str = "https://viacep.com.br";

/// Catalog, coupon and order endpoints under one base URL, e.g.
/// `https://shop.example.com/api/v1`.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: parse_base_url(base_url)?,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        endpoint(&self.base_url, segments)
    }
}

#[async_trait]
impl StoreBackend for HttpBackend {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>> {
        let response = self.client.get(self.endpoint(&["produtos"])).send().await?;
        let products: Vec<ProductDto> = ensure_success(response).await?.json().await?;
        debug!(count = products.len(), "products fetched");
        products.into_iter().map(Product::try_from).collect()
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    async fn create_product(&self, draft: ProductDraft) -> Result<Product> {
        let response = self
            .client
            .post(self.endpoint(&["produtos"]))
            .json(&ProductBody::from(&draft))
            .send()
            .await?;
        let product: ProductDto = ensure_success(response).await?.json().await?;
        product.try_into()
    }

    #[instrument(skip(self, draft))]
    async fn update_product(&self, id: u64, draft: ProductDraft) -> Result<Product> {
        let response = self
            .client
            .put(self.endpoint(&["produtos", &id.to_string()]))
            .json(&ProductBody::from(&draft))
            .send()
            .await?;
        let product: ProductDto = ensure_success(response).await?.json().await?;
        product.try_into()
    }

    #[instrument(skip(self))]
    async fn find_coupon(&self, code: &str) -> Result<Option<Coupon>> {
        let response = self
            .client
            .get(self.endpoint(&["cupons", code]))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let coupon: CouponDto = ensure_success(response).await?.json().await?;
        Coupon::try_from(coupon).map(Some)
    }

    #[instrument(skip(self, order), fields(items = order.items.len()))]
    async fn submit_order(&self, order: &OrderPayload) -> Result<OrderReceipt> {
        let response = self
            .client
            .post(self.endpoint(&["pedidos"]))
            .json(order)
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }
}

/// ViaCEP-compatible postal lookup: `GET /ws/:cep/json/`.
#[derive(Clone)]
pub struct ViaCepClient {
    client: Client,
    base_url: Url,
}

impl ViaCepClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: parse_base_url(base_url)?,
        })
    }
}

#[async_trait]
impl PostalService for ViaCepClient {
    #[instrument(skip(self), fields(cep = %code))]
    async fn lookup(&self, code: &PostalCode) -> Result<Option<PostalAddress>> {
        let url = endpoint(&self.base_url, &["ws", code.as_str(), "json", ""]);
        let response = self.client.get(url).send().await?;
        let found: ViaCepDto = ensure_success(response).await?.json().await?;
        if found.is_error() {
            return Ok(None);
        }
        Ok(Some(PostalAddress {
            street: found.logradouro,
            neighborhood: found.bairro,
            city: found.localidade,
            state: found.uf,
        }))
    }
}

fn build_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

fn parse_base_url(base_url: &str) -> Result<Url> {
    let url = Url::parse(base_url)
        .map_err(|e| StoreError::ValidationError(format!("Invalid base URL {base_url}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(StoreError::ValidationError(format!(
            "Invalid base URL {base_url}: not a hierarchical URL"
        )));
    }
    Ok(url)
}

fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    // `parse_base_url` rejects URLs that cannot take path segments.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Turns non-2xx responses into [`StoreError::Backend`], using the body's
/// `message` field when there is one.
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
    Err(StoreError::Backend {
        status: status.as_u16(),
        message,
    })
}

#[derive(Debug, Deserialize)]
struct ProductDto {
    id: u64,
    nome: String,
    #[serde(default)]
    descricao: Option<String>,
    preco: Decimal,
    #[serde(default = "default_active", deserialize_with = "deserialize_status")]
    status: bool,
    #[serde(default)]
    cor: Option<String>,
    #[serde(default)]
    tamanho: Option<String>,
    #[serde(default)]
    quantidade: u32,
}

impl TryFrom<ProductDto> for Product {
    type Error = StoreError;

    fn try_from(dto: ProductDto) -> Result<Self> {
        Ok(Product {
            id: dto.id,
            name: dto.nome,
            description: dto.descricao.unwrap_or_default(),
            price: Price::new(dto.preco)?,
            stock_quantity: dto.quantidade,
            color: dto.cor,
            size: dto.tamanho,
            active: dto.status,
        })
    }
}

#[derive(Debug, Serialize)]
struct ProductBody<'a> {
    nome: &'a str,
    descricao: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    preco: Decimal,
    status: bool,
    cor: Option<&'a str>,
    tamanho: Option<&'a str>,
    quantidade: u32,
}

impl<'a> From<&'a ProductDraft> for ProductBody<'a> {
    fn from(draft: &'a ProductDraft) -> Self {
        Self {
            nome: &draft.name,
            descricao: &draft.description,
            preco: draft.price.value(),
            status: draft.active,
            cor: draft.color.as_deref(),
            tamanho: draft.size.as_deref(),
            quantidade: draft.stock_quantity,
        }
    }
}

fn default_active() -> bool {
    true
}

/// Accepts `true`/`false`, `1`/`0` and `"ativo"`/`"inativo"` style flags.
fn deserialize_status<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match &value {
        Value::Bool(flag) => Ok(*flag),
        Value::Number(n) => Ok(n.as_i64().is_some_and(|n| n != 0)),
        Value::String(s) => Ok(matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "ativo" | "active"
        )),
        Value::Null => Ok(default_active()),
        other => Err(serde::de::Error::custom(format!(
            "unexpected product status: {other}"
        ))),
    }
}

#[derive(Debug, Deserialize)]
struct CouponDto {
    codigo: String,
    percentual: Decimal,
    #[serde(default)]
    valor_minimo: Decimal,
    validade: String,
    quantidade: u32,
    #[serde(default)]
    quantidade_usada: u32,
}

impl TryFrom<CouponDto> for Coupon {
    type Error = StoreError;

    fn try_from(dto: CouponDto) -> Result<Self> {
        // Datetimes like `2026-12-31T23:59:59Z` keep only their date part.
        let date = dto.validade.get(..10).unwrap_or(&dto.validade);
        let expires_on = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
            StoreError::ValidationError(format!("Invalid coupon expiry {}: {e}", dto.validade))
        })?;
        if dto.percentual < Decimal::ZERO || dto.percentual > Decimal::ONE_HUNDRED {
            return Err(StoreError::ValidationError(format!(
                "Invalid coupon percentage {}: must be between 0 and 100",
                dto.percentual
            )));
        }
        Ok(Coupon {
            code: dto.codigo,
            percentage: dto.percentual,
            minimum_subtotal: Money::new(dto.valor_minimo),
            expires_on,
            usage_limit: dto.quantidade,
            times_used: dto.quantidade_usada,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ViaCepDto {
    #[serde(default)]
    erro: Option<Value>,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
}

impl ViaCepDto {
    fn is_error(&self) -> bool {
        match &self.erro {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(s)) => s == "true",
            _ => false,
        }
    }
}
