use thiserror::Error;

/// Broad classification of a [`StoreError`], used to decide how a failure is
/// reported back to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing input.
    Validation,
    /// The input was well formed but a business rule rejected it.
    BusinessRule,
    /// The backend or the postal service could not be reached or refused the call.
    Transport,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Invalid postal code: {0}")]
    InvalidPostalCode(String),

    #[error("Product out of stock")]
    OutOfStock,
    #[error("Product {0} not found")]
    ProductNotFound(u64),
    #[error("Variation {0} not found")]
    VariationNotFound(u64),
    #[error("Coupon {0} not found")]
    CouponNotFound(String),
    #[error("Subtotal below the coupon minimum of {0}")]
    CouponBelowMinimum(rust_decimal::Decimal),
    #[error("Coupon usage limit reached")]
    CouponExhausted,
    #[error("Coupon expired on {0}")]
    CouponExpired(chrono::NaiveDate),
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Shipping address incomplete: missing {}", .0.join(", "))]
    AddressIncomplete(Vec<&'static str>),
    #[error("Postal code not validated")]
    PostalCodeNotValidated,
    #[error("Postal code {0} not found")]
    PostalCodeNotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Backend rejected the request ({status}): {message}")]
    Backend { status: u16, message: String },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_)
            | Self::ValidationError(_)
            | Self::InvalidPostalCode(_)
            | Self::CsvError(_) => ErrorKind::Validation,
            Self::OutOfStock
            | Self::ProductNotFound(_)
            | Self::VariationNotFound(_)
            | Self::CouponNotFound(_)
            | Self::CouponBelowMinimum(_)
            | Self::CouponExhausted
            | Self::CouponExpired(_)
            | Self::EmptyCart
            | Self::AddressIncomplete(_)
            | Self::PostalCodeNotValidated
            | Self::PostalCodeNotFound(_) => ErrorKind::BusinessRule,
            Self::Http(_) | Self::Backend { .. } | Self::Json(_) | Self::IoError(_) => {
                ErrorKind::Transport
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
