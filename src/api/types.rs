use serde::{Deserialize, Serialize};

use crate::models::{Ipo, IpoApplication, IpoStatus, IssueType, User};

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Field-level detail for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            errors: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            errors: None,
        }
    }

    pub fn field_errors(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            errors: Some(errors),
        }
    }
}

/// One rejected field in a mutation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Wire representation of an IPO record. Also the payload carried by
/// `IPO_CREATED` / `IPO_UPDATED` broadcast events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpoDto {
    pub id: String,
    pub company_name: String,
    pub sector: Option<String>,
    pub logo_url: Option<String>,
    pub logo_initials: Option<String>,
    pub logo_color: Option<String>,
    pub price_band: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub lot_size: Option<i32>,
    pub issue_size: Option<String>,
    pub issue_type: Option<IssueType>,
    pub open_date: Option<String>,
    pub close_date: Option<String>,
    pub listing_date: Option<String>,
    pub status: IpoStatus,
    pub description: Option<String>,
    pub ipo_price: Option<f64>,
    pub listing_price: Option<f64>,
    pub listing_gain: Option<String>,
    pub current_price: Option<f64>,
    pub current_return: Option<String>,
    pub rhp_link: Option<String>,
    pub drhp_link: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Ipo> for IpoDto {
    fn from(ipo: &Ipo) -> Self {
        Self {
            id: ipo.id.clone(),
            company_name: ipo.company_name.clone(),
            sector: ipo.sector.clone(),
            logo_url: ipo.logo_url.clone(),
            logo_initials: ipo.logo_initials.clone(),
            logo_color: ipo.logo_color.clone(),
            price_band: ipo.price_band.clone(),
            min_price: ipo.min_price,
            max_price: ipo.max_price,
            lot_size: ipo.lot_size,
            issue_size: ipo.issue_size.clone(),
            issue_type: ipo.issue_type,
            open_date: ipo.open_date.clone(),
            close_date: ipo.close_date.clone(),
            listing_date: ipo.listing_date.clone(),
            status: ipo.status,
            description: ipo.description.clone(),
            ipo_price: ipo.ipo_price,
            listing_price: ipo.listing_price,
            listing_gain: ipo.listing_gain.clone(),
            current_price: ipo.current_price,
            current_return: ipo.current_return.clone(),
            rhp_link: ipo.rhp_link.clone(),
            drhp_link: ipo.drhp_link.clone(),
            created_at: ipo.created_at.clone(),
            updated_at: ipo.updated_at.clone(),
        }
    }
}

/// Wire representation of an account. The password hash never appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub role: crate::models::Role,
    pub created_at: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: user.created_at.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationDto {
    pub id: String,
    pub ipo_id: String,
    pub user_id: String,
    pub shares: i32,
    pub amount: f64,
    pub applied_at: String,
}

impl From<&IpoApplication> for ApplicationDto {
    fn from(application: &IpoApplication) -> Self {
        Self {
            id: application.id.clone(),
            ipo_id: application.ipo_id.clone(),
            user_id: application.user_id.clone(),
            shares: application.shares,
            amount: application.amount,
            applied_at: application.applied_at.clone(),
        }
    }
}

/// Uptime and store health, for the liveness endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthDto {
    pub version: String,
    pub uptime_seconds: u64,
    pub database_ok: bool,
}
