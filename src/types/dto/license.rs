use poem_openapi::{ApiResponse, Object, payload::Json};
use sea_orm::ActiveValue::Set;

use crate::types::db::driver_license;
use crate::types::dto::common::{
    PageResponse, format_timestamp, patch_optional_text, patch_text, patch_value,
};

/// Demerit points a new license starts with
pub const FULL_POINTS: i32 = 12;

#[derive(Object, Debug)]
pub struct CreateLicenseRequest {
    #[oai(validator(min_length = 1, max_length = 100))]
    pub full_name: String,
    /// Date of birth (YYYY-MM-DD)
    #[oai(validator(min_length = 1))]
    pub dob: String,
    #[oai(validator(min_length = 1, max_length = 20))]
    pub identity_no: String,
    #[oai(validator(min_length = 1, max_length = 20))]
    pub license_no: String,
    /// License class, e.g. A1, B2
    #[oai(validator(min_length = 1, max_length = 10))]
    pub license_type: String,
    #[oai(validator(min_length = 1))]
    pub issue_date: String,
    pub expiry_date: Option<String>,
    /// Defaults to "active"
    pub status: Option<String>,
    #[oai(validator(min_length = 1))]
    pub issuing_authority: String,
    #[oai(validator(min_length = 1))]
    pub nationality: String,
    /// Defaults to 12
    #[oai(validator(minimum(value = "0"), maximum(value = "12")))]
    pub point: Option<i32>,
    /// Wallet the license is bound to
    pub wallet_address: Option<String>,
}

impl CreateLicenseRequest {
    pub fn into_active_model(self) -> driver_license::ActiveModel {
        driver_license::ActiveModel {
            full_name: Set(self.full_name.trim().to_string()),
            dob: Set(self.dob),
            identity_no: Set(self.identity_no.trim().to_string()),
            license_no: Set(self.license_no.trim().to_string()),
            license_type: Set(self.license_type),
            issue_date: Set(self.issue_date),
            expiry_date: Set(self.expiry_date.filter(|d| !d.trim().is_empty())),
            status: Set(self.status.unwrap_or_else(|| "active".to_string())),
            issuing_authority: Set(self.issuing_authority),
            nationality: Set(self.nationality),
            point: Set(self.point.unwrap_or(FULL_POINTS)),
            wallet_address: Set(self
                .wallet_address
                .map(|w| w.trim().to_string())
                .filter(|w| !w.is_empty())),
            ..Default::default()
        }
    }
}

/// Only provided, non-blank fields are overwritten
#[derive(Object, Debug)]
pub struct UpdateLicenseRequest {
    /// Version the caller last read
    pub version: i32,
    pub full_name: Option<String>,
    pub dob: Option<String>,
    pub license_type: Option<String>,
    pub issue_date: Option<String>,
    pub expiry_date: Option<String>,
    pub status: Option<String>,
    pub issuing_authority: Option<String>,
    pub nationality: Option<String>,
    #[oai(validator(minimum(value = "0"), maximum(value = "12")))]
    pub point: Option<i32>,
    /// Attach or replace the bound wallet
    pub wallet_address: Option<String>,
}

impl UpdateLicenseRequest {
    pub fn into_patch(self) -> (i32, driver_license::ActiveModel) {
        let patch = driver_license::ActiveModel {
            full_name: patch_text(self.full_name),
            dob: patch_text(self.dob),
            license_type: patch_text(self.license_type),
            issue_date: patch_text(self.issue_date),
            expiry_date: patch_optional_text(self.expiry_date),
            status: patch_text(self.status),
            issuing_authority: patch_text(self.issuing_authority),
            nationality: patch_text(self.nationality),
            point: patch_value(self.point),
            wallet_address: patch_optional_text(self.wallet_address),
            ..Default::default()
        };
        (self.version, patch)
    }
}

#[derive(Object, Debug)]
pub struct LicenseResponse {
    pub id: String,
    pub full_name: String,
    pub dob: String,
    pub identity_no: String,
    pub license_no: String,
    pub license_type: String,
    pub issue_date: String,
    pub expiry_date: Option<String>,
    pub status: String,
    pub issuing_authority: String,
    pub nationality: String,
    pub point: i32,
    pub wallet_address: Option<String>,
    pub version: i32,
    pub active: bool,
    pub creator_id: String,
    pub modifier_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<driver_license::Model> for LicenseResponse {
    fn from(model: driver_license::Model) -> Self {
        Self {
            id: model.id,
            full_name: model.full_name,
            dob: model.dob,
            identity_no: model.identity_no,
            license_no: model.license_no,
            license_type: model.license_type,
            issue_date: model.issue_date,
            expiry_date: model.expiry_date,
            status: model.status,
            issuing_authority: model.issuing_authority,
            nationality: model.nationality,
            point: model.point,
            wallet_address: model.wallet_address,
            version: model.version,
            active: model.active,
            creator_id: model.creator_id,
            modifier_id: model.modifier_id,
            created_at: format_timestamp(model.created_at),
            updated_at: format_timestamp(model.updated_at),
        }
    }
}

pub type LicensePage = PageResponse<LicenseResponse>;

#[derive(ApiResponse)]
pub enum CreateLicenseApiResponse {
    /// License created
    #[oai(status = 201)]
    Created(Json<LicenseResponse>),
}
