use poem_openapi::{ApiResponse, Object, payload::Json};
use sea_orm::ActiveValue::Set;

use crate::types::db::gov_agency;
use crate::types::dto::common::{PageResponse, format_timestamp, patch_text};

#[derive(Object, Debug)]
pub struct CreateAgencyRequest {
    #[oai(validator(min_length = 1, max_length = 200))]
    pub name: String,
    #[oai(validator(min_length = 1))]
    pub address: String,
    #[oai(validator(min_length = 1))]
    pub city: String,
    /// e.g. "police", "transport"
    #[oai(validator(min_length = 1))]
    pub agency_type: String,
    #[oai(validator(min_length = 1, max_length = 20))]
    pub phone: String,
    #[oai(validator(min_length = 3))]
    pub email: String,
    /// Defaults to "active"
    pub status: Option<String>,
}

impl CreateAgencyRequest {
    pub fn into_active_model(self) -> gov_agency::ActiveModel {
        gov_agency::ActiveModel {
            name: Set(self.name.trim().to_string()),
            address: Set(self.address),
            city: Set(self.city),
            agency_type: Set(self.agency_type),
            phone: Set(self.phone),
            email: Set(self.email.trim().to_string()),
            status: Set(self.status.unwrap_or_else(|| "active".to_string())),
            ..Default::default()
        }
    }
}

#[derive(Object, Debug)]
pub struct UpdateAgencyRequest {
    pub version: i32,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub agency_type: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
}

impl UpdateAgencyRequest {
    pub fn into_patch(self) -> (i32, gov_agency::ActiveModel) {
        let patch = gov_agency::ActiveModel {
            name: patch_text(self.name),
            address: patch_text(self.address),
            city: patch_text(self.city),
            agency_type: patch_text(self.agency_type),
            phone: patch_text(self.phone),
            email: patch_text(self.email),
            status: patch_text(self.status),
            ..Default::default()
        };
        (self.version, patch)
    }
}

#[derive(Object, Debug)]
pub struct AgencyResponse {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub agency_type: String,
    pub phone: String,
    pub email: String,
    pub status: String,
    pub version: i32,
    pub active: bool,
    pub creator_id: String,
    pub modifier_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<gov_agency::Model> for AgencyResponse {
    fn from(model: gov_agency::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            address: model.address,
            city: model.city,
            agency_type: model.agency_type,
            phone: model.phone,
            email: model.email,
            status: model.status,
            version: model.version,
            active: model.active,
            creator_id: model.creator_id,
            modifier_id: model.modifier_id,
            created_at: format_timestamp(model.created_at),
            updated_at: format_timestamp(model.updated_at),
        }
    }
}

pub type AgencyPage = PageResponse<AgencyResponse>;

#[derive(ApiResponse)]
pub enum CreateAgencyApiResponse {
    /// Agency created
    #[oai(status = 201)]
    Created(Json<AgencyResponse>),
}
