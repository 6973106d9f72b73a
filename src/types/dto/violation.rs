use poem_openapi::{ApiResponse, Object, payload::Json};
use sea_orm::ActiveValue::Set;

use crate::types::db::traffic_violation;
use crate::types::dto::common::{PageResponse, format_timestamp, patch_text, patch_value};

#[derive(Object, Debug)]
pub struct CreateViolationRequest {
    #[oai(validator(min_length = 1, max_length = 20))]
    pub vehicle_no: String,
    /// Date the violation occurred
    #[oai(validator(min_length = 1))]
    pub date: String,
    #[oai(validator(min_length = 1))]
    pub violation_type: String,
    #[oai(validator(min_length = 1))]
    pub address: String,
    pub description: Option<String>,
    /// Demerit points deducted
    #[oai(validator(minimum(value = "0"), maximum(value = "12")))]
    pub points: i32,
    #[oai(validator(minimum(value = "0")))]
    pub fine_amount: i64,
    /// Defaults to "unpaid"
    pub status: Option<String>,
}

impl CreateViolationRequest {
    pub fn into_active_model(self) -> traffic_violation::ActiveModel {
        traffic_violation::ActiveModel {
            vehicle_no: Set(self.vehicle_no.trim().to_string()),
            date: Set(self.date),
            violation_type: Set(self.violation_type),
            address: Set(self.address),
            description: Set(self.description.unwrap_or_default()),
            points: Set(self.points),
            fine_amount: Set(self.fine_amount),
            status: Set(self.status.unwrap_or_else(|| "unpaid".to_string())),
            ..Default::default()
        }
    }
}

#[derive(Object, Debug)]
pub struct UpdateViolationRequest {
    pub version: i32,
    pub date: Option<String>,
    pub violation_type: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    #[oai(validator(minimum(value = "0"), maximum(value = "12")))]
    pub points: Option<i32>,
    #[oai(validator(minimum(value = "0")))]
    pub fine_amount: Option<i64>,
    pub status: Option<String>,
}

impl UpdateViolationRequest {
    pub fn into_patch(self) -> (i32, traffic_violation::ActiveModel) {
        let patch = traffic_violation::ActiveModel {
            date: patch_text(self.date),
            violation_type: patch_text(self.violation_type),
            address: patch_text(self.address),
            description: patch_text(self.description),
            points: patch_value(self.points),
            fine_amount: patch_value(self.fine_amount),
            status: patch_text(self.status),
            ..Default::default()
        };
        (self.version, patch)
    }
}

#[derive(Object, Debug)]
pub struct ViolationResponse {
    pub id: String,
    pub vehicle_no: String,
    pub date: String,
    pub violation_type: String,
    pub address: String,
    pub description: String,
    pub points: i32,
    pub fine_amount: i64,
    pub status: String,
    pub version: i32,
    pub active: bool,
    pub creator_id: String,
    pub modifier_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<traffic_violation::Model> for ViolationResponse {
    fn from(model: traffic_violation::Model) -> Self {
        Self {
            id: model.id,
            vehicle_no: model.vehicle_no,
            date: model.date,
            violation_type: model.violation_type,
            address: model.address,
            description: model.description,
            points: model.points,
            fine_amount: model.fine_amount,
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

pub type ViolationPage = PageResponse<ViolationResponse>;

#[derive(ApiResponse)]
pub enum CreateViolationApiResponse {
    /// Violation recorded
    #[oai(status = 201)]
    Created(Json<ViolationResponse>),
}
