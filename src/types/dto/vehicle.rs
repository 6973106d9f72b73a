use poem_openapi::{ApiResponse, Object, payload::Json};
use sea_orm::ActiveValue::Set;

use crate::types::db::vehicle_registration;
use crate::types::dto::common::{PageResponse, format_timestamp, patch_text, patch_value};

#[derive(Object, Debug)]
pub struct CreateVehicleRequest {
    /// Plate number
    #[oai(validator(min_length = 1, max_length = 20))]
    pub vehicle_no: String,
    #[oai(validator(min_length = 1, max_length = 100))]
    pub owner_name: String,
    #[oai(validator(min_length = 1))]
    pub brand: String,
    #[oai(validator(min_length = 1))]
    pub type_vehicle: String,
    #[oai(validator(min_length = 1))]
    pub color_vehicle: String,
    #[oai(validator(min_length = 1))]
    pub chassis_no: String,
    #[oai(validator(min_length = 1))]
    pub engine_no: String,
    #[oai(validator(minimum(value = "1")))]
    pub seats: Option<i32>,
    #[oai(validator(min_length = 1))]
    pub issue_date: String,
    #[oai(validator(min_length = 1))]
    pub issuer: String,
    /// Defaults to "active"
    pub status: Option<String>,
}

impl CreateVehicleRequest {
    pub fn into_active_model(self) -> vehicle_registration::ActiveModel {
        vehicle_registration::ActiveModel {
            vehicle_no: Set(self.vehicle_no.trim().to_string()),
            owner_name: Set(self.owner_name.trim().to_string()),
            brand: Set(self.brand),
            type_vehicle: Set(self.type_vehicle),
            color_vehicle: Set(self.color_vehicle),
            chassis_no: Set(self.chassis_no),
            engine_no: Set(self.engine_no),
            seats: Set(self.seats),
            issue_date: Set(self.issue_date),
            issuer: Set(self.issuer),
            status: Set(self.status.unwrap_or_else(|| "active".to_string())),
            ..Default::default()
        }
    }
}

#[derive(Object, Debug)]
pub struct UpdateVehicleRequest {
    pub version: i32,
    pub owner_name: Option<String>,
    pub brand: Option<String>,
    pub type_vehicle: Option<String>,
    pub color_vehicle: Option<String>,
    pub chassis_no: Option<String>,
    pub engine_no: Option<String>,
    #[oai(validator(minimum(value = "1")))]
    pub seats: Option<i32>,
    pub issue_date: Option<String>,
    pub issuer: Option<String>,
    pub status: Option<String>,
}

impl UpdateVehicleRequest {
    pub fn into_patch(self) -> (i32, vehicle_registration::ActiveModel) {
        let patch = vehicle_registration::ActiveModel {
            owner_name: patch_text(self.owner_name),
            brand: patch_text(self.brand),
            type_vehicle: patch_text(self.type_vehicle),
            color_vehicle: patch_text(self.color_vehicle),
            chassis_no: patch_text(self.chassis_no),
            engine_no: patch_text(self.engine_no),
            seats: patch_value(self.seats.map(Some)),
            issue_date: patch_text(self.issue_date),
            issuer: patch_text(self.issuer),
            status: patch_text(self.status),
            ..Default::default()
        };
        (self.version, patch)
    }
}

#[derive(Object, Debug)]
pub struct VehicleResponse {
    pub id: String,
    pub vehicle_no: String,
    pub owner_name: String,
    pub brand: String,
    pub type_vehicle: String,
    pub color_vehicle: String,
    pub chassis_no: String,
    pub engine_no: String,
    pub seats: Option<i32>,
    pub issue_date: String,
    pub issuer: String,
    pub status: String,
    pub version: i32,
    pub active: bool,
    pub creator_id: String,
    pub modifier_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<vehicle_registration::Model> for VehicleResponse {
    fn from(model: vehicle_registration::Model) -> Self {
        Self {
            id: model.id,
            vehicle_no: model.vehicle_no,
            owner_name: model.owner_name,
            brand: model.brand,
            type_vehicle: model.type_vehicle,
            color_vehicle: model.color_vehicle,
            chassis_no: model.chassis_no,
            engine_no: model.engine_no,
            seats: model.seats,
            issue_date: model.issue_date,
            issuer: model.issuer,
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

pub type VehiclePage = PageResponse<VehicleResponse>;

#[derive(ApiResponse)]
pub enum CreateVehicleApiResponse {
    /// Vehicle registered
    #[oai(status = 201)]
    Created(Json<VehicleResponse>),
}
