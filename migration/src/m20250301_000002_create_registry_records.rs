use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Columns shared by every versioned, soft-deletable record table
fn with_record_columns<T: IntoIden + Copy>(
    table: &mut TableCreateStatement,
    id: T,
    version: T,
    active: T,
    creator_id: T,
    modifier_id: T,
    created_at: T,
    updated_at: T,
) {
    table
        .col(ColumnDef::new(id).string().not_null().primary_key())
        .col(ColumnDef::new(version).integer().not_null().default(1))
        .col(ColumnDef::new(active).boolean().not_null().default(true))
        .col(ColumnDef::new(creator_id).string().not_null())
        .col(ColumnDef::new(modifier_id).string().null())
        .col(ColumnDef::new(created_at).big_integer().not_null())
        .col(ColumnDef::new(updated_at).big_integer().not_null());
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // driver_licenses
        let mut licenses = Table::create();
        licenses.table(DriverLicenses::Table).if_not_exists();
        with_record_columns(
            &mut licenses,
            DriverLicenses::Id,
            DriverLicenses::Version,
            DriverLicenses::Active,
            DriverLicenses::CreatorId,
            DriverLicenses::ModifierId,
            DriverLicenses::CreatedAt,
            DriverLicenses::UpdatedAt,
        );
        licenses
            .col(ColumnDef::new(DriverLicenses::FullName).string().not_null())
            .col(ColumnDef::new(DriverLicenses::Dob).string().not_null())
            .col(ColumnDef::new(DriverLicenses::IdentityNo).string().not_null())
            .col(ColumnDef::new(DriverLicenses::LicenseNo).string().not_null())
            .col(ColumnDef::new(DriverLicenses::LicenseType).string().not_null())
            .col(ColumnDef::new(DriverLicenses::IssueDate).string().not_null())
            .col(ColumnDef::new(DriverLicenses::ExpiryDate).string().null())
            .col(ColumnDef::new(DriverLicenses::Status).string().not_null())
            .col(ColumnDef::new(DriverLicenses::IssuingAuthority).string().not_null())
            .col(ColumnDef::new(DriverLicenses::Nationality).string().not_null())
            .col(ColumnDef::new(DriverLicenses::Point).integer().not_null().default(12))
            .col(ColumnDef::new(DriverLicenses::WalletAddress).string().null());
        manager.create_table(licenses.to_owned()).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_driver_licenses_license_no")
                    .table(DriverLicenses::Table)
                    .col(DriverLicenses::LicenseNo)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_driver_licenses_identity_no")
                    .table(DriverLicenses::Table)
                    .col(DriverLicenses::IdentityNo)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_driver_licenses_wallet_address")
                    .table(DriverLicenses::Table)
                    .col(DriverLicenses::WalletAddress)
                    .to_owned(),
            )
            .await?;

        // vehicle_registrations
        let mut vehicles = Table::create();
        vehicles.table(VehicleRegistrations::Table).if_not_exists();
        with_record_columns(
            &mut vehicles,
            VehicleRegistrations::Id,
            VehicleRegistrations::Version,
            VehicleRegistrations::Active,
            VehicleRegistrations::CreatorId,
            VehicleRegistrations::ModifierId,
            VehicleRegistrations::CreatedAt,
            VehicleRegistrations::UpdatedAt,
        );
        vehicles
            .col(ColumnDef::new(VehicleRegistrations::VehicleNo).string().not_null())
            .col(ColumnDef::new(VehicleRegistrations::OwnerName).string().not_null())
            .col(ColumnDef::new(VehicleRegistrations::Brand).string().not_null())
            .col(ColumnDef::new(VehicleRegistrations::TypeVehicle).string().not_null())
            .col(ColumnDef::new(VehicleRegistrations::ColorVehicle).string().not_null())
            .col(ColumnDef::new(VehicleRegistrations::ChassisNo).string().not_null())
            .col(ColumnDef::new(VehicleRegistrations::EngineNo).string().not_null())
            .col(ColumnDef::new(VehicleRegistrations::Seats).integer().null())
            .col(ColumnDef::new(VehicleRegistrations::IssueDate).string().not_null())
            .col(ColumnDef::new(VehicleRegistrations::Issuer).string().not_null())
            .col(ColumnDef::new(VehicleRegistrations::Status).string().not_null());
        manager.create_table(vehicles.to_owned()).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vehicle_registrations_vehicle_no")
                    .table(VehicleRegistrations::Table)
                    .col(VehicleRegistrations::VehicleNo)
                    .to_owned(),
            )
            .await?;

        // traffic_violations
        let mut violations = Table::create();
        violations.table(TrafficViolations::Table).if_not_exists();
        with_record_columns(
            &mut violations,
            TrafficViolations::Id,
            TrafficViolations::Version,
            TrafficViolations::Active,
            TrafficViolations::CreatorId,
            TrafficViolations::ModifierId,
            TrafficViolations::CreatedAt,
            TrafficViolations::UpdatedAt,
        );
        violations
            .col(ColumnDef::new(TrafficViolations::VehicleNo).string().not_null())
            .col(ColumnDef::new(TrafficViolations::Date).string().not_null())
            .col(ColumnDef::new(TrafficViolations::ViolationType).string().not_null())
            .col(ColumnDef::new(TrafficViolations::Address).string().not_null())
            .col(ColumnDef::new(TrafficViolations::Description).string().not_null())
            .col(ColumnDef::new(TrafficViolations::Points).integer().not_null().default(0))
            .col(ColumnDef::new(TrafficViolations::FineAmount).big_integer().not_null().default(0))
            .col(ColumnDef::new(TrafficViolations::Status).string().not_null());
        manager.create_table(violations.to_owned()).await?;

        // gov_agencies
        let mut agencies = Table::create();
        agencies.table(GovAgencies::Table).if_not_exists();
        with_record_columns(
            &mut agencies,
            GovAgencies::Id,
            GovAgencies::Version,
            GovAgencies::Active,
            GovAgencies::CreatorId,
            GovAgencies::ModifierId,
            GovAgencies::CreatedAt,
            GovAgencies::UpdatedAt,
        );
        agencies
            .col(ColumnDef::new(GovAgencies::Name).string().not_null())
            .col(ColumnDef::new(GovAgencies::Address).string().not_null())
            .col(ColumnDef::new(GovAgencies::City).string().not_null())
            .col(ColumnDef::new(GovAgencies::AgencyType).string().not_null())
            .col(ColumnDef::new(GovAgencies::Phone).string().not_null())
            .col(ColumnDef::new(GovAgencies::Email).string().not_null())
            .col(ColumnDef::new(GovAgencies::Status).string().not_null());
        manager.create_table(agencies.to_owned()).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GovAgencies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TrafficViolations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VehicleRegistrations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DriverLicenses::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum DriverLicenses {
    Table,
    Id,
    FullName,
    Dob,
    IdentityNo,
    LicenseNo,
    LicenseType,
    IssueDate,
    ExpiryDate,
    Status,
    IssuingAuthority,
    Nationality,
    Point,
    WalletAddress,
    Version,
    Active,
    CreatorId,
    ModifierId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum VehicleRegistrations {
    Table,
    Id,
    VehicleNo,
    OwnerName,
    Brand,
    TypeVehicle,
    ColorVehicle,
    ChassisNo,
    EngineNo,
    Seats,
    IssueDate,
    Issuer,
    Status,
    Version,
    Active,
    CreatorId,
    ModifierId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum TrafficViolations {
    Table,
    Id,
    VehicleNo,
    Date,
    ViolationType,
    Address,
    Description,
    Points,
    FineAmount,
    Status,
    Version,
    Active,
    CreatorId,
    ModifierId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden, Clone, Copy)]
enum GovAgencies {
    Table,
    Id,
    Name,
    Address,
    City,
    AgencyType,
    Phone,
    Email,
    Status,
    Version,
    Active,
    CreatorId,
    ModifierId,
    CreatedAt,
    UpdatedAt,
}
