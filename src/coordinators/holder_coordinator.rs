use std::sync::Arc;

use sea_orm::{ColumnTrait, Condition};

use crate::AppData;
use crate::errors::InternalError;
use crate::errors::internal::validation::require_non_empty;
use crate::errors::internal::{PrincipalError, RecordError, ValidationError};
use crate::stores::{PrincipalStore, VersionedStore};
use crate::types::db::{
    VersionedEntity, driver_license, notification, traffic_violation, vehicle_registration,
};
use crate::types::internal::context::RequestContext;
use crate::types::internal::{AuthenticatedPrincipal, Page, PageRequest};

/// Notification audience that addresses every principal
pub const BROADCAST_TARGET: &str = "all";

/***
 * Records held by the calling principal, resolved through either identity.
 *
 * Licenses match the caller's identity number or the wallet linked to it.
 * Vehicles belong to the principal that registered them, and with a linked
 * wallet also to the principals whose licenses are bound to that wallet.
 * Violations follow the plates of those vehicles.
 */
pub struct HolderCoordinator {
    principal_store: Arc<PrincipalStore>,
    licenses: VersionedStore<driver_license::Entity>,
    vehicles: VersionedStore<vehicle_registration::Entity>,
    violations: VersionedStore<traffic_violation::Entity>,
    notifications: VersionedStore<notification::Entity>,
}

impl HolderCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            principal_store: Arc::clone(&app_data.principal_store),
            licenses: VersionedStore::new(app_data.db.clone()),
            vehicles: VersionedStore::new(app_data.db.clone()),
            violations: VersionedStore::new(app_data.db.clone()),
            notifications: VersionedStore::new(app_data.db.clone()),
        }
    }

    pub async fn my_licenses(
        &self,
        ctx: &RequestContext,
        request: PageRequest,
    ) -> Result<Page<driver_license::Model>, InternalError> {
        let holder = ctx.principal()?;

        let mut condition = Condition::any()
            .add(driver_license::Column::IdentityNo.eq(holder.identity_no.as_str()));
        if let Some(wallet) = holder.wallet_address.as_deref() {
            condition = condition.add(driver_license::Column::WalletAddress.eq(wallet));
        }

        self.licenses.list_where(ctx, condition, request).await
    }

    /// License bound to a wallet; public
    pub async fn license_by_wallet(
        &self,
        ctx: &RequestContext,
        wallet_address: &str,
    ) -> Result<driver_license::Model, InternalError> {
        require_non_empty("address", wallet_address)?;

        let condition =
            Condition::all().add(driver_license::Column::WalletAddress.eq(wallet_address.trim()));
        self.licenses
            .find_where(ctx, condition)
            .await?
            .ok_or_else(|| {
                RecordError::not_found(driver_license::Entity::RECORD_NAME, wallet_address).into()
            })
    }

    pub async fn my_vehicles(
        &self,
        ctx: &RequestContext,
        request: PageRequest,
    ) -> Result<Page<vehicle_registration::Model>, InternalError> {
        let owners = self.owner_ids(ctx, ctx.principal()?).await?;
        let condition = Condition::all().add(
            vehicle_registration::Column::CreatorId.is_in(owners.iter().map(String::as_str)),
        );
        self.vehicles.list_where(ctx, condition, request).await
    }

    /// Violations against any vehicle the caller holds
    pub async fn my_violations(
        &self,
        ctx: &RequestContext,
        request: PageRequest,
    ) -> Result<Page<traffic_violation::Model>, InternalError> {
        let owners = self.owner_ids(ctx, ctx.principal()?).await?;
        self.violations_for_owners(ctx, &owners, request).await
    }

    /// Violations against vehicles of the license holders bound to the caller's wallet.
    /// Requires a linked wallet.
    pub async fn violations_by_my_license(
        &self,
        ctx: &RequestContext,
        request: PageRequest,
    ) -> Result<Page<traffic_violation::Model>, InternalError> {
        let holder = ctx.principal()?;
        let wallet = holder.wallet_address.as_deref().ok_or_else(|| {
            ValidationError::invalid("wallet_address", "no wallet is linked to this account")
        })?;

        let owners = self.wallet_license_holders(ctx, wallet).await?;
        if owners.is_empty() {
            return Ok(Page::empty(request));
        }
        self.violations_for_owners(ctx, &owners, request).await
    }

    /// A violation the caller holds; anyone else's is reported as absent
    pub async fn my_violation(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<traffic_violation::Model, InternalError> {
        let owners = self.owner_ids(ctx, ctx.principal()?).await?;
        let violation = self.violations.get(ctx, id).await?;
        let plates = self.plates_owned_by(ctx, &owners).await?;

        if !plates.contains(&violation.vehicle_no) {
            return Err(RecordError::not_found(traffic_violation::Entity::RECORD_NAME, id).into());
        }
        Ok(violation)
    }

    /// Violations of one vehicle the caller holds
    pub async fn violations_by_my_vehicle(
        &self,
        ctx: &RequestContext,
        vehicle_id: &str,
        request: PageRequest,
    ) -> Result<Page<traffic_violation::Model>, InternalError> {
        let owners = self.owner_ids(ctx, ctx.principal()?).await?;
        let vehicle = self.vehicles.get(ctx, vehicle_id).await?;

        if !owners.contains(&vehicle.creator_id) {
            return Err(RecordError::not_found(
                vehicle_registration::Entity::RECORD_NAME,
                vehicle_id,
            )
            .into());
        }

        let condition =
            Condition::all().add(traffic_violation::Column::VehicleNo.eq(vehicle.vehicle_no));
        self.violations.list_where(ctx, condition, request).await
    }

    /// Broadcast notifications plus those addressed to the caller's identity number
    pub async fn my_notifications(
        &self,
        ctx: &RequestContext,
        request: PageRequest,
    ) -> Result<Page<notification::Model>, InternalError> {
        let condition = Self::addressed_to(ctx.principal()?);
        self.notifications.list_where(ctx, condition, request).await
    }

    pub async fn my_notification(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<notification::Model, InternalError> {
        let condition = Condition::all()
            .add(notification::Column::Id.eq(id))
            .add(Self::addressed_to(ctx.principal()?));

        self.notifications
            .find_where(ctx, condition)
            .await?
            .ok_or_else(|| RecordError::not_found(notification::Entity::RECORD_NAME, id).into())
    }

    fn addressed_to(holder: &AuthenticatedPrincipal) -> Condition {
        Condition::any()
            .add(notification::Column::Target.eq(BROADCAST_TARGET))
            .add(notification::Column::TargetUser.eq(holder.identity_no.as_str()))
    }

    /// The caller, plus the license holders bound to its wallet
    async fn owner_ids(
        &self,
        ctx: &RequestContext,
        holder: &AuthenticatedPrincipal,
    ) -> Result<Vec<String>, InternalError> {
        let mut owners = vec![holder.id.clone()];
        if let Some(wallet) = holder.wallet_address.as_deref() {
            owners.extend(self.wallet_license_holders(ctx, wallet).await?);
        }
        owners.sort();
        owners.dedup();
        Ok(owners)
    }

    /// Active principals whose identity numbers appear on licenses bound to `wallet`
    async fn wallet_license_holders(
        &self,
        ctx: &RequestContext,
        wallet: &str,
    ) -> Result<Vec<String>, InternalError> {
        let bound = self
            .licenses
            .all_where(
                ctx,
                Condition::all().add(driver_license::Column::WalletAddress.eq(wallet)),
            )
            .await?;

        let mut holders = Vec::with_capacity(bound.len());
        for license in bound {
            match self
                .principal_store
                .by_identity_number(ctx, &license.identity_no)
                .await
            {
                Ok(principal) => holders.push(principal.id),
                // License issued to someone without an account
                Err(InternalError::Principal(PrincipalError::NotFound { .. })) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(holders)
    }

    async fn plates_owned_by(
        &self,
        ctx: &RequestContext,
        owners: &[String],
    ) -> Result<Vec<String>, InternalError> {
        let condition = Condition::all().add(
            vehicle_registration::Column::CreatorId.is_in(owners.iter().map(String::as_str)),
        );
        let mut plates: Vec<String> = self
            .vehicles
            .all_where(ctx, condition)
            .await?
            .into_iter()
            .map(|vehicle| vehicle.vehicle_no)
            .collect();
        plates.sort();
        plates.dedup();
        Ok(plates)
    }

    async fn violations_for_owners(
        &self,
        ctx: &RequestContext,
        owners: &[String],
        request: PageRequest,
    ) -> Result<Page<traffic_violation::Model>, InternalError> {
        let plates = self.plates_owned_by(ctx, owners).await?;
        if plates.is_empty() {
            return Ok(Page::empty(request));
        }

        let condition = Condition::all().add(traffic_violation::Column::VehicleNo.is_in(plates));
        self.violations.list_where(ctx, condition, request).await
    }
}
