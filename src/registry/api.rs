//! Role-gated entry points for every registry operation.

use super::{RegistryError, RegistryResult};
use crate::division::{
    domain::{Division, DivisionId},
    ports::DivisionRepository,
    services::{CreateDivisionRequest, DivisionDirectoryService},
};
use crate::foreman_unit::{
    domain::{ForemanUnit, ForemanUnitFilter, ForemanUnitId},
    ports::ForemanUnitRepository,
    services::{
        CreateForemanUnitRequest, DivisionSummary, ForemanUnitListing, ForemanUnitRegistryService,
        UpdateForemanUnitRequest,
    },
};
use crate::identity::{
    domain::{Principal, RequestContext},
    ports::SessionResolver,
    services::{IdentityGate, RequiredRole, authorize},
};
use crate::task::{
    domain::{Task, TaskId},
    ports::TaskLedger,
    services::TaskLedgerService,
};
use mockable::Clock;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Registry facade.
///
/// Mutations require an administrator; reads require any authenticated
/// principal. The role check runs before any store access.
///
/// Deleting a foreman unit excludes recording tasks for the duration of the
/// delete, so a task can never be left pointing at a unit that was removed
/// under it. Stores without foreign keys rely on this.
pub struct RegistryApi<S, D, U, T, C>
where
    S: SessionResolver,
    D: DivisionRepository,
    U: ForemanUnitRepository,
    T: TaskLedger,
    C: Clock + Send + Sync,
{
    gate: IdentityGate<S>,
    divisions: DivisionDirectoryService<D, C>,
    units: ForemanUnitRegistryService<D, U, T, C>,
    tasks: TaskLedgerService<T, C>,
    unit_tasks: RwLock<()>,
}

impl<S, D, U, T, C> RegistryApi<S, D, U, T, C>
where
    S: SessionResolver,
    D: DivisionRepository,
    U: ForemanUnitRepository,
    T: TaskLedger,
    C: Clock + Send + Sync,
{
    /// Wires the facade over the given session resolver and stores.
    #[must_use]
    pub fn new(
        sessions: Arc<S>,
        divisions: Arc<D>,
        units: Arc<U>,
        tasks: Arc<T>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            gate: IdentityGate::new(sessions),
            divisions: DivisionDirectoryService::new(Arc::clone(&divisions), Arc::clone(&clock)),
            units: ForemanUnitRegistryService::new(
                divisions,
                units,
                Arc::clone(&tasks),
                Arc::clone(&clock),
            ),
            tasks: TaskLedgerService::new(tasks, clock),
            unit_tasks: RwLock::new(()),
        }
    }

    /// Creates a division. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`],
    /// [`RegistryError::InvalidInput`], or [`RegistryError::DuplicateCode`].
    pub async fn create_division(
        &self,
        context: &RequestContext,
        request: CreateDivisionRequest,
    ) -> RegistryResult<Division> {
        self.admit(context, RequiredRole::Admin, "create_division")
            .await?;
        Ok(self.divisions.create(request).await?)
    }

    /// Lists every division, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`] for anonymous callers.
    pub async fn list_divisions(&self, context: &RequestContext) -> RegistryResult<Vec<Division>> {
        self.admit(context, RequiredRole::Any, "list_divisions")
            .await?;
        Ok(self.divisions.list_all().await?)
    }

    /// Lists every division with its foreman unit and task counts.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`] for anonymous callers.
    pub async fn list_divisions_with_counts(
        &self,
        context: &RequestContext,
    ) -> RegistryResult<Vec<DivisionSummary>> {
        self.admit(context, RequiredRole::Any, "list_divisions_with_counts")
            .await?;
        Ok(self.units.summarize_divisions().await?)
    }

    /// Looks up a division by its code.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`] for anonymous callers.
    pub async fn get_division_by_code(
        &self,
        context: &RequestContext,
        code: &str,
    ) -> RegistryResult<Option<Division>> {
        self.admit(context, RequiredRole::Any, "get_division_by_code")
            .await?;
        Ok(self.divisions.get_by_code(code).await?)
    }

    /// Looks up a division by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`] for anonymous callers.
    pub async fn get_division(
        &self,
        context: &RequestContext,
        id: DivisionId,
    ) -> RegistryResult<Option<Division>> {
        self.admit(context, RequiredRole::Any, "get_division").await?;
        Ok(self.divisions.get_by_id(id).await?)
    }

    /// Creates a foreman unit with a generated code. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`],
    /// [`RegistryError::DivisionNotFound`], or
    /// [`RegistryError::InvalidInput`].
    pub async fn create_foreman_unit(
        &self,
        context: &RequestContext,
        request: CreateForemanUnitRequest,
    ) -> RegistryResult<ForemanUnit> {
        self.admit(context, RequiredRole::Admin, "create_foreman_unit")
            .await?;
        Ok(self.units.create(request).await?)
    }

    /// Applies a partial update to a foreman unit. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`], [`RegistryError::NotFound`],
    /// [`RegistryError::DivisionNotFound`], or
    /// [`RegistryError::InvalidInput`].
    pub async fn update_foreman_unit(
        &self,
        context: &RequestContext,
        id: ForemanUnitId,
        request: UpdateForemanUnitRequest,
    ) -> RegistryResult<ForemanUnit> {
        self.admit(context, RequiredRole::Admin, "update_foreman_unit")
            .await?;
        Ok(self.units.update(id, request).await?)
    }

    /// Deletes a foreman unit that no task references. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`], [`RegistryError::NotFound`],
    /// or [`RegistryError::HasDependentTasks`].
    pub async fn delete_foreman_unit(
        &self,
        context: &RequestContext,
        id: ForemanUnitId,
    ) -> RegistryResult<()> {
        self.admit(context, RequiredRole::Admin, "delete_foreman_unit")
            .await?;
        let _exclusive = self.unit_tasks.write().await;
        Ok(self.units.delete(id).await?)
    }

    /// Lists foreman units with their division and task count.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`] for anonymous callers.
    pub async fn list_foreman_units(
        &self,
        context: &RequestContext,
        filter: &ForemanUnitFilter,
    ) -> RegistryResult<Vec<ForemanUnitListing>> {
        self.admit(context, RequiredRole::Any, "list_foreman_units")
            .await?;
        Ok(self.units.list_enriched(filter).await?)
    }

    /// Looks up a foreman unit by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`] for anonymous callers.
    pub async fn get_foreman_unit(
        &self,
        context: &RequestContext,
        id: ForemanUnitId,
    ) -> RegistryResult<Option<ForemanUnit>> {
        self.admit(context, RequiredRole::Any, "get_foreman_unit")
            .await?;
        Ok(self.units.find_by_id(id).await?)
    }

    /// Looks up a foreman unit by its generated code.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`] for anonymous callers.
    pub async fn get_foreman_unit_by_code(
        &self,
        context: &RequestContext,
        code: &str,
    ) -> RegistryResult<Option<ForemanUnit>> {
        self.admit(context, RequiredRole::Any, "get_foreman_unit_by_code")
            .await?;
        Ok(self.units.find_by_code(code).await?)
    }

    /// Records a task against an existing foreman unit.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`] for anonymous callers,
    /// [`RegistryError::NotFound`] when the unit does not exist, or
    /// [`RegistryError::InvalidInput`] for a blank title.
    pub async fn record_task(
        &self,
        context: &RequestContext,
        foreman_unit_id: ForemanUnitId,
        title: impl Into<String> + Send,
    ) -> RegistryResult<Task> {
        self.admit(context, RequiredRole::Any, "record_task").await?;
        let _shared = self.unit_tasks.read().await;
        if self.units.find_by_id(foreman_unit_id).await?.is_none() {
            return Err(RegistryError::NotFound(foreman_unit_id));
        }
        Ok(self.tasks.record(foreman_unit_id, title).await?)
    }

    /// Removes a task. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`] or
    /// [`RegistryError::TaskNotFound`].
    pub async fn remove_task(&self, context: &RequestContext, id: TaskId) -> RegistryResult<()> {
        self.admit(context, RequiredRole::Admin, "remove_task").await?;
        Ok(self.tasks.remove(id).await?)
    }

    /// Counts the tasks referencing a foreman unit.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`] for anonymous callers.
    pub async fn count_tasks(
        &self,
        context: &RequestContext,
        foreman_unit_id: ForemanUnitId,
    ) -> RegistryResult<u64> {
        self.admit(context, RequiredRole::Any, "count_tasks").await?;
        Ok(self.tasks.count_for_unit(foreman_unit_id).await?)
    }

    async fn admit(
        &self,
        context: &RequestContext,
        required: RequiredRole,
        operation: &'static str,
    ) -> RegistryResult<Principal> {
        let principal = self.gate.resolve_principal(context).await;
        match authorize(principal.as_ref(), required) {
            Ok(caller) => Ok(*caller),
            Err(err) => {
                tracing::warn!(operation, required = %required, error = %err, "request rejected");
                Err(err.into())
            }
        }
    }
}
