//! Apply, refresh, destroy and import against a [`StateFile`].
//!
//! Each function performs the remote calls for one lifecycle step and
//! records the result in the store only once the call has succeeded. The
//! caller decides when to persist the store.

use gsheets_client::{SheetsApi, ValuesApi};

use crate::error::{ProviderError, StateError};
use crate::plan::PlanAction;
use crate::range::{plan_range, RangeModel, RangeResource};
use crate::sheet::{plan_sheet, SheetModel, SheetResource};
use crate::state::{ResourceState, StateFile};

// ── Ranges ──────────────────────────────────────────────────────────

pub fn apply_range<C: ValuesApi>(
    resource: &RangeResource<C>,
    store: &mut StateFile,
    address: &str,
    declared: &RangeModel,
) -> Result<PlanAction, ProviderError> {
    let prior = store.range(address)?.cloned();
    let action = plan_range(prior.as_ref(), declared);
    log::info!("{}: {}", address, action);

    match (&action, prior) {
        (PlanAction::Create, _) => {
            let created = resource.create(declared)?;
            store.insert(address, ResourceState::Range(created))?;
        }
        (PlanAction::Update, Some(prior)) => {
            let updated = resource.update(&prior, declared)?;
            store.replace(address, ResourceState::Range(updated))?;
        }
        (PlanAction::Replace(_), Some(prior)) => {
            resource.delete(&prior)?;
            store.remove(address)?;
            let created = resource.create(declared)?;
            store.insert(address, ResourceState::Range(created))?;
        }
        _ => {}
    }
    Ok(action)
}

/// Refresh state from the remote and return it.
pub fn refresh_range<C: ValuesApi>(
    resource: &RangeResource<C>,
    store: &mut StateFile,
    address: &str,
) -> Result<RangeModel, ProviderError> {
    let prior = store.require_range(address)?;
    let current = resource.read(prior)?;
    if &current != prior {
        log::info!("{}: remote values drifted", address);
        store.replace(address, ResourceState::Range(current.clone()))?;
    }
    Ok(current)
}

pub fn destroy_range<C: ValuesApi>(
    resource: &RangeResource<C>,
    store: &mut StateFile,
    address: &str,
) -> Result<RangeModel, ProviderError> {
    let prior = store.require_range(address)?.clone();
    resource.delete(&prior)?;
    store.remove(address)?;
    Ok(prior)
}

pub fn import_range<C: ValuesApi>(
    resource: &RangeResource<C>,
    store: &mut StateFile,
    address: &str,
    id: &str,
) -> Result<RangeModel, ProviderError> {
    if store.is_managed(address) {
        return Err(StateError::AlreadyManaged(address.to_string()).into());
    }
    let imported = resource.import(id)?;
    store.insert(address, ResourceState::Range(imported.clone()))?;
    Ok(imported)
}

// ── Sheets ──────────────────────────────────────────────────────────

pub fn apply_sheet<C: SheetsApi>(
    resource: &SheetResource<C>,
    store: &mut StateFile,
    address: &str,
    declared: &SheetModel,
) -> Result<PlanAction, ProviderError> {
    let prior = store.sheet(address)?.cloned();
    let action = plan_sheet(prior.as_ref(), declared);
    log::info!("{}: {}", address, action);

    match (&action, prior) {
        (PlanAction::Create, _) => {
            let created = resource.create(declared)?;
            store.insert(address, ResourceState::Sheet(created))?;
        }
        (PlanAction::Update, Some(prior)) => {
            let updated = resource.update(&prior, declared)?;
            store.replace(address, ResourceState::Sheet(updated))?;
        }
        (PlanAction::Replace(_), Some(prior)) => {
            resource.delete(&prior)?;
            store.remove(address)?;
            let created = resource.create(declared)?;
            store.insert(address, ResourceState::Sheet(created))?;
        }
        _ => {}
    }
    Ok(action)
}

/// Refresh sheet state. A tab deleted outside this tool is dropped from
/// the store and reported as `None`.
pub fn refresh_sheet<C: SheetsApi>(
    resource: &SheetResource<C>,
    store: &mut StateFile,
    address: &str,
) -> Result<Option<SheetModel>, ProviderError> {
    let prior = store.require_sheet(address)?;
    match resource.read(prior)? {
        Some(current) => {
            if &current != prior {
                store.replace(address, ResourceState::Sheet(current.clone()))?;
            }
            Ok(Some(current))
        }
        None => {
            store.remove(address)?;
            Ok(None)
        }
    }
}

pub fn destroy_sheet<C: SheetsApi>(
    resource: &SheetResource<C>,
    store: &mut StateFile,
    address: &str,
) -> Result<SheetModel, ProviderError> {
    let prior = store.require_sheet(address)?.clone();
    resource.delete(&prior)?;
    store.remove(address)?;
    Ok(prior)
}

pub fn import_sheet<C: SheetsApi>(
    resource: &SheetResource<C>,
    store: &mut StateFile,
    address: &str,
    id: &str,
) -> Result<SheetModel, ProviderError> {
    if store.is_managed(address) {
        return Err(StateError::AlreadyManaged(address.to_string()).into());
    }
    let imported = resource.import(id)?;
    store.insert(address, ResourceState::Sheet(imported.clone()))?;
    Ok(imported)
}
