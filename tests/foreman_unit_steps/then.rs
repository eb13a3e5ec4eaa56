//! Then steps for foreman unit registry BDD scenarios.

use super::world::{RegistryWorld, run_async};
use estate_registry::{
    foreman_unit::domain::ForemanUnitFilter,
    registry::{RegistryError, StatusClass},
};
use rstest_bdd_macros::then;

#[then(r#"the created codes are "{codes}""#)]
fn created_codes_are(world: &RegistryWorld, codes: String) -> Result<(), eyre::Report> {
    let expected: Vec<&str> = codes.split(',').map(str::trim).collect();
    let actual: Vec<&str> = world
        .created
        .iter()
        .map(|unit| unit.code().as_str())
        .collect();

    if actual != expected {
        return Err(eyre::eyre!("expected codes {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("the deletion is refused with {count:u64} dependent tasks")]
fn deletion_refused(world: &RegistryWorld, count: u64) -> Result<(), eyre::Report> {
    match world.last_error {
        Some(RegistryError::HasDependentTasks { count: actual, .. }) if actual == count => Ok(()),
        ref other => Err(eyre::eyre!(
            "expected HasDependentTasks with {count} task(s), got {other:?}"
        )),
    }
}

#[then("the foreman unit still exists")]
fn unit_still_exists(world: &RegistryWorld) -> Result<(), eyre::Report> {
    let unit_id = world.unit()?.id();
    let found = run_async(world.api.get_foreman_unit(&world.user, unit_id))
        .map_err(|err| eyre::eyre!("lookup failed: {err}"))?;
    if found.is_none() {
        return Err(eyre::eyre!("foreman unit {unit_id} disappeared"));
    }
    Ok(())
}

#[then("the foreman unit no longer exists")]
fn unit_gone(world: &RegistryWorld) -> Result<(), eyre::Report> {
    if let Some(err) = &world.last_error {
        return Err(eyre::eyre!("deletion failed: {err}"));
    }
    let unit_id = world.unit()?.id();
    let found = run_async(world.api.get_foreman_unit(&world.user, unit_id))
        .map_err(|err| eyre::eyre!("lookup failed: {err}"))?;
    if found.is_some() {
        return Err(eyre::eyre!("foreman unit {unit_id} still exists"));
    }
    Ok(())
}

#[then("the request is refused as forbidden")]
fn request_forbidden(world: &RegistryWorld) -> Result<(), eyre::Report> {
    let status = world.last_error.as_ref().map(RegistryError::status_class);
    if status != Some(StatusClass::Forbidden) {
        return Err(eyre::eyre!(
            "expected a forbidden error, got {:?}",
            world.last_error
        ));
    }
    Ok(())
}

#[then("no foreman units are listed for the user")]
fn nothing_listed(world: &RegistryWorld) -> Result<(), eyre::Report> {
    let listed = run_async(
        world
            .api
            .list_foreman_units(&world.user, &ForemanUnitFilter::new().including_inactive()),
    )
    .map_err(|err| eyre::eyre!("listing failed: {err}"))?;
    if !listed.is_empty() {
        return Err(eyre::eyre!("expected no units, found {}", listed.len()));
    }
    Ok(())
}

#[then("the foreman unit is vacant")]
fn unit_is_vacant(world: &RegistryWorld) -> Result<(), eyre::Report> {
    let unit = world.unit()?;
    if !unit.is_vacant() {
        return Err(eyre::eyre!("expected vacancy, found {}", unit.assignment()));
    }
    Ok(())
}

#[then(r#"the foreman unit is led by "{foreman}""#)]
fn unit_is_led_by(world: &RegistryWorld, foreman: String) -> Result<(), eyre::Report> {
    let unit = world.unit()?;
    let actual = unit.assignment().foreman_name().map(|name| name.as_str());
    if actual != Some(foreman.as_str()) {
        return Err(eyre::eyre!("expected foreman {foreman}, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"the foreman unit code is "{code}""#)]
fn unit_code_is(world: &RegistryWorld, code: String) -> Result<(), eyre::Report> {
    let unit = world.unit()?;
    if unit.code().as_str() != code {
        return Err(eyre::eyre!("expected code {code}, found {}", unit.code()));
    }
    Ok(())
}
