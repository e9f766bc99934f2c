use cosmwasm_std::{Addr, Empty, StdResult, Storage};
use cw_storage_plus::Map;
use pulse_types::minter::Capability;
use pulse_types::PulseError;

pub const GRANTS_KEY: &str = "capability_grants";
pub const ADMINS_KEY: &str = "capability_admins";
pub const FROZEN_KEY: &str = "capability_frozen";

/// Permission map from (capability, holder) plus a per-capability freeze flag.
pub struct Capabilities<'a> {
    pub grants: Map<'a, (&'a str, &'a Addr), Empty>,
    pub admins: Map<'a, &'a str, Capability>,
    pub frozen: Map<'a, &'a str, bool>,
}

impl<'a> Capabilities<'a> {
    pub fn new() -> Self {
        Capabilities {
            grants: Map::new(GRANTS_KEY),
            admins: Map::new(ADMINS_KEY),
            frozen: Map::new(FROZEN_KEY),
        }
    }

    /// Grants `Admin` to `admin` without authorization. Only meant for instantiation.
    pub fn initialize(&self, storage: &mut dyn Storage, admin: &Addr) -> StdResult<()> {
        self.grants
            .save(storage, (Capability::Admin.as_str(), admin), &Empty {})
    }

    pub fn has(&self, storage: &dyn Storage, capability: Capability, holder: &Addr) -> bool {
        self.grants.has(storage, (capability.as_str(), holder))
    }

    pub fn assert_has(
        &self,
        storage: &dyn Storage,
        capability: Capability,
        sender: &Addr,
    ) -> Result<(), PulseError> {
        if self.has(storage, capability, sender) {
            Ok(())
        } else {
            Err(PulseError::MissingCapability {
                capability,
                sender: sender.clone(),
            })
        }
    }

    /// Capability a sender must hold to grant or revoke `capability`.
    pub fn admin_of(&self, storage: &dyn Storage, capability: Capability) -> StdResult<Capability> {
        Ok(self
            .admins
            .may_load(storage, capability.as_str())?
            .unwrap_or(Capability::Admin))
    }

    pub fn is_frozen(&self, storage: &dyn Storage, capability: Capability) -> StdResult<bool> {
        Ok(self
            .frozen
            .may_load(storage, capability.as_str())?
            .unwrap_or(false))
    }

    fn assert_can_administer(
        &self,
        storage: &dyn Storage,
        sender: &Addr,
        capability: Capability,
    ) -> Result<(), PulseError> {
        if self.is_frozen(storage, capability)? {
            return Err(PulseError::CapabilityFrozen { capability });
        }
        let admin = self.admin_of(storage, capability)?;
        self.assert_has(storage, admin, sender)
    }

    pub fn grant(
        &self,
        storage: &mut dyn Storage,
        sender: &Addr,
        capability: Capability,
        grantee: &Addr,
    ) -> Result<(), PulseError> {
        self.assert_can_administer(storage, sender, capability)?;
        self.grants
            .save(storage, (capability.as_str(), grantee), &Empty {})?;
        Ok(())
    }

    pub fn revoke(
        &self,
        storage: &mut dyn Storage,
        sender: &Addr,
        capability: Capability,
        holder: &Addr,
    ) -> Result<(), PulseError> {
        self.assert_can_administer(storage, sender, capability)?;
        self.grants.remove(storage, (capability.as_str(), holder));
        Ok(())
    }

    /// Hands administration of `capability` to `sealed_admin` and freezes both.
    /// Nobody holds `sealed_admin` and nobody can ever be granted it, so the
    /// holders of `capability` are fixed from here on.
    pub fn seal(
        &self,
        storage: &mut dyn Storage,
        capability: Capability,
        sealed_admin: Capability,
    ) -> StdResult<()> {
        self.admins
            .save(storage, capability.as_str(), &sealed_admin)?;
        self.frozen.save(storage, capability.as_str(), &true)?;
        self.frozen.save(storage, sealed_admin.as_str(), &true)?;
        Ok(())
    }
}

impl<'a> Default for Capabilities<'a> {
    fn default() -> Self {
        Self::new()
    }
}
