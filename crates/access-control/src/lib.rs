//! Access Control
//!
//! Role-based authorization modelled as an explicit graph rather than a
//! type hierarchy:
//!
//! - `members`: role -> set of addresses holding it
//! - `admins`: role -> the role whose holders may grant/revoke it
//!
//! Any component needing authorization owns an [`AccessControl`] and asks it
//! directly via [`AccessControl::check_role`].
//!
//! # Idempotency
//!
//! Grant, revoke and renounce are set operations. Repeating one that is
//! already in effect succeeds, changes nothing and emits no event.
//!
//! # Determinism
//!
//! BTreeMap/BTreeSet keep member listings and serialization ordered.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use farmland_core::{Address, Authority, Event, LedgerError, LedgerResult, Role};

/// Role membership and role-admin mapping for one contract
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControl {
    /// Contract the roles belong to (stamped on emitted events)
    contract: Address,
    members: BTreeMap<Role, BTreeSet<Address>>,
    /// Explicit admin roles; anything missing falls back to `DEFAULT_ADMIN`
    admins: BTreeMap<Role, Role>,
}

impl AccessControl {
    pub fn new(contract: Address) -> Self {
        Self {
            contract,
            members: BTreeMap::new(),
            admins: BTreeMap::new(),
        }
    }

    /// Check if an address has a role
    pub fn has_role(&self, role: &Role, account: &Address) -> bool {
        self.members
            .get(role)
            .map(|set| set.contains(account))
            .unwrap_or(false)
    }

    /// Fail with `Unauthorized` unless `account` holds `role`
    pub fn check_role(&self, role: &Role, account: &Address) -> LedgerResult<()> {
        if self.has_role(role, account) {
            Ok(())
        } else {
            Err(LedgerError::missing_role(*account, role.clone()))
        }
    }

    /// Role whose members may grant and revoke `role`
    pub fn get_role_admin(&self, role: &Role) -> Role {
        self.admins
            .get(role)
            .cloned()
            .unwrap_or(Role::DEFAULT_ADMIN)
    }

    /// Current members of a role, in address order
    pub fn members(&self, role: &Role) -> Vec<Address> {
        self.members
            .get(role)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Every role with at least one member, in role order
    pub fn role_members(&self) -> impl Iterator<Item = (&Role, &BTreeSet<Address>)> {
        self.members.iter().filter(|(_, set)| !set.is_empty())
    }

    /// Grant `role` to `account`. Returns whether membership changed.
    pub fn grant_role(
        &mut self,
        caller: Address,
        role: &Role,
        account: Address,
        events: &mut Vec<Event>,
    ) -> LedgerResult<bool> {
        self.check_role(&self.get_role_admin(role), &caller)?;
        Ok(self.setup_role(role, account, caller, events))
    }

    /// Revoke `role` from `account`. Returns whether membership changed.
    pub fn revoke_role(
        &mut self,
        caller: Address,
        role: &Role,
        account: Address,
        events: &mut Vec<Event>,
    ) -> LedgerResult<bool> {
        self.check_role(&self.get_role_admin(role), &caller)?;
        Ok(self.remove_role(role, account, caller, events))
    }

    /// Drop the caller's own membership of `role`
    pub fn renounce_role(
        &mut self,
        caller: Address,
        role: &Role,
        account: Address,
        events: &mut Vec<Event>,
    ) -> LedgerResult<bool> {
        if caller != account {
            return Err(LedgerError::Unauthorized {
                account: caller,
                required: Authority::Account(account),
            });
        }
        Ok(self.remove_role(role, account, caller, events))
    }

    /// Grant without an admin check. Only for contract construction.
    pub fn setup_role(
        &mut self,
        role: &Role,
        account: Address,
        sender: Address,
        events: &mut Vec<Event>,
    ) -> bool {
        let inserted = self.members.entry(role.clone()).or_default().insert(account);
        if inserted {
            events.push(Event::RoleGranted {
                contract: self.contract,
                role: role.clone(),
                account,
                sender,
            });
        }
        inserted
    }

    /// Point `role` at a new admin role. Only for contract construction.
    pub fn set_role_admin(&mut self, role: &Role, admin: Role, events: &mut Vec<Event>) {
        let previous_admin = self.get_role_admin(role);
        self.admins.insert(role.clone(), admin.clone());
        events.push(Event::RoleAdminChanged {
            contract: self.contract,
            role: role.clone(),
            previous_admin,
            new_admin: admin,
        });
    }

    fn remove_role(
        &mut self,
        role: &Role,
        account: Address,
        sender: Address,
        events: &mut Vec<Event>,
    ) -> bool {
        let removed = match self.members.get_mut(role) {
            Some(set) => set.remove(&account),
            None => false,
        };
        if removed {
            events.push(Event::RoleRevoked {
                contract: self.contract,
                role: role.clone(),
                account,
                sender,
            });
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u64) -> Address {
        Address::from_low_u64(n)
    }

    /// Admin at 1 holding DEFAULT_ADMIN and OWNER, OWNER administering MINTER
    fn setup() -> (AccessControl, Vec<Event>) {
        let mut events = Vec::new();
        let mut acl = AccessControl::new(addr(100));
        acl.setup_role(&Role::DEFAULT_ADMIN, addr(1), addr(1), &mut events);
        acl.setup_role(&Role::OWNER, addr(1), addr(1), &mut events);
        acl.set_role_admin(&Role::OWNER, Role::OWNER, &mut events);
        acl.set_role_admin(&Role::MINTER, Role::OWNER, &mut events);
        (acl, events)
    }

    #[test]
    fn test_default_admin_fallback() {
        let (acl, _) = setup();
        assert_eq!(acl.get_role_admin(&Role::MINTER), Role::OWNER);
        assert_eq!(acl.get_role_admin(&Role::new("AUDITOR")), Role::DEFAULT_ADMIN);
        assert_eq!(acl.get_role_admin(&Role::DEFAULT_ADMIN), Role::DEFAULT_ADMIN);
    }

    #[test]
    fn test_admin_can_grant_and_revoke() {
        let (mut acl, _) = setup();
        let mut events = Vec::new();

        assert!(acl.grant_role(addr(1), &Role::MINTER, addr(2), &mut events).unwrap());
        assert!(acl.has_role(&Role::MINTER, &addr(2)));

        assert!(acl.revoke_role(addr(1), &Role::MINTER, addr(2), &mut events).unwrap());
        assert!(!acl.has_role(&Role::MINTER, &addr(2)));

        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], Event::RoleGranted { .. }));
        assert!(matches!(events[1], Event::RoleRevoked { .. }));
    }

    #[test]
    fn test_non_admin_cannot_grant_or_revoke() {
        let (mut acl, _) = setup();
        let mut events = Vec::new();
        acl.grant_role(addr(1), &Role::MINTER, addr(2), &mut events).unwrap();
        let before = acl.clone();
        events.clear();

        let err = acl
            .grant_role(addr(2), &Role::MINTER, addr(3), &mut events)
            .unwrap_err();
        assert_eq!(err, LedgerError::missing_role(addr(2), Role::OWNER));

        let err = acl
            .revoke_role(addr(3), &Role::MINTER, addr(2), &mut events)
            .unwrap_err();
        assert_eq!(err, LedgerError::missing_role(addr(3), Role::OWNER));

        assert_eq!(acl, before);
        assert!(events.is_empty());
    }

    #[test]
    fn test_repeated_grant_and_revoke_are_silent() {
        let (mut acl, _) = setup();
        let mut events = Vec::new();

        assert!(acl.grant_role(addr(1), &Role::MINTER, addr(2), &mut events).unwrap());
        assert!(!acl.grant_role(addr(1), &Role::MINTER, addr(2), &mut events).unwrap());
        assert_eq!(events.len(), 1);

        // Never-held role: no-op, not an error
        assert!(!acl.revoke_role(addr(1), &Role::MINTER, addr(7), &mut events).unwrap());
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_membership_follows_latest_operation() {
        let (mut acl, _) = setup();
        let mut events = Vec::new();
        let ops = [true, true, false, true, false, false, true];
        for grant in ops {
            if grant {
                acl.grant_role(addr(1), &Role::MINTER, addr(5), &mut events).unwrap();
            } else {
                acl.revoke_role(addr(1), &Role::MINTER, addr(5), &mut events).unwrap();
            }
            assert_eq!(acl.has_role(&Role::MINTER, &addr(5)), grant);
        }
    }

    #[test]
    fn test_renounce_only_for_self() {
        let (mut acl, _) = setup();
        let mut events = Vec::new();
        acl.grant_role(addr(1), &Role::MINTER, addr(2), &mut events).unwrap();

        let err = acl
            .renounce_role(addr(1), &Role::MINTER, addr(2), &mut events)
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::Unauthorized {
                account: addr(1),
                required: Authority::Account(addr(2)),
            }
        );

        assert!(acl.renounce_role(addr(2), &Role::MINTER, addr(2), &mut events).unwrap());
        assert!(!acl.has_role(&Role::MINTER, &addr(2)));
    }

    #[test]
    fn test_members_sorted() {
        let (mut acl, _) = setup();
        let mut events = Vec::new();
        for n in [9, 3, 6] {
            acl.grant_role(addr(1), &Role::MINTER, addr(n), &mut events).unwrap();
        }
        assert_eq!(acl.members(&Role::MINTER), vec![addr(3), addr(6), addr(9)]);
        assert!(acl.members(&Role::PAUSER).is_empty());
    }

    #[test]
    fn test_role_members_skips_emptied_roles() {
        let (mut acl, _) = setup();
        let mut events = Vec::new();
        acl.grant_role(addr(1), &Role::MINTER, addr(2), &mut events).unwrap();
        acl.revoke_role(addr(1), &Role::MINTER, addr(2), &mut events).unwrap();

        let roles: Vec<&Role> = acl.role_members().map(|(role, _)| role).collect();
        assert_eq!(roles, vec![&Role::DEFAULT_ADMIN, &Role::OWNER]);
    }

    #[test]
    fn test_serde_round_trip_keeps_roles() {
        let (acl, _) = setup();
        let json = serde_json::to_string(&acl).unwrap();
        let parsed: AccessControl = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, acl);
    }
}
