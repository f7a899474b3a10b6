//! Predefined ACL preset expansion.
//!
//! A predefined ACL is a named shorthand the client sends with an upload
//! spec; the backend side expands it into a concrete access-control-entry
//! list at commit time.

use crate::types::{AclEntry, TeamGrant};

/// Project number used for synthesized owner grants.
const EMULATOR_PROJECT_NUMBER: &str = "1";

/// Expand a predefined ACL preset name into concrete entries.
///
/// `publicRead` grants `allUsers` read access alongside the owner grant;
/// every other value (including empty) yields only the project-owner grant.
#[must_use]
pub fn acl_for_preset(preset: &str) -> Vec<AclEntry> {
    let owner = AclEntry {
        role: "OWNER".to_owned(),
        entity_id: format!("project-owners-{EMULATOR_PROJECT_NUMBER}"),
        entity: format!("project-owners-{EMULATOR_PROJECT_NUMBER}"),
        project_team: Some(TeamGrant {
            project_number: EMULATOR_PROJECT_NUMBER.to_owned(),
            team: "owners".to_owned(),
        }),
        ..AclEntry::default()
    };

    if preset == "publicRead" {
        let all_users = AclEntry {
            role: "READER".to_owned(),
            entity_id: "allUsers".to_owned(),
            entity: "allUsers".to_owned(),
            ..AclEntry::default()
        };
        vec![owner, all_users]
    } else {
        vec![owner]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_expand_public_read_preset() {
        let acl = acl_for_preset("publicRead");
        assert_eq!(acl.len(), 2);
        assert_eq!(acl[0].role, "OWNER");
        assert_eq!(acl[1].entity, "allUsers");
        assert_eq!(acl[1].role, "READER");
        assert!(acl[1].project_team.is_none());
    }

    #[test]
    fn test_should_expand_default_preset_to_owner_only() {
        for preset in ["", "private", "projectPrivate"] {
            let acl = acl_for_preset(preset);
            assert_eq!(acl.len(), 1);
            assert_eq!(acl[0].role, "OWNER");
            let team = acl[0].project_team.as_ref().expect("owner has a team");
            assert_eq!(team.team, "owners");
        }
    }
}
