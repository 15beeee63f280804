//! Property tests for the permission decision

use proptest::prelude::*;
use pulseengine_permissions::{Permission, PermissionConfig, PermissionMode};

fn base_mode() -> impl Strategy<Value = PermissionMode> {
    prop::sample::select(PermissionMode::BASE.to_vec())
}

fn any_mode() -> impl Strategy<Value = PermissionMode> {
    let modes: Vec<_> = PermissionMode::ALL.iter().map(|(_, mode)| *mode).collect();
    prop::sample::select(modes)
}

fn role_name() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn role_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(role_name(), 0..5)
}

#[derive(Debug, Clone)]
enum Rule {
    Allow(PermissionMode, Vec<String>),
    Deny(PermissionMode, Vec<String>),
}

fn rule() -> impl Strategy<Value = Rule> {
    prop_oneof![
        (any_mode(), role_names()).prop_map(|(mode, roles)| Rule::Allow(mode, roles)),
        (any_mode(), role_names()).prop_map(|(mode, roles)| Rule::Deny(mode, roles)),
    ]
}

fn permission() -> impl Strategy<Value = Permission> {
    prop::collection::vec(rule(), 0..6).prop_map(|rules| {
        let mut permission = Permission::new();
        for rule in rules {
            match rule {
                Rule::Allow(mode, roles) => permission.allow(mode, roles),
                Rule::Deny(mode, roles) => permission.deny(mode, roles),
            };
        }
        permission
    })
}

fn decisions(permission: &Permission, roles: &[String]) -> Vec<bool> {
    PermissionMode::ALL
        .iter()
        .map(|(_, mode)| permission.has_permission(*mode, roles))
        .collect()
}

proptest! {
    #[test]
    fn allowed_role_is_granted_and_others_are_not(mode in base_mode(), role in role_name()) {
        let mut permission = Permission::new();
        permission.allow(mode, [role.clone()]);

        prop_assert!(permission.has_permission(mode, &[role.as_str()]));
        prop_assert!(!permission.has_permission(mode, &["other-role"]));
    }

    #[test]
    fn fresh_permission_grants_everything(mode in any_mode(), roles in role_names()) {
        let permission = Permission::new();
        prop_assert!(permission.has_permission(mode, &roles));
    }

    #[test]
    fn deny_takes_precedence(mode in base_mode(), role in role_name(), extra in role_names()) {
        let mut permission = Permission::new();
        permission
            .allow(mode, [role.clone()])
            .allow(mode, extra.clone())
            .deny(mode, [role.clone()]);

        let mut actor = extra;
        actor.push(role);
        prop_assert!(!permission.has_permission(mode, &actor));
    }

    #[test]
    fn crud_allow_grants_every_base_mode(role in role_name()) {
        let mut permission = Permission::new();
        permission.allow(PermissionMode::Crud, [role.clone()]);

        for mode in PermissionMode::BASE {
            prop_assert!(permission.has_permission(mode, &[role.as_str()]));
        }
    }

    #[test]
    fn concat_grants_both_sides(mode in base_mode(), x in role_name(), y in role_name()) {
        let mut a = Permission::new();
        a.allow(mode, [x.clone()]);
        let mut b = Permission::new();
        b.allow(mode, [y.clone()]);

        let c = a.concat(&b);
        prop_assert!(c.has_permission(mode, &[x.as_str()]));
        prop_assert!(c.has_permission(mode, &[y.as_str()]));
    }

    #[test]
    fn concat_does_not_change_inputs(a in permission(), b in permission(), roles in role_names()) {
        let before_a = decisions(&a, &roles);
        let before_b = decisions(&b, &roles);

        let _ = a.concat(&b);
        let _ = b.concat(&a);

        prop_assert_eq!(decisions(&a, &roles), before_a);
        prop_assert_eq!(decisions(&b, &roles), before_b);
    }

    #[test]
    fn no_roles_never_pass_a_closed_mode(mode in base_mode(), roles in role_names()) {
        let mut permission = Permission::new();
        permission.allow(mode, roles);

        let no_roles: [&str; 0] = [];
        prop_assert!(!permission.has_permission(mode, &no_roles));
    }

    #[test]
    fn config_round_trip_preserves_rules(p in permission(), roles in role_names()) {
        let snapshot = PermissionConfig::from(&p);
        let rebuilt: Permission = snapshot.build();

        prop_assert_eq!(PermissionConfig::from(&rebuilt), snapshot);
        prop_assert_eq!(decisions(&rebuilt, &roles), decisions(&p, &roles));
    }

    #[test]
    fn config_matches_crud_then_base_calls(crud in role_names(), mode in base_mode(), extra in role_names()) {
        let built: Permission = PermissionConfig::new()
            .allow_roles(mode, extra.clone())
            .allow_roles(PermissionMode::Crud, crud.clone())
            .build();

        let mut direct = Permission::new();
        direct.allow(PermissionMode::Crud, crud).allow(mode, extra);

        prop_assert_eq!(PermissionConfig::from(&built), PermissionConfig::from(&direct));
    }
}
