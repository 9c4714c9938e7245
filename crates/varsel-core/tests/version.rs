use varsel_core::version::VersionConstraint;

#[test]
fn empty_constraint_accepts_everything() {
    let c = VersionConstraint::default();
    assert!(c.is_empty());
    assert!(c.accepts("0.0.1"));
}

#[test]
fn strictly_takes_precedence_over_require() {
    let c = VersionConstraint {
        require: Some("2.0".to_string()),
        strictly: Some("1.0".to_string()),
        ..VersionConstraint::default()
    };
    assert_eq!(c.effective(), Some("1.0"));
    assert!(c.accepts("1.0.0"));
    assert!(!c.accepts("2.0"));
}

#[test]
fn prefer_only_constraint() {
    let c = VersionConstraint::prefer("1.4");
    assert_eq!(c.to_string(), "{prefer 1.4}");
    assert!(c.accepts("1.4"));
}

#[test]
fn reject_display_and_acceptance() {
    let c = VersionConstraint::require("[1.0,)").with_reject("1.1");
    assert_eq!(c.to_string(), "[1.0,) {reject 1.1}");
    assert!(c.accepts("1.2"));
    assert!(!c.accepts("1.1"));
}

#[test]
fn branch_is_part_of_equality() {
    let a = VersionConstraint::require("1.0");
    let b = VersionConstraint::require("1.0").with_branch("main");
    assert_ne!(a, b);
    assert!(!b.is_empty());
}
