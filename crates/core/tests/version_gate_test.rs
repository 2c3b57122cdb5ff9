use shiftql_core::{SupportedVersions, Version};

const ASE_RANGE: SupportedVersions = SupportedVersions::new("Sybase ASE")
    .minimum(15, 7)
    .maximum(16, 2);

#[test]
fn versions_below_minimum_are_incompatible() {
    for version in [
        Version::new(0, 0),
        Version::new(12, 5),
        Version::new(15, 0),
        Version::new(15, 6),
    ] {
        let error = ASE_RANGE
            .check(version)
            .expect_err("versions below 15.7 must be rejected");
        assert_eq!(error.version, version);
        assert_eq!(error.minimum, Version::new(15, 7));
        assert_eq!(error.product, "Sybase ASE");
    }
}

#[test]
fn versions_inside_range_pass_without_advisory() {
    for version in [
        Version::new(15, 7),
        Version::new(15, 9),
        Version::new(16, 0),
        Version::new(16, 2),
    ] {
        let advisory = ASE_RANGE
            .check(version)
            .unwrap_or_else(|error| panic!("{version} must be supported: {error}"));
        assert_eq!(advisory, None, "no advisory expected for {version}");
    }
}

#[test]
fn versions_above_maximum_produce_exactly_one_advisory() {
    for version in [Version::new(16, 3), Version::new(17, 0), Version::new(40, 1)] {
        let advisory = ASE_RANGE
            .check(version)
            .expect("newer versions are not fatal")
            .expect("newer versions must produce an advisory");
        assert_eq!(advisory.version, version);
        assert_eq!(advisory.maximum, Version::new(16, 2));
        assert!(advisory.to_string().contains("consider upgrading shiftql"));
    }
}

#[test]
fn missing_bounds_disable_their_checks() {
    let unbounded = SupportedVersions::new("Experimental");
    assert_eq!(unbounded.check(Version::new(0, 0)), Ok(None));
    assert_eq!(unbounded.check(Version::new(u16::MAX, u16::MAX)), Ok(None));

    let minimum_only = SupportedVersions::new("SQLite").minimum(3, 7);
    assert_eq!(minimum_only.check(Version::new(99, 0)), Ok(None));
    assert!(minimum_only.check(Version::new(3, 6)).is_err());
}

#[test]
fn incompatible_version_message_names_product_and_minimum() {
    let error = ASE_RANGE
        .check(Version::new(15, 6))
        .expect_err("15.6 must be rejected");

    let message = error.to_string();
    assert!(message.contains("Sybase ASE 15.6"), "got: {message}");
    assert!(message.contains("15.7"), "got: {message}");
}
