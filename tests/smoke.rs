//! Integration smoke tests for `correlativas`

use correlativas::core::models::CourseCatalog;
use correlativas::get_version;

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}

#[test]
fn bundled_catalog_is_valid() {
    let catalog = CourseCatalog::bundled().expect("bundled catalog");

    assert_eq!(catalog.len(), 56);
    assert_eq!(catalog.mandatory().count(), 36);
    assert_eq!(catalog.electives().count(), 20);
    assert!(catalog
        .courses()
        .iter()
        .all(|course| course.prerequisites().all(|(_, id)| catalog.contains(id))));
}
