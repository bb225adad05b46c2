use std::collections::BTreeMap;

use vreport::capacity::{parse_utilization, remaining_capacity, CapacityError, MAX_UTILIZATION_PCT};

#[test]
fn test_remaining_capacity_under_ceiling() {
    let mut used = BTreeMap::new();
    used.insert("cpu".to_string(), 40.0);
    used.insert("memory".to_string(), 0.0);
    let left = remaining_capacity(&used);
    assert_eq!(left["cpu"], 45.0);
    assert_eq!(left["memory"], MAX_UTILIZATION_PCT);
}

#[test]
fn test_remaining_capacity_never_negative() {
    let mut used = BTreeMap::new();
    used.insert("storage".to_string(), 85.0);
    used.insert("memory".to_string(), 97.5);
    let left = remaining_capacity(&used);
    assert_eq!(left["storage"], 0.0);
    assert_eq!(left["memory"], 0.0);
}

#[test]
fn test_parse_utilization_pairs() {
    let parsed = parse_utilization(["cpu=40", " memory = 72.5 "]).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed["cpu"], 40.0);
    assert_eq!(parsed["memory"], 72.5);
}

#[test]
fn test_parse_utilization_rejects_bad_entries() {
    assert_eq!(
        parse_utilization(["cpu"]).unwrap_err(),
        CapacityError::InvalidEntry("cpu".into())
    );
    assert_eq!(
        parse_utilization(["cpu=lots"]).unwrap_err(),
        CapacityError::InvalidEntry("cpu=lots".into())
    );
    assert!(parse_utilization(["=10"]).is_err());
    assert!(parse_utilization(["cpu=NaN"]).is_err());
}

#[test]
fn test_parse_utilization_empty() {
    let empty: [&str; 0] = [];
    assert!(parse_utilization(empty).unwrap().is_empty());
}
