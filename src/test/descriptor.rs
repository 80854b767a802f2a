use crate::error::TopoError;
use crate::topo::{Family, TopoDescriptor};

#[test]
fn valid_descriptors_construct_and_report_their_family() {
    assert_eq!(
        TopoDescriptor::star(13).unwrap(),
        TopoDescriptor::Star { host_count: 13 }
    );
    assert_eq!(
        TopoDescriptor::chain(10).unwrap(),
        TopoDescriptor::Chain { length: 10 }
    );
    assert_eq!(
        TopoDescriptor::tree(4, 5).unwrap(),
        TopoDescriptor::Tree { depth: 4, fanout: 5 }
    );
    assert_eq!(TopoDescriptor::star(1).unwrap().family(), Family::Star);
    assert_eq!(TopoDescriptor::chain(1).unwrap().family(), Family::Chain);
    // depth 0 is a single root/leaf switch, valid.
    assert_eq!(TopoDescriptor::tree(0, 1).unwrap().family(), Family::Tree);
}

#[test]
fn non_positive_parameters_are_rejected() {
    for result in [
        TopoDescriptor::star(0),
        TopoDescriptor::star(-3),
        TopoDescriptor::chain(0),
        TopoDescriptor::chain(-1),
        TopoDescriptor::tree(-1, 5),
        TopoDescriptor::tree(4, 0),
        TopoDescriptor::tree(4, -2),
    ] {
        assert!(matches!(result, Err(TopoError::InvalidTopology(_))));
    }
}

#[test]
fn out_of_range_parameters_are_rejected_not_truncated() {
    // (1 << 32) + 1 truncates to 1 under a plain `as u32` cast; it must be
    // rejected instead of building a tiny tree.
    let err = TopoDescriptor::tree((1_i64 << 32) + 1, 5).unwrap_err();
    assert!(matches!(err, TopoError::InvalidTopology(_)), "{err}");
    assert!(err.to_string().contains("depth"), "{err}");

    for result in [
        TopoDescriptor::star(i64::MAX),
        TopoDescriptor::chain(i64::from(u32::MAX) + 1),
        TopoDescriptor::tree(4, i64::MAX),
    ] {
        assert!(matches!(result, Err(TopoError::InvalidTopology(_))));
    }
}

#[test]
fn invalid_parameter_errors_name_the_offending_input() {
    let err = TopoDescriptor::star(0).unwrap_err();
    assert!(err.to_string().contains("host_count"), "{err}");
    let err = TopoDescriptor::tree(4, -2).unwrap_err();
    assert!(err.to_string().contains("fanout"), "{err}");
    let err = TopoDescriptor::tree(-1, 5).unwrap_err();
    assert!(err.to_string().contains("depth"), "{err}");
}

#[test]
fn family_parses_case_insensitively_and_rejects_unknown_names() {
    assert_eq!("star".parse::<Family>().unwrap(), Family::Star);
    assert_eq!("CHAIN".parse::<Family>().unwrap(), Family::Chain);
    assert_eq!("Tree".parse::<Family>().unwrap(), Family::Tree);

    let err = "ring".parse::<Family>().unwrap_err();
    assert!(matches!(err, TopoError::InvalidTopology(_)));
    assert!(err.to_string().contains("ring"), "{err}");
}

#[test]
fn descriptor_serializes_with_a_family_tag() {
    let value = serde_json::to_value(TopoDescriptor::tree(4, 5).unwrap()).unwrap();
    assert_eq!(value["family"], "tree");
    assert_eq!(value["depth"], 4);
    assert_eq!(value["fanout"], 5);

    let parsed: TopoDescriptor =
        serde_json::from_value(serde_json::json!({ "family": "star", "host_count": 7 })).unwrap();
    assert_eq!(parsed, TopoDescriptor::Star { host_count: 7 });
}
