//! End-to-end checks on the emitted RSpec document.

use std::collections::BTreeMap;

use rspecgen::portal::Context;
use rspecgen::profile;

fn generate(bindings: &[(&str, &str)]) -> String {
    let mut context = Context::new();
    profile::define_parameters(&mut context).unwrap();
    let bindings: BTreeMap<String, String> = bindings
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let params = context.bind_parameters(&bindings);
    context.verify_parameters().unwrap();
    profile::build_request(&params).unwrap().to_xml().unwrap()
}

#[test]
fn default_document_contains_fixed_topology() {
    let xml = generate(&[]);

    for name in ["traffic", "cta", "cpf"] {
        assert!(
            xml.contains(&format!("<node client_id=\"{name}\"")),
            "missing node {name}"
        );
        assert!(xml.contains(&format!(
            "<emulab:blockstore name=\"{name}-bs\" class=\"local\" size=\"128GB\" \
             mountpoint=\"/mnt/data\" placement=\"any\"/>"
        )));
    }
    assert_eq!(xml.matches("<node ").count(), 3);
    assert_eq!(xml.matches("<hardware_type name=\"m510\"/>").count(), 3);
    assert_eq!(
        xml.matches(&format!("<disk_image name=\"{}\"/>", profile::UBUNTU18_IMG))
            .count(),
        3
    );
    assert_eq!(
        xml.matches(&format!(
            "component_manager_id=\"{}\"",
            profile::SITE_URN
        ))
        .count(),
        3
    );
}

#[test]
fn exactly_three_links_with_fixed_endpoints() {
    let xml = generate(&[]);

    let expected = [
        ("traffic-cta-link1", "traffic:eth2", "cta:eth2"),
        ("traffic-cta-link2", "traffic:eth3", "cta:eth3"),
        ("cta-cpf-link", "cta:eth1", "cpf:eth3"),
    ];
    for (link, a, b) in expected {
        let fragment = format!(
            "<link client_id=\"{link}\">\n    <interface_ref client_id=\"{a}\"/>\n    \
             <interface_ref client_id=\"{b}\"/>\n  </link>"
        );
        assert!(xml.contains(&fragment), "missing link fragment for {link}");
    }
    assert_eq!(xml.matches("<link ").count(), 3);
    assert_eq!(xml.matches("<interface_ref ").count(), 6);
}

#[test]
fn phystype_override_propagates_to_all_nodes() {
    let xml = generate(&[("phystype", "d710")]);

    assert_eq!(xml.matches("<hardware_type name=\"d710\"/>").count(), 3);
    assert!(!xml.contains("m510"));

    // Only the hardware type moves with the parameter.
    let default_xml = generate(&[]);
    assert_eq!(
        default_xml.replace("m510", "d710"),
        xml,
        "phystype must not affect any other field"
    );
}

#[test]
fn tour_text_present_verbatim() {
    let xml = generate(&[]);
    assert!(xml.contains(profile::TOUR_DESCRIPTION));
    assert!(xml.contains(profile::TOUR_INSTRUCTIONS));
    assert!(xml.contains("<description type=\"markdown\">"));
    assert!(xml.contains("<instructions type=\"markdown\">"));
}

#[test]
fn output_is_idempotent() {
    assert_eq!(generate(&[]), generate(&[]));
    assert_eq!(generate(&[("phystype", "m400")]), generate(&[("phystype", "m400")]));
}

#[test]
fn document_written_to_file_matches_rendered_string() {
    let xml = generate(&[]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("request.xml");
    std::fs::write(&path, &xml).unwrap();

    let read_back = std::fs::read_to_string(&path).unwrap();
    assert_eq!(read_back, xml);
    assert!(read_back.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
}

#[test]
fn unknown_binding_fails_verification() {
    let mut context = Context::new();
    profile::define_parameters(&mut context).unwrap();
    let mut bindings = BTreeMap::new();
    bindings.insert("hwtype".to_string(), "d710".to_string());
    let _ = context.bind_parameters(&bindings);
    assert!(context.verify_parameters().is_err());
}
