mod common;

use common::*;
use ferrum_model::datatypes::Reference;
use ferrum_model::prelude::*;
use ferrum_model::resource::{ClaimPayee, Organization};
use ferrum_model::{Error, ModelConfig};

#[test]
fn defaults_enable_every_check() {
    let config = ModelConfig::default();
    assert!(config.check_reference_types);
    assert!(config.check_control_chars);
    assert!(config.enforce_max_cardinality);
    assert_eq!(ModelConfig::from_yaml_str("{}").unwrap(), config);
    assert_eq!(ModelConfig::from_json_str("{}").unwrap(), config);
}

#[test]
fn yaml_and_json_use_camel_case_keys() {
    let yaml = "checkReferenceTypes: false\ncheckControlChars: false\nenforceMaxCardinality: false\n";
    assert_eq!(ModelConfig::from_yaml_str(yaml).unwrap(), ModelConfig::lenient());

    let json = r#"{"checkReferenceTypes": false}"#;
    let config = ModelConfig::from_json_str(json).unwrap();
    assert_eq!(config, ModelConfig::default().with_reference_type_checks(false));
}

#[test]
fn malformed_or_unknown_settings_are_errors() {
    assert!(matches!(
        ModelConfig::from_yaml_str("checkReferenceTypes: sometimes\n"),
        Err(Error::Yaml(_))
    ));
    assert!(matches!(
        ModelConfig::from_yaml_str("strict: true\n"),
        Err(Error::Yaml(_))
    ));
    assert!(matches!(
        ModelConfig::from_json_str("{"),
        Err(Error::Json(_))
    ));
}

#[test]
fn serialized_config_loads_back() {
    let config = ModelConfig::default().with_control_char_checks(false);
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"checkControlChars\":false"));
    assert_eq!(ModelConfig::from_json_str(&json).unwrap(), config);
}

#[test]
fn loaded_config_drives_builds() {
    let config = ModelConfig::from_yaml_str("checkReferenceTypes: false\n").unwrap();
    let payee = ClaimPayee::builder()
        .r#type(concept("http://terminology.hl7.org/CodeSystem/payeetype", "provider"))
        .party(Reference::to("Group/1").unwrap());
    assert!(payee.clone().build().is_err());
    assert!(payee.build_with(&config).is_ok());

    let name = Organization::builder().name("Line\u{0001}");
    assert!(name.clone().build_with(&config).is_err());
    assert!(name.build_with(&ModelConfig::lenient()).is_ok());
}
