//! Declarative per-type metadata.
//!
//! Every node type publishes a static [`NodeSchema`]: its fields in
//! declaration order with their types, cardinality, summary flag, reference
//! targets and terminology binding, plus the invariants that an external
//! constraint evaluator should check. Validation reads cardinality, choice
//! sets and reference targets from these consts, so the metadata and the
//! enforced rules cannot drift apart.

use phf::phf_set;
use std::fmt;

/// Every FHIR data type a field can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataType {
    Boolean,
    Integer,
    PositiveInt,
    UnsignedInt,
    Decimal,
    String,
    Code,
    Id,
    Uri,
    Markdown,
    Base64Binary,
    Xhtml,
    Date,
    DateTime,
    Address,
    Attachment,
    CodeableConcept,
    Coding,
    Identifier,
    Money,
    Period,
    Quantity,
    Reference,
    Extension,
    Meta,
    Narrative,
    BackboneElement,
    Resource,
}

impl DataType {
    /// The FHIR type name (`dateTime`, `CodeableConcept`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            DataType::Boolean => "boolean",
            DataType::Integer => "integer",
            DataType::PositiveInt => "positiveInt",
            DataType::UnsignedInt => "unsignedInt",
            DataType::Decimal => "decimal",
            DataType::String => "string",
            DataType::Code => "code",
            DataType::Id => "id",
            DataType::Uri => "uri",
            DataType::Markdown => "markdown",
            DataType::Base64Binary => "base64Binary",
            DataType::Xhtml => "xhtml",
            DataType::Date => "date",
            DataType::DateTime => "dateTime",
            DataType::Address => "Address",
            DataType::Attachment => "Attachment",
            DataType::CodeableConcept => "CodeableConcept",
            DataType::Coding => "Coding",
            DataType::Identifier => "Identifier",
            DataType::Money => "Money",
            DataType::Period => "Period",
            DataType::Quantity => "Quantity",
            DataType::Reference => "Reference",
            DataType::Extension => "Extension",
            DataType::Meta => "Meta",
            DataType::Narrative => "Narrative",
            DataType::BackboneElement => "BackboneElement",
            DataType::Resource => "Resource",
        }
    }

    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            DataType::Boolean
                | DataType::Integer
                | DataType::PositiveInt
                | DataType::UnsignedInt
                | DataType::Decimal
                | DataType::String
                | DataType::Code
                | DataType::Id
                | DataType::Uri
                | DataType::Markdown
                | DataType::Base64Binary
                | DataType::Xhtml
                | DataType::Date
                | DataType::DateTime
        )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Primitive,
    Complex,
    Backbone,
    Resource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingStrength {
    Required,
    Extensible,
    Preferred,
    Example,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub name: &'static str,
    pub strength: BindingStrength,
    pub value_set: &'static str,
}

impl Binding {
    pub const fn required(name: &'static str, value_set: &'static str) -> Self {
        Self {
            name,
            strength: BindingStrength::Required,
            value_set,
        }
    }

    pub const fn example(name: &'static str, value_set: &'static str) -> Self {
        Self {
            name,
            strength: BindingStrength::Example,
            value_set,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintLevel {
    Rule,
    Warning,
}

/// A FHIRPath invariant attached to a node type. Evaluated externally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraint {
    pub id: &'static str,
    pub level: ConstraintLevel,
    pub location: &'static str,
    pub description: &'static str,
    pub expression: &'static str,
}

/// One declared field of a node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: &'static str,
    pub types: &'static [DataType],
    pub min: u32,
    /// `None` means unbounded (`*`).
    pub max: Option<u32>,
    pub summary: bool,
    pub modifier: bool,
    /// Allowed referent resource types. Empty means any resource.
    pub reference_targets: &'static [&'static str],
    pub binding: Option<Binding>,
}

impl FieldInfo {
    pub const fn new(name: &'static str, types: &'static [DataType]) -> Self {
        Self {
            name,
            types,
            min: 0,
            max: Some(1),
            summary: false,
            modifier: false,
            reference_targets: &[],
            binding: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.min = 1;
        self
    }

    pub const fn repeating(mut self) -> Self {
        self.max = None;
        self
    }

    pub const fn max(mut self, max: u32) -> Self {
        self.max = Some(max);
        self
    }

    pub const fn summary(mut self) -> Self {
        self.summary = true;
        self
    }

    pub const fn modifier(mut self) -> Self {
        self.modifier = true;
        self
    }

    pub const fn targets(mut self, targets: &'static [&'static str]) -> Self {
        self.reference_targets = targets;
        self
    }

    pub const fn binding(mut self, binding: Binding) -> Self {
        self.binding = Some(binding);
        self
    }

    pub fn is_required(&self) -> bool {
        self.min > 0
    }

    pub fn is_repeating(&self) -> bool {
        self.max.map_or(true, |max| max > 1)
    }

    pub fn is_choice(&self) -> bool {
        self.types.len() > 1
    }

    pub fn permits(&self, data_type: DataType) -> bool {
        self.types.contains(&data_type)
    }

    pub fn type_names(&self) -> Vec<&'static str> {
        self.types.iter().map(|t| t.name()).collect()
    }

    /// Type-specific element name of a choice field, e.g. `timingDate`.
    pub fn choice_element_name(&self, data_type: DataType) -> String {
        let type_name = data_type.name();
        let mut name = String::with_capacity(self.name.len() + type_name.len());
        name.push_str(self.name);
        let mut chars = type_name.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
        name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeSchema {
    pub type_name: &'static str,
    pub kind: NodeKind,
    pub base: Option<&'static NodeSchema>,
    pub fields: &'static [FieldInfo],
    pub constraints: &'static [Constraint],
}

impl NodeSchema {
    /// Fields including inherited ones, base type first.
    pub fn all_fields(&self) -> Vec<&'static FieldInfo> {
        let mut fields = self.base.map(|b| b.all_fields()).unwrap_or_default();
        fields.extend(self.fields.iter());
        fields
    }

    pub fn all_constraints(&self) -> Vec<&'static Constraint> {
        let mut constraints = self.base.map(|b| b.all_constraints()).unwrap_or_default();
        constraints.extend(self.constraints.iter());
        constraints
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldInfo> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .or_else(|| self.base.and_then(|b| b.field(name)))
    }

    pub fn summary_fields(&self) -> Vec<&'static FieldInfo> {
        self.all_fields().into_iter().filter(|f| f.summary).collect()
    }

    /// Resolves a type-specific element name (`timingPeriod`) to its choice
    /// field and the selected type.
    pub fn choice_field_for(&self, element_name: &str) -> Option<(&'static FieldInfo, DataType)> {
        self.all_fields().into_iter().find_map(|field| {
            if !field.is_choice() || !element_name.starts_with(field.name) {
                return None;
            }
            field
                .types
                .iter()
                .find(|t| field.choice_element_name(**t) == element_name)
                .map(|t| (field, *t))
        })
    }

    pub fn is_choice(&self, name: &str) -> bool {
        self.field(name).is_some_and(FieldInfo::is_choice)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.field(name).is_some_and(FieldInfo::is_required)
    }

    pub fn is_repeating(&self, name: &str) -> bool {
        self.field(name).is_some_and(FieldInfo::is_repeating)
    }

    pub fn is_summary(&self, name: &str) -> bool {
        self.field(name).is_some_and(|f| f.summary)
    }

    pub fn reference_targets(&self, name: &str) -> &'static [&'static str] {
        self.field(name).map_or(&[], |f| f.reference_targets)
    }
}

static RESOURCE_TYPES: phf::Set<&'static str> = phf_set! {
    "Account", "ActivityDefinition", "AdministrableProductDefinition", "AdverseEvent",
    "AllergyIntolerance", "Appointment", "AppointmentResponse", "AuditEvent", "Basic",
    "Binary", "BiologicallyDerivedProduct", "BodyStructure", "Bundle",
    "CapabilityStatement", "CarePlan", "CareTeam", "CatalogEntry", "ChargeItem",
    "ChargeItemDefinition", "Citation", "Claim", "ClaimResponse", "ClinicalImpression",
    "ClinicalUseDefinition", "CodeSystem", "Communication", "CommunicationRequest",
    "CompartmentDefinition", "Composition", "ConceptMap", "Condition", "Consent",
    "Contract", "Coverage", "CoverageEligibilityRequest", "CoverageEligibilityResponse",
    "DetectedIssue", "Device", "DeviceDefinition", "DeviceMetric", "DeviceRequest",
    "DeviceUseStatement", "DiagnosticReport", "DocumentManifest", "DocumentReference",
    "DomainResource", "Encounter", "Endpoint", "EnrollmentRequest", "EnrollmentResponse",
    "EpisodeOfCare", "EventDefinition", "Evidence", "EvidenceReport", "EvidenceVariable",
    "ExampleScenario", "ExplanationOfBenefit", "FamilyMemberHistory", "Flag", "Goal",
    "GraphDefinition", "Group", "GuidanceResponse", "HealthcareService", "ImagingStudy",
    "Immunization", "ImmunizationEvaluation", "ImmunizationRecommendation",
    "ImplementationGuide", "Ingredient", "InsurancePlan", "Invoice", "Library", "Linkage",
    "List", "Location", "ManufacturedItemDefinition", "Measure", "MeasureReport", "Media",
    "Medication", "MedicationAdministration", "MedicationDispense", "MedicationKnowledge",
    "MedicationRequest", "MedicationStatement", "MedicinalProductDefinition",
    "MessageDefinition", "MessageHeader", "MolecularSequence", "NamingSystem",
    "NutritionOrder", "NutritionProduct", "Observation", "ObservationDefinition",
    "OperationDefinition", "OperationOutcome", "Organization", "OrganizationAffiliation",
    "PackagedProductDefinition", "Parameters", "Patient", "PaymentNotice",
    "PaymentReconciliation", "Person", "PlanDefinition", "Practitioner",
    "PractitionerRole", "Procedure", "Provenance", "Questionnaire",
    "QuestionnaireResponse", "RegulatedAuthorization", "RelatedPerson", "RequestGroup",
    "ResearchDefinition", "ResearchElementDefinition", "ResearchStudy", "ResearchSubject",
    "Resource", "RiskAssessment", "Schedule", "SearchParameter", "ServiceRequest", "Slot",
    "Specimen", "SpecimenDefinition", "StructureDefinition", "StructureMap",
    "Subscription", "SubscriptionStatus", "SubscriptionTopic", "Substance",
    "SubstanceDefinition", "SupplyDelivery", "SupplyRequest", "Task",
    "TerminologyCapabilities", "TestReport", "TestScript", "ValueSet",
    "VerificationResult", "VisionPrescription",
};

/// Whether `name` is a FHIR resource type name, abstract types included.
pub fn is_resource_type(name: &str) -> bool {
    RESOURCE_TYPES.contains(name)
}

pub fn is_concrete_resource_type(name: &str) -> bool {
    is_resource_type(name) && !matches!(name, "Resource" | "DomainResource")
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMING: FieldInfo = FieldInfo::new("timing", &[DataType::Date, DataType::Period]);
    const SEQUENCE: FieldInfo = FieldInfo::new("sequence", &[DataType::PositiveInt])
        .required()
        .summary();
    const BASE: NodeSchema = NodeSchema {
        type_name: "Base",
        kind: NodeKind::Complex,
        base: None,
        fields: &[FieldInfo::new("id", &[DataType::String])],
        constraints: &[],
    };
    const SAMPLE: NodeSchema = NodeSchema {
        type_name: "Sample",
        kind: NodeKind::Backbone,
        base: Some(&BASE),
        fields: &[SEQUENCE, TIMING],
        constraints: &[],
    };

    #[test]
    fn choice_element_names_capitalize_the_type() {
        assert_eq!(TIMING.choice_element_name(DataType::Date), "timingDate");
        assert_eq!(TIMING.choice_element_name(DataType::Period), "timingPeriod");
    }

    #[test]
    fn choice_field_lookup_by_type_specific_name() {
        let (field, data_type) = SAMPLE.choice_field_for("timingPeriod").unwrap();
        assert_eq!(field.name, "timing");
        assert_eq!(data_type, DataType::Period);
        assert!(SAMPLE.choice_field_for("timingString").is_none());
        assert!(SAMPLE.choice_field_for("sequence").is_none());
    }

    #[test]
    fn inherited_fields_come_first() {
        let names: Vec<_> = SAMPLE.all_fields().iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["id", "sequence", "timing"]);
        assert!(SAMPLE.is_required("sequence"));
        assert!(SAMPLE.is_summary("sequence"));
        assert!(!SAMPLE.is_repeating("timing"));
        assert!(SAMPLE.is_choice("timing"));
    }

    #[test]
    fn resource_type_registry() {
        assert!(is_resource_type("Claim"));
        assert!(is_resource_type("DomainResource"));
        assert!(!is_concrete_resource_type("DomainResource"));
        assert!(!is_resource_type("claim"));
        assert!(!is_resource_type("Foo"));
    }
}
