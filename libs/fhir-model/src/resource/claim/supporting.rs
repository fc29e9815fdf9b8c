use crate::builder::{Builder, ToBuilder};
use crate::choice::Value;
use crate::config::ModelConfig;
use crate::datatypes::{Attachment, CodeableConcept, Period, Quantity, Reference};
use crate::element::{backbone_capabilities, BackboneElement, BACKBONE_ELEMENT_SCHEMA};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::primitive::{Boolean, Date, FhirString, PositiveInt};
use crate::schema::{DataType, FieldInfo, NodeKind, NodeSchema};
use crate::validation::ValidationContext;
use crate::visitor::{accept_choice, accept_list, accept_opt, Visitable, Visitor};
use std::any::Any;

const INFO_SEQUENCE: FieldInfo = FieldInfo::new("sequence", &[DataType::PositiveInt]).required();
const INFO_CATEGORY: FieldInfo =
    FieldInfo::new("category", &[DataType::CodeableConcept]).required();
const INFO_CODE: FieldInfo = FieldInfo::new("code", &[DataType::CodeableConcept]);
const INFO_TIMING: FieldInfo = FieldInfo::new("timing", &[DataType::Date, DataType::Period]);
const INFO_VALUE: FieldInfo = FieldInfo::new(
    "value",
    &[
        DataType::Boolean,
        DataType::String,
        DataType::Quantity,
        DataType::Attachment,
        DataType::Reference,
    ],
);
const INFO_REASON: FieldInfo = FieldInfo::new("reason", &[DataType::CodeableConcept]);

pub const CLAIM_SUPPORTING_INFO_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Claim.supportingInfo",
    kind: NodeKind::Backbone,
    base: Some(&BACKBONE_ELEMENT_SCHEMA),
    fields: &[
        INFO_SEQUENCE,
        INFO_CATEGORY,
        INFO_CODE,
        INFO_TIMING,
        INFO_VALUE,
        INFO_REASON,
    ],
    constraints: &[],
};

/// Additional information relevant to adjudication: attachments, conditions,
/// onset dates and the like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimSupportingInfo {
    pub(crate) backbone: BackboneElement,
    pub(crate) sequence: Option<PositiveInt>,
    pub(crate) category: Option<CodeableConcept>,
    pub(crate) code: Option<CodeableConcept>,
    pub(crate) timing: Option<Value>,
    pub(crate) value: Option<Value>,
    pub(crate) reason: Option<CodeableConcept>,
    hash: HashCache,
}

cached_hash!(ClaimSupportingInfo => backbone, sequence, category, code, timing, value, reason);
backbone_capabilities!(ClaimSupportingInfo, ClaimSupportingInfoBuilder);

impl ClaimSupportingInfo {
    pub fn builder() -> ClaimSupportingInfoBuilder {
        ClaimSupportingInfoBuilder::default()
    }

    pub fn sequence(&self) -> Option<&PositiveInt> {
        self.sequence.as_ref()
    }

    pub fn category(&self) -> Option<&CodeableConcept> {
        self.category.as_ref()
    }

    pub fn code(&self) -> Option<&CodeableConcept> {
        self.code.as_ref()
    }

    /// `timingDate` or `timingPeriod`.
    pub fn timing(&self) -> Option<&Value> {
        self.timing.as_ref()
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn reason(&self) -> Option<&CodeableConcept> {
        self.reason.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClaimSupportingInfoBuilder {
    backbone: BackboneElement,
    sequence: Option<PositiveInt>,
    category: Option<CodeableConcept>,
    code: Option<CodeableConcept>,
    timing: Option<Value>,
    value: Option<Value>,
    reason: Option<CodeableConcept>,
}

impl ClaimSupportingInfoBuilder {
    pub fn sequence(mut self, sequence: impl Into<PositiveInt>) -> Self {
        self.sequence = Some(sequence.into());
        self
    }

    pub fn category(mut self, category: CodeableConcept) -> Self {
        self.category = Some(category);
        self
    }

    pub fn code(mut self, code: CodeableConcept) -> Self {
        self.code = Some(code);
        self
    }

    /// Sets `timing[x]`, replacing whichever type it held before.
    pub fn timing(mut self, timing: impl Into<Value>) -> Self {
        self.timing = Some(timing.into());
        self
    }

    pub fn timing_date(self, date: impl Into<Date>) -> Self {
        let date: Date = date.into();
        self.timing(date)
    }

    pub fn timing_period(self, period: Period) -> Self {
        self.timing(period)
    }

    /// Sets `value[x]`, replacing whichever type it held before.
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn value_boolean(self, value: impl Into<Boolean>) -> Self {
        let value: Boolean = value.into();
        self.value(value)
    }

    pub fn value_string(self, value: impl Into<FhirString>) -> Self {
        let value: FhirString = value.into();
        self.value(value)
    }

    pub fn value_quantity(self, value: Quantity) -> Self {
        self.value(value)
    }

    pub fn value_attachment(self, value: Attachment) -> Self {
        self.value(value)
    }

    pub fn value_reference(self, value: Reference) -> Self {
        self.value(value)
    }

    pub fn reason(mut self, reason: CodeableConcept) -> Self {
        self.reason = Some(reason);
        self
    }
}

impl Builder for ClaimSupportingInfoBuilder {
    type Node = ClaimSupportingInfo;

    fn build_with(self, config: &ModelConfig) -> Result<ClaimSupportingInfo> {
        let node = ClaimSupportingInfo {
            backbone: self.backbone,
            sequence: self.sequence,
            category: self.category,
            code: self.code,
            timing: self.timing,
            value: self.value,
            reason: self.reason,
            hash: HashCache::default(),
        };
        let mut ctx = ValidationContext::new(CLAIM_SUPPORTING_INFO_SCHEMA.type_name, config);
        ctx.backbone(&node.backbone);
        ctx.primitive(&INFO_SEQUENCE, node.sequence.as_ref());
        ctx.single(&INFO_CATEGORY, node.category.as_ref());
        ctx.single(&INFO_CODE, node.code.as_ref());
        ctx.choice(&INFO_TIMING, node.timing.as_ref());
        ctx.choice(&INFO_VALUE, node.value.as_ref());
        ctx.single(&INFO_REASON, node.reason.as_ref());
        ctx.value_or_children(
            node.backbone.has_content()
                || node.sequence.is_some()
                || node.category.is_some()
                || node.code.is_some()
                || node.timing.is_some()
                || node.value.is_some()
                || node.reason.is_some(),
        );
        ctx.finish()?;
        Ok(node)
    }
}

impl ToBuilder for ClaimSupportingInfo {
    type Builder = ClaimSupportingInfoBuilder;

    fn to_builder(&self) -> ClaimSupportingInfoBuilder {
        ClaimSupportingInfoBuilder {
            backbone: self.backbone.clone(),
            sequence: self.sequence.clone(),
            category: self.category.clone(),
            code: self.code.clone(),
            timing: self.timing.clone(),
            value: self.value.clone(),
            reason: self.reason.clone(),
        }
    }
}

impl Visitable for ClaimSupportingInfo {
    fn schema(&self) -> &'static NodeSchema {
        &CLAIM_SUPPORTING_INFO_SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.backbone.accept_children(visitor);
        accept_opt(INFO_SEQUENCE.name, self.sequence.as_ref(), visitor);
        accept_opt(INFO_CATEGORY.name, self.category.as_ref(), visitor);
        accept_opt(INFO_CODE.name, self.code.as_ref(), visitor);
        accept_choice(&INFO_TIMING, self.timing.as_ref(), visitor);
        accept_choice(&INFO_VALUE, self.value.as_ref(), visitor);
        accept_opt(INFO_REASON.name, self.reason.as_ref(), visitor);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

const DIAGNOSIS_SEQUENCE: FieldInfo =
    FieldInfo::new("sequence", &[DataType::PositiveInt]).required();
const DIAGNOSIS_DIAGNOSIS: FieldInfo =
    FieldInfo::new("diagnosis", &[DataType::CodeableConcept, DataType::Reference])
        .required()
        .targets(&["Condition"]);
const DIAGNOSIS_TYPE: FieldInfo =
    FieldInfo::new("type", &[DataType::CodeableConcept]).repeating();
const DIAGNOSIS_ON_ADMISSION: FieldInfo =
    FieldInfo::new("onAdmission", &[DataType::CodeableConcept]);
const DIAGNOSIS_PACKAGE_CODE: FieldInfo =
    FieldInfo::new("packageCode", &[DataType::CodeableConcept]);

pub const CLAIM_DIAGNOSIS_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Claim.diagnosis",
    kind: NodeKind::Backbone,
    base: Some(&BACKBONE_ELEMENT_SCHEMA),
    fields: &[
        DIAGNOSIS_SEQUENCE,
        DIAGNOSIS_DIAGNOSIS,
        DIAGNOSIS_TYPE,
        DIAGNOSIS_ON_ADMISSION,
        DIAGNOSIS_PACKAGE_CODE,
    ],
    constraints: &[],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimDiagnosis {
    pub(crate) backbone: BackboneElement,
    pub(crate) sequence: Option<PositiveInt>,
    pub(crate) diagnosis: Option<Value>,
    pub(crate) r#type: Vec<CodeableConcept>,
    pub(crate) on_admission: Option<CodeableConcept>,
    pub(crate) package_code: Option<CodeableConcept>,
    hash: HashCache,
}

cached_hash!(ClaimDiagnosis => backbone, sequence, diagnosis, r#type, on_admission, package_code);
backbone_capabilities!(ClaimDiagnosis, ClaimDiagnosisBuilder);

impl ClaimDiagnosis {
    pub fn builder() -> ClaimDiagnosisBuilder {
        ClaimDiagnosisBuilder::default()
    }

    pub fn sequence(&self) -> Option<&PositiveInt> {
        self.sequence.as_ref()
    }

    /// `diagnosisCodeableConcept` or `diagnosisReference`.
    pub fn diagnosis(&self) -> Option<&Value> {
        self.diagnosis.as_ref()
    }

    pub fn r#type(&self) -> &[CodeableConcept] {
        &self.r#type
    }

    pub fn on_admission(&self) -> Option<&CodeableConcept> {
        self.on_admission.as_ref()
    }

    pub fn package_code(&self) -> Option<&CodeableConcept> {
        self.package_code.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClaimDiagnosisBuilder {
    backbone: BackboneElement,
    sequence: Option<PositiveInt>,
    diagnosis: Option<Value>,
    r#type: Vec<CodeableConcept>,
    on_admission: Option<CodeableConcept>,
    package_code: Option<CodeableConcept>,
}

impl ClaimDiagnosisBuilder {
    pub fn sequence(mut self, sequence: impl Into<PositiveInt>) -> Self {
        self.sequence = Some(sequence.into());
        self
    }

    pub fn diagnosis(mut self, diagnosis: impl Into<Value>) -> Self {
        self.diagnosis = Some(diagnosis.into());
        self
    }

    pub fn diagnosis_codeable_concept(self, diagnosis: CodeableConcept) -> Self {
        self.diagnosis(diagnosis)
    }

    pub fn diagnosis_reference(self, diagnosis: Reference) -> Self {
        self.diagnosis(diagnosis)
    }

    pub fn r#type(mut self, r#type: CodeableConcept) -> Self {
        self.r#type.push(r#type);
        self
    }

    pub fn extend_type(mut self, types: impl IntoIterator<Item = CodeableConcept>) -> Self {
        self.r#type.extend(types);
        self
    }

    pub fn set_type(mut self, types: impl IntoIterator<Item = CodeableConcept>) -> Self {
        self.r#type = types.into_iter().collect();
        self
    }

    pub fn on_admission(mut self, on_admission: CodeableConcept) -> Self {
        self.on_admission = Some(on_admission);
        self
    }

    pub fn package_code(mut self, package_code: CodeableConcept) -> Self {
        self.package_code = Some(package_code);
        self
    }
}

impl Builder for ClaimDiagnosisBuilder {
    type Node = ClaimDiagnosis;

    fn build_with(self, config: &ModelConfig) -> Result<ClaimDiagnosis> {
        let node = ClaimDiagnosis {
            backbone: self.backbone,
            sequence: self.sequence,
            diagnosis: self.diagnosis,
            r#type: self.r#type,
            on_admission: self.on_admission,
            package_code: self.package_code,
            hash: HashCache::default(),
        };
        let mut ctx = ValidationContext::new(CLAIM_DIAGNOSIS_SCHEMA.type_name, config);
        ctx.backbone(&node.backbone);
        ctx.primitive(&DIAGNOSIS_SEQUENCE, node.sequence.as_ref());
        ctx.choice(&DIAGNOSIS_DIAGNOSIS, node.diagnosis.as_ref());
        ctx.list(&DIAGNOSIS_TYPE, &node.r#type);
        ctx.single(&DIAGNOSIS_ON_ADMISSION, node.on_admission.as_ref());
        ctx.single(&DIAGNOSIS_PACKAGE_CODE, node.package_code.as_ref());
        ctx.value_or_children(
            node.backbone.has_content()
                || node.sequence.is_some()
                || node.diagnosis.is_some()
                || !node.r#type.is_empty()
                || node.on_admission.is_some()
                || node.package_code.is_some(),
        );
        ctx.finish()?;
        Ok(node)
    }
}

impl ToBuilder for ClaimDiagnosis {
    type Builder = ClaimDiagnosisBuilder;

    fn to_builder(&self) -> ClaimDiagnosisBuilder {
        ClaimDiagnosisBuilder {
            backbone: self.backbone.clone(),
            sequence: self.sequence.clone(),
            diagnosis: self.diagnosis.clone(),
            r#type: self.r#type.clone(),
            on_admission: self.on_admission.clone(),
            package_code: self.package_code.clone(),
        }
    }
}

impl Visitable for ClaimDiagnosis {
    fn schema(&self) -> &'static NodeSchema {
        &CLAIM_DIAGNOSIS_SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.backbone.accept_children(visitor);
        accept_opt(DIAGNOSIS_SEQUENCE.name, self.sequence.as_ref(), visitor);
        accept_choice(&DIAGNOSIS_DIAGNOSIS, self.diagnosis.as_ref(), visitor);
        accept_list(DIAGNOSIS_TYPE.name, &self.r#type, visitor);
        accept_opt(DIAGNOSIS_ON_ADMISSION.name, self.on_admission.as_ref(), visitor);
        accept_opt(DIAGNOSIS_PACKAGE_CODE.name, self.package_code.as_ref(), visitor);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::Coding;
    use crate::error::ViolationKind;
    use crate::primitive::FhirDate;

    fn category() -> CodeableConcept {
        CodeableConcept::builder()
            .coding(
                Coding::builder()
                    .system("http://terminology.hl7.org/CodeSystem/claiminformationcategory")
                    .code("onset")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn the_last_timing_setter_wins() {
        let info = ClaimSupportingInfo::builder()
            .sequence(1)
            .category(category())
            .timing_period(Period::builder().start(FhirDate::Year(2020)).build().unwrap())
            .timing_date(FhirDate::Year(2021))
            .build()
            .unwrap();
        let timing = info.timing().unwrap();
        assert!(timing.is::<Date>());
        assert!(timing.get::<Period>().is_none());
    }

    #[test]
    fn diagnosis_reference_must_point_at_a_condition() {
        let err = ClaimDiagnosis::builder()
            .sequence(1)
            .diagnosis_reference(Reference::to("Observation/o1").unwrap())
            .build()
            .unwrap_err();
        assert_eq!(err.violations()[0].path, "Claim.diagnosis.diagnosis");
        assert!(matches!(
            err.violations()[0].kind,
            ViolationKind::ReferenceTarget { .. }
        ));
    }

    #[test]
    fn diagnosis_is_required() {
        let err = ClaimDiagnosis::builder().sequence(1).build().unwrap_err();
        assert_eq!(err.violations()[0].kind, ViolationKind::MissingRequired);
    }
}
