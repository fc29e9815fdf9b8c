use crate::builder::{Builder, ToBuilder};
use crate::choice::Value;
use crate::config::ModelConfig;
use crate::datatypes::{Address, CodeableConcept, Money, Period, Quantity, Reference};
use crate::element::{backbone_capabilities, BackboneElement, BACKBONE_ELEMENT_SCHEMA};
use crate::error::Result;
use crate::hash::{cached_hash, HashCache};
use crate::primitive::{Date, Decimal, PositiveInt};
use crate::schema::{DataType, FieldInfo, NodeKind, NodeSchema};
use crate::validation::ValidationContext;
use crate::visitor::{accept_choice, accept_list, accept_opt, Visitable, Visitor};
use std::any::Any;

const SEQUENCE: FieldInfo = FieldInfo::new("sequence", &[DataType::PositiveInt]).required();
const CARE_TEAM_SEQUENCE: FieldInfo =
    FieldInfo::new("careTeamSequence", &[DataType::PositiveInt]).repeating();
const DIAGNOSIS_SEQUENCE: FieldInfo =
    FieldInfo::new("diagnosisSequence", &[DataType::PositiveInt]).repeating();
const PROCEDURE_SEQUENCE: FieldInfo =
    FieldInfo::new("procedureSequence", &[DataType::PositiveInt]).repeating();
const INFORMATION_SEQUENCE: FieldInfo =
    FieldInfo::new("informationSequence", &[DataType::PositiveInt]).repeating();
const REVENUE: FieldInfo = FieldInfo::new("revenue", &[DataType::CodeableConcept]);
const CATEGORY: FieldInfo = FieldInfo::new("category", &[DataType::CodeableConcept]);
const PRODUCT_OR_SERVICE: FieldInfo =
    FieldInfo::new("productOrService", &[DataType::CodeableConcept]).required();
const MODIFIER: FieldInfo = FieldInfo::new("modifier", &[DataType::CodeableConcept]).repeating();
const PROGRAM_CODE: FieldInfo =
    FieldInfo::new("programCode", &[DataType::CodeableConcept]).repeating();
const SERVICED: FieldInfo = FieldInfo::new("serviced", &[DataType::Date, DataType::Period]);
const LOCATION: FieldInfo = FieldInfo::new(
    "location",
    &[DataType::CodeableConcept, DataType::Address, DataType::Reference],
)
.targets(&["Location"]);
const QUANTITY: FieldInfo = FieldInfo::new("quantity", &[DataType::Quantity]);
const UNIT_PRICE: FieldInfo = FieldInfo::new("unitPrice", &[DataType::Money]);
const FACTOR: FieldInfo = FieldInfo::new("factor", &[DataType::Decimal]);
const NET: FieldInfo = FieldInfo::new("net", &[DataType::Money]);
const UDI: FieldInfo = FieldInfo::new("udi", &[DataType::Reference])
    .repeating()
    .targets(&["Device"]);
const BODY_SITE: FieldInfo = FieldInfo::new("bodySite", &[DataType::CodeableConcept]);
const SUB_SITE: FieldInfo = FieldInfo::new("subSite", &[DataType::CodeableConcept]).repeating();
const ENCOUNTER: FieldInfo = FieldInfo::new("encounter", &[DataType::Reference])
    .repeating()
    .targets(&["Encounter"]);
const DETAIL: FieldInfo = FieldInfo::new("detail", &[DataType::BackboneElement]).repeating();

pub const CLAIM_ITEM_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Claim.item",
    kind: NodeKind::Backbone,
    base: Some(&BACKBONE_ELEMENT_SCHEMA),
    fields: &[
        SEQUENCE,
        CARE_TEAM_SEQUENCE,
        DIAGNOSIS_SEQUENCE,
        PROCEDURE_SEQUENCE,
        INFORMATION_SEQUENCE,
        REVENUE,
        CATEGORY,
        PRODUCT_OR_SERVICE,
        MODIFIER,
        PROGRAM_CODE,
        SERVICED,
        LOCATION,
        QUANTITY,
        UNIT_PRICE,
        FACTOR,
        NET,
        UDI,
        BODY_SITE,
        SUB_SITE,
        ENCOUNTER,
        DETAIL,
    ],
    constraints: &[],
};

/// A claim line: a product or service provided, with its pricing.
///
/// The `*_sequence` lists point at entries of the claim's backbone lists
/// (`careTeam`, `diagnosis`, `supportingInfo`) by their `sequence` number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimItem {
    pub(crate) backbone: BackboneElement,
    pub(crate) sequence: Option<PositiveInt>,
    pub(crate) care_team_sequence: Vec<PositiveInt>,
    pub(crate) diagnosis_sequence: Vec<PositiveInt>,
    pub(crate) procedure_sequence: Vec<PositiveInt>,
    pub(crate) information_sequence: Vec<PositiveInt>,
    pub(crate) revenue: Option<CodeableConcept>,
    pub(crate) category: Option<CodeableConcept>,
    pub(crate) product_or_service: Option<CodeableConcept>,
    pub(crate) modifier: Vec<CodeableConcept>,
    pub(crate) program_code: Vec<CodeableConcept>,
    pub(crate) serviced: Option<Value>,
    pub(crate) location: Option<Value>,
    pub(crate) quantity: Option<Quantity>,
    pub(crate) unit_price: Option<Money>,
    pub(crate) factor: Option<Decimal>,
    pub(crate) net: Option<Money>,
    pub(crate) udi: Vec<Reference>,
    pub(crate) body_site: Option<CodeableConcept>,
    pub(crate) sub_site: Vec<CodeableConcept>,
    pub(crate) encounter: Vec<Reference>,
    pub(crate) detail: Vec<ClaimItemDetail>,
    hash: HashCache,
}

cached_hash!(ClaimItem =>
    backbone,
    sequence,
    care_team_sequence,
    diagnosis_sequence,
    procedure_sequence,
    information_sequence,
    revenue,
    category,
    product_or_service,
    modifier,
    program_code,
    serviced,
    location,
    quantity,
    unit_price,
    factor,
    net,
    udi,
    body_site,
    sub_site,
    encounter,
    detail,
);
backbone_capabilities!(ClaimItem, ClaimItemBuilder);

impl ClaimItem {
    pub fn builder() -> ClaimItemBuilder {
        ClaimItemBuilder::default()
    }

    pub fn sequence(&self) -> Option<&PositiveInt> {
        self.sequence.as_ref()
    }

    pub fn care_team_sequence(&self) -> &[PositiveInt] {
        &self.care_team_sequence
    }

    pub fn diagnosis_sequence(&self) -> &[PositiveInt] {
        &self.diagnosis_sequence
    }

    pub fn procedure_sequence(&self) -> &[PositiveInt] {
        &self.procedure_sequence
    }

    pub fn information_sequence(&self) -> &[PositiveInt] {
        &self.information_sequence
    }

    pub fn revenue(&self) -> Option<&CodeableConcept> {
        self.revenue.as_ref()
    }

    pub fn category(&self) -> Option<&CodeableConcept> {
        self.category.as_ref()
    }

    pub fn product_or_service(&self) -> Option<&CodeableConcept> {
        self.product_or_service.as_ref()
    }

    pub fn modifier(&self) -> &[CodeableConcept] {
        &self.modifier
    }

    pub fn program_code(&self) -> &[CodeableConcept] {
        &self.program_code
    }

    /// `servicedDate` or `servicedPeriod`.
    pub fn serviced(&self) -> Option<&Value> {
        self.serviced.as_ref()
    }

    /// `locationCodeableConcept`, `locationAddress` or `locationReference`.
    pub fn location(&self) -> Option<&Value> {
        self.location.as_ref()
    }

    pub fn quantity(&self) -> Option<&Quantity> {
        self.quantity.as_ref()
    }

    pub fn unit_price(&self) -> Option<&Money> {
        self.unit_price.as_ref()
    }

    pub fn factor(&self) -> Option<&Decimal> {
        self.factor.as_ref()
    }

    pub fn net(&self) -> Option<&Money> {
        self.net.as_ref()
    }

    pub fn udi(&self) -> &[Reference] {
        &self.udi
    }

    pub fn body_site(&self) -> Option<&CodeableConcept> {
        self.body_site.as_ref()
    }

    pub fn sub_site(&self) -> &[CodeableConcept] {
        &self.sub_site
    }

    pub fn encounter(&self) -> &[Reference] {
        &self.encounter
    }

    pub fn detail(&self) -> &[ClaimItemDetail] {
        &self.detail
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClaimItemBuilder {
    backbone: BackboneElement,
    sequence: Option<PositiveInt>,
    care_team_sequence: Vec<PositiveInt>,
    diagnosis_sequence: Vec<PositiveInt>,
    procedure_sequence: Vec<PositiveInt>,
    information_sequence: Vec<PositiveInt>,
    revenue: Option<CodeableConcept>,
    category: Option<CodeableConcept>,
    product_or_service: Option<CodeableConcept>,
    modifier: Vec<CodeableConcept>,
    program_code: Vec<CodeableConcept>,
    serviced: Option<Value>,
    location: Option<Value>,
    quantity: Option<Quantity>,
    unit_price: Option<Money>,
    factor: Option<Decimal>,
    net: Option<Money>,
    udi: Vec<Reference>,
    body_site: Option<CodeableConcept>,
    sub_site: Vec<CodeableConcept>,
    encounter: Vec<Reference>,
    detail: Vec<ClaimItemDetail>,
}

impl ClaimItemBuilder {
    pub fn sequence(mut self, sequence: impl Into<PositiveInt>) -> Self {
        self.sequence = Some(sequence.into());
        self
    }

    list_setters! { care_team_sequence, extend_care_team_sequence, set_care_team_sequence: PositiveInt; }
    list_setters! { diagnosis_sequence, extend_diagnosis_sequence, set_diagnosis_sequence: PositiveInt; }
    list_setters! { procedure_sequence, extend_procedure_sequence, set_procedure_sequence: PositiveInt; }
    list_setters! { information_sequence, extend_information_sequence, set_information_sequence: PositiveInt; }

    pub fn revenue(mut self, revenue: CodeableConcept) -> Self {
        self.revenue = Some(revenue);
        self
    }

    pub fn category(mut self, category: CodeableConcept) -> Self {
        self.category = Some(category);
        self
    }

    pub fn product_or_service(mut self, product_or_service: CodeableConcept) -> Self {
        self.product_or_service = Some(product_or_service);
        self
    }

    list_setters! { modifier, extend_modifier, set_modifier: CodeableConcept; }
    list_setters! { program_code, extend_program_code, set_program_code: CodeableConcept; }

    /// Sets `serviced[x]`, replacing whichever type it held before.
    pub fn serviced(mut self, serviced: impl Into<Value>) -> Self {
        self.serviced = Some(serviced.into());
        self
    }

    pub fn serviced_date(self, date: impl Into<Date>) -> Self {
        let date: Date = date.into();
        self.serviced(date)
    }

    pub fn serviced_period(self, period: Period) -> Self {
        self.serviced(period)
    }

    /// Sets `location[x]`, replacing whichever type it held before.
    pub fn location(mut self, location: impl Into<Value>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn location_codeable_concept(self, location: CodeableConcept) -> Self {
        self.location(location)
    }

    pub fn location_address(self, location: Address) -> Self {
        self.location(location)
    }

    pub fn location_reference(self, location: Reference) -> Self {
        self.location(location)
    }

    pub fn quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn unit_price(mut self, unit_price: Money) -> Self {
        self.unit_price = Some(unit_price);
        self
    }

    pub fn factor(mut self, factor: impl Into<Decimal>) -> Self {
        self.factor = Some(factor.into());
        self
    }

    pub fn net(mut self, net: Money) -> Self {
        self.net = Some(net);
        self
    }

    list_setters! { udi, extend_udi, set_udi: Reference; }

    pub fn body_site(mut self, body_site: CodeableConcept) -> Self {
        self.body_site = Some(body_site);
        self
    }

    list_setters! { sub_site, extend_sub_site, set_sub_site: CodeableConcept; }
    list_setters! { encounter, extend_encounter, set_encounter: Reference; }
    list_setters! { detail, extend_detail, set_detail: ClaimItemDetail; }
}

impl Builder for ClaimItemBuilder {
    type Node = ClaimItem;

    fn build_with(self, config: &ModelConfig) -> Result<ClaimItem> {
        let node = ClaimItem {
            backbone: self.backbone,
            sequence: self.sequence,
            care_team_sequence: self.care_team_sequence,
            diagnosis_sequence: self.diagnosis_sequence,
            procedure_sequence: self.procedure_sequence,
            information_sequence: self.information_sequence,
            revenue: self.revenue,
            category: self.category,
            product_or_service: self.product_or_service,
            modifier: self.modifier,
            program_code: self.program_code,
            serviced: self.serviced,
            location: self.location,
            quantity: self.quantity,
            unit_price: self.unit_price,
            factor: self.factor,
            net: self.net,
            udi: self.udi,
            body_site: self.body_site,
            sub_site: self.sub_site,
            encounter: self.encounter,
            detail: self.detail,
            hash: HashCache::default(),
        };
        let mut ctx = ValidationContext::new(CLAIM_ITEM_SCHEMA.type_name, config);
        ctx.backbone(&node.backbone);
        ctx.primitive(&SEQUENCE, node.sequence.as_ref());
        ctx.primitives(&CARE_TEAM_SEQUENCE, &node.care_team_sequence);
        ctx.primitives(&DIAGNOSIS_SEQUENCE, &node.diagnosis_sequence);
        ctx.primitives(&PROCEDURE_SEQUENCE, &node.procedure_sequence);
        ctx.primitives(&INFORMATION_SEQUENCE, &node.information_sequence);
        ctx.single(&REVENUE, node.revenue.as_ref());
        ctx.single(&CATEGORY, node.category.as_ref());
        ctx.single(&PRODUCT_OR_SERVICE, node.product_or_service.as_ref());
        ctx.list(&MODIFIER, &node.modifier);
        ctx.list(&PROGRAM_CODE, &node.program_code);
        ctx.choice(&SERVICED, node.serviced.as_ref());
        ctx.choice(&LOCATION, node.location.as_ref());
        ctx.single(&QUANTITY, node.quantity.as_ref());
        ctx.single(&UNIT_PRICE, node.unit_price.as_ref());
        ctx.primitive(&FACTOR, node.factor.as_ref());
        ctx.single(&NET, node.net.as_ref());
        ctx.references(&UDI, &node.udi);
        ctx.single(&BODY_SITE, node.body_site.as_ref());
        ctx.list(&SUB_SITE, &node.sub_site);
        ctx.references(&ENCOUNTER, &node.encounter);
        ctx.list(&DETAIL, &node.detail);
        ctx.value_or_children(
            node.backbone.has_content()
                || node.sequence.is_some()
                || !node.care_team_sequence.is_empty()
                || !node.diagnosis_sequence.is_empty()
                || !node.procedure_sequence.is_empty()
                || !node.information_sequence.is_empty()
                || node.revenue.is_some()
                || node.category.is_some()
                || node.product_or_service.is_some()
                || !node.modifier.is_empty()
                || !node.program_code.is_empty()
                || node.serviced.is_some()
                || node.location.is_some()
                || node.quantity.is_some()
                || node.unit_price.is_some()
                || node.factor.is_some()
                || node.net.is_some()
                || !node.udi.is_empty()
                || node.body_site.is_some()
                || !node.sub_site.is_empty()
                || !node.encounter.is_empty()
                || !node.detail.is_empty(),
        );
        ctx.finish()?;
        Ok(node)
    }
}

impl ToBuilder for ClaimItem {
    type Builder = ClaimItemBuilder;

    fn to_builder(&self) -> ClaimItemBuilder {
        ClaimItemBuilder {
            backbone: self.backbone.clone(),
            sequence: self.sequence.clone(),
            care_team_sequence: self.care_team_sequence.clone(),
            diagnosis_sequence: self.diagnosis_sequence.clone(),
            procedure_sequence: self.procedure_sequence.clone(),
            information_sequence: self.information_sequence.clone(),
            revenue: self.revenue.clone(),
            category: self.category.clone(),
            product_or_service: self.product_or_service.clone(),
            modifier: self.modifier.clone(),
            program_code: self.program_code.clone(),
            serviced: self.serviced.clone(),
            location: self.location.clone(),
            quantity: self.quantity.clone(),
            unit_price: self.unit_price.clone(),
            factor: self.factor.clone(),
            net: self.net.clone(),
            udi: self.udi.clone(),
            body_site: self.body_site.clone(),
            sub_site: self.sub_site.clone(),
            encounter: self.encounter.clone(),
            detail: self.detail.clone(),
        }
    }
}

impl Visitable for ClaimItem {
    fn schema(&self) -> &'static NodeSchema {
        &CLAIM_ITEM_SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.backbone.accept_children(visitor);
        accept_opt(SEQUENCE.name, self.sequence.as_ref(), visitor);
        accept_list(CARE_TEAM_SEQUENCE.name, &self.care_team_sequence, visitor);
        accept_list(DIAGNOSIS_SEQUENCE.name, &self.diagnosis_sequence, visitor);
        accept_list(PROCEDURE_SEQUENCE.name, &self.procedure_sequence, visitor);
        accept_list(INFORMATION_SEQUENCE.name, &self.information_sequence, visitor);
        accept_opt(REVENUE.name, self.revenue.as_ref(), visitor);
        accept_opt(CATEGORY.name, self.category.as_ref(), visitor);
        accept_opt(PRODUCT_OR_SERVICE.name, self.product_or_service.as_ref(), visitor);
        accept_list(MODIFIER.name, &self.modifier, visitor);
        accept_list(PROGRAM_CODE.name, &self.program_code, visitor);
        accept_choice(&SERVICED, self.serviced.as_ref(), visitor);
        accept_choice(&LOCATION, self.location.as_ref(), visitor);
        accept_opt(QUANTITY.name, self.quantity.as_ref(), visitor);
        accept_opt(UNIT_PRICE.name, self.unit_price.as_ref(), visitor);
        accept_opt(FACTOR.name, self.factor.as_ref(), visitor);
        accept_opt(NET.name, self.net.as_ref(), visitor);
        accept_list(UDI.name, &self.udi, visitor);
        accept_opt(BODY_SITE.name, self.body_site.as_ref(), visitor);
        accept_list(SUB_SITE.name, &self.sub_site, visitor);
        accept_list(ENCOUNTER.name, &self.encounter, visitor);
        accept_list(DETAIL.name, &self.detail, visitor);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

const DETAIL_UDI: FieldInfo = FieldInfo::new("udi", &[DataType::Reference])
    .repeating()
    .targets(&["Device"]);

pub const CLAIM_ITEM_DETAIL_SCHEMA: NodeSchema = NodeSchema {
    type_name: "Claim.item.detail",
    kind: NodeKind::Backbone,
    base: Some(&BACKBONE_ELEMENT_SCHEMA),
    fields: &[
        SEQUENCE,
        REVENUE,
        CATEGORY,
        PRODUCT_OR_SERVICE,
        MODIFIER,
        PROGRAM_CODE,
        QUANTITY,
        UNIT_PRICE,
        FACTOR,
        NET,
        DETAIL_UDI,
    ],
    constraints: &[],
};

/// A product or service provided as part of an item, such as the parts of
/// a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimItemDetail {
    pub(crate) backbone: BackboneElement,
    pub(crate) sequence: Option<PositiveInt>,
    pub(crate) revenue: Option<CodeableConcept>,
    pub(crate) category: Option<CodeableConcept>,
    pub(crate) product_or_service: Option<CodeableConcept>,
    pub(crate) modifier: Vec<CodeableConcept>,
    pub(crate) program_code: Vec<CodeableConcept>,
    pub(crate) quantity: Option<Quantity>,
    pub(crate) unit_price: Option<Money>,
    pub(crate) factor: Option<Decimal>,
    pub(crate) net: Option<Money>,
    pub(crate) udi: Vec<Reference>,
    hash: HashCache,
}

cached_hash!(ClaimItemDetail =>
    backbone,
    sequence,
    revenue,
    category,
    product_or_service,
    modifier,
    program_code,
    quantity,
    unit_price,
    factor,
    net,
    udi,
);
backbone_capabilities!(ClaimItemDetail, ClaimItemDetailBuilder);

impl ClaimItemDetail {
    pub fn builder() -> ClaimItemDetailBuilder {
        ClaimItemDetailBuilder::default()
    }

    pub fn sequence(&self) -> Option<&PositiveInt> {
        self.sequence.as_ref()
    }

    pub fn revenue(&self) -> Option<&CodeableConcept> {
        self.revenue.as_ref()
    }

    pub fn category(&self) -> Option<&CodeableConcept> {
        self.category.as_ref()
    }

    pub fn product_or_service(&self) -> Option<&CodeableConcept> {
        self.product_or_service.as_ref()
    }

    pub fn modifier(&self) -> &[CodeableConcept] {
        &self.modifier
    }

    pub fn program_code(&self) -> &[CodeableConcept] {
        &self.program_code
    }

    pub fn quantity(&self) -> Option<&Quantity> {
        self.quantity.as_ref()
    }

    pub fn unit_price(&self) -> Option<&Money> {
        self.unit_price.as_ref()
    }

    pub fn factor(&self) -> Option<&Decimal> {
        self.factor.as_ref()
    }

    pub fn net(&self) -> Option<&Money> {
        self.net.as_ref()
    }

    pub fn udi(&self) -> &[Reference] {
        &self.udi
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClaimItemDetailBuilder {
    backbone: BackboneElement,
    sequence: Option<PositiveInt>,
    revenue: Option<CodeableConcept>,
    category: Option<CodeableConcept>,
    product_or_service: Option<CodeableConcept>,
    modifier: Vec<CodeableConcept>,
    program_code: Vec<CodeableConcept>,
    quantity: Option<Quantity>,
    unit_price: Option<Money>,
    factor: Option<Decimal>,
    net: Option<Money>,
    udi: Vec<Reference>,
}

impl ClaimItemDetailBuilder {
    pub fn sequence(mut self, sequence: impl Into<PositiveInt>) -> Self {
        self.sequence = Some(sequence.into());
        self
    }

    pub fn revenue(mut self, revenue: CodeableConcept) -> Self {
        self.revenue = Some(revenue);
        self
    }

    pub fn category(mut self, category: CodeableConcept) -> Self {
        self.category = Some(category);
        self
    }

    pub fn product_or_service(mut self, product_or_service: CodeableConcept) -> Self {
        self.product_or_service = Some(product_or_service);
        self
    }

    list_setters! { modifier, extend_modifier, set_modifier: CodeableConcept; }
    list_setters! { program_code, extend_program_code, set_program_code: CodeableConcept; }

    pub fn quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn unit_price(mut self, unit_price: Money) -> Self {
        self.unit_price = Some(unit_price);
        self
    }

    pub fn factor(mut self, factor: impl Into<Decimal>) -> Self {
        self.factor = Some(factor.into());
        self
    }

    pub fn net(mut self, net: Money) -> Self {
        self.net = Some(net);
        self
    }

    list_setters! { udi, extend_udi, set_udi: Reference; }
}

impl Builder for ClaimItemDetailBuilder {
    type Node = ClaimItemDetail;

    fn build_with(self, config: &ModelConfig) -> Result<ClaimItemDetail> {
        let node = ClaimItemDetail {
            backbone: self.backbone,
            sequence: self.sequence,
            revenue: self.revenue,
            category: self.category,
            product_or_service: self.product_or_service,
            modifier: self.modifier,
            program_code: self.program_code,
            quantity: self.quantity,
            unit_price: self.unit_price,
            factor: self.factor,
            net: self.net,
            udi: self.udi,
            hash: HashCache::default(),
        };
        let mut ctx = ValidationContext::new(CLAIM_ITEM_DETAIL_SCHEMA.type_name, config);
        ctx.backbone(&node.backbone);
        ctx.primitive(&SEQUENCE, node.sequence.as_ref());
        ctx.single(&REVENUE, node.revenue.as_ref());
        ctx.single(&CATEGORY, node.category.as_ref());
        ctx.single(&PRODUCT_OR_SERVICE, node.product_or_service.as_ref());
        ctx.list(&MODIFIER, &node.modifier);
        ctx.list(&PROGRAM_CODE, &node.program_code);
        ctx.single(&QUANTITY, node.quantity.as_ref());
        ctx.single(&UNIT_PRICE, node.unit_price.as_ref());
        ctx.primitive(&FACTOR, node.factor.as_ref());
        ctx.single(&NET, node.net.as_ref());
        ctx.references(&DETAIL_UDI, &node.udi);
        ctx.value_or_children(
            node.backbone.has_content()
                || node.sequence.is_some()
                || node.revenue.is_some()
                || node.category.is_some()
                || node.product_or_service.is_some()
                || !node.modifier.is_empty()
                || !node.program_code.is_empty()
                || node.quantity.is_some()
                || node.unit_price.is_some()
                || node.factor.is_some()
                || node.net.is_some()
                || !node.udi.is_empty(),
        );
        ctx.finish()?;
        Ok(node)
    }
}

impl ToBuilder for ClaimItemDetail {
    type Builder = ClaimItemDetailBuilder;

    fn to_builder(&self) -> ClaimItemDetailBuilder {
        ClaimItemDetailBuilder {
            backbone: self.backbone.clone(),
            sequence: self.sequence.clone(),
            revenue: self.revenue.clone(),
            category: self.category.clone(),
            product_or_service: self.product_or_service.clone(),
            modifier: self.modifier.clone(),
            program_code: self.program_code.clone(),
            quantity: self.quantity.clone(),
            unit_price: self.unit_price.clone(),
            factor: self.factor.clone(),
            net: self.net.clone(),
            udi: self.udi.clone(),
        }
    }
}

impl Visitable for ClaimItemDetail {
    fn schema(&self) -> &'static NodeSchema {
        &CLAIM_ITEM_DETAIL_SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.backbone.accept_children(visitor);
        accept_opt(SEQUENCE.name, self.sequence.as_ref(), visitor);
        accept_opt(REVENUE.name, self.revenue.as_ref(), visitor);
        accept_opt(CATEGORY.name, self.category.as_ref(), visitor);
        accept_opt(PRODUCT_OR_SERVICE.name, self.product_or_service.as_ref(), visitor);
        accept_list(MODIFIER.name, &self.modifier, visitor);
        accept_list(PROGRAM_CODE.name, &self.program_code, visitor);
        accept_opt(QUANTITY.name, self.quantity.as_ref(), visitor);
        accept_opt(UNIT_PRICE.name, self.unit_price.as_ref(), visitor);
        accept_opt(FACTOR.name, self.factor.as_ref(), visitor);
        accept_opt(NET.name, self.net.as_ref(), visitor);
        accept_list(DETAIL_UDI.name, &self.udi, visitor);
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

    fn service(code: &str) -> CodeableConcept {
        CodeableConcept::builder()
            .coding(
                Coding::builder()
                    .system("http://terminology.hl7.org/CodeSystem/ex-USCLS")
                    .code(code)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn item_requires_sequence_and_product() {
        let err = ClaimItem::builder().factor(rust_decimal::Decimal::ONE).build().unwrap_err();
        let fields: Vec<_> = err.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["sequence", "productOrService"]);
    }

    #[test]
    fn sequence_lists_are_checked_per_entry() {
        let err = ClaimItem::builder()
            .sequence(1)
            .product_or_service(service("1205"))
            .care_team_sequence(1)
            .care_team_sequence(0)
            .build()
            .unwrap_err();
        assert_eq!(err.violations()[0].path, "Claim.item.careTeamSequence[1]");
    }

    #[test]
    fn udi_entries_must_reference_devices() {
        let err = ClaimItem::builder()
            .sequence(1)
            .product_or_service(service("1205"))
            .udi(Reference::to("Device/d1").unwrap())
            .udi(Reference::to("Patient/p1").unwrap())
            .build()
            .unwrap_err();
        assert_eq!(err.violations()[0].path, "Claim.item.udi[1]");
        assert!(matches!(
            err.violations()[0].kind,
            ViolationKind::ReferenceTarget { .. }
        ));
    }

    #[test]
    fn details_nest_under_items() {
        let detail = ClaimItemDetail::builder()
            .sequence(1)
            .product_or_service(service("group"))
            .build()
            .unwrap();
        let item = ClaimItem::builder()
            .sequence(1)
            .product_or_service(service("1205"))
            .serviced_date(chrono::NaiveDate::from_ymd_opt(2014, 8, 16).unwrap())
            .detail(detail.clone())
            .build()
            .unwrap();
        assert_eq!(item.detail(), &[detail]);
        assert!(item.serviced().unwrap().is::<Date>());
        assert!(item.modifier().is_empty());
    }
}
