//! Primitive wrapper types.
//!
//! A FHIR primitive is an element that may carry a value: `Primitive<K>`
//! pairs the [`Element`] capability (id, extensions) with an optional payload
//! whose Rust type and lexical rules come from the kind `K`. Primitives are
//! the one node family allowed to be completely empty.

use crate::builder::{Builder, ElementBuilder, ToBuilder};
use crate::config::ModelConfig;
use crate::element::{Element, HasElement, ELEMENT_SCHEMA, EXTENSION, ID};
use crate::error::{Error, Result};
use crate::hash::{field_hasher, HashCache};
use crate::schema::{DataType, FieldInfo, NodeKind, NodeSchema};
use crate::validation::{primitive as checks, ValidationContext};
use crate::visitor::{ValueRef, Visitable, Visitor};
use chrono::{DateTime as ChronoDateTime, Datelike, FixedOffset, NaiveDate, SecondsFormat};
use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

/// Static description of one primitive type: payload type, schema and
/// lexical check.
pub trait PrimitiveKind:
    Copy + fmt::Debug + Eq + Hash + Default + Send + Sync + 'static
{
    type Value: Clone + fmt::Debug + Eq + Hash + Send + Sync + 'static;

    const DATA_TYPE: DataType;
    const SCHEMA: &'static NodeSchema;

    fn check(value: &Self::Value, config: &ModelConfig) -> std::result::Result<(), String>;

    fn value_ref(value: &Self::Value) -> ValueRef<'_>;
}

#[derive(Clone, PartialEq, Eq)]
pub struct Primitive<K: PrimitiveKind> {
    pub(crate) element: Element,
    pub(crate) value: Option<K::Value>,
    hash: HashCache,
    _kind: PhantomData<K>,
}

impl<K: PrimitiveKind> Primitive<K> {
    /// Wraps a value without running the lexical check. The check runs when
    /// the containing node is built.
    pub fn of(value: impl Into<K::Value>) -> Self {
        Self::from_parts(Element::default(), Some(value.into()))
    }

    pub fn builder() -> PrimitiveBuilder<K> {
        PrimitiveBuilder::default()
    }

    fn from_parts(element: Element, value: Option<K::Value>) -> Self {
        Self {
            element,
            value,
            hash: HashCache::default(),
            _kind: PhantomData,
        }
    }

    pub fn value(&self) -> Option<&K::Value> {
        self.value.as_ref()
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none() && !self.element.has_content()
    }

    pub(crate) fn check(&self, config: &ModelConfig) -> std::result::Result<(), String> {
        match &self.value {
            Some(value) => K::check(value, config),
            None => Ok(()),
        }
    }

    pub fn hash_code(&self) -> u64 {
        self.hash.get_or_compute(|| {
            let mut hasher = field_hasher();
            self.element.hash(&mut hasher);
            self.value.hash(&mut hasher);
            hasher.finish()
        })
    }
}

impl<K: PrimitiveKind> Hash for Primitive<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl<K: PrimitiveKind> fmt::Debug for Primitive<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct(K::DATA_TYPE.name());
        if let Some(id) = self.element.id() {
            debug.field("id", &id);
        }
        if !self.element.extension().is_empty() {
            debug.field("extension", &self.element.extension());
        }
        debug.field("value", &self.value).finish()
    }
}

impl<K: PrimitiveKind> HasElement for Primitive<K> {
    fn element(&self) -> &Element {
        &self.element
    }
}

impl<K: PrimitiveKind> Visitable for Primitive<K> {
    fn schema(&self) -> &'static NodeSchema {
        K::SCHEMA
    }

    fn accept_children(&self, visitor: &mut dyn Visitor) {
        self.element.accept_children(visitor);
        if let Some(value) = &self.value {
            visitor.visit_value("value", K::value_ref(value));
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Clone)]
pub struct PrimitiveBuilder<K: PrimitiveKind> {
    element: Element,
    value: Option<K::Value>,
}

impl<K: PrimitiveKind> Default for PrimitiveBuilder<K> {
    fn default() -> Self {
        Self {
            element: Element::default(),
            value: None,
        }
    }
}

impl<K: PrimitiveKind> fmt::Debug for PrimitiveBuilder<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimitiveBuilder")
            .field("type", &K::DATA_TYPE.name())
            .field("element", &self.element)
            .field("value", &self.value)
            .finish()
    }
}

impl<K: PrimitiveKind> PrimitiveBuilder<K> {
    pub fn value(mut self, value: impl Into<K::Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn clear_value(mut self) -> Self {
        self.value = None;
        self
    }
}

impl<K: PrimitiveKind> ElementBuilder for PrimitiveBuilder<K> {
    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

impl<K: PrimitiveKind> Builder for PrimitiveBuilder<K> {
    type Node = Primitive<K>;

    fn build_with(self, config: &ModelConfig) -> Result<Primitive<K>> {
        let node = Primitive::from_parts(self.element, self.value);
        let mut ctx = ValidationContext::new(K::DATA_TYPE.name(), config);
        ctx.element(&node.element);
        if let Err(message) = node.check(config) {
            ctx.invalid_primitive("value", None, message);
        }
        ctx.finish()?;
        Ok(node)
    }
}

impl<K: PrimitiveKind> ToBuilder for Primitive<K> {
    type Builder = PrimitiveBuilder<K>;

    fn to_builder(&self) -> PrimitiveBuilder<K> {
        PrimitiveBuilder {
            element: self.element.clone(),
            value: self.value.clone(),
        }
    }
}

macro_rules! primitive_kinds {
    ($(
        $(#[$doc:meta])*
        $kind:ident => $alias:ident($value:ty, $data_type:ident, $check:expr, |$v:ident| $value_ref:expr);
    )+) => {$(
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $kind;

        impl PrimitiveKind for $kind {
            type Value = $value;

            const DATA_TYPE: DataType = DataType::$data_type;
            const SCHEMA: &'static NodeSchema = &NodeSchema {
                type_name: DataType::$data_type.name(),
                kind: NodeKind::Primitive,
                base: Some(&ELEMENT_SCHEMA),
                fields: &[
                    ID,
                    EXTENSION,
                    FieldInfo::new("value", &[DataType::$data_type]),
                ],
                constraints: &[],
            };

            fn check(value: &$value, config: &ModelConfig) -> std::result::Result<(), String> {
                ($check)(value, config)
            }

            fn value_ref($v: &$value) -> ValueRef<'_> {
                $value_ref
            }
        }

        $(#[$doc])*
        pub type $alias = Primitive<$kind>;
    )+};
}

fn unchecked<T: ?Sized>(_value: &T, _config: &ModelConfig) -> std::result::Result<(), String> {
    Ok(())
}

fn check_markdown(value: &String, config: &ModelConfig) -> std::result::Result<(), String> {
    checks::check_string(value, config)
}

primitive_kinds! {
    BooleanKind => Boolean(bool, Boolean, unchecked::<bool>, |v| ValueRef::Boolean(*v));
    IntegerKind => Integer(i32, Integer, unchecked::<i32>, |v| ValueRef::Integer(*v));
    /// An integer of at least 1.
    PositiveIntKind => PositiveInt(i32, PositiveInt, checks::check_positive_int, |v| ValueRef::Integer(*v));
    /// A non-negative integer.
    UnsignedIntKind => UnsignedInt(i32, UnsignedInt, checks::check_unsigned_int, |v| ValueRef::Integer(*v));
    DecimalKind => Decimal(rust_decimal::Decimal, Decimal, unchecked::<rust_decimal::Decimal>, |v| ValueRef::Decimal(v));
    /// The FHIR `string` type.
    StringKind => FhirString(String, String, |v: &String, c| checks::check_string(v, c), |v| ValueRef::String(v));
    CodeKind => Code(String, Code, |v: &String, c| checks::check_code(v, c), |v| ValueRef::String(v));
    IdKind => Id(String, Id, |v: &String, c| checks::check_id(v, c), |v| ValueRef::String(v));
    UriKind => Uri(String, Uri, |v: &String, c| checks::check_uri(v, c), |v| ValueRef::String(v));
    MarkdownKind => Markdown(String, Markdown, check_markdown, |v| ValueRef::String(v));
    Base64BinaryKind => Base64Binary(String, Base64Binary, |v: &String, c| checks::check_base64(v, c), |v| ValueRef::String(v));
    /// Limited XHTML narrative content.
    XhtmlKind => Xhtml(String, Xhtml, |v: &String, c| checks::check_xhtml(v, c), |v| ValueRef::String(v));
    DateKind => Date(FhirDate, Date, |v: &FhirDate, _| v.check(), |v| ValueRef::Date(v));
    DateTimeKind => DateTime(FhirDateTime, DateTime, |v: &FhirDateTime, _| v.check(), |v| ValueRef::DateTime(v));
}

impl<K: PrimitiveKind<Value = String>> From<&str> for Primitive<K> {
    fn from(value: &str) -> Self {
        Self::of(value)
    }
}

impl<K: PrimitiveKind<Value = String>> From<String> for Primitive<K> {
    fn from(value: String) -> Self {
        Self::of(value)
    }
}

impl<K: PrimitiveKind<Value = i32>> From<i32> for Primitive<K> {
    fn from(value: i32) -> Self {
        Self::of(value)
    }
}

impl From<bool> for Boolean {
    fn from(value: bool) -> Self {
        Self::of(value)
    }
}

impl From<rust_decimal::Decimal> for Decimal {
    fn from(value: rust_decimal::Decimal) -> Self {
        Self::of(value)
    }
}

impl From<FhirDate> for Date {
    fn from(value: FhirDate) -> Self {
        Self::of(value)
    }
}

impl From<NaiveDate> for Date {
    fn from(value: NaiveDate) -> Self {
        Self::of(FhirDate::Date(value))
    }
}

impl From<FhirDateTime> for DateTime {
    fn from(value: FhirDateTime) -> Self {
        Self::of(value)
    }
}

impl From<FhirDate> for DateTime {
    fn from(value: FhirDate) -> Self {
        Self::of(FhirDateTime::Partial(value))
    }
}

impl From<NaiveDate> for DateTime {
    fn from(value: NaiveDate) -> Self {
        Self::of(FhirDateTime::Partial(FhirDate::Date(value)))
    }
}

impl From<ChronoDateTime<FixedOffset>> for DateTime {
    fn from(value: ChronoDateTime<FixedOffset>) -> Self {
        Self::of(FhirDateTime::Instant(value))
    }
}

/// A FHIR `date`: a year, a year and month, or a full calendar date.
///
/// The variants are open; years outside 1..=9999 and months outside 1..=12
/// are rejected when the containing node is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FhirDate {
    Year(i32),
    YearMonth(i32, u32),
    Date(NaiveDate),
}

fn invalid(type_name: &'static str, value: &str, reason: impl Into<String>) -> Error {
    Error::InvalidPrimitive {
        type_name,
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_digits(part: &str, width: usize) -> Option<u32> {
    if part.len() == width && part.bytes().all(|b| b.is_ascii_digit()) {
        part.parse().ok()
    } else {
        None
    }
}

const YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

impl FhirDate {
    pub fn year(&self) -> i32 {
        match self {
            FhirDate::Year(year) | FhirDate::YearMonth(year, _) => *year,
            FhirDate::Date(date) => date.year(),
        }
    }

    /// Checks that the value renders as a valid FHIR date.
    pub fn check(&self) -> std::result::Result<(), String> {
        if !YEARS.contains(&self.year()) {
            return Err(format!("year {} is outside 0001..9999", self.year()));
        }
        match self {
            FhirDate::YearMonth(_, month) if !(1..=12).contains(month) => {
                Err(format!("month {} is outside 01..12", month))
            }
            _ => Ok(()),
        }
    }
}

impl FromStr for FhirDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('-').collect();
        let year = parts
            .first()
            .and_then(|p| parse_digits(p, 4))
            .filter(|y| *y > 0)
            .ok_or_else(|| invalid("date", s, "expected a four digit year from 0001"))?
            as i32;
        match parts.len() {
            1 => Ok(FhirDate::Year(year)),
            2 => {
                let month = parse_digits(parts[1], 2)
                    .filter(|m| (1..=12).contains(m))
                    .ok_or_else(|| invalid("date", s, "expected a month between 01 and 12"))?;
                Ok(FhirDate::YearMonth(year, month))
            }
            3 => {
                let month = parse_digits(parts[1], 2);
                let day = parse_digits(parts[2], 2);
                month
                    .zip(day)
                    .and_then(|(m, d)| NaiveDate::from_ymd_opt(year, m, d))
                    .map(FhirDate::Date)
                    .ok_or_else(|| invalid("date", s, "not a valid calendar date"))
            }
            _ => Err(invalid("date", s, "expected YYYY, YYYY-MM or YYYY-MM-DD")),
        }
    }
}

impl fmt::Display for FhirDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FhirDate::Year(year) => write!(f, "{:04}", year),
            FhirDate::YearMonth(year, month) => write!(f, "{:04}-{:02}", year, month),
            FhirDate::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl From<NaiveDate> for FhirDate {
    fn from(value: NaiveDate) -> Self {
        FhirDate::Date(value)
    }
}

/// A FHIR `dateTime`: a partial date, or a date and time with an offset.
///
/// Equality and hashing compare the local date-time and the offset, so the
/// same instant written with two offsets gives two different values.
#[derive(Debug, Clone, Copy)]
pub enum FhirDateTime {
    Partial(FhirDate),
    Instant(ChronoDateTime<FixedOffset>),
}

impl FhirDateTime {
    pub fn check(&self) -> std::result::Result<(), String> {
        match self {
            FhirDateTime::Partial(date) => date.check(),
            FhirDateTime::Instant(instant) if !YEARS.contains(&instant.year()) => {
                Err(format!("year {} is outside 0001..9999", instant.year()))
            }
            FhirDateTime::Instant(_) => Ok(()),
        }
    }
}

impl PartialEq for FhirDateTime {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FhirDateTime::Partial(a), FhirDateTime::Partial(b)) => a == b,
            (FhirDateTime::Instant(a), FhirDateTime::Instant(b)) => {
                a.naive_local() == b.naive_local() && a.offset() == b.offset()
            }
            _ => false,
        }
    }
}

impl Eq for FhirDateTime {}

impl Hash for FhirDateTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            FhirDateTime::Partial(date) => date.hash(state),
            FhirDateTime::Instant(instant) => {
                instant.naive_local().hash(state);
                instant.offset().local_minus_utc().hash(state);
            }
        }
    }
}

impl FromStr for FhirDateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.contains('T') {
            ChronoDateTime::parse_from_rfc3339(s)
                .map(FhirDateTime::Instant)
                .map_err(|e| invalid("dateTime", s, e.to_string()))
        } else {
            s.parse::<FhirDate>()
                .map(FhirDateTime::Partial)
                .map_err(|_| invalid("dateTime", s, "expected a partial date or a full date-time"))
        }
    }
}

impl fmt::Display for FhirDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FhirDateTime::Partial(date) => write!(f, "{}", date),
            FhirDateTime::Instant(instant) => {
                f.write_str(&instant.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
        }
    }
}

impl From<FhirDate> for FhirDateTime {
    fn from(value: FhirDate) -> Self {
        FhirDateTime::Partial(value)
    }
}

impl From<NaiveDate> for FhirDateTime {
    fn from(value: NaiveDate) -> Self {
        FhirDateTime::Partial(FhirDate::Date(value))
    }
}

impl From<ChronoDateTime<FixedOffset>> for FhirDateTime {
    fn from(value: ChronoDateTime<FixedOffset>) -> Self {
        FhirDateTime::Instant(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visitor::walk;

    #[test]
    fn partial_dates_parse_and_render() {
        for text in ["2024", "2024-02", "2024-02-29"] {
            let date: FhirDate = text.parse().unwrap();
            assert_eq!(date.to_string(), text);
        }
        assert!("2023-02-29".parse::<FhirDate>().is_err());
        assert!("2024-13".parse::<FhirDate>().is_err());
        assert!("24".parse::<FhirDate>().is_err());
        assert!("0000".parse::<FhirDate>().is_err());
    }

    #[test]
    fn out_of_range_dates_fail_the_build() {
        for bad in [
            FhirDate::YearMonth(2024, 13),
            FhirDate::YearMonth(2024, 0),
            FhirDate::Year(123456),
            FhirDate::Year(0),
        ] {
            let err = Date::builder().value(bad).build().unwrap_err();
            assert_eq!(err.violations()[0].path, "date.value", "{bad}");
        }
        let err = DateTime::builder()
            .value(FhirDate::YearMonth(2024, 13))
            .build()
            .unwrap_err();
        assert_eq!(err.violations()[0].path, "dateTime.value");
        assert!(Date::builder().value(FhirDate::YearMonth(2024, 12)).build().is_ok());
    }

    #[test]
    fn offsets_take_part_in_date_time_equality() {
        let local: FhirDateTime = "2024-05-01T10:30:00+02:00".parse().unwrap();
        let utc: FhirDateTime = "2024-05-01T08:30:00Z".parse().unwrap();
        assert_ne!(local, utc);
        assert_ne!(DateTime::of(local).hash_code(), DateTime::of(utc).hash_code());

        let again: FhirDateTime = "2024-05-01T10:30:00+02:00".parse().unwrap();
        assert_eq!(local, again);
        assert_eq!(DateTime::of(local).hash_code(), DateTime::of(again).hash_code());
    }

    #[test]
    fn date_times_require_an_offset_with_a_time() {
        let dt: FhirDateTime = "2024-05-01T10:30:00+02:00".parse().unwrap();
        assert!(matches!(dt, FhirDateTime::Instant(_)));
        assert_eq!(dt.to_string(), "2024-05-01T10:30:00+02:00");
        assert!("2024-05-01T10:30:00".parse::<FhirDateTime>().is_err());
        let partial: FhirDateTime = "2024-05".parse().unwrap();
        assert_eq!(partial, FhirDateTime::Partial(FhirDate::YearMonth(2024, 5)));
    }

    #[test]
    fn builder_checks_the_lexical_form() {
        assert!(Id::builder().value("abc-1").build().is_ok());
        let err = Id::builder().value("not valid").build().unwrap_err();
        assert_eq!(err.violations()[0].path, "id.value");
    }

    #[test]
    fn empty_primitives_are_allowed() {
        let empty = Code::builder().build().unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty, Code::builder().build().unwrap());
    }

    #[test]
    fn of_skips_the_check_until_the_parent_builds() {
        let raw = PositiveInt::of(0);
        assert_eq!(raw.value(), Some(&0));
        assert!(raw.check(&ModelConfig::default()).is_err());
    }

    #[derive(Default)]
    struct Leaves(Vec<String>);

    impl Visitor for Leaves {
        fn visit_value(&mut self, name: &str, value: ValueRef<'_>) {
            self.0.push(format!("{}={}", name, value));
        }
    }

    #[test]
    fn visiting_reports_id_and_value() {
        let code = Code::builder().id("c1").value("final").build().unwrap();
        let mut leaves = Leaves::default();
        walk(&code, "status", None, &mut leaves);
        assert_eq!(leaves.0, vec!["id=c1", "value=final"]);
    }
}
