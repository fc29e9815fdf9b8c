//! Choice elements (`value[x]`, `timing[x]`, ...).
//!
//! A choice field stores a [`Value`], the closed union of every type any
//! choice field in the model can hold. Each field narrows that union through
//! the `types` of its [`FieldInfo`](crate::schema::FieldInfo); `build()`
//! rejects a value whose variant is outside the field's set.

use crate::config::ModelConfig;
use crate::datatypes::{
    Address, Attachment, CodeableConcept, Coding, Identifier, Money, Period, Quantity, Reference,
};
use crate::primitive::{
    Boolean, Code, Date, DateTime, Decimal, FhirString, Id, Integer, Markdown, PositiveInt, Uri,
    UnsignedInt,
};
use crate::schema::DataType;
use crate::visitor::Visitable;

/// Every data type a [`Value`] can hold, in variant order.
pub const VALUE_TYPES: &[DataType] = &[
    DataType::Boolean,
    DataType::Integer,
    DataType::PositiveInt,
    DataType::UnsignedInt,
    DataType::Decimal,
    DataType::String,
    DataType::Code,
    DataType::Id,
    DataType::Uri,
    DataType::Markdown,
    DataType::Date,
    DataType::DateTime,
    DataType::Address,
    DataType::Attachment,
    DataType::CodeableConcept,
    DataType::Coding,
    DataType::Identifier,
    DataType::Money,
    DataType::Period,
    DataType::Quantity,
    DataType::Reference,
];

/// A type that can be stored in a choice field.
pub trait ChoiceMember: Visitable + Sized + Into<Value> {
    const DATA_TYPE: DataType;

    fn from_value(value: &Value) -> Option<&Self>;
}

macro_rules! choice_value {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum Value {
            $($variant($ty),)+
        }

        impl Value {
            pub fn data_type(&self) -> DataType {
                match self {
                    $(Value::$variant(_) => DataType::$variant,)+
                }
            }

            /// The held value as a traversable node.
            pub fn as_node(&self) -> &dyn Visitable {
                match self {
                    $(Value::$variant(v) => v,)+
                }
            }
        }

        $(
            impl ChoiceMember for $ty {
                const DATA_TYPE: DataType = DataType::$variant;

                fn from_value(value: &Value) -> Option<&Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )+
    };
}

choice_value! {
    Boolean(Boolean),
    Integer(Integer),
    PositiveInt(PositiveInt),
    UnsignedInt(UnsignedInt),
    Decimal(Decimal),
    String(FhirString),
    Code(Code),
    Id(Id),
    Uri(Uri),
    Markdown(Markdown),
    Date(Date),
    DateTime(DateTime),
    Address(Address),
    Attachment(Attachment),
    CodeableConcept(CodeableConcept),
    Coding(Coding),
    Identifier(Identifier),
    Money(Money),
    Period(Period),
    Quantity(Quantity),
    Reference(Reference),
}

impl Value {
    /// The held value if it is a `T`.
    pub fn get<T: ChoiceMember>(&self) -> Option<&T> {
        T::from_value(self)
    }

    pub fn is<T: ChoiceMember>(&self) -> bool {
        T::from_value(self).is_some()
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        self.get::<Reference>()
    }

    pub fn hash_code(&self) -> u64 {
        match self {
            Value::Boolean(v) => v.hash_code(),
            Value::Integer(v) => v.hash_code(),
            Value::PositiveInt(v) => v.hash_code(),
            Value::UnsignedInt(v) => v.hash_code(),
            Value::Decimal(v) => v.hash_code(),
            Value::String(v) => v.hash_code(),
            Value::Code(v) => v.hash_code(),
            Value::Id(v) => v.hash_code(),
            Value::Uri(v) => v.hash_code(),
            Value::Markdown(v) => v.hash_code(),
            Value::Date(v) => v.hash_code(),
            Value::DateTime(v) => v.hash_code(),
            Value::Address(v) => v.hash_code(),
            Value::Attachment(v) => v.hash_code(),
            Value::CodeableConcept(v) => v.hash_code(),
            Value::Coding(v) => v.hash_code(),
            Value::Identifier(v) => v.hash_code(),
            Value::Money(v) => v.hash_code(),
            Value::Period(v) => v.hash_code(),
            Value::Quantity(v) => v.hash_code(),
            Value::Reference(v) => v.hash_code(),
        }
    }

    /// Lexical check of a primitive member. Complex members were checked
    /// when they were built.
    pub(crate) fn check_primitive(&self, config: &ModelConfig) -> Result<(), String> {
        match self {
            Value::Boolean(v) => v.check(config),
            Value::Integer(v) => v.check(config),
            Value::PositiveInt(v) => v.check(config),
            Value::UnsignedInt(v) => v.check(config),
            Value::Decimal(v) => v.check(config),
            Value::String(v) => v.check(config),
            Value::Code(v) => v.check(config),
            Value::Id(v) => v.check(config),
            Value::Uri(v) => v.check(config),
            Value::Markdown(v) => v.check(config),
            Value::Date(v) => v.check(config),
            Value::DateTime(v) => v.check(config),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::FhirDate;

    #[test]
    fn typed_access_matches_the_variant() {
        let value = Value::from(Date::of(FhirDate::Year(2024)));
        assert_eq!(value.data_type(), DataType::Date);
        assert!(value.is::<Date>());
        assert!(value.get::<DateTime>().is_none());
        assert!(value.as_reference().is_none());
        assert_eq!(value.as_node().type_name(), "date");
    }

    #[test]
    fn primitive_members_are_checked() {
        let config = ModelConfig::default();
        assert!(Value::from(PositiveInt::of(0)).check_primitive(&config).is_err());
        assert!(Value::from(PositiveInt::of(3)).check_primitive(&config).is_ok());
    }
}
