//! Declaration macros for model types
//!
//! A type is declared once, as a list of `field: Type => "wireName"` lines in
//! canonical element order. The macros expand that into the struct, its
//! catalog entry and its reflection impls, so the catalog cannot drift from
//! the Rust definitions.

/// Declares a datatype, backbone element or resource.
///
/// ```ignore
/// fhir_type! {
///     /// A measured amount.
///     datatype Quantity {
///         id: Option<String> => "id",
///         extension: Vec<Extension> => "extension",
///         value: Primitive<Decimal> => "value",
///     }
/// }
/// ```
///
/// The field kind is derived from the Rust type. A trailing
/// `as FieldKind::InlineResource` overrides it. Each declared type also gets
/// `Type::builder()` and one setter per field on
/// [`Builder<Type>`](crate::builder::Builder).
#[macro_export]
macro_rules! fhir_type {
    (
        $(#[$meta:meta])*
        $kind:ident $name:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty => $wire:literal $(as $over:expr)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $ty,
            )*
        }

        impl $name {
            /// Catalog entry for this type.
            pub fn catalog_entry() -> &'static $crate::catalog::TypeInfo {
                static INFO: $crate::catalog::TypeInfo = $crate::catalog::TypeInfo {
                    name: stringify!($name),
                    kind: $crate::__type_kind!($kind),
                    fields: &[
                        $(
                            $crate::catalog::FieldInfo {
                                name: $wire,
                                kind: $crate::__field_kind!(
                                    <$ty as $crate::field::FieldType>::KIND $(, $over)?
                                ),
                                repeated: <$ty as $crate::field::FieldType>::REPEATED,
                            },
                        )*
                    ],
                };
                &INFO
            }
        }

        impl $crate::field::Complex for $name {
            fn type_info(&self) -> &'static $crate::catalog::TypeInfo {
                Self::catalog_entry()
            }

            fn field(&self, name: &str) -> Option<&dyn $crate::field::Field> {
                match name {
                    $($wire => Some(&self.$field as &dyn $crate::field::Field),)*
                    _ => None,
                }
            }

            fn field_mut(&mut self, name: &str) -> Option<&mut dyn $crate::field::Field> {
                match name {
                    $($wire => Some(&mut self.$field as &mut dyn $crate::field::Field),)*
                    _ => None,
                }
            }
        }

        impl $name {
            /// Starts a [`Builder`]($crate::builder::Builder) with every field empty.
            pub fn builder() -> $crate::builder::Builder<Self> {
                $crate::builder::Builder::new()
            }
        }

        impl $crate::builder::Builder<$name> {
            $(
                $(#[$fmeta])*
                pub fn $field(self, value: impl Into<$ty>) -> Self {
                    let value = value.into();
                    self.with(move |target| target.$field = value)
                }
            )*
        }

        $crate::__type_extra!($kind $name);
    };
}

/// Declares the value type of a `name[x]` choice field.
///
/// Each variant name doubles as the wire suffix: `Quantity(Quantity)` inside
/// `value[x]` is read and written as `valueQuantity`.
#[macro_export]
macro_rules! fhir_choice {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident($inner:ty)),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name {
            $($variant($inner),)*
        }

        impl $crate::field::Item for $name {
            const KIND: $crate::catalog::FieldKind = $crate::catalog::FieldKind::Choice(&[
                $(
                    $crate::catalog::ChoiceVariant {
                        suffix: stringify!($variant),
                        kind: <$inner as $crate::field::Item>::KIND,
                    },
                )*
            ]);

            fn as_item(&self) -> $crate::field::ItemRef<'_> {
                match self {
                    $($name::$variant(value) => <$inner as $crate::field::Item>::as_item(value),)*
                }
            }

            fn variant(&self) -> Option<&'static str> {
                match self {
                    $($name::$variant(_) => Some(stringify!($variant)),)*
                }
            }

            fn decode(
                variant: Option<&str>,
                decoder: &mut dyn $crate::field::ItemDecoder,
            ) -> $crate::Result<Self> {
                let variant = variant.unwrap_or_default();
                $(
                    if variant == stringify!($variant) {
                        let value = <$inner as $crate::field::Item>::decode(None, decoder)?;
                        return Ok($name::$variant(value));
                    }
                )*
                Err($crate::Error::UnknownChoiceVariant {
                    path: ::std::string::String::new(),
                    name: variant.to_string(),
                })
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __type_kind {
    (datatype) => {
        $crate::catalog::TypeKind::Datatype
    };
    (backbone) => {
        $crate::catalog::TypeKind::Backbone
    };
    (resource) => {
        $crate::catalog::TypeKind::Resource
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_kind {
    ($derived:expr) => {
        $derived
    };
    ($derived:expr, $over:expr) => {
        $over
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __type_extra {
    (resource $name:ident) => {
        impl $crate::registry::ResourceType for $name {
            fn resource_type(&self) -> &'static str {
                stringify!($name)
            }
        }
    };
    ($kind:ident $name:ident) => {
        impl $crate::field::Item for $name {
            const KIND: $crate::catalog::FieldKind =
                $crate::catalog::FieldKind::Complex(stringify!($name));

            fn as_item(&self) -> $crate::field::ItemRef<'_> {
                $crate::field::ItemRef::Complex(self)
            }

            fn decode(
                _variant: Option<&str>,
                decoder: &mut dyn $crate::field::ItemDecoder,
            ) -> $crate::Result<Self> {
                let mut value = Self::default();
                decoder.complex(&mut value)?;
                Ok(value)
            }
        }
    };
}
