//! Macros for defining kind enums.

/// Macro for defining a kind enum.
///
/// The enum is (de)serialized as its numeric value, the way the backend
/// transfers enumerations, and displayed/parsed in `kebab-case`.
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
///
/// define_kind! {
///     #[doc = "Shape kind."]
///     enum Kind {
///         #[doc = "A cube"]
///         Cube = 1,
///
///         #[doc = "A sphere"]
///         Sphere = 2,
///     }
/// }
/// ```
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumIter,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            PartialEq,
        )]
        #[doc = $doc]
        #[repr(u8)]
        #[strum(serialize_all = "kebab-case")]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant = $value,
            )*
        }

        impl $name {
            /// Converts this into its [`u8`] representation.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }
        }

        impl ::core::convert::TryFrom<u8> for $name {
            type Error = ::std::string::String;

            fn try_from(v: u8) -> ::core::result::Result<Self, Self::Error> {
                match v {
                    $(
                        v if Self::$variant.u8() == v => Ok(Self::$variant),
                    )*
                    v => Err(::std::format!(
                        "invalid `{}` value: {v}",
                        ::core::stringify!($name),
                    )),
                }
            }
        }

        impl $crate::private::serde::Serialize for $name {
            fn serialize<S>(
                &self,
                serializer: S,
            ) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: $crate::private::serde::Serializer,
            {
                serializer.serialize_u8(self.u8())
            }
        }

        impl<'de> $crate::private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(
                deserializer: D,
            ) -> ::core::result::Result<Self, D::Error>
            where
                D: $crate::private::serde::Deserializer<'de>,
            {
                let v = <u8 as $crate::private::serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                Self::try_from(v).map_err(
                    <D::Error as $crate::private::serde::de::Error>::custom,
                )
            }
        }
    };
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    define_kind! {
        #[doc = "Test status."]
        enum Status {
            #[doc = "Waiting."]
            Pending = 0,

            #[doc = "Being worked on."]
            InProgress = 1,
        }
    }

    #[test]
    fn serializes_as_number() {
        assert_eq!(serde_json::to_string(&Status::InProgress).unwrap(), "1");
        assert_eq!(
            serde_json::from_str::<Status>("0").unwrap(),
            Status::Pending,
        );
        assert!(serde_json::from_str::<Status>("7").is_err());
    }

    #[test]
    fn displays_as_kebab_case() {
        assert_eq!(Status::InProgress.to_string(), "in-progress");
        assert_eq!(
            Status::from_str("in-progress").unwrap(),
            Status::InProgress,
        );
    }
}
