//! Helper macro generating port error enums.
//!
//! Each variant gets a `thiserror` message, a snake-case constructor that
//! accepts `impl Into<T>` for every field, and a stable `code()` string used
//! in structured log fields.

macro_rules! define_port_error {
    (@variant $name:ident $variant:ident) => {
        ::paste::paste! {
            #[doc = "Construct [`" $name "::" $variant "`]."]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@variant $name:ident $variant:ident { $($field:ident : $ty:ty),+ }) => {
        ::paste::paste! {
            #[doc = "Construct [`" $name "::" $variant "`], converting each field."]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                Self::$variant { $($field: $field.into()),+ }
            }
        }
    };

    (@matches $variant:ident) => { Self::$variant };
    (@matches $variant:ident { $($rest:tt)* }) => { Self::$variant { .. } };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),+ $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),+ } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@variant $name $variant $( { $($field : $ty),+ } )?);
            )*

            /// Snake-case variant name, stable across message changes.
            #[must_use]
            pub const fn code(&self) -> &'static str {
                ::paste::paste! {
                    match self {
                        $(
                            define_port_error!(@matches $variant $( { $($field)+ } )?) => {
                                stringify!([<$variant:snake>])
                            }
                        )*
                    }
                }
            }
        }
    };
}

pub(crate) use define_port_error;
