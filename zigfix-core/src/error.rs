//! Error types for the zigfix core library.
//!
//! Defines the error enums exposed by the public API and a convenient result
//! alias. Every error here reflects a caller precondition or an internal
//! invariant violation; none of them are transient.

use std::fmt;

use thiserror::Error;

use crate::model::DeviceType;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error produced while generating fixtures.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GenerateError {
    /// A random pick was requested from an empty candidate set.
    #[error("cannot pick from an empty {what} list")]
    EmptyInput {
        /// Human-readable name of the empty candidate list.
        what: &'static str,
    },
    /// A forced model has no match in the capability catalog.
    #[error("no definition for model `{model}` in catalog `{catalog}`")]
    DefinitionNotFound {
        /// Model identifier requested by the caller.
        model: String,
        /// Name of the catalog that was searched.
        catalog: String,
    },
    /// Two device types that can never be adjacent reached the relationship
    /// resolver.
    #[error("devices of type {left} and {right} cannot be adjacent")]
    InvalidRelationship {
        /// Type of the link's source node.
        left: DeviceType,
        /// Type of the link's target node.
        right: DeviceType,
    },
}

define_error_codes! {
    /// Stable codes describing [`GenerateError`] variants.
    enum GenerateErrorCode for GenerateError {
        /// A random pick was requested from an empty candidate set.
        EmptyInput => EmptyInput { .. } => "ZIGFIX_EMPTY_INPUT",
        /// A forced model has no match in the capability catalog.
        DefinitionNotFound => DefinitionNotFound { .. } => "ZIGFIX_DEFINITION_NOT_FOUND",
        /// Two device types that can never be adjacent reached the resolver.
        InvalidRelationship => InvalidRelationship { .. } => "ZIGFIX_INVALID_RELATIONSHIP",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GenerateError>;
