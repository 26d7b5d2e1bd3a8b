//! Domain entities produced by the repositories.
//!
//! Every entity is an immutable value copied field-for-field from its wire
//! DTO. Identity is the server-assigned integer id.

pub mod attendance;
pub mod auth;
pub mod finance;
pub mod reports;
pub mod students;

pub use attendance::*;
pub use auth::*;
pub use finance::*;
pub use reports::*;
pub use students::*;

/// Declare a status-like enum parsed from a server string.
///
/// Parsing trims and lower-cases the input before matching; anything
/// unrecognised is kept in `Other` instead of failing the whole response.
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub fn from_wire(value: &str) -> Self {
                let normalized = value.trim().to_lowercase();
                match normalized.as_str() {
                    $($wire => $name::$variant,)+
                    _ => $name::Other(normalized),
                }
            }

            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $wire,)+
                    $name::Other(value) => value.as_str(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Ok($name::from_wire(value))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}
