//! Macros for ergonomic controller construction.

/// Generate a [`State`](crate::core::State) implementation for simple enums.
///
/// The generated enum derives everything the trait bounds require, and
/// `name()` returns the variant identifier.
///
/// # Example
///
/// ```
/// use dwell::state_enum;
///
/// state_enum! {
///     pub enum Light {
///         Red,
///         Green,
///         Yellow,
///         FlashingRed,
///     }
///     final: [FlashingRed]
/// }
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }
        }
    };
}
