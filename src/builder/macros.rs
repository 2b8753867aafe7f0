//! Macros for ergonomic state declarations.

/// Generate a `State` implementation for a fieldless enum.
///
/// The enum gets `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Debug` and the
/// serde derives, and each variant's name is its identifier.
///
/// # Example
///
/// ```
/// use hysteresis_fsm::state_enum;
/// use hysteresis_fsm::core::State;
///
/// state_enum! {
///     pub enum Fill {
///         Empty,
///         Half,
///         Full,
///     }
/// }
///
/// assert_eq!(Fill::Half.name(), "Half");
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
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize
        )]
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
        }
    };
}
