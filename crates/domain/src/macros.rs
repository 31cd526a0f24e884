//! Display/FromStr boilerplate for small domain enums
//!
//! Enums such as [`ResourceKind`](crate::ResourceKind) and
//! [`OfferState`](crate::OfferState) have a lowercase human form used in
//! log fields and chat text. This macro keeps that mapping in one place.
//!
//! # Example
//!
//! ```rust
//! use osdb_domain::impl_domain_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Slot {
//!     Head,
//!     Body,
//! }
//!
//! impl_domain_enum_conversions!(Slot {
//!     Head => "head",
//!     Body => "body",
//! });
//!
//! assert_eq!(Slot::Head.to_string(), "head");
//! assert_eq!("BODY".parse::<Slot>().unwrap(), Slot::Body);
//! ```

/// Implements `Display` and case-insensitive `FromStr` for a fieldless enum.
///
/// String forms must be lowercase; parsing lowercases its input first.
#[macro_export]
macro_rules! impl_domain_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Lowercase name of the variant.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::OsdbError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err($crate::OsdbError::InvalidInput(format!(
                        "unknown {}: {}",
                        stringify!($enum_name),
                        s
                    ))),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::OsdbError;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tab {
        Main,
        Runes,
    }

    impl_domain_enum_conversions!(Tab {
        Main => "main",
        Runes => "runes",
    });

    #[test]
    fn display_uses_lowercase_form() {
        assert_eq!(Tab::Main.to_string(), "main");
        assert_eq!(Tab::Runes.as_str(), "runes");
    }

    #[test]
    fn parsing_ignores_case_and_padding() {
        assert_eq!(Tab::from_str("RUNES").unwrap(), Tab::Runes);
        assert_eq!(Tab::from_str(" Main ").unwrap(), Tab::Main);
    }

    #[test]
    fn unknown_names_are_invalid_input() {
        let err = Tab::from_str("seeds").unwrap_err();
        assert!(matches!(err, OsdbError::InvalidInput(ref msg) if msg.contains("Tab")));
    }
}
