//! Helper macro for closed keyword vocabularies.
//!
//! Categories, positions, statuses and sort orders all travel as lowercase
//! snake-case keywords in JSON bodies, query strings and database columns.
//! The macro generates the enum together with its `Display`, `FromStr` and
//! serde implementations so every vocabulary parses the same way.

macro_rules! keyword_enum {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            error = $error:ident,
            label = $label:literal,
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $keyword:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $keyword)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Stable keyword used on the wire and in storage.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $keyword,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        #[doc = concat!("Error returned when a keyword is not a known ", $label, ".")]
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $error {
            /// The rejected input.
            pub value: String,
        }

        impl $error {
            /// Comma separated list of accepted keywords.
            #[must_use]
            pub fn expected() -> String {
                $name::ALL
                    .iter()
                    .map(|variant| variant.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }

        impl ::std::fmt::Display for $error {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(
                    f,
                    "unknown {} '{}'; expected one of: {}",
                    $label,
                    self.value,
                    Self::expected()
                )
            }
        }

        impl ::std::error::Error for $error {}

        impl ::std::str::FromStr for $name {
            type Err = $error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($keyword => Ok(Self::$variant),)+
                    other => Err($error {
                        value: other.to_owned(),
                    }),
                }
            }
        }
    };
}

pub(crate) use keyword_enum;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    keyword_enum! {
        /// Sample vocabulary.
        pub enum Colour {
            error = ParseColourError,
            label = "colour",
            Red => "red",
            DeepBlue => "deep_blue",
        }
    }

    #[rstest]
    #[case("red", Colour::Red)]
    #[case("deep_blue", Colour::DeepBlue)]
    fn parses_known_keywords(#[case] raw: &str, #[case] expected: Colour) {
        assert_eq!(raw.parse::<Colour>(), Ok(expected));
        assert_eq!(expected.to_string(), raw);
    }

    #[rstest]
    fn unknown_keywords_list_alternatives() {
        let err = "Red".parse::<Colour>().expect_err("case sensitive");
        assert_eq!(
            err.to_string(),
            "unknown colour 'Red'; expected one of: red, deep_blue"
        );
    }

    #[rstest]
    fn serde_uses_keywords() {
        let json = serde_json::to_string(&Colour::DeepBlue).expect("serialise");
        assert_eq!(json, "\"deep_blue\"");
        let parsed: Colour = serde_json::from_str("\"red\"").expect("deserialise");
        assert_eq!(parsed, Colour::Red);
    }
}
