//! Helper macro for generating domain port error enums.
//!
//! Every port error in this crate is a set of message-carrying variants, so
//! the macro is specialised to that shape: each variant holds one `message`
//! field and gains a snake-case constructor accepting anything convertible
//! into a `String`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $display:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($display)]
                $variant {
                    /// Adapter-supplied failure detail.
                    message: String,
                },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    /// Build this variant from any message-convertible input.
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant { message: message.into() }
                    }
                }
            )*

            /// Adapter-supplied failure detail carried by the variant.
            pub fn message(&self) -> &str {
                match self {
                    $(
                        Self::$variant { message } => message.as_str(),
                    )*
                }
            }
        }
    };
}

pub(crate) use define_port_error;
