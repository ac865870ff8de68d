/// Wires a facet struct (one holding a `base: Base`) into [`crate::Type`]:
/// implements [`crate::Typed`], the conversion into its `Type` variant, and
/// `Debug`.
macro_rules! facet {
    ($facet:ident => $variant:ident) => {
        impl $crate::Typed for $facet {
            fn base(&self) -> &$crate::Base {
                &self.base
            }
        }

        impl From<$facet> for $crate::Type {
            fn from(facet: $facet) -> Self {
                $crate::Type::$variant(facet)
            }
        }

        impl core::fmt::Debug for $facet {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_struct(stringify!($facet))
                    .field("shape", &self.base.shape)
                    .field("has_value", &self.base.handle.is_some())
                    .finish_non_exhaustive()
            }
        }
    };
}

pub(crate) use facet;
