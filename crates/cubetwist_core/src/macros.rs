/// Defines newtype wrappers around unsigned integers used as indices into the
/// cube's global part numbering.
macro_rules! cube_index_struct {
    (
        $(
            $(#[$attr:meta])*
            $struct_vis:vis struct $struct_name:ident($inner_vis:vis $inner_type:ty);
        )+
    ) => {
        $(
            $(#[$attr])*
            #[derive(
                Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
                serde::Serialize, serde::Deserialize,
            )]
            #[serde(transparent)]
            #[repr(transparent)]
            $struct_vis struct $struct_name($inner_vis $inner_type);

            impl ::std::fmt::Debug for $struct_name {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    write!(f, "{}#{}", stringify!($struct_name), self.0)
                }
            }
            impl ::std::fmt::Display for $struct_name {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    write!(f, "#{}", self.0)
                }
            }

            impl $struct_name {
                /// User-friendly type name.
                pub const TYPE_NAME: &'static str = stringify!($struct_name);

                /// Returns the index as a `usize`.
                pub fn to_index(self) -> usize {
                    self.0 as usize
                }

                /// Returns an iterator over all indices up to `count`
                /// (exclusive).
                pub fn iter(
                    count: usize,
                ) -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
                    let count = count.min(<$inner_type>::MAX as usize + 1);
                    (0..count).map(|i| Self(i as $inner_type))
                }
            }

            impl From<$struct_name> for usize {
                fn from(value: $struct_name) -> usize {
                    value.to_index()
                }
            }
        )+
    };
}
