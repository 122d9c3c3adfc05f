//! Integer values usable with `ChainTable::increment_or_insert`.

/// A value that starts at one and counts up.
pub trait Counter: Copy {
    const ONE: Self;

    /// Next count. Saturates at the type's maximum.
    fn increment(self) -> Self;
}

macro_rules! impl_counter {
    ($($t:ty),* $(,)?) => {
        $(
            impl Counter for $t {
                const ONE: Self = 1;

                #[inline]
                fn increment(self) -> Self {
                    self.saturating_add(1)
                }
            }
        )*
    };
}

impl_counter!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
