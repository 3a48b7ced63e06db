use core::fmt::{Debug, Formatter, Result};
use core::mem::size_of;

/// On-disk little-endian integer, read back with `to_ne`
#[derive(Copy, Clone, Default, PartialEq)]
#[repr(transparent)]
pub struct Little<T: Copy>(T);

macro_rules! define {
    ($type:ty) => {
        impl Little<$type> {
            #[inline]
            pub fn to_ne(self) -> $type {
                <$type>::from_le(self.0)
            }
        }

        impl From<$type> for Little<$type> {
            #[inline]
            fn from(value: $type) -> Self {
                Self(value.to_le())
            }
        }

        impl Debug for Little<$type> {
            fn fmt(&self, f: &mut Formatter<'_>) -> Result {
                write!(f, "{}", self.to_ne())
            }
        }
    };
}

define!(u16);
define!(u32);
define!(u64);

/// Marker for on-disk structures made only of integers and byte arrays,
/// so that every bit pattern is a valid value.
///
/// # Safety
///
/// Implementors must be `#[repr(C)]` or `#[repr(C, packed)]` and contain no
/// padding-sensitive, pointer, `bool` or enum fields.
pub(crate) unsafe trait Plain: Copy {}

unsafe impl Plain for Little<u16> {}
unsafe impl Plain for Little<u32> {}
unsafe impl Plain for Little<u64> {}

/// Copies a `T` out of the head of `bytes`, `None` when `bytes` is too short
pub(crate) fn read<T: Plain>(bytes: &[u8]) -> Option<T> {
    if bytes.len() < size_of::<T>() {
        return None;
    }
    Some(unsafe { core::ptr::read_unaligned(bytes.as_ptr() as *const T) })
}

#[cfg(test)]
mod test {
    use super::{Little, read};

    #[test]
    fn test_read_little() {
        let bytes = hex!("78 56 34 12 FF");
        let value: Little<u32> = read(&bytes).unwrap();
        assert_eq!(value.to_ne(), 0x12345678);
        assert_eq!(Little::from(0x12345678u32), value);
        assert!(read::<Little<u64>>(&bytes).is_none());
    }
}
