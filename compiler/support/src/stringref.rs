use static_assertions::assert_eq_size;

/// Corresponds to `MlirStringRef`, a pointer to a byte vector with a length.
///
/// The data is not required to be null-terminated, and may contain
/// interior null bytes or partial UTF-8 sequences; always go through
/// `len` rather than scanning for a terminator.
#[repr(C)]
#[derive(Copy, Clone)]
pub struct StringRef {
    pub data: *const u8,
    pub len: usize,
}

assert_eq_size!(StringRef, (*const u8, usize));

impl StringRef {
    /// Return the underlying data as a byte slice
    ///
    /// A null data pointer is treated as the empty string.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        if self.data.is_null() || self.len == 0 {
            return &[];
        }
        unsafe { core::slice::from_raw_parts(self.data, self.len) }
    }
}
impl Default for StringRef {
    fn default() -> StringRef {
        Self {
            data: core::ptr::null(),
            len: 0,
        }
    }
}
impl From<&[u8]> for StringRef {
    #[inline(always)]
    fn from(bytes: &[u8]) -> Self {
        Self {
            data: bytes.as_ptr(),
            len: bytes.len(),
        }
    }
}
