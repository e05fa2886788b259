use allium_hashes::Hasher;

pub mod header;
pub mod kernel;

pub trait HasherExtensions {
    /// Writes the i32 as a little endian u8 array
    fn write_i32(&mut self, element: i32) -> &mut Self;

    /// Writes the u32 as a little endian u8 array
    fn write_u32(&mut self, element: u32) -> &mut Self;

    /// Writes the u64 as a little endian u8 array
    fn write_u64(&mut self, element: u64) -> &mut Self;
}

impl<T: Hasher> HasherExtensions for T {
    #[inline(always)]
    fn write_i32(&mut self, element: i32) -> &mut Self {
        self.update(element.to_le_bytes())
    }

    #[inline(always)]
    fn write_u32(&mut self, element: u32) -> &mut Self {
        self.update(element.to_le_bytes())
    }

    #[inline(always)]
    fn write_u64(&mut self, element: u64) -> &mut Self {
        self.update(element.to_le_bytes())
    }
}
