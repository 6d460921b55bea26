//! Geometry buffer lifetime and geometric growth.

use crate::error::GpuError;
use crate::gpu::{BufferInfo, BufferUsage, GpuDevice, MemoryUsage};

/// Floor for freshly created geometry buffers.
pub const MIN_BUFFER_CAPACITY: usize = 1024 * 1024;

/// A device buffer handle together with the capacity it was created with.
#[derive(Debug)]
pub struct SizedBuffer<B> {
    pub handle: B,
    pub capacity: usize,
}

/// Capacity for a buffer that must hold `needed` bytes: double the need,
/// floor at [`MIN_BUFFER_CAPACITY`], round up to a whole number of elements.
pub fn grow_capacity(needed: usize, stride: usize) -> usize {
    debug_assert!(stride > 0);
    let mut capacity = needed.saturating_mul(2).max(MIN_BUFFER_CAPACITY);
    if capacity % stride != 0 {
        capacity = (capacity / stride + 1) * stride;
    }
    capacity
}

/// Fit `bytes` into the slot, recreating the buffer when capacity falls
/// short.
///
/// Returns whether the buffer was created, which invalidates any binding
/// built from the previous handle.
pub(crate) fn ensure_capacity<G: GpuDevice>(
    device: &mut G,
    slot: &mut Option<SizedBuffer<G::Buffer>>,
    bytes: &[u8],
    stride: usize,
    usage: BufferUsage,
    label: &str,
) -> Result<bool, GpuError> {
    let needed = bytes.len();
    if let Some(buffer) = slot.as_mut() {
        if needed <= buffer.capacity {
            device.write_buffer(&mut buffer.handle, bytes)?;
            device.flush_buffer(&mut buffer.handle, needed)?;
            return Ok(false);
        }
    }

    // Release the old buffer before its replacement is created.
    *slot = None;
    let capacity = grow_capacity(needed, stride);
    tracing::debug!(
        target: "scrim-render",
        label,
        needed,
        capacity,
        "creating geometry buffer"
    );
    let handle = device.create_buffer(
        &BufferInfo {
            label,
            size: capacity,
            usage,
            memory: MemoryUsage::CpuWrite,
        },
        bytes,
    )?;
    *slot = Some(SizedBuffer { handle, capacity });
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_doubles_and_floors_at_one_mebibyte() {
        assert_eq!(grow_capacity(500, 2), MIN_BUFFER_CAPACITY);
        assert_eq!(grow_capacity(MIN_BUFFER_CAPACITY, 2), 2 * MIN_BUFFER_CAPACITY);
        assert_eq!(grow_capacity(3 * MIN_BUFFER_CAPACITY, 4), 6 * MIN_BUFFER_CAPACITY);
    }

    #[test]
    fn growth_rounds_up_to_whole_elements() {
        // 1 MiB is 16 bytes past a multiple of the 20 byte vertex stride
        assert_eq!(grow_capacity(500, 20), MIN_BUFFER_CAPACITY + 4);
        assert_eq!(grow_capacity(500, 20) % 20, 0);
        // already-aligned sizes stay put
        assert_eq!(grow_capacity(MIN_BUFFER_CAPACITY / 2, 4), MIN_BUFFER_CAPACITY);
    }
}
