//! Shared dispatch helpers.
//!
//! Both ciphers select among the same backend set, so the backend naming and
//! the safe-entry argument checks live here; the per-cipher modules hold the
//! actual capability-gated calls (the kernel entry points are monomorphized
//! per cipher and direction).

use traits::BlockFlags;

/// Name of the kernel backend the dispatcher would select on this CPU.
pub(crate) fn backend_name() -> &'static str {
  #[cfg(target_arch = "x86_64")]
  if platform::caps().has(platform::caps::x86::SSSE3) {
    return "x86_64/ssse3";
  }

  #[cfg(target_arch = "aarch64")]
  if platform::caps().has(platform::caps::aarch64::NEON) {
    return "aarch64/neon";
  }

  #[cfg(target_arch = "powerpc64")]
  if platform::caps().has(platform::caps::powerpc64::VECTOR_READY) {
    return "powerpc64/vsx";
  }

  "portable"
}

pub(crate) fn check_block_args(input: &[u8], xor: Option<&[u8]>, output: &mut [u8], flags: BlockFlags) {
  assert!(
    !flags.contains(BlockFlags::INPUT_IS_COUNTER),
    "counter processing needs a writable counter block; use the counter entry points"
  );
  assert!(output.len() >= input.len(), "output shorter than input");
  if let Some(stream) = xor {
    assert!(stream.len() >= input.len(), "xor stream shorter than input");
  }
}

pub(crate) fn check_counter_args(xor: Option<&[u8]>, output: &mut [u8]) {
  if let Some(stream) = xor {
    assert!(stream.len() >= output.len(), "xor stream shorter than output");
  }
}
