//! Kernel testing utilities for SIMON-128.
//!
//! Runs every bulk kernel available on the current CPU over the same input
//! and returns the results, so tests and fuzz targets can verify
//! cross-kernel equivalence. The oracle is the scalar reference
//! implementation driven block at a time by the model driver, which is
//! obviously correct by inspection.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use traits::BlockFlags;

use super::Simon128;
use crate::model;

/// Result from running one kernel.
#[derive(Debug, Clone)]
pub struct KernelResult {
  /// Kernel name (e.g. "reference", "portable", "x86_64/ssse3").
  pub name: &'static str,
  /// Processed bytes (whole blocks only).
  pub output: Vec<u8>,
}

/// Scalar model of the bulk driver over the reference cipher (encryption).
pub fn model_encrypt_blocks(
  cipher: &Simon128,
  input: &[u8],
  xor: Option<&[u8]>,
  output: &mut [u8],
  flags: BlockFlags,
) -> usize {
  model::process_blocks(|b| cipher.reference_encrypt_block(b), input, xor, output, flags)
}

/// Scalar model of the bulk driver over the reference cipher (decryption).
pub fn model_decrypt_blocks(
  cipher: &Simon128,
  input: &[u8],
  xor: Option<&[u8]>,
  output: &mut [u8],
  flags: BlockFlags,
) -> usize {
  model::process_blocks(|b| cipher.reference_decrypt_block(b), input, xor, output, flags)
}

/// Scalar model of counter processing over the reference cipher.
pub fn model_encrypt_counter_blocks(
  cipher: &Simon128,
  counter: &mut [u8; 16],
  xor: Option<&[u8]>,
  output: &mut [u8],
) -> usize {
  model::process_counter_blocks(|b| cipher.reference_encrypt_block(b), counter, xor, output)
}

fn whole_blocks(data: &[u8]) -> usize {
  data.len() - data.len() % 16
}

/// Run all available encryption kernels over `data` (plain parallel ECB).
#[must_use]
pub fn run_all_enc_kernels(cipher: &Simon128, data: &[u8]) -> Vec<KernelResult> {
  run_all_kernels(cipher, data, true)
}

/// Run all available decryption kernels over `data`.
#[must_use]
pub fn run_all_dec_kernels(cipher: &Simon128, data: &[u8]) -> Vec<KernelResult> {
  run_all_kernels(cipher, data, false)
}

fn run_all_kernels(cipher: &Simon128, data: &[u8], encrypt: bool) -> Vec<KernelResult> {
  let flags = BlockFlags::ALLOW_PARALLEL;
  let mut results = Vec::new();

  // Oracle: scalar reference, block at a time.
  let mut reference = alloc::vec![0u8; data.len()];
  if encrypt {
    model_encrypt_blocks(cipher, data, None, &mut reference, flags);
  } else {
    model_decrypt_blocks(cipher, data, None, &mut reference, flags);
  }
  reference.truncate(whole_blocks(data));
  results.push(KernelResult {
    name: "reference",
    output: reference,
  });

  // Portable driver.
  {
    let mut output = alloc::vec![0u8; data.len()];
    // SAFETY: buffers cover `data.len()` bytes; no counter flag.
    let remaining = unsafe {
      if encrypt {
        super::portable::enc_advanced_process_blocks(
          cipher.splat_keys(),
          cipher.rounds(),
          data.as_ptr(),
          core::ptr::null(),
          output.as_mut_ptr(),
          data.len(),
          flags,
        )
      } else {
        super::portable::dec_advanced_process_blocks(
          cipher.scalar_keys(),
          cipher.rounds(),
          data.as_ptr(),
          core::ptr::null(),
          output.as_mut_ptr(),
          data.len(),
          flags,
        )
      }
    };
    debug_assert_eq!(remaining, data.len() % 16);
    output.truncate(whole_blocks(data));
    results.push(KernelResult {
      name: "portable",
      output,
    });
  }

  #[cfg(target_arch = "x86_64")]
  if platform::caps().has(platform::caps::x86::SSSE3) {
    let mut output = alloc::vec![0u8; data.len()];
    // SAFETY: SSSE3 verified above; buffers cover `data.len()` bytes.
    unsafe {
      if encrypt {
        super::x86_64::enc_advanced_process_blocks(
          cipher.splat_keys(),
          cipher.rounds(),
          data.as_ptr(),
          core::ptr::null(),
          output.as_mut_ptr(),
          data.len(),
          flags,
        );
      } else {
        super::x86_64::dec_advanced_process_blocks(
          cipher.scalar_keys(),
          cipher.rounds(),
          data.as_ptr(),
          core::ptr::null(),
          output.as_mut_ptr(),
          data.len(),
          flags,
        );
      }
    }
    output.truncate(whole_blocks(data));
    results.push(KernelResult {
      name: "x86_64/ssse3",
      output,
    });
  }

  #[cfg(target_arch = "aarch64")]
  if platform::caps().has(platform::caps::aarch64::NEON) {
    let mut output = alloc::vec![0u8; data.len()];
    // SAFETY: NEON verified above; buffers cover `data.len()` bytes.
    unsafe {
      if encrypt {
        super::aarch64::enc_advanced_process_blocks(
          cipher.splat_keys(),
          cipher.rounds(),
          data.as_ptr(),
          core::ptr::null(),
          output.as_mut_ptr(),
          data.len(),
          flags,
        );
      } else {
        super::aarch64::dec_advanced_process_blocks(
          cipher.scalar_keys(),
          cipher.rounds(),
          data.as_ptr(),
          core::ptr::null(),
          output.as_mut_ptr(),
          data.len(),
          flags,
        );
      }
    }
    output.truncate(whole_blocks(data));
    results.push(KernelResult {
      name: "aarch64/neon",
      output,
    });
  }

  #[cfg(target_arch = "powerpc64")]
  if platform::caps().has(platform::caps::powerpc64::VECTOR_READY) {
    let mut output = alloc::vec![0u8; data.len()];
    // SAFETY: ISA 2.07 vectors verified above; buffers cover `data.len()` bytes.
    unsafe {
      if encrypt {
        super::powerpc64::enc_advanced_process_blocks(
          cipher.splat_keys(),
          cipher.rounds(),
          data.as_ptr(),
          core::ptr::null(),
          output.as_mut_ptr(),
          data.len(),
          flags,
        );
      } else {
        super::powerpc64::dec_advanced_process_blocks(
          cipher.scalar_keys(),
          cipher.rounds(),
          data.as_ptr(),
          core::ptr::null(),
          output.as_mut_ptr(),
          data.len(),
          flags,
        );
      }
    }
    output.truncate(whole_blocks(data));
    results.push(KernelResult {
      name: "powerpc64/vsx",
      output,
    });
  }

  results
}

/// Verify all encryption kernels agree; returns the common output.
pub fn verify_enc_kernels(cipher: &Simon128, data: &[u8]) -> Result<Vec<u8>, String> {
  verify_agreement(run_all_enc_kernels(cipher, data))
}

/// Verify all decryption kernels agree; returns the common output.
pub fn verify_dec_kernels(cipher: &Simon128, data: &[u8]) -> Result<Vec<u8>, String> {
  verify_agreement(run_all_dec_kernels(cipher, data))
}

fn verify_agreement(results: Vec<KernelResult>) -> Result<Vec<u8>, String> {
  use alloc::format;

  let mut iter = results.into_iter();
  let first = iter.next().ok_or_else(|| "no kernels available".to_string())?;
  for result in iter {
    if result.output != first.output {
      return Err(format!("kernel mismatch: {} disagrees with {}", result.name, first.name));
    }
  }
  Ok(first.output)
}

#[cfg(test)]
mod tests {
  extern crate std;

  use super::*;
  use crate::testutil::fill_pattern;

  fn cipher() -> Simon128 {
    // 24-byte key: 69 rounds, so the odd-round tail swap is on every path.
    Simon128::new(&fill_pattern(11, 24)).unwrap()
  }

  #[test]
  fn all_kernels_agree_empty() {
    verify_enc_kernels(&cipher(), &[]).unwrap();
    verify_dec_kernels(&cipher(), &[]).unwrap();
  }

  #[test]
  fn all_kernels_agree_block_counts() {
    for key_len in [16usize, 24, 32] {
      let cipher = Simon128::new(&fill_pattern(key_len as u64, key_len)).unwrap();
      for blocks in [1usize, 2, 3, 5, 6, 7, 12, 13, 64] {
        let data = fill_pattern(blocks as u64, blocks * 16);
        verify_enc_kernels(&cipher, &data).unwrap();
        verify_dec_kernels(&cipher, &data).unwrap();
      }
    }
  }

  #[test]
  fn all_kernels_agree_ragged_tail() {
    let cipher = cipher();
    let data = fill_pattern(31, 5 * 16 + 3);
    verify_enc_kernels(&cipher, &data).unwrap();
  }
}
