//! Batch block-cipher interface.

use crate::BlockFlags;

/// Bulk encryption/decryption over whole 16-byte blocks.
///
/// This is the contract chaining-mode drivers program against. An
/// implementation owns an expanded key schedule and fans blocks out to
/// whatever kernels the host CPU supports. All methods are pure with respect
/// to `self`: the schedule is read-only and calls from multiple threads with
/// disjoint buffers need no synchronization.
///
/// # Partial processing
///
/// `encrypt_blocks`/`decrypt_blocks` may process any whole number of blocks
/// and return the count of input bytes they declined to touch (always the
/// sub-block tail for these ciphers). The caller owns padding policy for any
/// remainder.
pub trait BlockCipherBatch {
  /// Cipher block size in bytes.
  const BLOCK_SIZE: usize;

  /// Number of rounds in the expanded schedule.
  fn rounds(&self) -> usize;

  /// Encrypt `input` into `output` under the flag contract.
  ///
  /// `xor` is an optional secondary byte stream: folded into the input before
  /// the cipher when [`BlockFlags::XOR_INPUT`] is set, into the output
  /// otherwise. Returns the number of unprocessed trailing bytes.
  ///
  /// # Panics
  ///
  /// Implementations panic if `output` is shorter than the processed span,
  /// if `xor` is present but shorter than `input`, or if
  /// [`BlockFlags::INPUT_IS_COUNTER`] is requested (counter processing needs
  /// a writable counter block; use [`encrypt_counter_blocks`]).
  ///
  /// [`encrypt_counter_blocks`]: Self::encrypt_counter_blocks
  fn encrypt_blocks(&self, input: &[u8], xor: Option<&[u8]>, output: &mut [u8], flags: BlockFlags) -> usize;

  /// Decrypt `input` into `output` under the flag contract.
  ///
  /// Same contract as [`encrypt_blocks`](Self::encrypt_blocks).
  fn decrypt_blocks(&self, input: &[u8], xor: Option<&[u8]>, output: &mut [u8], flags: BlockFlags) -> usize;

  /// Encrypt a counter stream into `output`.
  ///
  /// `counter` is a block whose low 8 bytes hold a big-endian counter; it is
  /// advanced by one per produced block and left at the next unused value.
  /// When `xor` is supplied it is folded into the cipher output, yielding
  /// CTR-mode ciphertext directly. Returns the unprocessed tail length of
  /// `output`.
  fn encrypt_counter_blocks(&self, counter: &mut [u8; 16], xor: Option<&[u8]>, output: &mut [u8]) -> usize;

  /// Counter processing through the decryption kernels.
  ///
  /// Provided for symmetry with modes that run the inverse cipher over a
  /// counter stream; the contract mirrors
  /// [`encrypt_counter_blocks`](Self::encrypt_counter_blocks).
  fn decrypt_counter_blocks(&self, counter: &mut [u8; 16], xor: Option<&[u8]>, output: &mut [u8]) -> usize;
}
