//! Round-trip and counter-stream fuzzing.
//!
//! Decryption must invert encryption for every key and block pattern, and
//! counter processing must match the scalar model and advance the counter
//! exactly once per block.

#![no_main]

use arbitrary::Arbitrary;
use blockcipher::{simon128, speck128, BlockFlags, Simon128, Speck128};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  key: [u8; 32],
  key_len: u8,
  data: Vec<u8>,
  counter: [u8; 16],
  counter_blocks: u8,
}

fuzz_target!(|input: Input| {
  let key_len = match input.key_len % 3 {
    0 => 16,
    1 => 24,
    _ => 32,
  };
  let key = &input.key[..key_len];
  let mut data = input.data;
  data.truncate(1024);
  let whole = data.len() - data.len() % 16;

  let speck = Speck128::new(key).unwrap();
  let simon = Simon128::new(key).unwrap();

  let mut ciphertext = vec![0u8; data.len()];
  let mut recovered = vec![0u8; whole];

  speck.encrypt_blocks(&data, None, &mut ciphertext, BlockFlags::ALLOW_PARALLEL);
  speck.decrypt_blocks(&ciphertext[..whole], None, &mut recovered, BlockFlags::ALLOW_PARALLEL);
  assert_eq!(recovered, data[..whole], "speck round-trip");

  simon.encrypt_blocks(&data, None, &mut ciphertext, BlockFlags::ALLOW_PARALLEL);
  simon.decrypt_blocks(&ciphertext[..whole], None, &mut recovered, BlockFlags::ALLOW_PARALLEL);
  assert_eq!(recovered, data[..whole], "simon round-trip");

  let len = usize::from(input.counter_blocks % 32) * 16;
  let mut output = vec![0u8; len];
  let mut want = vec![0u8; len];

  let mut counter = input.counter;
  let mut model_counter = input.counter;
  speck.encrypt_counter_blocks(&mut counter, None, &mut output);
  speck128::kernel_test::model_encrypt_counter_blocks(&speck, &mut model_counter, None, &mut want);
  assert_eq!(output, want, "speck counter stream");
  assert_eq!(counter, model_counter, "speck counter advance");

  let mut counter = input.counter;
  let mut model_counter = input.counter;
  simon.encrypt_counter_blocks(&mut counter, None, &mut output);
  simon128::kernel_test::model_encrypt_counter_blocks(&simon, &mut model_counter, None, &mut want);
  assert_eq!(output, want, "simon counter stream");
  assert_eq!(counter, model_counter, "simon counter advance");
});
