//! Differential fuzzing of the bulk driver against the scalar model.
//!
//! The dispatched vector driver and the block-at-a-time model must agree on
//! every flag combination, block count and alignment the fuzzer can reach.

#![no_main]

use arbitrary::Arbitrary;
use blockcipher::{simon128, speck128, BlockFlags, Simon128, Speck128};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  key: [u8; 32],
  key_len: u8,
  data: Vec<u8>,
  stream: Vec<u8>,
  parallel: bool,
  pre_xor: bool,
  reverse: bool,
  with_xor: bool,
  decrypt: bool,
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
  if input.with_xor {
    data.truncate(input.stream.len());
  }
  let xor = input.with_xor.then(|| &input.stream[..data.len()]);

  let mut flags = BlockFlags::NONE;
  if input.parallel {
    flags |= BlockFlags::ALLOW_PARALLEL;
  }
  if input.pre_xor {
    flags |= BlockFlags::XOR_INPUT;
  }
  if input.reverse {
    flags |= BlockFlags::REVERSE_DIRECTION;
  }

  let speck = Speck128::new(key).unwrap();
  let simon = Simon128::new(key).unwrap();

  let mut got = vec![0u8; data.len()];
  let mut want = vec![0u8; data.len()];

  if input.decrypt {
    let remaining = speck.decrypt_blocks(&data, xor, &mut got, flags);
    assert_eq!(remaining, data.len() % 16);
    speck128::kernel_test::model_decrypt_blocks(&speck, &data, xor, &mut want, flags);
    assert_eq!(got, want, "speck dec mismatch, flags={flags}");

    let remaining = simon.decrypt_blocks(&data, xor, &mut got, flags);
    assert_eq!(remaining, data.len() % 16);
    simon128::kernel_test::model_decrypt_blocks(&simon, &data, xor, &mut want, flags);
    assert_eq!(got, want, "simon dec mismatch, flags={flags}");
  } else {
    let remaining = speck.encrypt_blocks(&data, xor, &mut got, flags);
    assert_eq!(remaining, data.len() % 16);
    speck128::kernel_test::model_encrypt_blocks(&speck, &data, xor, &mut want, flags);
    assert_eq!(got, want, "speck enc mismatch, flags={flags}");

    let remaining = simon.encrypt_blocks(&data, xor, &mut got, flags);
    assert_eq!(remaining, data.len() % 16);
    simon128::kernel_test::model_encrypt_blocks(&simon, &data, xor, &mut want, flags);
    assert_eq!(got, want, "simon enc mismatch, flags={flags}");
  }
});
